//! Debounced background persistence.
//!
//! Mutations hand snapshots to a `SaveWriter`, which writes only the newest
//! one, at most one debounce interval after the first became pending.
//! Write failures are logged and broadcast; the in-memory board is never
//! rolled back.

use crate::error::{BoardError, Result};
use crate::notification::Notifier;
use crate::storage::{Snapshot, StorageGateway};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, error};

enum WriterMessage {
    Save(Box<Snapshot>),
    Flush(oneshot::Sender<Result<()>>),
}

/// Handle to the background writer task
#[derive(Debug)]
pub struct SaveWriter {
    sender: mpsc::UnboundedSender<WriterMessage>,
    handle: JoinHandle<()>,
}

impl SaveWriter {
    /// Spawn the writer on the current tokio runtime
    pub fn spawn(gateway: StorageGateway, debounce: Duration, notifier: Notifier) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let handle = tokio::spawn(run(receiver, gateway, debounce, notifier));
        Self { sender, handle }
    }

    /// Queue a snapshot; it replaces any snapshot not yet written
    pub fn schedule(&self, snapshot: Snapshot) -> Result<()> {
        self.sender
            .send(WriterMessage::Save(Box::new(snapshot)))
            .map_err(|_| BoardError::WriterClosed)
    }

    /// Write any pending snapshot now and wait for the outcome
    pub async fn flush(&self) -> Result<()> {
        let (reply, outcome) = oneshot::channel();
        self.sender
            .send(WriterMessage::Flush(reply))
            .map_err(|_| BoardError::WriterClosed)?;
        outcome.await.map_err(|_| BoardError::WriterClosed)?
    }

    /// Write any pending snapshot and stop the task
    pub async fn shutdown(self) -> Result<()> {
        let result = self.flush().await;
        drop(self.sender);
        let _ = self.handle.await;
        result
    }
}

async fn run(
    mut receiver: mpsc::UnboundedReceiver<WriterMessage>,
    gateway: StorageGateway,
    debounce: Duration,
    notifier: Notifier,
) {
    let mut pending: Option<Box<Snapshot>> = None;
    // Set when a snapshot first becomes pending; later saves do not move it.
    let mut deadline: Option<Instant> = None;

    loop {
        let message = match deadline {
            Some(at) => {
                tokio::select! {
                    message = receiver.recv() => message,
                    _ = tokio::time::sleep_until(at) => {
                        deadline = None;
                        let _ = write(&gateway, &notifier, pending.take()).await;
                        continue;
                    }
                }
            }
            None => receiver.recv().await,
        };

        match message {
            Some(WriterMessage::Save(snapshot)) => {
                if pending.replace(snapshot).is_some() {
                    debug!("superseded pending save");
                } else {
                    deadline = Some(Instant::now() + debounce);
                }
            }
            Some(WriterMessage::Flush(reply)) => {
                deadline = None;
                let result = write(&gateway, &notifier, pending.take()).await;
                let _ = reply.send(result);
            }
            None => {
                let _ = write(&gateway, &notifier, pending.take()).await;
                break;
            }
        }
    }
}

async fn write(
    gateway: &StorageGateway,
    notifier: &Notifier,
    snapshot: Option<Box<Snapshot>>,
) -> Result<()> {
    let Some(snapshot) = snapshot else {
        return Ok(());
    };
    match gateway.save_snapshot(&snapshot).await {
        Ok(()) => Ok(()),
        Err(e) => {
            error!(error = %e, "background save failed");
            notifier.report("Could not save the board", &e);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{KeyValueStore, MemoryStore, BOARD_KEY};
    use crate::types::{Document, ViewMode};
    use std::sync::Arc;

    fn snapshot(title: &str) -> Snapshot {
        let mut document = Document::default_board();
        document.columns[0].title = title.to_string();
        Snapshot {
            document,
            view_mode: ViewMode::Normal,
        }
    }

    #[tokio::test]
    async fn test_flush_writes_latest_snapshot() {
        let store = Arc::new(MemoryStore::new());
        let gateway = StorageGateway::new(store.clone(), "#f87171");
        let writer = SaveWriter::spawn(gateway.clone(), Duration::from_secs(60), Notifier::new());

        writer.schedule(snapshot("first")).unwrap();
        writer.schedule(snapshot("second")).unwrap();
        assert!(store.get(BOARD_KEY).await.unwrap().is_none());

        writer.flush().await.unwrap();
        let (loaded, _) = gateway.load_document().await.unwrap();
        assert_eq!(loaded.columns[0].title, "second");
    }

    #[tokio::test]
    async fn test_debounce_elapses() {
        let store = Arc::new(MemoryStore::new());
        let gateway = StorageGateway::new(store.clone(), "#f87171");
        let writer = SaveWriter::spawn(gateway, Duration::from_millis(10), Notifier::new());

        writer.schedule(snapshot("soon")).unwrap();
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(store.get(BOARD_KEY).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_steady_saves_still_write_within_debounce() {
        let store = Arc::new(MemoryStore::new());
        let gateway = StorageGateway::new(store.clone(), "#f87171");
        let writer = SaveWriter::spawn(gateway, Duration::from_millis(100), Notifier::new());

        // saves arrive faster than the debounce window for well past it
        for i in 0..20 {
            writer.schedule(snapshot(&format!("edit {i}"))).unwrap();
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        assert!(store.get(BOARD_KEY).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_failed_write_notifies() {
        let store = Arc::new(MemoryStore::with_quota(16));
        let gateway = StorageGateway::new(store, "#f87171");
        let notifier = Notifier::new();
        let mut notifications = notifier.subscribe();
        let writer = SaveWriter::spawn(gateway, Duration::from_secs(60), notifier);

        writer.schedule(snapshot("too big")).unwrap();
        let err = writer.flush().await.unwrap_err();
        assert!(matches!(err, BoardError::Storage { .. }));
        assert!(notifications.recv().await.unwrap().is_error());
    }

    #[tokio::test]
    async fn test_shutdown_writes_pending() {
        let store = Arc::new(MemoryStore::new());
        let gateway = StorageGateway::new(store.clone(), "#f87171");
        let writer = SaveWriter::spawn(gateway, Duration::from_secs(60), Notifier::new());

        writer.schedule(snapshot("last")).unwrap();
        writer.shutdown().await.unwrap();
        assert!(store.get(BOARD_KEY).await.unwrap().is_some());
    }
}
