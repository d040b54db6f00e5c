//! Subcommand dispatch onto board operations

use crate::cli::{ColumnCommand, Commands, CommentCommand, TaskCommand, TaskFields};
use anyhow::{anyhow, Context as _};
use chrono::Utc;
use quickmanage_board::board::{
    ClearBoard, GetBoard, ImportBoard, ListTags, RenderBoard, ToggleViewMode,
};
use quickmanage_board::column::{AddColumn, DeleteColumn, MoveColumn, UpdateColumn};
use quickmanage_board::comment::{AddComment, DeleteComment, UpdateComment};
use quickmanage_board::palette::PALETTE;
use quickmanage_board::task::{
    AddTask, DeleteTask, GetTask, MoveTask, ToggleTaskVisibility, UpdateTask,
};
use quickmanage_board::transfer;
use quickmanage_board::types::{ColumnId, TaskId, ViewMode};
use quickmanage_board::{BoardContext, BoardOperationProcessor};
use serde_json::{json, Value};
use tracing::debug;

/// Run one subcommand against an initialized board
pub async fn run(
    command: Commands,
    ctx: &BoardContext,
    processor: &BoardOperationProcessor,
) -> anyhow::Result<Value> {
    let value = match command {
        Commands::Show => processor.process(&GetBoard::new(), ctx).await?,
        Commands::Render { tag, visibility } => {
            let mut op = RenderBoard::new().with_visibility(visibility.into());
            if let Some(tag) = tag {
                op = op.with_tag(tag);
            }
            processor.process(&op, ctx).await?
        }
        Commands::Tags => processor.process(&ListTags::new(), ctx).await?,
        Commands::Palette => json!(PALETTE),
        Commands::View => processor.process(&ToggleViewMode::new(), ctx).await?,
        Commands::Column(cmd) => run_column(cmd, ctx, processor).await?,
        Commands::Task(cmd) => run_task(cmd, ctx, processor).await?,
        Commands::Comment(cmd) => run_comment(cmd, ctx, processor).await?,
        Commands::Export { dir } => {
            let document = ctx.read().await.document.clone();
            let path = transfer::write_export(
                &dir,
                &ctx.config().product_name,
                Utc::now().date_naive(),
                &document,
            )
            .await?;
            json!({ "path": path })
        }
        Commands::Import { file } => {
            let contents = transfer::read_import(&file)
                .await
                .with_context(|| format!("reading {}", file.display()))?;
            processor.process(&ImportBoard::new(contents), ctx).await?
        }
        Commands::Clear => processor.process(&ClearBoard::new(), ctx).await?,
    };
    Ok(value)
}

async fn run_column(
    cmd: ColumnCommand,
    ctx: &BoardContext,
    processor: &BoardOperationProcessor,
) -> anyhow::Result<Value> {
    let value = match cmd {
        ColumnCommand::Add { title } => processor.process(&AddColumn::new(title), ctx).await?,
        ColumnCommand::Rename { id, title } => {
            processor.process(&UpdateColumn::new(id, title), ctx).await?
        }
        ColumnCommand::Delete { id } => processor.process(&DeleteColumn::new(id), ctx).await?,
        ColumnCommand::Left { id } => processor.process(&MoveColumn::left(id), ctx).await?,
        ColumnCommand::Right { id } => processor.process(&MoveColumn::right(id), ctx).await?,
    };
    Ok(value)
}

async fn run_task(
    cmd: TaskCommand,
    ctx: &BoardContext,
    processor: &BoardOperationProcessor,
) -> anyhow::Result<Value> {
    let value = match cmd {
        TaskCommand::Add {
            column,
            title,
            fields,
        } => {
            let op = apply_add_fields(AddTask::new(column, title), fields);
            processor.process(&op, ctx).await?
        }
        TaskCommand::Get { id } => processor.process(&GetTask::new(id), ctx).await?,
        TaskCommand::Update { id, title, fields } => {
            let mut op = UpdateTask::new(id);
            op.title = title;
            op.description = fields.description;
            op.tag = fields.tag;
            op.tag_color = fields.color;
            op.reference = fields.reference;
            processor.process(&op, ctx).await?
        }
        TaskCommand::Delete { id } => processor.process(&DeleteTask::new(id), ctx).await?,
        TaskCommand::Move {
            id,
            to,
            from,
            index,
        } => {
            let id = TaskId::from(id);
            let from = match from {
                Some(from) => ColumnId::from(from),
                None => source_column(ctx, &id)
                    .await
                    .ok_or_else(|| anyhow!("task {id} is not on the board"))?,
            };
            debug!(%id, %from, %to, index, "moving task");
            processor
                .process(&MoveTask::new(id, from, to, index), ctx)
                .await?
        }
        TaskCommand::Hide { id } => {
            processor
                .process(&ToggleTaskVisibility::new(id), ctx)
                .await?
        }
    };
    Ok(value)
}

async fn run_comment(
    cmd: CommentCommand,
    ctx: &BoardContext,
    processor: &BoardOperationProcessor,
) -> anyhow::Result<Value> {
    let value = match cmd {
        CommentCommand::Add { task, text } => {
            processor.process(&AddComment::new(task, text), ctx).await?
        }
        CommentCommand::Edit { task, id, text } => {
            processor
                .process(&UpdateComment::new(task, id, text), ctx)
                .await?
        }
        CommentCommand::Delete { task, id } => {
            processor.process(&DeleteComment::new(task, id), ctx).await?
        }
    };
    Ok(value)
}

fn apply_add_fields(mut op: AddTask, fields: TaskFields) -> AddTask {
    if let Some(description) = fields.description {
        op = op.with_description(description);
    }
    if let Some(tag) = fields.tag {
        op = op.with_tag(tag);
    }
    if let Some(color) = fields.color {
        op = op.with_tag_color(color);
    }
    if let Some(reference) = fields.reference {
        op = op.with_reference(reference);
    }
    op
}

/// The column a task currently sits in for the active view.
///
/// In presentation mode an unplaced task is shown in the first presentation
/// column, so that is where it moves from.
async fn source_column(ctx: &BoardContext, id: &TaskId) -> Option<ColumnId> {
    let state = ctx.read().await;
    let task = state.document.find_task(id)?;
    match state.view_mode {
        ViewMode::Normal => Some(task.column_id.clone()),
        ViewMode::Presentation => {
            let presentation = state.document.presentation();
            presentation
                .iter()
                .find(|column| column.contains(id))
                .or_else(|| presentation.iter().min_by_key(|column| column.order))
                .map(|column| column.id.clone())
        }
    }
}
