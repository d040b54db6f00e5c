use clap::{Args, Parser, Subcommand, ValueEnum};
use quickmanage_board::types::Visibility;
use std::path::PathBuf;

// Wrapper for argument parsing since the library's Visibility doesn't derive ValueEnum
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Default)]
pub enum VisibilityArg {
    #[default]
    All,
    Visible,
    Hidden,
}

impl From<VisibilityArg> for Visibility {
    fn from(arg: VisibilityArg) -> Self {
        match arg {
            VisibilityArg::All => Visibility::All,
            VisibilityArg::Visible => Visibility::Visible,
            VisibilityArg::Hidden => Visibility::Hidden,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "quickmanage")]
#[command(version)]
#[command(about = "A local kanban board with a presentation view")]
#[command(long_about = "
quickmanage keeps a kanban board in a local directory. Columns hold ordered
tasks; a presentation view lets you triage tasks into a separate layout
without moving them on the real board.

Every command prints JSON on stdout. Logs go to stderr.

Example usage:
  quickmanage show                                 # Full board state
  quickmanage task add <column-id> \"Fix login\"     # Add a task
  quickmanage task move <task-id> <column-id> -i 0 # Move to top of a column
  quickmanage view                                 # Toggle presentation view
  quickmanage export --dir backups                 # Write an export file
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file to load after the default locations
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the board (overrides config)
    #[arg(long, global = true)]
    pub storage_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Suppress all logging except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the document, view mode and loading flag
    Show,
    /// Print the columns as the active view shows them
    Render {
        /// Only tasks with this tag
        #[arg(long)]
        tag: Option<String>,
        /// Filter on the hidden flag
        #[arg(long, value_enum, default_value_t)]
        visibility: VisibilityArg,
    },
    /// List distinct tags with their colors
    Tags,
    /// List the suggested tag colors
    Palette,
    /// Toggle between normal and presentation view
    View,
    /// Column commands
    #[command(subcommand)]
    Column(ColumnCommand),
    /// Task commands
    #[command(subcommand)]
    Task(TaskCommand),
    /// Comment commands
    #[command(subcommand)]
    Comment(CommentCommand),
    /// Write the board to <product>-board-<date>.json
    Export {
        /// Directory for the export file
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
    /// Replace the board with the contents of an export file
    Import {
        /// The file to import
        file: PathBuf,
    },
    /// Erase the board and start over with the defaults
    Clear,
}

#[derive(Subcommand, Debug)]
pub enum ColumnCommand {
    /// Append a column to the active view
    Add { title: String },
    /// Rename a column
    Rename { id: String, title: String },
    /// Delete a column
    Delete { id: String },
    /// Swap a column with its left neighbour
    Left { id: String },
    /// Swap a column with its right neighbour
    Right { id: String },
}

#[derive(Args, Debug, Default, Clone)]
pub struct TaskFields {
    /// Longer description
    #[arg(long)]
    pub description: Option<String>,
    /// Tag label
    #[arg(long)]
    pub tag: Option<String>,
    /// Tag color as #rrggbb
    #[arg(long)]
    pub color: Option<String>,
    /// External reference
    #[arg(long)]
    pub reference: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum TaskCommand {
    /// Add a task to a column
    Add {
        column: String,
        title: String,
        #[command(flatten)]
        fields: TaskFields,
    },
    /// Print one task
    Get { id: String },
    /// Change task fields
    Update {
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        #[command(flatten)]
        fields: TaskFields,
    },
    /// Delete a task
    Delete { id: String },
    /// Move a task to a column of the active view
    Move {
        id: String,
        /// Destination column
        to: String,
        /// Source column; found automatically when omitted
        #[arg(long)]
        from: Option<String>,
        /// Position in the destination column
        #[arg(short, long, default_value_t = usize::MAX)]
        index: usize,
    },
    /// Toggle the hidden flag
    Hide { id: String },
}

#[derive(Subcommand, Debug)]
pub enum CommentCommand {
    /// Comment on a task
    Add { task: String, text: String },
    /// Edit a comment
    Edit { task: String, id: String, text: String },
    /// Delete a comment
    Delete { task: String, id: String },
}
