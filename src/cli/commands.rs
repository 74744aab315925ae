use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::model::filter::Filter;
use crate::model::task::Priority;

#[derive(Parser)]
#[command(name = "td", about = concat!("[x] taskdeck v", env!("CARGO_PKG_VERSION"), " - a to-do list for the terminal"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Directory holding the task file and taskdeck.toml
    #[arg(short = 'C', long = "dir", global = true)]
    pub dir: Option<PathBuf>,

    /// Task file to use instead of the configured one
    #[arg(short = 'f', long = "file", global = true)]
    pub file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List tasks
    List(ListArgs),
    /// Add a task to the end of the list
    Add(AddArgs),
    /// Flip a task between active and completed
    #[command(alias = "done")]
    Toggle(IdArgs),
    /// Delete a task
    #[command(alias = "rm")]
    Delete(IdArgs),
    /// Change a task's text or priority
    Edit(EditArgs),
    /// Show task counts
    Stats,
}

#[derive(Args)]
pub struct ListArgs {
    /// Which tasks to show
    #[arg(long, value_enum, default_value_t = Filter::All)]
    pub filter: Filter,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task text (words are joined with spaces)
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
    /// Priority (high, medium, low); defaults to the configured priority
    #[arg(short, long)]
    pub priority: Option<Priority>,
}

#[derive(Args)]
pub struct IdArgs {
    /// Task id or a unique prefix of it
    pub id: String,
}

#[derive(Args)]
pub struct EditArgs {
    /// Task id or a unique prefix of it
    pub id: String,
    /// New text
    #[arg(long)]
    pub text: Option<String>,
    /// New priority
    #[arg(short, long)]
    pub priority: Option<Priority>,
}
