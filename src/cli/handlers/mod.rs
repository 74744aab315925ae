use std::path::PathBuf;

use chrono::Local;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::task_store::{StoreError, TaskStore};
use crate::model::config::Config;
use crate::ops::task_ops::TaskError;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Resolved locations and settings shared by the CLI and the TUI
#[derive(Debug, Clone)]
pub struct Context {
    pub dir: PathBuf,
    pub config: Config,
    pub task_file: PathBuf,
}

impl Context {
    /// Resolve the working directory, read the config and locate the task file
    pub fn resolve(cli: &Cli) -> Result<Context, Box<dyn std::error::Error>> {
        let dir = match &cli.dir {
            Some(dir) => std::fs::canonicalize(dir)
                .map_err(|e| format!("cannot resolve -C path '{}': {}", dir.display(), e))?,
            None => std::env::current_dir()?,
        };
        let config = config_io::read_config(&dir)?;
        let task_file = config_io::task_file_path(&dir, &config, cli.file.as_deref());
        Ok(Context {
            dir,
            config,
            task_file,
        })
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli, ctx: &Context) -> CmdResult {
    let json = cli.json;
    match cli.command {
        None => Ok(()),
        Some(cmd) => match cmd {
            // Read commands
            Commands::List(args) => cmd_list(ctx, args, json),
            Commands::Stats => cmd_stats(ctx, json),

            // Write commands
            Commands::Add(args) => cmd_add(ctx, args, json),
            Commands::Toggle(args) => cmd_toggle(ctx, args, json),
            Commands::Delete(args) => cmd_delete(ctx, args, json),
            Commands::Edit(args) => cmd_edit(ctx, args, json),
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Open the store, reporting load problems as warnings. A broken file
/// still yields a usable (empty) store.
fn open_store(ctx: &Context) -> TaskStore {
    let outcome = TaskStore::load_all(&ctx.task_file);
    if let Some(err) = &outcome.error {
        eprintln!("warning: {}", err);
    }
    for err in &outcome.record_errors {
        eprintln!("warning: {}", err);
    }
    outcome.store
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(ctx: &Context, args: ListArgs, json: bool) -> CmdResult {
    let store = open_store(ctx);
    let tasks = store.view(args.filter);

    if json {
        println!("{}", serde_json::to_string_pretty(&tasks)?);
        return Ok(());
    }

    if tasks.is_empty() {
        println!("No tasks found.");
        return Ok(());
    }
    let now = Local::now();
    for task in tasks {
        println!(
            "{}",
            format_task_line(task, ctx.config.ui.truncate_at, now)
        );
    }
    Ok(())
}

fn cmd_stats(ctx: &Context, json: bool) -> CmdResult {
    let store = open_store(ctx);
    let stats = store.stats();
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("{}", format_stats(&stats));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(ctx: &Context, args: AddArgs, json: bool) -> CmdResult {
    let mut store = open_store(ctx);
    let text = args.text.join(" ");
    let priority = args.priority.unwrap_or(ctx.config.ui.default_priority);
    let id = store.add(&text, priority)?;

    if json {
        if let Some(task) = store.get(&id) {
            println!("{}", serde_json::to_string_pretty(&AddedJson { task })?);
        }
    } else {
        println!("{}", id);
    }
    Ok(())
}

fn cmd_toggle(ctx: &Context, args: IdArgs, json: bool) -> CmdResult {
    let mut store = open_store(ctx);
    let id = store.resolve(&args.id)?;
    let completed = store.toggle(&id)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&ToggleJson { id: &id, completed })?
        );
    } else {
        let state = if completed { "completed" } else { "active" };
        let short: String = id.chars().take(8).collect();
        println!("{} {}", short, state);
    }
    Ok(())
}

fn cmd_delete(ctx: &Context, args: IdArgs, json: bool) -> CmdResult {
    let mut store = open_store(ctx);
    // Deleting something that is not there is a no-op, not an error
    let removed = match store.resolve(&args.id) {
        Ok(id) => store.delete(&id)?,
        Err(StoreError::Task(TaskError::NotFound(_))) => None,
        Err(e) => return Err(e.into()),
    };

    if json {
        let id = removed.as_ref().map_or(args.id.as_str(), |t| t.id.as_str());
        println!(
            "{}",
            serde_json::to_string_pretty(&DeletedJson {
                id,
                deleted: removed.is_some()
            })?
        );
    } else if let Some(task) = removed {
        println!("deleted {}", task.short_id());
    }
    Ok(())
}

fn cmd_edit(ctx: &Context, args: EditArgs, json: bool) -> CmdResult {
    if args.text.is_none() && args.priority.is_none() {
        return Err("nothing to change: pass --text and/or --priority".into());
    }
    let mut store = open_store(ctx);
    let id = store.resolve(&args.id)?;
    store.edit(&id, args.text.as_deref(), args.priority)?;

    if let Some(task) = store.get(&id) {
        if json {
            println!("{}", serde_json::to_string_pretty(task)?);
        } else {
            println!(
                "{}",
                format_task_line(task, ctx.config.ui.truncate_at, Local::now())
            );
        }
    }
    Ok(())
}
