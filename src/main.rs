use clap::Parser;
use taskdeck::cli::commands::Cli;
use taskdeck::cli::handlers::{self, Context};
use taskdeck::io::logging::{LogTarget, init_logging};
use taskdeck::io::task_store::TaskStore;

fn main() {
    let cli = Cli::parse();

    let ctx = match Context::resolve(&cli) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };
    let level = ctx.config.log.level.as_deref();

    // No subcommand launches the TUI. The terminal is ours, so logs go to a file or nowhere
    let target = match (&cli.command, &ctx.config.log.file) {
        (Some(_), _) => LogTarget::Stderr,
        (None, Some(file)) => LogTarget::File(ctx.dir.join(file)),
        (None, None) => LogTarget::Off,
    };
    if let Err(e) = init_logging(target, level) {
        eprintln!("warning: cannot start logging: {}", e);
    }

    let result = match cli.command {
        None => {
            tracing::info!(file = %ctx.task_file.display(), "starting tui");
            taskdeck::tui::run(TaskStore::load_all(&ctx.task_file), &ctx.config.ui)
        }
        Some(_) => handlers::dispatch(cli, &ctx),
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
