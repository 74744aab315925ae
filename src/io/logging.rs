use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Where log lines go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// CLI commands. Silent unless a level is configured, since
    /// commands print their own warnings.
    Stderr,
    /// The TUI owns the terminal, so it can only log to a file
    File(PathBuf),
    Off,
}

/// Install the global subscriber. `RUST_LOG` overrides `level`.
pub fn init_logging(target: LogTarget, level: Option<&str>) -> io::Result<()> {
    let default_level = match target {
        LogTarget::Stderr => "off",
        _ => "info",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.unwrap_or(default_level)));

    // A second init (tests, repeated runs in one process) keeps the first subscriber
    match target {
        LogTarget::Off => {}
        LogTarget::Stderr => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .with_target(false)
                .without_time()
                .try_init();
        }
        LogTarget::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(&path)?;
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init();
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unopenable_log_file_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("missing").join("taskdeck.log");
        let err = init_logging(LogTarget::File(path), Some("info")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn stderr_and_off_always_succeed() {
        assert!(init_logging(LogTarget::Off, None).is_ok());
        assert!(init_logging(LogTarget::Stderr, Some("off")).is_ok());
        // A second install keeps the first subscriber and still succeeds
        assert!(init_logging(LogTarget::Stderr, None).is_ok());
    }
}
