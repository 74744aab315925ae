use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::model::config::Config;

/// Config file name, looked up in the working directory
pub const CONFIG_FILE: &str = "taskdeck.toml";

/// Error type for config loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Read `taskdeck.toml` from `dir`. A missing file gives the defaults.
pub fn read_config(dir: &Path) -> Result<Config, ConfigError> {
    let path = dir.join(CONFIG_FILE);
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Config::default()),
        Err(source) => return Err(ConfigError::Read { path, source }),
    };
    toml::from_str(&text).map_err(|source| ConfigError::Parse { path, source })
}

/// Where the task file lives: an explicit override, else the configured
/// name. Relative paths are taken from `dir`.
pub fn task_file_path(dir: &Path, config: &Config, file_override: Option<&Path>) -> PathBuf {
    let file = file_override
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&config.store.file));
    if file.is_absolute() {
        file
    } else {
        dir.join(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::Priority;
    use tempfile::TempDir;

    #[test]
    fn missing_config_is_default() {
        let tmp = TempDir::new().unwrap();
        let config = read_config(tmp.path()).unwrap();
        assert_eq!(config.store.file, "tasks.json");
    }

    #[test]
    fn reads_config_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            "[store]\nfile = \"todo.json\"\n\n[ui]\ndefault_priority = \"low\"\n",
        )
        .unwrap();
        let config = read_config(tmp.path()).unwrap();
        assert_eq!(config.store.file, "todo.json");
        assert_eq!(config.ui.default_priority, Priority::Low);
    }

    #[test]
    fn bad_config_is_an_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "[ui\ntruncate_at = ").unwrap();
        let err = read_config(tmp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("taskdeck.toml"));
    }

    #[test]
    fn task_file_resolution() {
        let dir = Path::new("/work");
        let config = Config::default();
        assert_eq!(
            task_file_path(dir, &config, None),
            PathBuf::from("/work/tasks.json")
        );
        assert_eq!(
            task_file_path(dir, &config, Some(Path::new("other.json"))),
            PathBuf::from("/work/other.json")
        );
        assert_eq!(
            task_file_path(dir, &config, Some(Path::new("/abs/t.json"))),
            PathBuf::from("/abs/t.json")
        );
    }
}
