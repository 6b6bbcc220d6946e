//! Runtime configuration resolved from flags, environment, and defaults.

use crate::args::Cli;
use anyhow::{Context, Result};
use shoplist_core::default_log_level;
use std::path::{Path, PathBuf};

pub const DATA_DIR_ENV: &str = "SHOPLIST_DATA_DIR";
pub const LOG_LEVEL_ENV: &str = "SHOPLIST_LOG_LEVEL";
const APP_DIR_NAME: &str = "shoplist";
const DB_FILE_NAME: &str = "shoplist.sqlite3";
const LOG_DIR_NAME: &str = "logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub log_level: String,
    pub assume_yes: bool,
    pub quiet: bool,
}

impl AppConfig {
    /// Flag beats environment beats platform default.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let data_dir = match cli
            .data_dir
            .clone()
            .or_else(|| non_empty_env(DATA_DIR_ENV).map(PathBuf::from))
        {
            Some(dir) => dir,
            None => dirs::data_dir()
                .context("no platform data directory; pass --data-dir")?
                .join(APP_DIR_NAME),
        };

        let log_level = cli
            .log_level
            .clone()
            .or_else(|| non_empty_env(LOG_LEVEL_ENV))
            .unwrap_or_else(|| default_log_level().to_string());

        Ok(Self {
            data_dir: absolutize(&data_dir)?,
            log_level,
            assume_yes: cli.yes,
            quiet: cli.quiet,
        })
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join(LOG_DIR_NAME)
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    Ok(cwd.join(path))
}

#[cfg(test)]
mod tests {
    use super::AppConfig;
    use crate::args::Cli;
    use clap::Parser;
    use std::path::Path;

    #[test]
    fn flags_drive_paths_and_level() {
        let cli = Cli::parse_from([
            "shoplist",
            "--data-dir",
            "/tmp/shoplist-test",
            "--log-level",
            "warn",
            "--yes",
            "summary",
        ]);
        let config = AppConfig::resolve(&cli).unwrap();
        assert_eq!(config.data_dir, Path::new("/tmp/shoplist-test"));
        assert_eq!(config.db_path(), Path::new("/tmp/shoplist-test/shoplist.sqlite3"));
        assert_eq!(config.log_dir(), Path::new("/tmp/shoplist-test/logs"));
        assert_eq!(config.log_level, "warn");
        assert!(config.assume_yes);
        assert!(!config.quiet);
    }

    #[test]
    fn relative_data_dir_is_made_absolute() {
        let cli = Cli::parse_from(["shoplist", "--data-dir", "lists", "summary"]);
        let config = AppConfig::resolve(&cli).unwrap();
        assert!(config.data_dir.is_absolute());
        assert!(config.data_dir.ends_with("lists"));
    }
}
