//! Shared fixture for CLI integration tests.
#![allow(dead_code)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestFixture {
    temp_dir: TempDir,
    data_dir: PathBuf,
}

impl TestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_dir = temp_dir.path().join("shoplist");
        Self { temp_dir, data_dir }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Scratch path for exported files.
    pub fn path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    /// `shoplist` pointed at this fixture's data directory.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("shoplist").expect("Failed to find shoplist binary");
        cmd.arg("--data-dir")
            .arg(&self.data_dir)
            .arg("--log-level")
            .arg("warn")
            .env_remove("SHOPLIST_DATA_DIR")
            .env_remove("SHOPLIST_LOG_LEVEL");
        cmd
    }

    /// Runs a quiet command that must succeed.
    pub fn run(&self, args: &[&str]) {
        self.command().arg("--quiet").args(args).assert().success();
    }
}
