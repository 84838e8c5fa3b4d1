//! Shared helpers for settings integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use serde_json::Value;
use tempfile::TempDir;

/// Scratch directory holding user override documents.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write `contents` verbatim to `name` and return its path.
    pub fn write_raw(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, contents).unwrap();
        path
    }

    /// Write `value` as pretty JSON to `name` and return its path.
    pub fn write_json(&self, name: &str, value: &Value) -> PathBuf {
        self.write_raw(name, &serde_json::to_string_pretty(value).unwrap())
    }

    pub fn read_json(&self, name: &str) -> Value {
        serde_json::from_str(&fs::read_to_string(self.path(name)).unwrap()).unwrap()
    }
}
