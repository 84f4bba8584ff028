//! Shared test utilities: filesystem fixtures and argument helpers.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use pathbox::args::PathContext;
use tempfile::TempDir;

pub fn raw_args(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

/// A temporary directory tree used as cwd (and `home/` as the home directory).
///
/// `root` is canonicalized so expectations match resolver output on
/// platforms where the temp dir sits behind a symlink.
pub struct Fixture {
    _dir: TempDir,
    pub root: PathBuf,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let root = fs::canonicalize(dir.path()).expect("Failed to canonicalize temp dir");
        fs::create_dir_all(root.join("home")).expect("Failed to create home");
        Self { _dir: dir, root }
    }

    /// Create a file (and its parents) relative to the root.
    pub fn file(&self, relative: &str) -> PathBuf {
        let path = self.root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).expect("Failed to create parent");
        fs::write(&path, "content").expect("Failed to write file");
        path
    }

    /// Create a directory (and its parents) relative to the root.
    pub fn dir(&self, relative: &str) -> PathBuf {
        let path = self.root.join(relative);
        fs::create_dir_all(&path).expect("Failed to create dir");
        path
    }

    pub fn home(&self) -> PathBuf {
        self.root.join("home")
    }

    /// Context with cwd = root and home = root/home.
    pub fn ctx(&self) -> PathContext {
        PathContext::new(self.root.clone(), Some(self.home()))
    }
}

pub fn s(path: &Path) -> String {
    path.to_str().expect("fixture paths are UTF-8").to_string()
}
