//! Path resolver — raw token → absolute path.

use std::path::{Component, Path, PathBuf};

/// Host filesystem context a token is interpreted against.
///
/// Carried explicitly so classification and resolution never depend on the
/// process-wide working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathContext {
    /// Absolute directory that relative tokens are resolved from.
    pub cwd: PathBuf,
    /// Host home directory for `~` expansion. `None` when unknown.
    pub home: Option<PathBuf>,
}

impl PathContext {
    pub fn new(cwd: impl Into<PathBuf>, home: Option<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            home,
        }
    }

    /// Context of the running process.
    ///
    /// Falls back to `$PWD`, then `/`, if the working directory has been
    /// removed out from under us.
    pub fn from_env() -> Self {
        let cwd = std::env::current_dir()
            .ok()
            .or_else(|| std::env::var_os("PWD").map(PathBuf::from))
            .filter(|p| p.is_absolute())
            .unwrap_or_else(|| PathBuf::from("/"));
        Self {
            cwd,
            home: dirs::home_dir(),
        }
    }

    /// Expand a leading `~` or `~/` to the home directory.
    ///
    /// Other tokens (including `~user`) are returned as-is.
    pub fn expand_tilde(&self, token: &str) -> PathBuf {
        if let Some(home) = &self.home {
            if token == "~" {
                return home.clone();
            }
            if let Some(rest) = token.strip_prefix("~/") {
                return home.join(rest);
            }
        }
        PathBuf::from(token)
    }

    /// Tilde-expand and anchor a token at the working directory.
    ///
    /// Purely textual; the empty token names the working directory.
    pub fn absolutize(&self, token: &str) -> PathBuf {
        if token.is_empty() {
            return self.cwd.clone();
        }
        let expanded = self.expand_tilde(token);
        if expanded.is_absolute() {
            expanded
        } else {
            self.cwd.join(expanded)
        }
    }
}

/// Result of resolving a candidate path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// Absolute path. May not exist on disk.
    pub path: PathBuf,
    /// True when filesystem canonicalization produced `path`; false when it
    /// was built lexically because canonicalization failed.
    pub canonical: bool,
}

/// Resolve a candidate token to an absolute path.
///
/// Never fails: when `canonicalize` cannot be applied (missing entry,
/// dangling symlink, permissions) the result degrades to lexical
/// normalization of `.` and `..`.
pub fn resolve(candidate: &str, ctx: &PathContext) -> ResolvedPath {
    let absolute = ctx.absolutize(candidate);
    match std::fs::canonicalize(&absolute) {
        Ok(path) => ResolvedPath {
            path,
            canonical: true,
        },
        Err(_) => ResolvedPath {
            path: normalize_lexically(&absolute),
            canonical: false,
        },
    }
}

/// Drop `.` components and fold `..` into its parent without touching disk.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(part) => out.push(part),
        }
    }
    if out.as_os_str().is_empty() {
        PathBuf::from("/")
    } else {
        out
    }
}
