//! Mount registry — single source of truth for bind mounts.

use std::collections::HashSet;

/// A bind mount from a host path to a container path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountEntry {
    pub host_path: String,
    pub target_path: String,
    pub read_only: bool,
}

impl MountEntry {
    /// Render as a `--mount` value:
    /// `type=bind,source=<host>,target=<target>[,readonly]`.
    pub fn to_mount_spec(&self) -> String {
        let mut spec = format!(
            "type=bind,source={},target={}",
            self.host_path, self.target_path
        );
        if self.read_only {
            spec.push_str(",readonly");
        }
        spec
    }
}

/// Why a mount was not added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MountRejection {
    #[error("empty mount path")]
    EmptyPath,
    #[error("host path is inside the container workspace")]
    WorkspaceRoot,
    /// Normal deduplication outcome, not a failure.
    #[error("host path is already mounted")]
    AlreadyMounted,
    /// The runtime reads a mount spec as one CSV record, so neither a field
    /// separator nor a record separator can appear in a path.
    #[error("path contains {0:?}, which mount specs cannot carry")]
    UnsupportedCharacter(char),
    #[error("container target is already used by another mount")]
    TargetInUse,
}

/// Result of [`MountRegistry::try_add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountOutcome {
    Added,
    Rejected(MountRejection),
}

impl MountOutcome {
    pub fn is_added(&self) -> bool {
        matches!(self, MountOutcome::Added)
    }
}

/// Ordered, de-duplicated set of bind mounts for one launch.
///
/// Entries keep first-added order. Host paths are compared as exact
/// strings: two spellings of the same directory are distinct.
#[derive(Debug, Clone)]
pub struct MountRegistry {
    workspace_root: String,
    entries: Vec<MountEntry>,
    host_paths: HashSet<String>,
    targets: HashSet<String>,
}

impl MountRegistry {
    /// Create an empty registry. Host paths under `workspace_root` are
    /// never accepted.
    pub fn new(workspace_root: impl Into<String>) -> Self {
        let root = workspace_root.into();
        let trimmed = root.trim_end_matches('/');
        let workspace_root = if trimmed.is_empty() {
            "/".to_string()
        } else {
            trimmed.to_string()
        };
        Self {
            workspace_root,
            entries: Vec::new(),
            host_paths: HashSet::new(),
            targets: HashSet::new(),
        }
    }

    pub fn workspace_root(&self) -> &str {
        &self.workspace_root
    }

    /// Whether `path` is the workspace root or lies beneath it.
    pub fn is_under_workspace(&self, path: &str) -> bool {
        if self.workspace_root == "/" {
            return path.starts_with('/');
        }
        match path.strip_prefix(self.workspace_root.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }

    /// Container path `<workspace_root>/<name>`.
    pub fn workspace_target(&self, name: &str) -> String {
        if self.workspace_root == "/" {
            format!("/{name}")
        } else {
            format!("{}/{}", self.workspace_root, name)
        }
    }

    /// Add a bind mount unless one of the rejection rules applies.
    ///
    /// Rules, in order: empty path, host under the workspace root, host
    /// already mounted, newline in either path, comma in either path,
    /// target owned by another host path.
    pub fn try_add(&mut self, host_path: &str, target_path: &str, read_only: bool) -> MountOutcome {
        let outcome = self.check(host_path, target_path);
        if outcome.is_added() {
            self.host_paths.insert(host_path.to_string());
            self.targets.insert(target_path.to_string());
            self.entries.push(MountEntry {
                host_path: host_path.to_string(),
                target_path: target_path.to_string(),
                read_only,
            });
            tracing::debug!(host = host_path, target = target_path, read_only, "mount added");
        } else {
            tracing::debug!(host = host_path, target = target_path, ?outcome, "mount skipped");
        }
        outcome
    }

    fn check(&self, host_path: &str, target_path: &str) -> MountOutcome {
        let reject = MountOutcome::Rejected;

        if host_path.is_empty() || target_path.is_empty() {
            return reject(MountRejection::EmptyPath);
        }
        if self.is_under_workspace(host_path) {
            return reject(MountRejection::WorkspaceRoot);
        }
        if self.host_paths.contains(host_path) {
            return reject(MountRejection::AlreadyMounted);
        }
        for sep in ['\n', ','] {
            if host_path.contains(sep) || target_path.contains(sep) {
                return reject(MountRejection::UnsupportedCharacter(sep));
            }
        }
        if self.targets.contains(target_path) {
            return reject(MountRejection::TargetInUse);
        }
        MountOutcome::Added
    }

    /// Exact-string membership test on host paths.
    pub fn contains(&self, host_path: &str) -> bool {
        self.host_paths.contains(host_path)
    }

    /// Container target of an existing mount.
    pub fn target_of(&self, host_path: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.host_path == host_path)
            .map(|e| e.target_path.as_str())
    }

    pub fn entries(&self) -> &[MountEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Mount specs in first-added order.
    pub fn mount_specs(&self) -> Vec<String> {
        self.entries.iter().map(MountEntry::to_mount_spec).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workspace_prefix_respects_component_boundary() {
        let registry = MountRegistry::new("/workspace/");
        assert_eq!(registry.workspace_root(), "/workspace");
        assert!(registry.is_under_workspace("/workspace"));
        assert!(registry.is_under_workspace("/workspace/a/b"));
        assert!(!registry.is_under_workspace("/workspaces/a"));
        assert!(!registry.is_under_workspace("/home/workspace"));
    }

    #[test]
    fn newline_is_checked_before_comma() {
        let mut registry = MountRegistry::new("/workspace");
        assert_eq!(
            registry.try_add("/a\nb,c", "/workspace/x", false),
            MountOutcome::Rejected(MountRejection::UnsupportedCharacter('\n'))
        );
    }

    #[test]
    fn readonly_suffix() {
        let entry = MountEntry {
            host_path: "/h".into(),
            target_path: "/t".into(),
            read_only: true,
        };
        assert_eq!(entry.to_mount_spec(), "type=bind,source=/h,target=/t,readonly");
    }
}
