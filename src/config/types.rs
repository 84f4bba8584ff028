use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Container-side directory that host paths are mounted under.
pub const DEFAULT_WORKSPACE_ROOT: &str = "/workspace";
/// Container-side home, target of the persistent volume and git config.
pub const DEFAULT_PERSISTENT_HOME: &str = "/home/user";

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Image to run. Required; empty means "not configured".
    #[serde(default)]
    pub image: String,
    /// Named volume mounted at `persistent_home` to keep state across runs.
    #[serde(default)]
    pub volume: Option<String>,
    /// Container runtime executable (default: "docker").
    #[serde(default = "default_runtime")]
    pub runtime: String,
    /// Where host directories appear inside the container (default: "/workspace").
    #[serde(default = "default_workspace_root")]
    pub workspace_root: String,
    /// Home directory inside the container (default: "/home/user").
    #[serde(default = "default_persistent_home")]
    pub persistent_home: String,
    /// Mount `~/.gitconfig` and `~/.config/git/config` read-only (default: true).
    #[serde(default = "default_mount_git_config")]
    pub mount_git_config: bool,
    /// IANA zone for `TZ`. Detected from the host when unset.
    #[serde(default)]
    pub timezone: Option<String>,
    /// Container name prefix (default: "pathbox").
    #[serde(default = "default_name_prefix")]
    pub name_prefix: String,
    /// Extra runtime flags inserted before the image.
    #[serde(default)]
    pub extra_args: Vec<String>,
    /// Extra environment variables for the container.
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

fn default_runtime() -> String {
    "docker".to_string()
}

fn default_workspace_root() -> String {
    DEFAULT_WORKSPACE_ROOT.to_string()
}

fn default_persistent_home() -> String {
    DEFAULT_PERSISTENT_HOME.to_string()
}

fn default_mount_git_config() -> bool {
    true
}

fn default_name_prefix() -> String {
    "pathbox".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            image: String::new(),
            volume: None,
            runtime: default_runtime(),
            workspace_root: default_workspace_root(),
            persistent_home: default_persistent_home(),
            mount_git_config: default_mount_git_config(),
            timezone: None,
            name_prefix: default_name_prefix(),
            extra_args: Vec::new(),
            env: BTreeMap::new(),
        }
    }
}
