//! Launch planning: mounts + translated arguments → one runtime command.

mod assembler;
mod env_builder;
mod runner;
mod timezone;

use std::io::{self, IsTerminal};

use serde::Serialize;

use crate::args::{mount_git_config, translate, MountRegistry, PathContext};
use crate::config::Config;

pub use assembler::RuntimeArgs;
pub use env_builder::EnvSet;
pub use runner::{exit_code, run, LaunchError};
pub use timezone::host_timezone;

/// Whether the container gets a TTY.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalMode {
    pub tty: bool,
}

impl TerminalMode {
    /// TTY only when both stdin and stdout are terminals.
    pub fn detect() -> Self {
        Self {
            tty: io::stdin().is_terminal() && io::stdout().is_terminal(),
        }
    }
}

/// Everything needed to start the container, ready to execute.
#[derive(Debug, Clone, Serialize)]
pub struct LaunchPlan {
    /// Runtime executable (`docker`, `podman`, ...).
    pub program: String,
    /// Full argument list for `program`.
    pub args: Vec<String>,
    /// Bind mount specs, in the order they were discovered.
    pub mounts: Vec<String>,
    /// The user's command as the container sees it.
    pub container_args: Vec<String>,
    /// Warnings from mount discovery and argument translation.
    pub warnings: Vec<String>,
}

/// Build the launch plan for `tokens` under a validated `config`.
///
/// Git config mounts are registered first, so they lead the mount list and
/// win any later collision.
pub fn plan_launch(
    config: &Config,
    tokens: &[String],
    ctx: &PathContext,
    terminal: TerminalMode,
) -> LaunchPlan {
    let mut registry = MountRegistry::new(config.workspace_root.as_str());
    let mut warnings = Vec::new();

    if config.mount_git_config {
        warnings.extend(mount_git_config(&mut registry, ctx, &config.persistent_home));
    }

    let translated = translate(tokens, ctx, &mut registry, &config.persistent_home);
    warnings.extend(translated.warnings);
    let mounts = registry.mount_specs();

    let timezone = config
        .timezone
        .clone()
        .filter(|zone| !zone.trim().is_empty())
        .or_else(host_timezone);
    let env = EnvSet::new()
        .with_timezone(timezone.as_deref())
        .with_extra(config.env.clone())
        .build();

    let args = RuntimeArgs::new()
        .with_interactive(terminal)
        .with_name(&container_name(&config.name_prefix))
        .with_env(&env)
        .with_volume(config.volume.as_deref(), &config.persistent_home)
        .with_mounts(&mounts)
        .with_workdir(registry.workspace_root())
        .with_extra(&config.extra_args)
        .with_command(&config.image, &translated.args)
        .build();

    LaunchPlan {
        program: config.runtime.clone(),
        args,
        mounts,
        container_args: translated.args,
        warnings,
    }
}

/// `<prefix>-<8 hex chars>`, unique per launch.
fn container_name(prefix: &str) -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    format!("{prefix}-{}", &id[..8])
}
