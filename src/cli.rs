//! Command-line interface.

use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;
use crate::launch::TerminalMode;

/// Run a command in a container, mounting the host paths it mentions.
///
/// Prefix an argument with `\` to keep it from being treated as a host path;
/// `\~/x` refers to `x` in the container's home.
#[derive(Debug, Parser)]
#[command(name = "pathbox", version)]
pub struct Cli {
    /// Container image to run
    #[arg(long, value_name = "IMAGE")]
    pub image: Option<String>,

    /// Named volume kept across runs and mounted as the container home
    #[arg(long, value_name = "NAME")]
    pub volume: Option<String>,

    /// Container runtime executable
    #[arg(long, value_name = "PROGRAM")]
    pub runtime: Option<String>,

    /// Config file to read instead of the default
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Don't mount the host git config
    #[arg(long)]
    pub no_git_config: bool,

    /// Always allocate a TTY
    #[arg(long, conflicts_with = "no_tty")]
    pub tty: bool,

    /// Never allocate a TTY
    #[arg(long)]
    pub no_tty: bool,

    /// Print the launch plan as JSON instead of running it
    #[arg(long)]
    pub dry_run: bool,

    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command and arguments to run inside the container
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<String>,
}

impl Cli {
    /// `--config`, else the default location.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::config_path)
    }

    /// Layer flag overrides on top of `config`.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(image) = &self.image {
            config.image = image.clone();
        }
        if let Some(volume) = &self.volume {
            config.volume = Some(volume.clone()).filter(|v| !v.is_empty());
        }
        if let Some(runtime) = &self.runtime {
            config.runtime = runtime.clone();
        }
        if self.no_git_config {
            config.mount_git_config = false;
        }
    }

    pub fn terminal_mode(&self) -> TerminalMode {
        if self.tty {
            TerminalMode { tty: true }
        } else if self.no_tty {
            TerminalMode { tty: false }
        } else {
            TerminalMode::detect()
        }
    }
}
