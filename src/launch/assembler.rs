//! Runtime argument assembler — all `run` flags in one place.

use crate::launch::TerminalMode;

/// Builder for the argument list passed to the container runtime.
///
/// Starts with `run --rm`; the image and container command go last.
#[derive(Debug, Clone)]
pub struct RuntimeArgs {
    args: Vec<String>,
}

impl RuntimeArgs {
    pub fn new() -> Self {
        Self {
            args: vec!["run".into(), "--rm".into()],
        }
    }

    /// `-i` always, `-t` only when attached to a terminal.
    pub fn with_interactive(mut self, terminal: TerminalMode) -> Self {
        self.args.push("-i".into());
        if terminal.tty {
            self.args.push("-t".into());
        }
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.args.push("--name".into());
        self.args.push(name.into());
        self
    }

    /// One `-e KEY=VALUE` per variable.
    pub fn with_env(mut self, env: &[(String, String)]) -> Self {
        for (key, value) in env {
            self.args.push("-e".into());
            self.args.push(format!("{key}={value}"));
        }
        self
    }

    /// Named volume mounted at the persistent home.
    pub fn with_volume(mut self, volume: Option<&str>, persistent_home: &str) -> Self {
        if let Some(volume) = volume {
            self.args.push("--mount".into());
            self.args.push(format!(
                "type=volume,source={volume},target={persistent_home}"
            ));
        }
        self
    }

    /// One `--mount <spec>` per bind mount, in registry order.
    pub fn with_mounts(mut self, specs: &[String]) -> Self {
        for spec in specs {
            self.args.push("--mount".into());
            self.args.push(spec.clone());
        }
        self
    }

    pub fn with_workdir(mut self, dir: &str) -> Self {
        self.args.push("-w".into());
        self.args.push(dir.into());
        self
    }

    /// Add arbitrary runtime flags (before the image).
    pub fn with_extra(mut self, extra: &[String]) -> Self {
        self.args.extend(extra.iter().cloned());
        self
    }

    /// Image followed by the container command.
    pub fn with_command(mut self, image: &str, command: &[String]) -> Self {
        self.args.push(image.into());
        self.args.extend(command.iter().cloned());
        self
    }

    /// Build the final argument list.
    pub fn build(self) -> Vec<String> {
        self.args
    }
}

impl Default for RuntimeArgs {
    fn default() -> Self {
        Self::new()
    }
}
