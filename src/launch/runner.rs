use std::io;
use std::process::{Command, ExitStatus};

use thiserror::Error;

use crate::launch::LaunchPlan;

/// Errors starting the container runtime.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("container runtime '{runtime}' not found")]
    RuntimeNotFound { runtime: String },

    #[error("failed to start container runtime '{runtime}': {source}")]
    Spawn {
        runtime: String,
        #[source]
        source: io::Error,
    },
}

impl LaunchError {
    /// Shell-style exit code: 127 for a missing command, 126 otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            LaunchError::RuntimeNotFound { .. } => 127,
            LaunchError::Spawn { .. } => 126,
        }
    }
}

/// Run the plan with inherited stdio and return the exit code to propagate.
pub fn run(plan: &LaunchPlan) -> Result<i32, LaunchError> {
    let status = Command::new(&plan.program)
        .args(&plan.args)
        .status()
        .map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => LaunchError::RuntimeNotFound {
                runtime: plan.program.clone(),
            },
            _ => LaunchError::Spawn {
                runtime: plan.program.clone(),
                source,
            },
        })?;
    Ok(exit_code(status))
}

/// The child's exit code, or `128 + signal` if it was killed.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn plan(program: &str, args: &[&str]) -> LaunchPlan {
        LaunchPlan {
            program: program.to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
            mounts: Vec::new(),
            container_args: Vec::new(),
            warnings: Vec::new(),
        }
    }

    #[test]
    fn propagates_exit_code() {
        assert_eq!(run(&plan("sh", &["-c", "exit 3"])).unwrap(), 3);
        assert_eq!(run(&plan("sh", &["-c", "true"])).unwrap(), 0);
    }

    #[test]
    fn signal_maps_to_128_plus() {
        assert_eq!(run(&plan("sh", &["-c", "kill -TERM $$"])).unwrap(), 128 + 15);
    }

    #[test]
    fn missing_runtime() {
        let err = run(&plan("pathbox-no-such-runtime-xyz", &[])).unwrap_err();
        assert!(matches!(err, LaunchError::RuntimeNotFound { .. }));
        assert_eq!(err.exit_code(), 127);
    }
}
