//! Read-only mounts for the user's git configuration.

use crate::args::registry::{MountOutcome, MountRegistry, MountRejection};
use crate::args::resolver::PathContext;

/// Git config files, relative to the host home and to the persistent home.
pub const GIT_CONFIG_FILES: [&str; 2] = [".gitconfig", ".config/git/config"];

/// Mount each existing git config file read-only under `persistent_home`.
///
/// Returns warnings for files that exist but could not be mounted.
pub fn mount_git_config(
    registry: &mut MountRegistry,
    ctx: &PathContext,
    persistent_home: &str,
) -> Vec<String> {
    let mut warnings = Vec::new();
    let Some(home) = &ctx.home else {
        tracing::debug!("home directory unknown, skipping git config mounts");
        return warnings;
    };
    let container_home = persistent_home.trim_end_matches('/');

    for relative in GIT_CONFIG_FILES {
        let host = home.join(relative);
        if !host.is_file() {
            continue;
        }
        let Some(host) = host.to_str() else {
            warnings.push(format!("{}: path is not valid UTF-8, not mounted", host.display()));
            continue;
        };
        let target = format!("{container_home}/{relative}");
        match registry.try_add(host, &target, true) {
            MountOutcome::Added | MountOutcome::Rejected(MountRejection::AlreadyMounted) => {}
            MountOutcome::Rejected(reason) => {
                warnings.push(format!("{host}: git config not mounted: {reason}"));
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_home_means_no_mounts() {
        let mut registry = MountRegistry::new("/workspace");
        let warnings = mount_git_config(&mut registry, &PathContext::new("/", None), "/home/user");
        assert!(warnings.is_empty());
        assert!(registry.is_empty());
    }
}
