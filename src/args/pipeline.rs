//! Pipeline — ties classification, resolution and mount registration together.

use std::path::Path;

use crate::args::classifier::{classify, unescape, ClassifiedToken};
use crate::args::registry::{MountOutcome, MountRegistry, MountRejection};
use crate::args::resolver::{resolve, PathContext};

/// Result of translating a command line.
#[derive(Debug, Clone, Default)]
pub struct TranslateResult {
    /// Container-facing arguments, one per input token, in input order.
    pub args: Vec<String>,
    /// Warnings produced while translating (unmountable paths, etc.).
    pub warnings: Vec<String>,
}

/// Translate raw tokens into container arguments, registering bind mounts
/// for every host path they reference.
///
/// Never fails: a token that cannot be mapped is forwarded as-is and a
/// warning is recorded.
///
/// # Arguments
///
/// * `raw_args` - The command and its arguments as typed by the user
/// * `ctx` - Working and home directory the tokens are interpreted against
/// * `registry` - Mounts collected so far; new mounts are appended
/// * `persistent_home` - Container-side home used for escaped `\~` tokens
pub fn translate(
    raw_args: &[String],
    ctx: &PathContext,
    registry: &mut MountRegistry,
    persistent_home: &str,
) -> TranslateResult {
    let mut result = TranslateResult {
        args: Vec::with_capacity(raw_args.len()),
        warnings: Vec::new(),
    };

    for raw in raw_args {
        let arg = match classify(raw, ctx) {
            ClassifiedToken::Literal(token) => token,
            ClassifiedToken::EscapedLiteral(rest) => unescape(&rest, persistent_home),
            ClassifiedToken::CandidatePath { token, .. } => {
                translate_path(&token, ctx, registry, &mut result.warnings)
            }
        };
        result.args.push(arg);
    }

    result
}

/// Map one candidate path. Returns the container argument.
fn translate_path(
    token: &str,
    ctx: &PathContext,
    registry: &mut MountRegistry,
    warnings: &mut Vec<String>,
) -> String {
    let resolved = resolve(token, ctx);
    let Some(host) = resolved.path.to_str() else {
        warnings.push(format!("{token}: path is not valid UTF-8, passing through unmounted"));
        return token.to_string();
    };

    if registry.is_under_workspace(host) {
        warnings.push(format!(
            "{token}: already inside {}, passing through unmounted",
            registry.workspace_root()
        ));
        return token.to_string();
    }

    let metadata = match std::fs::metadata(&resolved.path) {
        Ok(metadata) => metadata,
        Err(_) => {
            warnings.push(format!("{token}: no such file or directory, passing through unmounted"));
            return token.to_string();
        }
    };

    let mapped = if metadata.is_dir() {
        mount_directory(token, &resolved.path, registry, warnings)
    } else if metadata.is_file() {
        mount_file(token, &resolved.path, registry, warnings)
    } else {
        warnings.push(format!(
            "{token}: not a regular file or directory, passing through unmounted"
        ));
        None
    };

    mapped.unwrap_or_else(|| token.to_string())
}

/// Mount a directory at `<root>/<basename>`. A directory that is already
/// mounted keeps its original token; the earlier mount covers it.
fn mount_directory(
    token: &str,
    dir: &Path,
    registry: &mut MountRegistry,
    warnings: &mut Vec<String>,
) -> Option<String> {
    let (host, target) = mount_pair(token, dir, registry, warnings)?;
    match registry.try_add(host, &target, false) {
        MountOutcome::Added => Some(target),
        MountOutcome::Rejected(MountRejection::AlreadyMounted) => None,
        MountOutcome::Rejected(reason) => {
            warnings.push(format!("{token}: cannot mount {host}: {reason}"));
            None
        }
    }
}

/// Mount a file's parent directory and point at the file inside it.
fn mount_file(
    token: &str,
    file: &Path,
    registry: &mut MountRegistry,
    warnings: &mut Vec<String>,
) -> Option<String> {
    let file_name = file.file_name().and_then(|n| n.to_str())?;
    let Some(parent) = file.parent() else {
        warnings.push(format!("{token}: file has no parent directory, passing through unmounted"));
        return None;
    };
    let (host, target) = mount_pair(token, parent, registry, warnings)?;

    match registry.try_add(host, &target, false) {
        MountOutcome::Added | MountOutcome::Rejected(MountRejection::AlreadyMounted) => {
            let dir = registry.target_of(host).unwrap_or(target.as_str());
            Some(format!("{dir}/{file_name}"))
        }
        MountOutcome::Rejected(reason) => {
            warnings.push(format!("{token}: cannot mount {host}: {reason}"));
            None
        }
    }
}

/// Host path string and workspace target for a directory.
fn mount_pair<'a>(
    token: &str,
    dir: &'a Path,
    registry: &MountRegistry,
    warnings: &mut Vec<String>,
) -> Option<(&'a str, String)> {
    let host = dir.to_str()?;
    match dir.file_name().and_then(|n| n.to_str()) {
        Some(name) => Some((host, registry.workspace_target(name))),
        None => {
            warnings.push(format!(
                "{token}: {host} has no name to mount under {}, passing through unmounted",
                registry.workspace_root()
            ));
            None
        }
    }
}
