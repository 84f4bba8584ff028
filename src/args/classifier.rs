//! Token classifier — raw token → classified token.

use crate::args::resolver::PathContext;

/// A classified command-line token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedToken {
    /// Opaque argument, forwarded unchanged.
    Literal(String),
    /// Token that started with `\`. Carries the remainder with the backslash
    /// removed; never resolved or mounted.
    EscapedLiteral(String),
    /// Token that may name a host path.
    CandidatePath {
        token: String,
        /// Whether the token named an existing entry at classification time.
        /// `false` means it only looked path-shaped.
        exists: bool,
    },
}

/// Classify a single token. First matching rule wins:
///
/// 1. leading `\` → [`ClassifiedToken::EscapedLiteral`]
/// 2. leading `@` → [`ClassifiedToken::Literal`] (scoped package names)
/// 3. names an existing entry after `~` expansion → candidate path
/// 4. path-shaped and not a URL → candidate path, possibly nonexistent
/// 5. anything else → [`ClassifiedToken::Literal`]
pub fn classify(token: &str, ctx: &PathContext) -> ClassifiedToken {
    if let Some(rest) = token.strip_prefix('\\') {
        return ClassifiedToken::EscapedLiteral(rest.to_string());
    }

    if token.is_empty() || token.starts_with('@') {
        return ClassifiedToken::Literal(token.to_string());
    }

    // symlink_metadata so a dangling link still counts as an entry
    if std::fs::symlink_metadata(ctx.absolutize(token)).is_ok() {
        return ClassifiedToken::CandidatePath {
            token: token.to_string(),
            exists: true,
        };
    }

    if looks_like_path(token) {
        return ClassifiedToken::CandidatePath {
            token: token.to_string(),
            exists: false,
        };
    }

    ClassifiedToken::Literal(token.to_string())
}

/// Map an escaped remainder to its container-side form.
///
/// `~` and `~/…` point at the persistent home inside the container, never at
/// the host home. Everything else is returned verbatim.
pub fn unescape(rest: &str, persistent_home: &str) -> String {
    let home = persistent_home.trim_end_matches('/');
    if rest == "~" {
        return if home.is_empty() { "/".to_string() } else { home.to_string() };
    }
    match rest.strip_prefix("~/") {
        Some(tail) => format!("{home}/{tail}"),
        None => rest.to_string(),
    }
}

/// `./x`, `../x`, `~/x`, `/x` and `a/b` all contain a slash; URLs are the
/// only slash-bearing tokens excluded.
fn looks_like_path(token: &str) -> bool {
    token.contains('/') && !has_url_scheme(token)
}

/// True for `<scheme>://…` where scheme is `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`.
fn has_url_scheme(token: &str) -> bool {
    let Some((scheme, _)) = token.split_once("://") else {
        return false;
    };
    let mut chars = scheme.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
