//! Host timezone detection for the container's `TZ`.

use std::path::Path;

/// Best guess at the host's IANA zone name.
///
/// Checks `$TZ`, then `/etc/timezone`, then the `/etc/localtime` symlink.
pub fn host_timezone() -> Option<String> {
    from_tz_var(std::env::var("TZ").ok().as_deref())
        .or_else(|| {
            std::fs::read_to_string("/etc/timezone")
                .ok()
                .and_then(|content| from_etc_timezone(&content))
        })
        .or_else(|| {
            std::fs::read_link("/etc/localtime")
                .ok()
                .and_then(|target| from_localtime_target(&target))
        })
}

/// `$TZ` unless empty or a `:`/path-style value the container can't use.
fn from_tz_var(value: Option<&str>) -> Option<String> {
    let value = value?.trim();
    if value.is_empty() || value.starts_with(':') || value.starts_with('/') {
        return None;
    }
    Some(value.to_string())
}

fn from_etc_timezone(content: &str) -> Option<String> {
    content
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
}

/// `/usr/share/zoneinfo/Europe/Berlin` → `Europe/Berlin`.
fn from_localtime_target(target: &Path) -> Option<String> {
    let target = target.to_str()?;
    let (_, zone) = target.split_once("zoneinfo/")?;
    (!zone.is_empty()).then(|| zone.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tz_var() {
        assert_eq!(from_tz_var(Some("Europe/Paris")).as_deref(), Some("Europe/Paris"));
        assert_eq!(from_tz_var(Some(":/etc/localtime")), None);
        assert_eq!(from_tz_var(Some("  ")), None);
        assert_eq!(from_tz_var(None), None);
    }

    #[test]
    fn etc_timezone_skips_comments() {
        assert_eq!(
            from_etc_timezone("# managed\n\nAmerica/New_York\n").as_deref(),
            Some("America/New_York")
        );
    }

    #[test]
    fn localtime_link() {
        assert_eq!(
            from_localtime_target(Path::new("/usr/share/zoneinfo/Europe/Berlin")).as_deref(),
            Some("Europe/Berlin")
        );
        assert_eq!(
            from_localtime_target(Path::new("/var/db/timezone/zoneinfo/Asia/Tokyo")).as_deref(),
            Some("Asia/Tokyo")
        );
        assert_eq!(from_localtime_target(Path::new("/etc/localtime.bak")), None);
    }
}
