//! Environment builder — all container env vars in one place.

/// Builder for environment variables passed into the container.
#[derive(Debug, Clone)]
pub struct EnvSet {
    vars: Vec<(String, String)>,
}

impl EnvSet {
    /// Create an empty environment set.
    pub fn new() -> Self {
        Self { vars: Vec::new() }
    }

    /// `TZ`, when a zone is known.
    pub fn with_timezone(mut self, zone: Option<&str>) -> Self {
        if let Some(zone) = zone {
            self.vars.push(("TZ".into(), zone.into()));
        }
        self
    }

    /// Add arbitrary extra environment variables.
    pub fn with_extra<I>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.vars.extend(extra);
        self
    }

    /// Build the final environment variable list.
    pub fn build(self) -> Vec<(String, String)> {
        self.vars
    }
}

impl Default for EnvSet {
    fn default() -> Self {
        Self::new()
    }
}
