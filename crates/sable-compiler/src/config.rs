//! Analysis configuration.

use serde::Deserialize;

use crate::analyze::Pass;

/// Configuration for [`crate::analyze`].
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Synthesize transformations for alternatives that have none
    pub synthesize: bool,
    /// Stop after this pass and return what was computed so far
    pub stop_after: Option<Pass>,
    /// Render diagnostics with ANSI colors
    pub colored: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            synthesize: true,
            stop_after: None,
            colored: false,
        }
    }
}

impl Config {
    pub fn with_synthesis(mut self, enabled: bool) -> Self {
        self.synthesize = enabled;
        self
    }

    pub fn with_stop_after(mut self, pass: Option<Pass>) -> Self {
        self.stop_after = pass;
        self
    }

    pub fn with_colors(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
