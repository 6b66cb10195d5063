//! Settings bound from `app.logging.web`.

use serde::{Deserialize, Serialize};

/// How much of a request the request logger writes out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", from = "String")]
pub enum DetailLevel {
    /// Method, URI and response status.
    Short,
    /// Method, URI, response status and processing time.
    #[default]
    Default,
    /// Everything: timestamp, parameters, peer address and body as well.
    Full,
}

impl DetailLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Short => "SHORT",
            Self::Default => "DEFAULT",
            Self::Full => "FULL",
        }
    }

    /// Case-insensitive parse. Anything unrecognised falls back to `Default`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "SHORT" => Self::Short,
            "FULL" => Self::Full,
            _ => Self::Default,
        }
    }
}

impl From<String> for DetailLevel {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl std::fmt::Display for DetailLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Largest request or response body captured for a `FULL` line.
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

/// Request logging switch and verbosity.
///
/// Loaded once at startup and shared read-only behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub enabled: bool,
    pub detailing: DetailLevel,
    /// Bodies past this size stream through without being captured.
    pub max_body_bytes: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            detailing: DetailLevel::Default,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl LogConfig {
    pub fn new(enabled: bool, detailing: DetailLevel) -> Self {
        Self {
            enabled,
            detailing,
            ..Self::default()
        }
    }

    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}
