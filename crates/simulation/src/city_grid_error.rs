// ---------------------------------------------------------------------------
// CityGridError: typed errors for grid configuration and generation
// ---------------------------------------------------------------------------

use std::fmt;

/// Errors that can occur while loading a `GridConfig` or generating a city.
///
/// Generation never clamps out-of-range parameters; it rejects them with
/// `InvalidConfig` before consuming any randomness.
#[derive(Debug)]
pub enum CityGridError {
    /// A generator parameter is outside its valid range.
    InvalidConfig { field: &'static str, reason: String },
    /// The configuration file was not valid JSON for a `GridConfig`.
    ConfigParse(String),
    /// I/O error while reading a configuration file.
    Io(std::io::Error),
}

impl CityGridError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        CityGridError::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for CityGridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CityGridError::InvalidConfig { field, reason } => {
                write!(f, "Invalid grid config: {field} {reason}")
            }
            CityGridError::ConfigParse(msg) => write!(f, "Config parse error: {msg}"),
            CityGridError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for CityGridError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CityGridError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CityGridError {
    fn from(e: std::io::Error) -> Self {
        CityGridError::Io(e)
    }
}

impl From<serde_json::Error> for CityGridError {
    fn from(e: serde_json::Error) -> Self {
        CityGridError::ConfigParse(e.to_string())
    }
}
