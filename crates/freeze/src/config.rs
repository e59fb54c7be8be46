//! Routine compiler configuration.

use crate::FreezeResult;
use serde::{Deserialize, Serialize};

/// Default number of composite/array boundaries the compiler traverses.
pub const DEFAULT_MAX_DEPTH: usize = 5;

/// Settings for the routine compiler.
///
/// ```
/// use freeze::FreezeConfig;
///
/// let config = FreezeConfig::from_json(r#"{ "max_depth": 8 }"#).unwrap();
/// assert_eq!(config.max_depth, 8);
///
/// let config = FreezeConfig::from_json("{}").unwrap();
/// assert_eq!(config.max_depth, freeze::DEFAULT_MAX_DEPTH);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FreezeConfig {
    /// Deepest composite/array boundary accepted. `0` rejects every non-value root.
    pub max_depth: usize,
}

impl FreezeConfig {
    /// Create a configuration with the given depth limit.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Parse a configuration from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> FreezeResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for FreezeConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
