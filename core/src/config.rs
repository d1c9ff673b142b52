use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::runtime::gc::INITIAL_GC_THRESHOLD;
use crate::runtime::stack::STACK_MAX;

/// Tunables for one [`Context`](crate::Context).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GcConfig {
    /// Maximum number of roots.
    pub stack_max: usize,
    /// Live-object count that triggers the first collection, and the value the threshold
    /// falls back to whenever a cycle empties the heap.
    pub initial_threshold: usize,
    /// Hard cap on live objects. `None` leaves the heap unbounded.
    pub max_objects: Option<usize>,
}

impl Default for GcConfig {
    fn default() -> Self {
        Self {
            stack_max: STACK_MAX,
            initial_threshold: INITIAL_GC_THRESHOLD,
            max_objects: None,
        }
    }
}

impl GcConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stack_max == 0 {
            return Err(ConfigError::new("`stack_max` must be at least 1"));
        }
        if self.initial_threshold == 0 {
            return Err(ConfigError::new("`initial_threshold` must be at least 1"));
        }
        if self.max_objects == Some(0) {
            return Err(ConfigError::new("`max_objects` must be at least 1"));
        }
        Ok(())
    }

    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(source)
            .map_err(|err| ConfigError::new(format!("malformed config: {err}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|err| {
            ConfigError::new(format!("failed to read '{}': {err}", path.display()))
        })?;
        Self::from_json_str(&source)
    }
}
