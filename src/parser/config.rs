//! Parser configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SousError};
use crate::grammar::config::GrammarConfig;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Templates in priority order.
    #[serde(default)]
    pub grammar: GrammarConfig,
    /// Log every unmatched line at debug level.
    #[serde(default)]
    pub trace_no_match: bool,
}

impl ParserConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            SousError::invalid_argument(format!(
                "Failed to parse parser config from '{}': {}",
                path.display(),
                e
            ))
        })
    }
}
