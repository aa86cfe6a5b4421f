//! Configuration for the ordered list of grammar templates.
//!
//! # Examples
//!
//! ```
//! use sous::grammar::config::{GrammarConfig, TemplateConfig};
//!
//! // The built-in grammar
//! let config = GrammarConfig::default();
//! assert_eq!(config.templates[0].pattern, "[ING]: [AMT] [UNIT]");
//!
//! // A custom grammar; earlier templates take priority
//! let config = GrammarConfig {
//!     templates: vec![
//!         TemplateConfig::new("[AMT] [UNIT] [ING]"),
//!         TemplateConfig::new("[ING]").partial(),
//!     ],
//! };
//! assert_eq!(config.compile().unwrap().len(), 2);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SousError};
use crate::grammar::template::GrammarTemplate;

/// One template entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateConfig {
    pub pattern: String,
    #[serde(default)]
    pub allow_partial: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_prep: Option<String>,
}

impl TemplateConfig {
    pub fn new(pattern: impl Into<String>) -> Self {
        TemplateConfig {
            pattern: pattern.into(),
            allow_partial: false,
            default_prep: None,
        }
    }

    pub fn partial(mut self) -> Self {
        self.allow_partial = true;
        self
    }

    pub fn with_default_prep(mut self, prep: impl Into<String>) -> Self {
        self.default_prep = Some(prep.into());
        self
    }

    pub fn compile(&self) -> Result<GrammarTemplate> {
        let mut template =
            GrammarTemplate::compile(&self.pattern)?.with_allow_partial(self.allow_partial);
        if let Some(prep) = &self.default_prep {
            template = template.with_default_prep(prep.clone());
        }
        Ok(template)
    }
}

/// Templates in priority order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarConfig {
    pub templates: Vec<TemplateConfig>,
}

impl Default for GrammarConfig {
    fn default() -> Self {
        let full = [
            "[ING]: [AMT] [UNIT]",
            "[ING]: [AMT]",
            "[FORM] [ING]: [AMT] [UNIT]",
            "[FORM] [ING]: [AMT]",
            "[AMT] [UNIT] [FORM] [ING], [PREP]",
            "[AMT] [UNIT] [FORM] [ING]",
            "[AMT] [UNIT] of [ING], [PREP]",
            "[AMT] [UNIT] of [ING]",
            "[AMT] [UNIT] [ING], [PREP]",
            "[AMT] [UNIT] [PREP] [ING]",
            "[AMT] [UNIT] [ING]",
            "[AMT] [FORM] [ING]",
            "[AMT] [ING], [PREP]",
            "[AMT] [PREP] [ING]",
            "[AMT] [ING]",
            "[AMT] [UNIT] [ANOMALY]",
            "[AMT] [ANOMALY]",
        ];
        let partial = ["[ING], [PREP]", "[PREP] [ING]", "[ING]"];

        let mut templates: Vec<TemplateConfig> = full.into_iter().map(TemplateConfig::new).collect();
        templates.extend(partial.into_iter().map(|p| TemplateConfig::new(p).partial()));
        templates.push(
            TemplateConfig::new("[ING] to taste")
                .partial()
                .with_default_prep("to taste"),
        );

        GrammarConfig { templates }
    }
}

impl GrammarConfig {
    /// Compile every template, failing on the first invalid pattern.
    pub fn compile(&self) -> Result<Vec<GrammarTemplate>> {
        self.templates.iter().map(TemplateConfig::compile).collect()
    }

    /// Load a grammar from a JSON file: `{"templates": [{"pattern": ...}, ...]}`.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SousError::template(format!(
                "Failed to read grammar file '{}': {}",
                path.display(),
                e
            ))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            SousError::template(format!(
                "Failed to parse grammar JSON from '{}': {}",
                path.display(),
                e
            ))
        })
    }
}
