//! Template grammar: placeholders, token readers and the default template list.

pub mod config;
pub mod match_data;
pub mod template;
pub mod token;

pub use config::{GrammarConfig, TemplateConfig};
pub use match_data::{MatchData, PrepNotes, PREP_SEPARATOR};
pub use template::{GrammarTemplate, TemplateElement};
pub use token::{TokenKind, TokenReader};
