//! Output formatting for CLI commands.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::cli::args::{OutputFormat, SousArgs};
use crate::error::Result;
use crate::parser::TemplateStats;
use crate::parser::result::{IngredientUsage, ParseResult};

/// Results of parsing lines.
#[derive(Debug, Serialize)]
pub struct ParseOutput {
    pub results: Vec<ParseResult>,
}

/// Results of parsing a file.
#[derive(Debug, Serialize)]
pub struct BatchOutput {
    pub total: usize,
    pub matched: usize,
    pub anomalous: usize,
    pub partial: usize,
    pub unmatched: usize,
    pub duration_ms: u64,
    /// Unmatched lines by classification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub misses: Option<BTreeMap<String, Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub templates: Option<Vec<TemplateStats>>,
}

/// A grammar template as listed by `sous templates`.
#[derive(Debug, Serialize)]
pub struct TemplateEntry {
    pub position: usize,
    pub pattern: String,
    pub allow_partial: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_prep: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TemplateList {
    pub templates: Vec<TemplateEntry>,
}

/// Autocomplete suggestions.
#[derive(Debug, Serialize)]
pub struct Completions {
    pub prefix: String,
    pub ingredients: Vec<String>,
}

/// Rendering of a result for the human output format.
pub trait HumanOutput {
    fn to_human(&self) -> String;
}

impl HumanOutput for ParseOutput {
    fn to_human(&self) -> String {
        self.results
            .iter()
            .map(format_parse_result)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl HumanOutput for BatchOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![
            format!("Lines:      {}", self.total),
            format!("Matched:    {}", self.matched),
            format!("Anomalous:  {}", self.anomalous),
            format!("Partial:    {}", self.partial),
            format!("Unmatched:  {}", self.unmatched),
            format!("Duration:   {} ms", self.duration_ms),
        ];

        if let Some(misses) = &self.misses
            && !misses.is_empty()
        {
            lines.push(String::new());
            lines.push("Misses:".to_string());
            for (status, inputs) in misses {
                lines.push(format!("  {status} ({})", inputs.len()));
                lines.extend(inputs.iter().map(|input| format!("    {input}")));
            }
        }

        if let Some(templates) = &self.templates {
            lines.push(String::new());
            lines.push("Template hits:".to_string());
            for stats in templates {
                lines.push(format!("  {:>6}  {}", stats.hits, stats.pattern));
            }
        }

        lines.join("\n")
    }
}

impl HumanOutput for TemplateList {
    fn to_human(&self) -> String {
        self.templates
            .iter()
            .map(|entry| {
                let mut line = format!("{:>3}. {}", entry.position, entry.pattern);
                if entry.allow_partial {
                    line.push_str("  (partial)");
                }
                if let Some(prep) = &entry.default_prep {
                    line.push_str(&format!("  [prep: {prep}]"));
                }
                line
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl HumanOutput for Completions {
    fn to_human(&self) -> String {
        if self.ingredients.is_empty() {
            return format!("No ingredients start with '{}'", self.prefix);
        }
        self.ingredients.join("\n")
    }
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize + HumanOutput>(result: &T, args: &SousArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            println!("{}", result.to_human());
            Ok(())
        }
        OutputFormat::Json => output_json(result, args),
    }
}

fn output_json<T: Serialize>(result: &T, args: &SousArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// One line summary of a parse result.
pub fn format_parse_result(result: &ParseResult) -> String {
    match result {
        ParseResult::Match { input, usage } => {
            format!("{input}\n  => {}", format_usage(usage))
        }
        ParseResult::AnomalousMatch {
            input,
            usage,
            anomaly,
        } => format!("{input}\n  => {} ({anomaly})", format_usage(usage)),
        ParseResult::PartialMatch {
            input,
            ingredient,
            prep_note,
        } => match prep_note {
            Some(prep) => format!("{input}\n  => {}; {prep} (partial)", ingredient.name),
            None => format!("{input}\n  => {} (partial)", ingredient.name),
        },
        ParseResult::NoMatch { input, status } => format!("{input}\n  => no match: {status}"),
    }
}

/// "2-3 cup shredded cheese; chopped"
pub fn format_usage(usage: &IngredientUsage) -> String {
    let mut text = if usage.form.name == usage.ingredient.name {
        format!("{} {}", usage.amount, usage.ingredient.name)
    } else {
        format!(
            "{} {} {}",
            usage.amount, usage.form.name, usage.ingredient.name
        )
    };
    if let Some(prep) = &usage.prep_note {
        text.push_str("; ");
        text.push_str(prep);
    }
    text
}
