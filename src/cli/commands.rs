//! Command implementations for the Sous CLI.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::sync::Arc;
use std::time::Instant;

use log::info;
use parking_lot::Mutex;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::{Result, SousError};
use crate::grammar::config::GrammarConfig;
use crate::parser::Parser;
use crate::parser::config::ParserConfig;
use crate::parser::result::ParseResult;
use crate::vocabulary::json::JsonVocabulary;
use crate::vocabulary::store::VocabularyStore;

/// Execute a CLI command.
pub fn execute_command(args: SousArgs) -> Result<()> {
    match &args.command {
        Command::Parse(parse_args) => parse_lines(parse_args, &args),
        Command::Batch(batch_args) => parse_batch(batch_args, &args),
        Command::Templates(templates_args) => list_templates(templates_args, &args),
        Command::Complete(complete_args) => complete(complete_args, &args),
    }
}

fn load_grammar(source: Option<&std::path::Path>) -> Result<GrammarConfig> {
    match source {
        Some(path) => GrammarConfig::load_from_file(path),
        None => Ok(GrammarConfig::default()),
    }
}

fn load_vocabulary(path: &std::path::Path) -> Result<VocabularyStore> {
    let vocabulary = VocabularyStore::load(&JsonVocabulary::load_from_file(path)?)?;
    info!("Loaded vocabulary from {}: {:?}", path.display(), vocabulary.stats());
    Ok(vocabulary)
}

/// Build a parser from the vocabulary file and either a parser config or a
/// grammar file.
pub fn build_parser(source: &GrammarSource) -> Result<Parser> {
    let vocabulary = load_vocabulary(&source.vocabulary)?;
    if let Some(path) = &source.config {
        let config = ParserConfig::load_from_file(path)?;
        info!("Loaded parser config from {}", path.display());
        return Parser::from_config(vocabulary, &config);
    }
    let templates = load_grammar(source.grammar.as_deref())?.compile()?;
    Ok(Parser::new(vocabulary, templates))
}

/// Parse lines given as arguments.
fn parse_lines(args: &ParseArgs, cli_args: &SousArgs) -> Result<()> {
    let parser = build_parser(&args.source)?;
    let results = args.lines.iter().map(|line| parser.parse(line)).collect();
    output_result(&ParseOutput { results }, cli_args)
}

/// Parse every non-empty line of a file.
fn parse_batch(args: &BatchArgs, cli_args: &SousArgs) -> Result<()> {
    let misses: Arc<Mutex<BTreeMap<String, Vec<String>>>> = Arc::default();
    let mut parser = build_parser(&args.source)?;
    if args.misses {
        let sink = Arc::clone(&misses);
        parser = parser.on_no_match(move |input, status| {
            sink.lock()
                .entry(status.to_string())
                .or_default()
                .push(input.to_string());
        });
    }

    let file = File::open(&args.input).map_err(|e| {
        SousError::invalid_argument(format!(
            "Failed to open input file '{}': {}",
            args.input.display(),
            e
        ))
    })?;
    let mut lines = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line?;
        if !line.trim().is_empty() {
            lines.push(line);
        }
    }

    if cli_args.verbosity() > 1 {
        eprintln!("Parsing {} lines from {}", lines.len(), args.input.display());
    }

    let start_time = Instant::now();
    let results = parser.parse_all(&lines);
    let duration = start_time.elapsed();

    let mut output = summarize(&results);
    output.duration_ms = duration.as_millis() as u64;
    if args.misses {
        let mut misses = std::mem::take(&mut *misses.lock());
        for inputs in misses.values_mut() {
            inputs.sort();
        }
        output.misses = Some(misses);
    }
    if args.stats {
        output.templates = Some(parser.template_stats());
    }

    output_result(&output, cli_args)
}

/// Count results by outcome.
pub fn summarize(results: &[ParseResult]) -> BatchOutput {
    let mut output = BatchOutput {
        total: results.len(),
        matched: 0,
        anomalous: 0,
        partial: 0,
        unmatched: 0,
        duration_ms: 0,
        misses: None,
        templates: None,
    };

    for result in results {
        match result {
            ParseResult::Match { .. } => output.matched += 1,
            ParseResult::AnomalousMatch { .. } => output.anomalous += 1,
            ParseResult::PartialMatch { .. } => output.partial += 1,
            ParseResult::NoMatch { .. } => output.unmatched += 1,
        }
    }
    output
}

/// Print the grammar in evaluation order.
fn list_templates(args: &TemplatesArgs, cli_args: &SousArgs) -> Result<()> {
    let templates = load_grammar(args.grammar.as_deref())?.compile()?;
    let list = TemplateList {
        templates: templates
            .iter()
            .enumerate()
            .map(|(i, template)| TemplateEntry {
                position: i + 1,
                pattern: template.pattern().to_string(),
                allow_partial: template.allow_partial(),
                default_prep: template.default_prep().map(str::to_string),
            })
            .collect(),
    };
    output_result(&list, cli_args)
}

/// Suggest ingredient names for a prefix.
fn complete(args: &CompleteArgs, cli_args: &SousArgs) -> Result<()> {
    let vocabulary = load_vocabulary(&args.vocabulary)?;
    let ingredients = vocabulary
        .ingredients()
        .autocomplete(&args.prefix)
        .into_iter()
        .take(args.limit)
        .map(|ingredient| ingredient.name.clone())
        .collect();

    output_result(
        &Completions {
            prefix: args.prefix.clone(),
            ingredients,
        },
        cli_args,
    )
}
