use std::io::Write;

use ketodot_core::{ColorSummary, RelationTuple, assign_colors, parse_document, to_dot};

use crate::config::AppConfig;
use crate::error::AppError;
use crate::input::Source;
use crate::output;
use crate::report;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub dot: String,
    pub sources: usize,
    pub tuples: usize,
    pub summary: ColorSummary,
}

/// Reads every source in order, colors the combined tuples with a fresh
/// palette and renders them.
pub fn run_once(sources: &[Source], config: &AppConfig) -> Result<RunOutcome, AppError> {
    let mut tuples = Vec::new();
    for source in sources {
        let text = source.read()?;
        tuples.extend(decode(source, &text)?);
    }

    let summary = assign_colors(&mut tuples, config.palette.to_palette())?;

    Ok(RunOutcome {
        dot: to_dot(&tuples),
        sources: sources.len(),
        tuples: tuples.len(),
        summary,
    })
}

/// One full run including output; the outcome is logged either way.
pub fn run_and_emit<W: Write>(
    sources: &[Source],
    config: &AppConfig,
    stdout: &mut W,
) -> Result<RunOutcome, AppError> {
    let result = run_once(sources, config).and_then(|outcome| {
        output::emit(&outcome.dot, config, stdout)?;
        Ok(outcome)
    });

    match &result {
        Ok(outcome) => report::run_completed(outcome.sources, outcome.tuples, &outcome.summary),
        Err(e) => report::run_failed(e),
    }
    result
}

fn decode(source: &Source, text: &str) -> Result<Vec<RelationTuple>, AppError> {
    parse_document(text).map_err(|error| AppError::Decode {
        file: source.to_string(),
        error,
    })
}
