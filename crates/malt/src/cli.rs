//! Core logic behind the `recipe-crush` and `recipe-load` binaries.

use malt_recipe::Recipe;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use crate::crush::{crush_with, load_with, CrushOptions};
use crate::report::SizeReport;

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "MALT_LOG";

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("invalid recipe JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Malt(#[from] crate::Error),
    #[error("recipe #{index}: {source}")]
    Batch {
        index: usize,
        #[source]
        source: crate::Error,
    },
}

// ── Logging ───────────────────────────────────────────────────────────────

/// Installs a stderr subscriber. `verbose` forces `debug`, otherwise the
/// filter comes from `MALT_LOG` and falls back to `warn`.
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

// ── recipe-crush ──────────────────────────────────────────────────────────

/// Parses one recipe object or an array of them.
pub fn parse_recipes(json: &str) -> Result<Vec<Recipe>, CliError> {
    let value: Value = serde_json::from_str(json)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<_, _>>()?,
        other => vec![serde_json::from_value(other)?],
    })
}

/// Crushes every recipe in `json`, one link per recipe, in input order.
pub fn crush_json(json: &str, options: &CrushOptions) -> Result<Vec<String>, CliError> {
    parse_recipes(json)?
        .iter()
        .enumerate()
        .map(|(index, recipe)| {
            crush_with(recipe, options).map_err(|source| CliError::Batch { index, source })
        })
        .collect()
}

/// Size reports for every recipe in `json`.
pub fn stats_json(json: &str) -> Result<Vec<SizeReport>, CliError> {
    parse_recipes(json)?
        .iter()
        .enumerate()
        .map(|(index, recipe)| {
            SizeReport::measure(recipe).map_err(|source| CliError::Batch { index, source })
        })
        .collect()
}

// ── recipe-load ───────────────────────────────────────────────────────────

/// Loads a link and renders the recipe as JSON.
pub fn load_json(text: &str, options: &CrushOptions, pretty: bool) -> Result<String, CliError> {
    let recipe = load_with(text.trim(), options)?;
    Ok(if pretty {
        serde_json::to_string_pretty(&recipe)?
    } else {
        serde_json::to_string(&recipe)?
    })
}
