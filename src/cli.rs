// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Command line entry points for hosts that drive the widget from scripts.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use url::Url;

use crate::config::{DEFAULT_CONFIG_FILE, WizardConfig};
use crate::logic::form::{parse_form_rows, rows_from_json};
use crate::logic::html::render_widget;
use crate::logic::request::handle_request;
use crate::logic::store::{JsonFileStore, OptionStore};
use crate::models::validate;

#[derive(Parser)]
#[command(name = "option-wizard")]
#[command(about = "Edit, validate and reorder option lists for a form field", long_about = None)]
pub struct Cli {
    /// Path to the JSON config file
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the desktop editor (default)
    Gui,

    /// Print the widget HTML for the configured record
    Render,

    /// Validate an urlencoded form body and store it when valid
    Submit {
        /// File holding the posted body; reads stdin when omitted
        path: Option<PathBuf>,
    },

    /// Apply the structural edit carried by a request URL and print the redirect target
    Apply {
        /// Full request URL, e.g. https://host/main.php?id=7&cmd_options=up&cid=2
        url: String,
    },
}

/// Render the stored list of the configured record.
pub fn render(config: &WizardConfig, store: &dyn OptionStore) -> Result<String> {
    let list = store.load(&config.record_key())?;
    Ok(render_widget(&list, &config.widget_id, &config.labels))
}

/// Validate a posted body and persist it; validation errors become a localized error.
///
/// The body is either urlencoded form data or a JSON array/object of rows.
pub fn submit(config: &WizardConfig, store: &dyn OptionStore, body: &str) -> Result<usize> {
    let trimmed = body.trim_start();
    let rows = if trimmed.starts_with('[') || trimmed.starts_with('{') {
        let value: serde_json::Value =
            serde_json::from_str(trimmed).context("Invalid JSON submission")?;
        rows_from_json(&value)
    } else {
        parse_form_rows(body, &config.widget_id)
    };
    let report = validate(&rows).enforce_mandatory(config.mandatory);

    match report.into_result() {
        Ok(list) => {
            store.save(&config.record_key(), &list)?;
            Ok(list.len())
        }
        Err(errors) => {
            let messages: Vec<&str> = errors
                .iter()
                .map(|e| config.labels.get(e.as_str()))
                .collect();
            tracing::warn!(errors = ?errors, "submission rejected");
            bail!("{}", messages.join("\n"))
        }
    }
}

/// Apply a command URL; returns the redirect target, or `None` when the URL has no command.
pub fn apply(config: &WizardConfig, store: &dyn OptionStore, raw_url: &str) -> Result<Option<Url>> {
    let url = Url::parse(raw_url).with_context(|| format!("Invalid request URL {raw_url:?}"))?;
    handle_request(store, &config.record_key(), &url)
}

/// Dispatch a parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    let config = WizardConfig::load(&cli.config)?;

    match cli.command.unwrap_or(Commands::Gui) {
        Commands::Gui => crate::app::run(config)
            .map_err(|err| anyhow::anyhow!("Failed to run the editor: {err}")),
        Commands::Render => {
            let store = JsonFileStore::new(config.store_path.clone());
            println!("{}", render(&config, &store)?);
            Ok(())
        }
        Commands::Submit { path } => {
            let body = match path {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read form body {:?}", path))?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .context("Failed to read form body from stdin")?;
                    buf
                }
            };
            let store = JsonFileStore::new(config.store_path.clone());
            let rows = submit(&config, &store, body.trim_end())?;
            println!("Saved {rows} option(s) to {}", config.record_key());
            Ok(())
        }
        Commands::Apply { url } => {
            let store = JsonFileStore::new(config.store_path.clone());
            match apply(&config, &store, &url)? {
                Some(redirect) => println!("{redirect}"),
                None => tracing::info!("no command for field '{}' in URL", config.field),
            }
            Ok(())
        }
    }
}
