use clap::{ArgAction, Parser};
use colored::*;
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info, warn};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

mod api;
mod catalog;
mod config;
mod errors;
mod models;
mod output;

use crate::api::jira::JiraClient;
use crate::catalog::extractor::extract_catalog;
use crate::catalog::selector::FieldSelector;
use crate::config::credentials::Credentials;
use crate::errors::Result;
use crate::models::field::FieldDefinition;
use crate::output::presenter::Presenter;

#[derive(Parser, Debug)]
#[command(name = "jira-fields")]
#[command(version)]
#[command(about = "List Jira custom fields and their allowed values", long_about = None)]
struct Cli {
    /// Path to output file (prints to the console when omitted)
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    file: Option<PathBuf>,

    /// A field name to search for (exact match)
    #[arg(short = 'n', long = "name")]
    name: Option<String>,

    /// A customfield ID to search for (e.g., 10100 or customfield_10100)
    #[arg(short = 'i', long = "id")]
    id: Option<String>,

    /// Path to a credentials file with username, password and site_url
    #[arg(short = 'c', long = "credentials", value_name = "PATH")]
    credentials: Option<PathBuf>,

    /// Increase log output (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("\n{}", e);
        std::process::exit(e.exit_code());
    }
}

fn init_tracing(verbosity: u8) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(log_filter(verbosity, rust_log.as_deref()))
        .init();

    debug!("Tracing initialized with verbosity: {}", verbosity);
}

/// `RUST_LOG` wins when set; otherwise `-v` picks the level.
fn log_filter(verbosity: u8, rust_log: Option<&str>) -> EnvFilter {
    if let Some(directives) = rust_log.filter(|d| !d.trim().is_empty()) {
        return EnvFilter::new(directives);
    }

    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    EnvFilter::default().add_directive(level.into())
}

async fn run(cli: Cli) -> Result<()> {
    // Flag problems must surface before we prompt or hit the network.
    let selector = FieldSelector::from_args(cli.name.as_deref(), cli.id.as_deref())?;
    debug!(?selector, "Resolved field selector");

    let credentials = match &cli.credentials {
        Some(path) => Credentials::from_file(path)?,
        None => Credentials::prompt()?,
    };
    debug!(?credentials, "Using credentials");

    let jira = JiraClient::new(&credentials);
    let body = jira.get_create_meta().await?;

    let catalog = extract_catalog(&body)?;
    info!(fields = catalog.len(), "Built custom field catalog");

    if catalog.is_empty() {
        warn!("No custom fields found in the create metadata");
    }

    let fields = selector.select(&catalog)?;

    match &cli.file {
        Some(path) => {
            render(Presenter::file(path)?, &fields)?;
            eprintln!(
                "{} {}",
                format!("Wrote {} field(s) to", fields.len()).green(),
                path.display().to_string().bright_white()
            );
        }
        None => render(Presenter::console(), &fields)?,
    }

    Ok(())
}

fn render<W: Write>(mut presenter: Presenter<W>, fields: &[&FieldDefinition]) -> Result<()> {
    presenter.write_fields(fields.iter().copied())?;
    presenter.finish()?;
    Ok(())
}
