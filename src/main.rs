//! Crawl Signal main entry point
//!
//! This is the command-line interface for the Crawl Signal visibility tools.

use anyhow::Context;
use clap::{Parser, Subcommand};
use crawl_signal::config::resolve_config;
use crawl_signal::logging::init_logging;
use crawl_signal::tools::{AUDIT_PAGE_FOR_GEO, CHECK_PERPLEXITY_STATUS, SUBMIT_URL_INDEXNOW};
use crawl_signal::{ToolCallResult, ToolRegistry};
use serde_json::{json, Map, Value};
use std::path::PathBuf;
use std::process::ExitCode;

/// Crawl Signal: AI crawler visibility checks
///
/// Audits pages for signals that help or hinder AI and search crawlers,
/// submits URLs to IndexNow, and asks Perplexity whether a page is reachable.
#[derive(Parser, Debug)]
#[command(name = "crawl-signal")]
#[command(version)]
#[command(about = "AI crawler visibility checks", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log file path (overrides configuration)
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Increase logging verbosity and mirror logs to stderr (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Audit a page for GEO / AI crawler visibility signals
    Audit {
        url: String,

        /// Do not fetch robots.txt
        #[arg(long)]
        skip_robots: bool,
    },

    /// Submit URLs to IndexNow
    Submit {
        #[arg(required = true)]
        urls: Vec<String>,

        /// Payload host; derived from the first URL if omitted
        #[arg(long)]
        host: Option<String>,

        /// IndexNow key (falls back to INDEXNOW_KEY)
        #[arg(long)]
        key: Option<String>,

        /// Key file URL; defaults to https://{host}/{key}.txt
        #[arg(long)]
        key_location: Option<String>,
    },

    /// Ask Perplexity to summarize a URL
    Perplexity {
        url: String,

        /// Perplexity API key (falls back to PERPLEXITY_API_KEY)
        #[arg(long)]
        key: Option<String>,

        /// Model name (default sonar-pro)
        #[arg(long)]
        model: Option<String>,
    },

    /// Print the tool definitions as JSON
    Tools,

    /// Invoke a tool by name with JSON arguments
    Call {
        tool: String,

        /// Arguments object, e.g. '{"url":"https://example.com"}'
        #[arg(value_name = "JSON")]
        arguments: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = resolve_config(cli.config.as_deref()).context("Failed to load configuration")?;

    let log_path = cli
        .log_file
        .clone()
        .unwrap_or_else(|| config.logging.resolved_path());
    init_logging(&log_path, cli.verbose, cli.quiet)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    tracing::info!("Starting Crawl Signal {}", env!("CARGO_PKG_VERSION"));

    let Some((tool, arguments)) = tool_invocation(cli.command)? else {
        let listing = serde_json::to_string_pretty(&ToolRegistry::list_tools())?;
        println!("{}", listing);
        return Ok(ExitCode::SUCCESS);
    };

    let registry = ToolRegistry::from_config(&config)?;
    let result = registry.call(&tool, Some(arguments)).await;
    Ok(report(result))
}

/// Maps a subcommand onto a tool name and its arguments
///
/// Returns `None` for `tools`, which lists instead of invoking.
fn tool_invocation(command: Command) -> anyhow::Result<Option<(String, Value)>> {
    let invocation = match command {
        Command::Tools => return Ok(None),
        Command::Audit { url, skip_robots } => (
            AUDIT_PAGE_FOR_GEO.to_string(),
            json!({ "url": url, "checkRobotsTxt": !skip_robots }),
        ),
        Command::Submit {
            urls,
            host,
            key,
            key_location,
        } => {
            let mut args = Map::new();
            args.insert("urls".to_string(), json!(urls));
            insert_optional(&mut args, "host", host);
            insert_optional(&mut args, "apiKey", key);
            insert_optional(&mut args, "keyLocation", key_location);
            (SUBMIT_URL_INDEXNOW.to_string(), Value::Object(args))
        }
        Command::Perplexity { url, key, model } => {
            let mut args = Map::new();
            args.insert("url".to_string(), json!(url));
            insert_optional(&mut args, "apiKey", key);
            insert_optional(&mut args, "model", model);
            (CHECK_PERPLEXITY_STATUS.to_string(), Value::Object(args))
        }
        Command::Call { tool, arguments } => {
            let args = match arguments {
                Some(raw) => serde_json::from_str(&raw)
                    .with_context(|| format!("Arguments for {} are not valid JSON", tool))?,
                None => Value::Object(Map::new()),
            };
            (tool, args)
        }
    };

    Ok(Some(invocation))
}

fn insert_optional(args: &mut Map<String, Value>, name: &str, value: Option<String>) {
    if let Some(value) = value {
        args.insert(name.to_string(), Value::String(value));
    }
}

/// Prints a tool result; errors go to stderr and fail the process
fn report(result: ToolCallResult) -> ExitCode {
    if result.is_error {
        eprintln!("{}", result.text);
        ExitCode::FAILURE
    } else {
        println!("{}", result.text);
        ExitCode::SUCCESS
    }
}
