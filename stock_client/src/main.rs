//! StockStream Client — looks up stock quotes and company news from the StockStream
//! backend and prints them to stdout. Without a subcommand it runs an interactive search
//! with typeahead suggestions; see `input` for the line commands.
//!
//! Usage example (CLI):
//! ```bash
//! stock_client --base-url http://localhost:8000 quote AAPL msft
//! stock_client quote --path ./symbols.txt
//! stock_client search apple
//! stock_client health
//! stock_client
//! ```
//!
//! The symbol file should contain symbols separated by commas, spaces, or new lines.
#![warn(missing_docs)]
mod args;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use log::{error, info, warn};
use stock_client::api::{ApiClient, StockApi};
use stock_client::display::{render_page, render_suggestions};
use stock_client::input::{HELP, Input};
use stock_client::orchestrator::FetchOrchestrator;
use stock_client::suggest::{Key, MIN_QUERY_CHARS, Phase, SuggestionEngine};
use stock_common::symbol::SymbolParser;
use stock_common::{Result, StockError, Symbol};
use tokio::io::{AsyncBufReadExt, BufReader as AsyncBufReader};

use crate::args::{Args, Mode};

#[tokio::main]
async fn main() -> Result<(), StockError> {
    init_logger();
    let args = Args::parse();
    let api = Arc::new(ApiClient::new(&args.base_url)?);

    match args.mode.unwrap_or(Mode::Interactive) {
        Mode::Quote { symbols, path } => run_quotes(api, args.days, symbols, path).await,
        Mode::Search { query } => run_search(api.as_ref(), &query.join(" ")).await,
        Mode::Health => run_health(api.as_ref()).await,
        Mode::Interactive => run_interactive(api, args.days).await,
    }
}

/// Collects symbols from the command line and the optional file, then runs one
/// orchestration per symbol and prints the resulting page.
async fn run_quotes(
    api: Arc<ApiClient>,
    days: u32,
    raw_symbols: Vec<String>,
    path: Option<String>,
) -> Result<(), StockError> {
    let mut symbols = raw_symbols
        .iter()
        .map(|raw| raw.parse::<Symbol>())
        .collect::<Result<Vec<_>>>()?;

    if let Some(path) = path {
        let file_path = normalize_path(&path);
        if !is_file_exist(&file_path) {
            error!("Symbol file not found: {}", file_path.display());
            return Err(StockError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} is not a file", file_path.display()),
            )));
        }
        let file = File::open(&file_path)?;
        for symbol in Symbol::parse_from_file(BufReader::new(file))? {
            if !symbols.contains(&symbol) {
                symbols.push(symbol);
            }
        }
    }

    if symbols.is_empty() {
        warn!("No symbols given. Pass symbols or --path <FILE>.");
        return Ok(());
    }
    info!("Symbols: {:?}", symbols);

    let mut orchestrator = FetchOrchestrator::with_news_days(api, days);
    for symbol in &symbols {
        orchestrator.search(symbol.as_str()).await;
        println!("{}", render_page(orchestrator.state()));
    }
    Ok(())
}

async fn run_search(api: &ApiClient, query: &str) -> Result<(), StockError> {
    if query.trim().chars().count() < MIN_QUERY_CHARS {
        warn!("Search query must have at least {} characters", MIN_QUERY_CHARS);
        return Ok(());
    }
    let suggestions = api.search_suggestions(query).await?;
    if suggestions.is_empty() {
        println!("No matches for '{}'", query.trim());
    } else {
        print!("{}", render_suggestions(&suggestions, None));
    }
    Ok(())
}

async fn run_health(api: &ApiClient) -> Result<(), StockError> {
    let health = api.health().await?;
    println!(
        "{} is {}",
        health.service.as_deref().unwrap_or("backend"),
        health.status
    );
    if !health.is_healthy() {
        warn!("Backend at {} reports status '{}'", api.base_url(), health.status);
    }
    Ok(())
}

/// Interactive session: stdin lines drive the suggestion engine, settlements from
/// both engines are applied as they arrive. Ends on `/quit`, EOF or Ctrl+C.
async fn run_interactive(api: Arc<ApiClient>, days: u32) -> Result<(), StockError> {
    let mut engine = SuggestionEngine::new(Arc::clone(&api));
    let mut orchestrator = FetchOrchestrator::with_news_days(api, days);
    let mut lines = AsyncBufReader::new(tokio::io::stdin()).lines();
    println!("{}", HELP);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match Input::parse(&line) {
                    Input::Text(text) => engine.on_input(&text),
                    Input::Key(key) => match engine.on_key(key) {
                        Some(symbol) => submit(&mut orchestrator, &symbol),
                        None if key == Key::Enter => submit(&mut orchestrator, engine.query()),
                        None => print_dropdown(&engine),
                    },
                    Input::Pick(index) => match engine.click(index) {
                        Some(symbol) => submit(&mut orchestrator, &symbol),
                        None => println!("No suggestion {} to pick", index + 1),
                    },
                    Input::Away => engine.click_outside(),
                    Input::Focus => {
                        engine.focus();
                        print_dropdown(&engine);
                    }
                    Input::Submit => submit(&mut orchestrator, engine.query()),
                    Input::Help => println!("{}", HELP),
                    Input::Quit => break,
                    Input::Unknown(command) => println!("Unknown command {}; try /help", command),
                }
            }
            applied = engine.tick() => {
                if applied && engine.phase() == Phase::Shown {
                    print_dropdown(&engine);
                }
            }
            applied = orchestrator.tick() => {
                if applied && !orchestrator.state().is_loading() {
                    println!("{}", render_page(orchestrator.state()));
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Ctrl+C received. Shutting down client...");
                break;
            }
        }
    }
    Ok(())
}

fn submit<A: StockApi + ?Sized + 'static>(orchestrator: &mut FetchOrchestrator<A>, query: &str) {
    match orchestrator.submit(query) {
        Some(_) => println!("Searching {}...", query.trim().to_uppercase()),
        None => println!("Enter a symbol first"),
    }
}

fn print_dropdown<A: StockApi + ?Sized + 'static>(engine: &SuggestionEngine<A>) {
    if engine.is_visible() {
        print!("{}", render_suggestions(engine.suggestions(), engine.cursor()));
    }
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

/// Normalize a CLI-provided path string by trimming whitespace and matching quotes.
///
/// This allows passing Windows paths in quotes without breaking parsing.
fn normalize_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    let no_quotes = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    PathBuf::from(no_quotes)
}

/// Returns `true` if the provided path exists and is a regular file.
fn is_file_exist(path: &Path) -> bool {
    path.exists() && path.is_file()
}
