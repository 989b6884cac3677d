//! Route table CLI.
//!
//! Loads a TOML route table, builds the router and resolves paths against it.
//!
//! ```text
//! trie-router --config routes.toml routes
//! trie-router --config routes.toml match /hi/jiaju
//! trie-router --config routes.toml dispatch POST /page/static/index.html
//! ```

use std::collections::HashMap;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;

use trie_router::config::load_config;
use trie_router::observability::init_logging;
use trie_router::router::table::build_router;
use trie_router::Method;

#[derive(Parser)]
#[command(name = "trie-router")]
#[command(about = "Resolve request paths against a pattern route table", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "routes.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the route table and build the router
    Check,
    /// List registered patterns in match priority order
    Routes,
    /// Resolve a path and print the matched pattern and parameters
    Match { path: String },
    /// Run hooks and handler for a request and print the response
    Dispatch { method: String, path: String },
}

#[derive(Serialize)]
struct RouteEntry<'a> {
    pattern: &'a str,
    methods: Vec<Method>,
}

#[derive(Serialize)]
struct MatchReport<'a> {
    pattern: &'a str,
    params: &'a HashMap<String, String>,
    methods: Vec<Method>,
    depth: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;
    init_logging(&config.observability.log_level)?;

    tracing::debug!(config = %cli.config.display(), "Building router");
    let router = build_router(&config)?;

    match cli.command {
        Commands::Check => {
            print_json(&json!({
                "status": "ok",
                "routes": router.trie().len(),
            }))?;
        }
        Commands::Routes => {
            let entries: Vec<_> = router
                .trie()
                .patterns()
                .into_iter()
                .map(|(pattern, handler)| RouteEntry {
                    pattern,
                    methods: handler.methods(),
                })
                .collect();
            print_json(&entries)?;
        }
        Commands::Match { path } => match router.lookup(&path) {
            Some(matched) => {
                print_json(&MatchReport {
                    pattern: matched.pattern(),
                    params: matched.params(),
                    methods: matched.value().methods(),
                    depth: matched.chain().len(),
                })?;
            }
            None => {
                tracing::info!(path = %path, "No route matched");
                eprintln!("No route matches {path}");
                std::process::exit(1);
            }
        },
        Commands::Dispatch { method, path } => {
            print_json(&router.dispatch(&method, &path))?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
