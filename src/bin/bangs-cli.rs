use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::Value;

use bangs::bang::Outcome;
use bangs::config::loader::{build_registry, load_bang_file};
use bangs::{Registry, Resolver};

#[derive(Parser)]
#[command(name = "bangs-cli")]
#[command(about = "Inspect bang definitions and query a running bangs server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a bang definition file
    Check {
        file: PathBuf,
        /// Treat duplicate bangs as errors
        #[arg(long)]
        strict: bool,
    },
    /// Resolve a query offline and print the redirect URL
    Resolve {
        #[arg(short, long, default_value = "bangs.toml")]
        bangs: PathBuf,
        #[arg(required = true)]
        query: Vec<String>,
    },
    /// List the bangs served by a running server
    List {
        #[arg(short, long, default_value = "http://localhost:8080")]
        url: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { file, strict } => {
            let registry = build_registry(load_bang_file(&file)?, strict)?;
            for entry in registry.shadowed() {
                println!("duplicate: !{} -> {} (ignored)", entry.token(), entry.template());
            }
            println!(
                "ok: {} bangs, default {}",
                registry.len(),
                registry.default_template()
            );
        }
        Commands::Resolve { bangs, query } => {
            let registry = build_registry(load_bang_file(&bangs)?, false)?;
            match resolve(&registry, &query.join(" ")) {
                Ok(url) => println!("{}", url),
                Err(message) => {
                    eprintln!("{}", message);
                    std::process::exit(1);
                }
            }
        }
        Commands::List { url } => {
            let res = reqwest::get(format!("{}/list", url.trim_end_matches('/'))).await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

/// Resolve a query the way the server does, including the blank-query check.
fn resolve(registry: &Registry, query: &str) -> Result<String, String> {
    let query = query.trim();
    if query.is_empty() {
        return Err("No query provided for search".to_string());
    }

    match Resolver::new(registry).outcome(query) {
        Outcome::Redirect(url) => Ok(url),
        Outcome::Fallback(original) => Ok(registry.default_url(&original)),
        Outcome::NotFound(token) => Err(format!("Unknown bang: '{}'", token)),
    }
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: server returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
