//! bangs: search shortcut redirect service.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────────┐
//!                    │                     BANGS                         │
//!                    │                                                   │
//!  GET /?q=!g rust   │  ┌─────────┐    ┌─────────┐    ┌──────────┐      │
//!  ──────────────────┼─▶│  http   │───▶│  bang   │───▶│ registry │      │
//!  GET /g/rust       │  │handlers │    │ parser  │    │  lookup  │      │
//!                    │  └─────────┘    └─────────┘    └────┬─────┘      │
//!                    │                                     │            │
//!  303 Location      │  ┌─────────┐    ┌──────────┐        ▼            │
//!  ◀─────────────────┼──│response │◀───│ template │◀── resolver         │
//!                    │  └─────────┘    │ expand   │                      │
//!                    │                 └──────────┘                      │
//!                    │  ┌─────────────────────────────────────────────┐ │
//!                    │  │ config + watcher │ observability │ lifecycle│ │
//!                    │  └─────────────────────────────────────────────┘ │
//!                    └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use bangs::config::loader::load_config;
use bangs::config::validation::validate_config;
use bangs::config::ServiceConfig;
use bangs::lifecycle::startup;
use bangs::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "bangs")]
#[command(about = "Redirects !bang search shortcuts to their search engines", long_about = None)]
struct Cli {
    /// Service configuration file (TOML).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bang definition file path or URL.
    #[arg(short, long)]
    bangs: Option<String>,

    /// Address to listen on.
    #[arg(long)]
    bind: Option<String>,

    /// Reload the bang file when it changes.
    #[arg(short, long)]
    watch: bool,

    /// Reject queries without a bang instead of using the default engine.
    #[arg(long)]
    no_default: bool,
}

impl Cli {
    fn apply(self, mut config: ServiceConfig) -> ServiceConfig {
        if let Some(bangs) = self.bangs {
            config.registry.source = bangs;
        }
        if let Some(bind) = self.bind {
            config.listener.bind_address = bind;
        }
        if self.watch {
            config.registry.watch = true;
        }
        if self.no_default {
            config.registry.allow_no_bang = false;
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };
    let config = cli.apply(config);

    if let Err(errors) = validate_config(&config) {
        for e in &errors {
            eprintln!("invalid configuration: {}", e);
        }
        return Err(format!("{} configuration error(s)", errors.len()).into());
    }

    init_logging(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        source = %config.registry.source,
        bind_address = %config.listener.bind_address,
        "bangs starting"
    );

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
