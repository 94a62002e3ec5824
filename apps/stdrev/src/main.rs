//! # stdrev - C/C++ Standard Classifier
//!
//! The main binary for the stdrev conformance classifier.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      apps/stdrev (THE BINARY)                   │
//! │                                                                 │
//! │  ┌─────────────┐    ┌─────────────────┐    ┌───────────────┐   │
//! │  │   CLI       │    │  Quirks config  │    │  Macro dumps  │   │
//! │  │  (clap)     │    │  (toml)         │    │  (cc -dM -E)  │   │
//! │  └──────┬──────┘    └────────┬────────┘    └───────┬───────┘   │
//! │         │                    │                     │           │
//! │         └────────────────────┼─────────────────────┘           │
//! │                              ▼                                 │
//! │                      ┌───────────────┐                         │
//! │                      │  stdrev-core  │                         │
//! │                      │ (THE LOGIC)   │                         │
//! │                      └───────────────┘                         │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! stdrev classify --family cpp -D __cplusplus --token 201703
//! cc -dM -E - </dev/null > macros.txt && stdrev classify --macros macros.txt
//! stdrev check --macros macros.txt --at-least C99
//! stdrev ladder --family c
//! ```

use clap::Parser;
use stdrev::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    let cli = cli::Cli::parse();

    // STDREV_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("STDREV_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let default_filter = if cli.verbose {
        "stdrev=debug,stdrev_core=debug"
    } else {
        "stdrev=info,stdrev_core=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    // Logs go to stderr; stdout carries command output only.
    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    match cli::execute(cli) {
        Ok(outcome) => std::process::exit(outcome.exit_code()),
        Err(e) => {
            tracing::error!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
