//! # Order Desk Host Library
//!
//! Host process for the back-office order-composition engine.
//! The dashboard spawns it and talks JSON lines over stdin/stdout.
//!
//! ## Module Organization
//! ```text
//! orderdesk_app/
//! ├── lib.rs          ◄─── You are here (startup & serve loop)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── catalog.rs  ◄─── Product and tax-rate snapshots
//! │   ├── draft.rs    ◄─── Wizard session
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs      ◄─── Request envelope and dispatch
//! │   ├── draft.rs    ◄─── Draft and tax commands
//! │   ├── wizard.rs   ◄─── Step and submission commands
//! │   └── config.rs   ◄─── Configuration commands
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## State Management (Multiple State Types)
//! Instead of a single mutable struct, the host keeps focused state types:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Host State                                           │
//! │                                                                         │
//! │  ┌──────────────────┐ ┌──────────────────┐ ┌──────────────────────┐   │
//! │  │  CatalogState    │ │   DraftState     │ │    ConfigState       │   │
//! │  │                  │ │                  │ │                      │   │
//! │  │  • Products      │ │  • Wizard step   │ │  • Currency          │   │
//! │  │  • Tax rates     │ │  • Line items    │ │  • Catalog path      │   │
//! │  │                  │ │  • Parties       │ │  • Default seller    │   │
//! │  └──────────────────┘ └──────────────────┘ └──────────────────────┘   │
//! │                                                                         │
//! │  Each command only borrows the state it needs.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Logs go to stderr; stdout carries responses only.

pub mod commands;
pub mod error;
pub mod state;

use std::io::{BufRead, Write};

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use state::{CatalogState, ConfigState, DraftState};

/// The state every command can draw from.
#[derive(Debug)]
pub struct Host {
    pub catalog: CatalogState,
    pub draft: DraftState,
    pub config: ConfigState,
}

impl Host {
    /// Builds the host with a fresh session, pre-filled from `config`.
    pub fn new(config: ConfigState, catalog: CatalogState) -> Self {
        let draft = DraftState::new();
        if let Err(e) = draft.with_wizard_mut(|w| commands::wizard::apply_defaults(w, &config)) {
            warn!(error = %e, "Ignoring invalid default seller");
        }

        Host {
            catalog,
            draft,
            config,
        }
    }
}

/// Runs the host until stdin closes.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Host Startup                                      │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, writing to stderr             │
/// │     • Default: INFO, can be overridden with RUST_LOG                    │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • ORDERDESK_* environment variables over defaults                   │
/// │                                                                         │
/// │  3. Load Catalog ─────────────────────────────────────────────────────► │
/// │     • From ORDERDESK_CATALOG_PATH if set                                │
/// │     • Otherwise empty until the dashboard sends load_catalog            │
/// │                                                                         │
/// │  4. Serve ────────────────────────────────────────────────────────────► │
/// │     • One request per stdin line, one response per stdout line          │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    info!("Starting Order Desk host");

    let config = ConfigState::from_env();
    let catalog = match &config.catalog_path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .map_err(|e| format!("failed to read catalog {}: {}", path.display(), e))?;
            let catalog = CatalogState::from_json(&raw)?;
            info!(path = %path.display(), "Catalog snapshot loaded");
            catalog
        }
        None => {
            info!("No catalog file configured, waiting for load_catalog");
            CatalogState::new()
        }
    };

    let host = Host::new(config, catalog);
    info!("State initialized");

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    serve(&host, stdin.lock(), stdout.lock())?;

    info!("Input closed, shutting down");
    Ok(())
}

/// Answers every non-blank input line with one response line.
pub fn serve<R, W>(host: &Host, input: R, mut output: W) -> std::io::Result<()>
where
    R: BufRead,
    W: Write,
{
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let response = commands::handle_line(host, &line);
        serde_json::to_writer(&mut output, &response)?;
        output.write_all(b"\n")?;
        output.flush()?;
    }
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=orderdesk=trace` - Show trace for orderdesk crates only
/// - Default: INFO, DEBUG for orderdesk
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,orderdesk=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
