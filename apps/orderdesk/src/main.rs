//! # Order Desk Host Entry Point
//!
//! ## Process Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Order Desk                                       │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                    Back-office Dashboard                         │  │
//! │  │  • Customer picker      • Product table                          │  │
//! │  │  • Tax selector         • Review screen                          │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                 │ stdin: requests        ▲ stdout: responses            │
//! │                 ▼                        │                              │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                    Rust Host (this binary)                       │  │
//! │  │                                                                  │  │
//! │  │  main.rs ────► Exit code                                         │  │
//! │  │  lib.rs ─────► Logging, config, catalog, serve loop              │  │
//! │  │  commands/ ──► add_to_draft, select_tax, submit_order, ...       │  │
//! │  │  state/ ─────► CatalogState, DraftState, ConfigState             │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                 │                                       │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                    orderdesk-core                                │  │
//! │  │  Draft, eligibility, pricing, wizard (pure, no I/O)              │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

fn main() -> ExitCode {
    // The actual setup is in lib.rs for better testability
    match orderdesk_app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Order Desk host failed");
            eprintln!("orderdesk: {}", e);
            ExitCode::FAILURE
        }
    }
}
