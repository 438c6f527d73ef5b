//! # State Module
//!
//! Host state, split by concern so each command takes only what it needs.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │ CatalogState │  │  DraftState  │  │   ConfigState    │              │
//! │  │              │  │              │  │                  │              │
//! │  │  products    │  │  Arc<Mutex<  │  │  currency        │              │
//! │  │  tax rates   │  │   Wizard     │  │  catalog path    │              │
//! │  │  (RwLock)    │  │  >>          │  │  default seller  │              │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘              │
//! │                                                                         │
//! │  • CatalogState: replaced wholesale when the dashboard refreshes        │
//! │  • DraftState: exclusive access per command                             │
//! │  • ConfigState: read-only after initialization                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod catalog;
mod config;
mod draft;

pub use catalog::{CatalogError, CatalogSnapshot, CatalogState};
pub use config::ConfigState;
pub use draft::DraftState;
