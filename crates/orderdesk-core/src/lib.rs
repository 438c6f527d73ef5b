//! # orderdesk-core: Order Draft Pricing Engine
//!
//! Pure business logic behind the order-composition wizard of the
//! back-office dashboard. Catalog and tax-rate snapshots come in as values;
//! a submission payload for the Order API comes out.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Order Desk Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Dashboard (browser)                          │   │
//! │  │  Customer ──► Items ──► Seller ──► Shipping ──► Review          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON commands                          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    apps/orderdesk (host)                        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ orderdesk-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌─────────────┐ ┌──────────┐ ┌──────────────┐    │   │
//! │  │   │   cart   │ │ eligibility │ │ pricing  │ │   assembly   │    │   │
//! │  │   │ LineItem │ │  Mode       │ │  Totals  │ │ Submission   │    │   │
//! │  │   └──────────┘ └─────────────┘ └──────────┘ └──────────────┘    │   │
//! │  │        draft (OrderDraft) ◄──── wizard (OrderWizard)            │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │ OrderSubmission                        │
//! │                                ▼                                        │
//! │                    Order API (external, authoritative)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Integer-cent money and half-up tax rounding
//! - [`types`] - Product / tax snapshots and order parties
//! - [`cart`] - Line item store with availability clamping
//! - [`eligibility`] - Which tax categories fit the cart's product mix
//! - [`pricing`] - Subtotal, tax and total derivation
//! - [`draft`] - The order draft tying the above together
//! - [`assembly`] - Submission payload mapping
//! - [`wizard`] - Step machine around the draft
//! - [`validation`] - Snapshot and party field checks
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use orderdesk_core::{OrderDraft, ProductKind, ProductSnapshot, TaxCategory, TaxRate};
//!
//! let chair = ProductSnapshot {
//!     id: "chair".into(),
//!     name: "Chair".into(),
//!     unit_price_cents: 10000,
//!     available_quantity: 5,
//!     kind: ProductKind::Good,
//! };
//!
//! let mut draft = OrderDraft::new();
//! draft.add_item(&chair, 2).unwrap();
//! draft.add_item(&chair, 10).unwrap(); // clamps to stock: 5
//!
//! draft
//!     .select_tax(&TaxRate {
//!         id: "igv".into(),
//!         category: TaxCategory::Goods,
//!         percentage_bps: 1800,
//!         description: "IGV 18%".into(),
//!     })
//!     .unwrap();
//!
//! let totals = draft.totals();
//! assert_eq!(totals.subtotal.cents(), 50000);
//! assert_eq!(totals.tax_amount.cents(), 9000);
//! assert_eq!(totals.total.cents(), 59000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod assembly;
pub mod cart;
pub mod draft;
pub mod eligibility;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;
pub mod wizard;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use assembly::{assemble, OrderSubmission, SubmissionItem};
pub use cart::{ItemChange, LineItem, LineItemStore};
pub use draft::{DraftChange, OrderDraft};
pub use eligibility::EligibilityMode;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::{LineTax, Totals};
pub use types::*;
pub use wizard::{OrderWizard, WizardStep};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct line items in a single draft.
///
/// ## Business Reason
/// Keeps the order-entry screen and the submission request a sane size.
pub const MAX_DRAFT_ITEMS: usize = 100;

/// Maximum order subtotal in cents.
///
/// Half of `i64::MAX`, so subtotal plus a tax of at most 100% still fits.
pub const MAX_ORDER_SUBTOTAL_CENTS: i64 = i64::MAX / 2;
