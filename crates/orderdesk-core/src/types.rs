//! # Domain Types
//!
//! Snapshot and reference types consumed by the pricing engine.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────┐   ┌──────────────────┐   ┌──────────────────┐    │
//! │  │ ProductSnapshot  │   │     TaxRate      │   │  OrderParties    │    │
//! │  │  ──────────────  │   │  ──────────────  │   │  ──────────────  │    │
//! │  │  id              │   │  id              │   │  customer        │    │
//! │  │  name            │   │  category        │   │  seller          │    │
//! │  │  unit_price      │   │  percentage_bps  │   │  shipping        │    │
//! │  │  available_qty   │   │  description     │   │                  │    │
//! │  │  kind            │   └──────────────────┘   └──────────────────┘    │
//! │  └──────────────────┘                                                   │
//! │                                                                         │
//! │  ProductKind: Good | Service                                            │
//! │  TaxCategory: Goods | Services | Blended                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All snapshots are read-only copies of what the Catalog and Tax-rate
//! providers returned. The engine never re-fetches them.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Percentage
// =============================================================================

/// Tax percentage in basis points (bps).
///
/// 1 bps = 0.01%, so 1800 bps = 18%. Valid range is 0..=10000.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxPercentage(u32);

impl TaxPercentage {
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxPercentage(bps)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn as_percent(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn zero() -> Self {
        TaxPercentage(0)
    }
}

impl Default for TaxPercentage {
    fn default() -> Self {
        TaxPercentage::zero()
    }
}

// =============================================================================
// Product Kind / Tax Category
// =============================================================================

/// Whether a catalog product is a physical good or a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ProductKind {
    Good,
    Service,
}

/// The closed set of tax categories configured in the back-office.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TaxCategory {
    /// Standard levy on goods.
    Goods,
    /// Standard levy on services.
    Services,
    /// Composite levy on the combined total of a mixed order
    /// (catering-style: food plus service).
    Blended,
}

impl TaxCategory {
    /// Blended categories apply to the whole order, never per kind.
    #[inline]
    pub const fn is_blended(&self) -> bool {
        matches!(self, TaxCategory::Blended)
    }
}

// =============================================================================
// Product Snapshot
// =============================================================================

/// A catalog product as returned by the Catalog provider.
///
/// Price and stock are frozen into the line item when it is added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductSnapshot {
    pub id: String,
    pub name: String,
    /// Price in cents.
    pub unit_price_cents: i64,
    /// Stock ceiling at fetch time. Advisory; the Order API re-checks.
    pub available_quantity: i64,
    pub kind: ProductKind,
}

impl ProductSnapshot {
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// A product with no stock can never satisfy `quantity >= 1`.
    #[inline]
    pub fn is_in_stock(&self) -> bool {
        self.available_quantity >= 1
    }
}

// =============================================================================
// Tax Rate
// =============================================================================

/// A configured tax rate. Immutable for the lifetime of a draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TaxRate {
    pub id: String,
    pub category: TaxCategory,
    pub percentage_bps: u32,
    pub description: String,
}

impl TaxRate {
    #[inline]
    pub fn percentage(&self) -> TaxPercentage {
        TaxPercentage::from_bps(self.percentage_bps)
    }
}

// =============================================================================
// Order Parties
// =============================================================================

/// The customer the order is placed for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRef {
    pub id: String,
    pub name: String,
    /// Fiscal identifier, when the customer invoices with one.
    pub tax_id: Option<String>,
}

/// The salesperson credited with the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SellerRef {
    pub id: String,
    pub name: String,
}

/// Delivery data for the outbound shipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ShippingDetails {
    pub recipient: String,
    pub address_line: String,
    pub city: String,
    pub region: Option<String>,
    pub postal_code: Option<String>,
    pub notes: Option<String>,
}

/// Everything the caller supplies next to the draft at submission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderParties {
    pub customer: CustomerRef,
    pub seller: SellerRef,
    pub shipping: ShippingDetails,
}

// =============================================================================
// Unit Tests
// =============================================================================
