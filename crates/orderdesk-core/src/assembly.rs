//! # Draft Assembly
//!
//! Maps a draft and the caller's parties into the payload the Order API
//! accepts. Pure field mapping: no validation, no clock, no randomness.
//!
//! ```text
//! OrderDraft ─┐
//!             ├──► assemble() ──► OrderSubmission ──► POST /orders (external)
//! OrderParties┘
//! ```
//!
//! Client subtotals are not sent; the server recomputes them.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::draft::OrderDraft;
use crate::types::{CustomerRef, OrderParties, SellerRef, ShippingDetails};

/// One submitted line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionItem {
    pub product_ref: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
}

/// Request body for order creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderSubmission {
    pub customer: CustomerRef,
    pub seller: SellerRef,
    pub shipping: ShippingDetails,
    pub items: Vec<SubmissionItem>,
    pub selected_tax_id: Option<String>,
}

impl OrderSubmission {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Builds the submission payload, keeping line order.
pub fn assemble(draft: &OrderDraft, parties: &OrderParties) -> OrderSubmission {
    OrderSubmission {
        customer: parties.customer.clone(),
        seller: parties.seller.clone(),
        shipping: parties.shipping.clone(),
        items: draft
            .items()
            .iter()
            .map(|item| SubmissionItem {
                product_ref: item.product_ref().to_string(),
                quantity: item.quantity(),
                unit_price_cents: item.unit_price().cents(),
            })
            .collect(),
        selected_tax_id: draft.selected_tax_id().map(str::to_string),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
