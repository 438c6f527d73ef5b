//! # Line Item Store
//!
//! The ordered list of entries in an order draft.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Line Item Operations                                 │
//! │                                                                         │
//! │  Wizard Action            Store Method            Effect                │
//! │  ─────────────            ────────────            ──────                │
//! │                                                                         │
//! │  Pick product ──────────► add() ────────────────► push or increment     │
//! │                                                                         │
//! │  Edit quantity ─────────► update_quantity() ────► clamp into [1, stock] │
//! │                                                                         │
//! │  Click remove ──────────► remove() ─────────────► items.remove(i)       │
//! │                                                                         │
//! │  Cancel order ──────────► clear() ──────────────► items.clear()         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Items are unique by `product_ref`; adding the same product again
//!   accumulates quantity on the existing entry.
//! - `1 <= quantity <= available_quantity` for every item, always.
//! - `subtotal()` is computed from `unit_price` and `quantity` on every call,
//!   so it cannot go stale.
//! - A mutation touches exactly one entry.

use chrono::{DateTime, Utc};
use serde::Serialize;
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{ProductKind, ProductSnapshot};
use crate::validation::validate_product_snapshot;
use crate::{MAX_DRAFT_ITEMS, MAX_ORDER_SUBTOTAL_CENTS};

// =============================================================================
// Line Item
// =============================================================================

/// An entry in the draft.
///
/// ## Snapshot Pattern
/// Price, name, kind and stock ceiling are copied from the catalog snapshot
/// when the product is first added. Later catalog changes do not reach the
/// draft; the Order API re-checks on submission.
///
/// Fields are private so the quantity invariant can only be changed through
/// the store.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    id: String,
    product_ref: String,
    name: String,
    unit_price: Money,
    quantity: i64,
    available_quantity: i64,
    kind: ProductKind,
    #[ts(as = "String")]
    added_at: DateTime<Utc>,
}

impl LineItem {
    fn from_snapshot(product: &ProductSnapshot, quantity: i64) -> Self {
        LineItem {
            id: Uuid::new_v4().to_string(),
            product_ref: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.unit_price(),
            quantity,
            available_quantity: product.available_quantity,
            kind: product.kind,
            added_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn product_ref(&self) -> &str {
        &self.product_ref
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn available_quantity(&self) -> i64 {
        self.available_quantity
    }

    pub fn kind(&self) -> ProductKind {
        self.kind
    }

    pub fn added_at(&self) -> DateTime<Utc> {
        self.added_at
    }

    /// Line subtotal (unit price × quantity).
    #[inline]
    pub fn subtotal(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

/// Coerces a requested quantity into `[1, available]`.
///
/// Non-positive requests become 1 rather than being rejected.
#[inline]
pub fn clamp_quantity(requested: i64, available: i64) -> i64 {
    requested.max(1).min(available.max(1))
}

// =============================================================================
// Item Change
// =============================================================================

/// What a quantity-affecting mutation actually did.
///
/// `requested` is the quantity the caller asked the line to end up with;
/// `quantity` is what it ended up with after clamping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ItemChange {
    pub item_id: String,
    pub requested: i64,
    pub quantity: i64,
}

impl ItemChange {
    /// True when the request was coerced into the valid range.
    #[inline]
    pub fn clamped(&self) -> bool {
        self.requested != self.quantity
    }
}

// =============================================================================
// Line Item Store
// =============================================================================

/// Ordered collection of line items, unique by product.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LineItemStore {
    items: Vec<LineItem>,
}

impl LineItemStore {
    pub fn new() -> Self {
        LineItemStore { items: Vec::new() }
    }

    /// Adds a product or accumulates onto its existing entry.
    ///
    /// ## Behavior
    /// - Product already present: quantity grows by `max(requested, 0)`,
    ///   clamped to the stock ceiling frozen on the entry
    /// - Product not present: new entry with `requested` clamped into
    ///   `[1, available_quantity]`
    ///
    /// ## Errors
    /// - `Validation` if the snapshot is malformed
    /// - `OutOfStock` if a new product has no stock
    /// - `DraftTooLarge` if a new product would exceed `MAX_DRAFT_ITEMS`
    /// - `AmountOverflow` if the order subtotal would exceed
    ///   `MAX_ORDER_SUBTOTAL_CENTS`
    pub fn add(&mut self, product: &ProductSnapshot, requested: i64) -> CoreResult<ItemChange> {
        if let Some(index) = self.position_of_product(&product.id) {
            let item = &self.items[index];
            let wanted = item.quantity.saturating_add(requested.max(0));
            return self.set_quantity_at(index, wanted);
        }

        validate_product_snapshot(product)?;

        if !product.is_in_stock() {
            return Err(CoreError::OutOfStock {
                product_id: product.id.clone(),
            });
        }

        if self.items.len() >= MAX_DRAFT_ITEMS {
            return Err(CoreError::DraftTooLarge {
                max: MAX_DRAFT_ITEMS,
            });
        }

        let quantity = clamp_quantity(requested, product.available_quantity);
        self.ensure_subtotal_fits(None, product.unit_price(), quantity)?;

        let item = LineItem::from_snapshot(product, quantity);
        let change = ItemChange {
            item_id: item.id.clone(),
            requested,
            quantity,
        };
        self.items.push(item);
        Ok(change)
    }

    /// Sets the quantity of one entry, clamped into `[1, available_quantity]`.
    pub fn update_quantity(&mut self, item_id: &str, requested: i64) -> CoreResult<ItemChange> {
        let index = self
            .items
            .iter()
            .position(|i| i.id == item_id)
            .ok_or_else(|| CoreError::LineItemNotFound(item_id.to_string()))?;

        self.set_quantity_at(index, requested)
    }

    /// Removes one entry and returns it.
    pub fn remove(&mut self, item_id: &str) -> CoreResult<LineItem> {
        let index = self
            .items
            .iter()
            .position(|i| i.id == item_id)
            .ok_or_else(|| CoreError::LineItemNotFound(item_id.to_string()))?;

        Ok(self.items.remove(index))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn get(&self, item_id: &str) -> Option<&LineItem> {
        self.items.iter().find(|i| i.id == item_id)
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LineItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Product kinds present in the store.
    pub fn kinds(&self) -> impl Iterator<Item = ProductKind> + '_ {
        self.items.iter().map(|i| i.kind)
    }
}

impl LineItemStore {
    fn position_of_product(&self, product_ref: &str) -> Option<usize> {
        self.items.iter().position(|i| i.product_ref == product_ref)
    }

    /// Clamps and applies a quantity, leaving the entry untouched on error.
    fn set_quantity_at(&mut self, index: usize, requested: i64) -> CoreResult<ItemChange> {
        let item = &self.items[index];
        let quantity = clamp_quantity(requested, item.available_quantity);
        self.ensure_subtotal_fits(Some(index), item.unit_price, quantity)?;

        let item = &mut self.items[index];
        item.quantity = quantity;
        Ok(ItemChange {
            item_id: item.id.clone(),
            requested,
            quantity,
        })
    }

    /// Checks the order subtotal with one line replaced (or appended when
    /// `replacing` is `None`). Summed in `i128` so the check itself cannot wrap.
    fn ensure_subtotal_fits(
        &self,
        replacing: Option<usize>,
        unit_price: Money,
        quantity: i64,
    ) -> CoreResult<()> {
        let others: i128 = self
            .items
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != replacing)
            .map(|(_, item)| item.unit_price.cents() as i128 * item.quantity as i128)
            .sum();
        let line = unit_price.cents() as i128 * quantity as i128;

        if others + line > MAX_ORDER_SUBTOTAL_CENTS as i128 {
            return Err(CoreError::AmountOverflow {
                max: MAX_ORDER_SUBTOTAL_CENTS,
            });
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a LineItemStore {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
