//! # Order Draft
//!
//! The in-progress, unpersisted order: line items plus an optional tax.
//!
//! ## Recalculation Cycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  add_item / update_quantity / remove_item / clear                       │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  LineItemStore mutation (clamped)                                       │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  EligibilityMode::resolve(kinds) ──► selected tax still allowed?        │
//! │        │                                 │ no                           │
//! │        │                                 ▼                              │
//! │        │                           selected_tax = None                  │
//! │        ▼                                                                │
//! │  DraftChange { item, tax_cleared }                                      │
//! │                                                                         │
//! │  totals() is derived on read, never stored.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;
use ts_rs::TS;

use crate::cart::{ItemChange, LineItem, LineItemStore};
use crate::eligibility::EligibilityMode;
use crate::error::{CoreError, CoreResult};
use crate::pricing::{aggregate, allocate_line_tax, LineTax, Totals};
use crate::types::{ProductSnapshot, TaxRate};
use crate::validation::validate_tax_rate;

/// Result of a draft mutation.
///
/// Neither field is an error: clamping and tax clearing are part of the
/// normal contract, reported so the caller can tell the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DraftChange {
    /// The line affected, for add and quantity updates.
    pub item: Option<ItemChange>,
    /// Id of the tax that stopped being eligible and was deselected.
    pub tax_cleared: Option<String>,
}

/// An order being composed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    items: LineItemStore,
    selected_tax: Option<TaxRate>,
    created_at: DateTime<Utc>,
}

impl Default for OrderDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderDraft {
    /// Creates an empty draft.
    pub fn new() -> Self {
        OrderDraft {
            items: LineItemStore::new(),
            selected_tax: None,
            created_at: Utc::now(),
        }
    }

    pub fn items(&self) -> &LineItemStore {
        &self.items
    }

    pub fn item(&self, item_id: &str) -> Option<&LineItem> {
        self.items.get(item_id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn selected_tax(&self) -> Option<&TaxRate> {
        self.selected_tax.as_ref()
    }

    pub fn selected_tax_id(&self) -> Option<&str> {
        self.selected_tax.as_ref().map(|t| t.id.as_str())
    }

    // =========================================================================
    // Item Mutations
    // =========================================================================

    /// Adds a product, or accumulates onto its existing line.
    pub fn add_item(&mut self, product: &ProductSnapshot, requested: i64) -> CoreResult<DraftChange> {
        let item = self.items.add(product, requested)?;
        Ok(DraftChange {
            item: Some(item),
            tax_cleared: self.reconcile_tax(),
        })
    }

    /// Sets a line's quantity, clamped into `[1, available_quantity]`.
    pub fn update_quantity(&mut self, item_id: &str, requested: i64) -> CoreResult<DraftChange> {
        let item = self.items.update_quantity(item_id, requested)?;
        Ok(DraftChange {
            item: Some(item),
            tax_cleared: self.reconcile_tax(),
        })
    }

    pub fn remove_item(&mut self, item_id: &str) -> CoreResult<DraftChange> {
        self.items.remove(item_id)?;
        Ok(DraftChange {
            item: None,
            tax_cleared: self.reconcile_tax(),
        })
    }

    /// Removes every line. Any selected tax is cleared with them.
    pub fn clear(&mut self) -> DraftChange {
        self.items.clear();
        DraftChange {
            item: None,
            tax_cleared: self.reconcile_tax(),
        }
    }

    // =========================================================================
    // Tax Selection
    // =========================================================================

    /// Current eligibility mode, derived from the line items.
    pub fn eligibility(&self) -> EligibilityMode {
        EligibilityMode::resolve(self.items.kinds())
    }

    /// The subset of `rates` selectable right now.
    pub fn eligible_rates<'a>(&self, rates: &'a [TaxRate]) -> Vec<&'a TaxRate> {
        self.eligibility().eligible_rates(rates)
    }

    /// Selects a tax for the whole order.
    ///
    /// ## Errors
    /// - `Validation` if the rate snapshot is malformed
    /// - `TaxNotEligible` if its category is not allowed for the current
    ///   items (including any selection on an empty draft)
    pub fn select_tax(&mut self, rate: &TaxRate) -> CoreResult<()> {
        validate_tax_rate(rate)?;

        if !self.eligibility().allows(rate.category) {
            return Err(CoreError::TaxNotEligible {
                tax_id: rate.id.clone(),
            });
        }

        self.selected_tax = Some(rate.clone());
        Ok(())
    }

    /// Deselects the tax, returning what was selected.
    pub fn clear_tax(&mut self) -> Option<TaxRate> {
        self.selected_tax.take()
    }

    fn reconcile_tax(&mut self) -> Option<String> {
        let mode = self.eligibility();
        let still_allowed = self
            .selected_tax
            .as_ref()
            .map_or(true, |rate| mode.allows(rate.category));

        if still_allowed {
            None
        } else {
            self.selected_tax.take().map(|t| t.id)
        }
    }

    // =========================================================================
    // Derived Figures
    // =========================================================================

    pub fn totals(&self) -> Totals {
        aggregate(&self.items, self.selected_tax.as_ref())
    }

    /// Per-line tax preview; empty when no tax is selected.
    pub fn line_taxes(&self) -> Vec<LineTax> {
        match &self.selected_tax {
            Some(rate) => allocate_line_tax(&self.items, rate),
            None => Vec::new(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
