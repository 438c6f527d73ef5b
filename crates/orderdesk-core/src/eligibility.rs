//! # Tax Eligibility
//!
//! Decides which tax categories may be applied to a draft, based only on the
//! mix of product kinds in it.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Kinds in cart          Mode                     Selectable categories  │
//! │  ─────────────          ────                     ─────────────────────  │
//! │  (none)            ──►  Empty               ──►  nothing                │
//! │  Good only         ──►  GoodsOrServicesOnly ──►  Goods, Services        │
//! │  Service only      ──►  GoodsOrServicesOnly ──►  Goods, Services        │
//! │  Good + Service    ──►  Mixed               ──►  Blended                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use ts_rs::TS;

use crate::types::{ProductKind, TaxCategory, TaxRate};

/// Rule set for selectable tax categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EligibilityMode {
    /// No items; no tax may be selected.
    Empty,
    /// Exactly one product kind; standard per-kind categories apply.
    GoodsOrServicesOnly,
    /// Goods and services together; only blended levies apply.
    Mixed,
}

impl EligibilityMode {
    /// Computes the mode from the kinds present in a cart.
    ///
    /// ```rust
    /// use orderdesk_core::eligibility::EligibilityMode;
    /// use orderdesk_core::types::ProductKind;
    ///
    /// let mode = EligibilityMode::resolve([ProductKind::Good, ProductKind::Service]);
    /// assert_eq!(mode, EligibilityMode::Mixed);
    /// ```
    pub fn resolve<I>(kinds: I) -> Self
    where
        I: IntoIterator<Item = ProductKind>,
    {
        let mut has_good = false;
        let mut has_service = false;

        for kind in kinds {
            match kind {
                ProductKind::Good => has_good = true,
                ProductKind::Service => has_service = true,
            }
            if has_good && has_service {
                return EligibilityMode::Mixed;
            }
        }

        if has_good || has_service {
            EligibilityMode::GoodsOrServicesOnly
        } else {
            EligibilityMode::Empty
        }
    }

    /// Whether a category may be selected in this mode.
    pub fn allows(&self, category: TaxCategory) -> bool {
        match self {
            EligibilityMode::Empty => false,
            EligibilityMode::GoodsOrServicesOnly => !category.is_blended(),
            EligibilityMode::Mixed => category.is_blended(),
        }
    }

    /// Filters a tax-rate snapshot down to the selectable rates, keeping
    /// the provider's order.
    pub fn eligible_rates<'a>(&self, rates: &'a [TaxRate]) -> Vec<&'a TaxRate> {
        rates.iter().filter(|r| self.allows(r.category)).collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
