//! # Pricing Aggregator
//!
//! Derives subtotal, tax and total for a set of line items.
//!
//! ## Calculation
//! ```text
//! subtotal   = Σ unit_price × quantity
//! tax_amount = round_half_up(subtotal × bps / 10000)   (0 when no tax)
//! total      = subtotal + tax_amount
//! ```
//!
//! Every call recomputes from the line items. Nothing is carried over from
//! a previous aggregation, so rounding never compounds.

use serde::Serialize;
use ts_rs::TS;

use crate::cart::LineItem;
use crate::money::Money;
use crate::types::TaxRate;

/// Draft figures for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub subtotal: Money,
    pub tax_amount: Money,
    pub total: Money,
}

/// Aggregates line items under an optional order-level tax.
///
/// ```rust
/// use orderdesk_core::pricing::aggregate;
///
/// let totals = aggregate(std::iter::empty(), None);
/// assert!(totals.total.is_zero());
/// ```
pub fn aggregate<'a, I>(items: I, tax: Option<&TaxRate>) -> Totals
where
    I: IntoIterator<Item = &'a LineItem>,
{
    let subtotal: Money = items.into_iter().map(LineItem::subtotal).sum();
    let tax_amount = tax
        .map(|rate| subtotal.calculate_tax(rate.percentage()))
        .unwrap_or_default();

    Totals {
        subtotal,
        tax_amount,
        total: subtotal + tax_amount,
    }
}

/// Tax preview for a single line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineTax {
    pub item_id: String,
    pub tax_amount: Money,
}

/// Splits a tax across lines, rounding each line on its own.
///
/// The per-line figures may not add up to `aggregate(..).tax_amount`;
/// the order-level figure is the one shown as the total.
pub fn allocate_line_tax<'a, I>(items: I, tax: &TaxRate) -> Vec<LineTax>
where
    I: IntoIterator<Item = &'a LineItem>,
{
    items
        .into_iter()
        .map(|item| LineTax {
            item_id: item.id().to_string(),
            tax_amount: item.subtotal().calculate_tax(tax.percentage()),
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::LineItemStore;
    use crate::types::{ProductKind, ProductSnapshot, TaxCategory};

    fn product(id: &str, price_cents: i64, available: i64) -> ProductSnapshot {
        ProductSnapshot {
            id: id.to_string(),
            name: id.to_string(),
            unit_price_cents: price_cents,
            available_quantity: available,
            kind: ProductKind::Good,
        }
    }

    fn tax(bps: u32) -> TaxRate {
        TaxRate {
            id: "igv".to_string(),
            category: TaxCategory::Goods,
            percentage_bps: bps,
            description: "IGV".to_string(),
        }
    }

    #[test]
    fn test_empty_is_zero() {
        let store = LineItemStore::new();
        let totals = aggregate(&store, Some(&tax(1800)));
        assert_eq!(totals, Totals::default());
    }

    #[test]
    fn test_untaxed_total_equals_subtotal() {
        let mut store = LineItemStore::new();
        store.add(&product("a", 10000, 5), 5).unwrap();

        let totals = aggregate(&store, None);
        assert_eq!(totals.subtotal.cents(), 50000);
        assert!(totals.tax_amount.is_zero());
        assert_eq!(totals.total, totals.subtotal);
    }

    #[test]
    fn test_eighteen_percent_on_five_hundred() {
        let mut store = LineItemStore::new();
        store.add(&product("a", 10000, 5), 5).unwrap();

        let totals = aggregate(&store, Some(&tax(1800)));
        assert_eq!(totals.tax_amount.cents(), 9000);
        assert_eq!(totals.total.cents(), 59000);
    }

    #[test]
    fn test_tax_follows_quantity_down() {
        let mut store = LineItemStore::new();
        let id = store.add(&product("a", 10000, 5), 5).unwrap().item_id;
        let rate = tax(1800);

        assert_eq!(aggregate(&store, Some(&rate)).tax_amount.cents(), 9000);

        store.update_quantity(&id, 1).unwrap();
        let totals = aggregate(&store, Some(&rate));
        assert_eq!(totals.tax_amount.cents(), 1800);
        assert_eq!(totals.total.cents(), 11800);
    }

    #[test]
    fn test_line_allocation_may_differ_from_order_tax() {
        // Three lines of 0.05 at 10%: each line rounds 0.005 up to 0.01,
        // while the order-level tax on 0.15 is 0.015 → 0.02.
        let mut store = LineItemStore::new();
        store.add(&product("a", 5, 9), 1).unwrap();
        store.add(&product("b", 5, 9), 1).unwrap();
        store.add(&product("c", 5, 9), 1).unwrap();
        let rate = tax(1000);

        let lines = allocate_line_tax(&store, &rate);
        let line_sum: Money = lines.iter().map(|l| l.tax_amount).sum();
        assert_eq!(line_sum.cents(), 3);

        let totals = aggregate(&store, Some(&rate));
        assert_eq!(totals.tax_amount.cents(), 2);
    }
}
