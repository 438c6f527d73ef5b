//! Property-based tests for the order draft
//!
//! Random sequences of add / update / remove / tax selection must keep the
//! draft's invariants after every single step.

use orderdesk_core::{
    EligibilityMode, Money, OrderDraft, ProductKind, ProductSnapshot, TaxCategory, TaxRate,
};
use proptest::prelude::*;

fn catalog() -> Vec<ProductSnapshot> {
    vec![
        ProductSnapshot {
            id: "chair".to_string(),
            name: "Chair".to_string(),
            unit_price_cents: 10000,
            available_quantity: 5,
            kind: ProductKind::Good,
        },
        ProductSnapshot {
            id: "lamp".to_string(),
            name: "Lamp".to_string(),
            unit_price_cents: 3999,
            available_quantity: 1,
            kind: ProductKind::Good,
        },
        ProductSnapshot {
            id: "install".to_string(),
            name: "Installation".to_string(),
            unit_price_cents: 7550,
            available_quantity: 20,
            kind: ProductKind::Service,
        },
        ProductSnapshot {
            id: "free-sample".to_string(),
            name: "Sample".to_string(),
            unit_price_cents: 0,
            available_quantity: 3,
            kind: ProductKind::Good,
        },
    ]
}

fn tax_rates() -> Vec<TaxRate> {
    vec![
        TaxRate {
            id: "igv".to_string(),
            category: TaxCategory::Goods,
            percentage_bps: 1800,
            description: "IGV".to_string(),
        },
        TaxRate {
            id: "services".to_string(),
            category: TaxCategory::Services,
            percentage_bps: 825,
            description: "Services".to_string(),
        },
        TaxRate {
            id: "catering".to_string(),
            category: TaxCategory::Blended,
            percentage_bps: 1000,
            description: "Catering levy".to_string(),
        },
    ]
}

#[derive(Debug, Clone)]
enum Op {
    Add(usize, i64),
    Update(usize, i64),
    Remove(usize),
    SelectTax(usize),
    ClearTax,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..4usize, -5..15i64).prop_map(|(p, q)| Op::Add(p, q)),
        (0..4usize, -10..30i64).prop_map(|(i, q)| Op::Update(i, q)),
        (0..4usize).prop_map(Op::Remove),
        (0..3usize).prop_map(Op::SelectTax),
        Just(Op::ClearTax),
    ]
}

fn apply(draft: &mut OrderDraft, op: &Op, catalog: &[ProductSnapshot], rates: &[TaxRate]) {
    match op {
        Op::Add(p, q) => {
            draft.add_item(&catalog[*p], *q).unwrap();
        }
        Op::Update(i, q) => {
            let id = draft.items().items().get(*i).map(|item| item.id().to_string());
            if let Some(id) = id {
                draft.update_quantity(&id, *q).unwrap();
            }
        }
        Op::Remove(i) => {
            let id = draft.items().items().get(*i).map(|item| item.id().to_string());
            if let Some(id) = id {
                draft.remove_item(&id).unwrap();
            }
        }
        Op::SelectTax(t) => {
            // Ineligible selections are rejected and leave the draft as is.
            let _ = draft.select_tax(&rates[*t]);
        }
        Op::ClearTax => {
            draft.clear_tax();
        }
    }
}

fn assert_invariants(draft: &OrderDraft) -> Result<(), TestCaseError> {
    for item in draft.items() {
        prop_assert!(item.quantity() > 0);
        prop_assert!(item.quantity() <= item.available_quantity());
        prop_assert_eq!(item.subtotal(), item.unit_price() * item.quantity());
    }

    let totals = draft.totals();
    let summed: Money = draft.items().iter().map(|i| i.subtotal()).sum();
    prop_assert_eq!(totals.subtotal, summed);
    prop_assert_eq!(totals.total, totals.subtotal + totals.tax_amount);

    match draft.selected_tax() {
        Some(rate) => {
            prop_assert!(draft.eligibility().allows(rate.category));
            prop_assert_eq!(
                totals.tax_amount,
                totals.subtotal.calculate_tax(rate.percentage())
            );
        }
        None => prop_assert!(totals.tax_amount.is_zero()),
    }

    if draft.is_empty() {
        prop_assert!(draft.selected_tax().is_none());
        prop_assert!(totals.total.is_zero());
    }

    Ok(())
}

proptest! {
    /// Property: every reachable draft keeps quantity bounds, exact line
    /// subtotals, and total = subtotal + tax.
    #[test]
    fn test_invariants_hold_after_every_mutation(
        ops in prop::collection::vec(op_strategy(), 0..40)
    ) {
        let catalog = catalog();
        let rates = tax_rates();
        let mut draft = OrderDraft::new();

        assert_invariants(&draft)?;
        for op in &ops {
            apply(&mut draft, op, &catalog, &rates);
            assert_invariants(&draft)?;
        }
    }

    /// Property: adding the same product repeatedly never creates a second
    /// entry.
    #[test]
    fn test_repeated_adds_accumulate_on_one_entry(
        quantities in prop::collection::vec(-5..10i64, 1..10)
    ) {
        let catalog = catalog();
        let chair = &catalog[0];
        let mut draft = OrderDraft::new();

        for q in &quantities {
            draft.add_item(chair, *q).unwrap();
        }

        prop_assert_eq!(draft.items().len(), 1);
        let expected = quantities
            .iter()
            .skip(1)
            .fold(quantities[0].clamp(1, 5), |acc, q| (acc + (*q).max(0)).clamp(1, 5));
        prop_assert_eq!(draft.items().items()[0].quantity(), expected);
    }

    /// Property: eligibility depends only on which kinds are present.
    #[test]
    fn test_eligibility_is_function_of_kinds(
        picks in prop::collection::vec(0..4usize, 0..8)
    ) {
        let catalog = catalog();
        let mut draft = OrderDraft::new();
        for p in &picks {
            draft.add_item(&catalog[*p], 1).unwrap();
        }

        let has_good = picks.iter().any(|p| catalog[*p].kind == ProductKind::Good);
        let has_service = picks.iter().any(|p| catalog[*p].kind == ProductKind::Service);
        let expected = match (has_good, has_service) {
            (false, false) => EligibilityMode::Empty,
            (true, true) => EligibilityMode::Mixed,
            _ => EligibilityMode::GoodsOrServicesOnly,
        };
        prop_assert_eq!(draft.eligibility(), expected);

        let rates = tax_rates();
        for rate in draft.eligible_rates(&rates) {
            prop_assert_eq!(rate.category.is_blended(), expected == EligibilityMode::Mixed);
        }
    }
}

#[test]
fn test_order_entry_walkthrough() {
    let catalog = catalog();
    let rates = tax_rates();
    let mut draft = OrderDraft::new();

    let totals = draft.totals();
    assert!(totals.subtotal.is_zero());
    assert!(totals.tax_amount.is_zero());
    assert!(totals.total.is_zero());

    draft.add_item(&catalog[0], 2).unwrap();
    assert_eq!(draft.totals().subtotal.cents(), 20000);
    draft.add_item(&catalog[0], 10).unwrap();
    assert_eq!(draft.items().len(), 1);
    assert_eq!(draft.totals().subtotal.cents(), 50000);

    draft.select_tax(&rates[0]).unwrap();
    assert_eq!(draft.totals().tax_amount.cents(), 9000);
    assert_eq!(draft.totals().total.cents(), 59000);

    let change = draft.add_item(&catalog[2], 1).unwrap();
    assert_eq!(change.tax_cleared.as_deref(), Some("igv"));
    assert!(draft.selected_tax_id().is_none());
    assert_eq!(draft.totals().total.cents(), 50000 + 7550);

    let chair_id = draft
        .items()
        .iter()
        .find(|i| i.product_ref() == "chair")
        .unwrap()
        .id()
        .to_string();
    draft.update_quantity(&chair_id, -3).unwrap();
    assert_eq!(draft.item(&chair_id).unwrap().quantity(), 1);
}
