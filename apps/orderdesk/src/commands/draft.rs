//! # Draft Commands
//!
//! Commands for composing the order: line items, quantities and the tax.
//!
//! ## Draft Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Draft Lifecycle                                      │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│  Items   │────►│  Taxed   │────►│ Submitted│       │
//! │  │  Draft   │     │          │     │          │     │ (frozen) │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                │                               │
//! │                   add_to_draft      select_tax      submit_order        │
//! │                   update_item       clear_tax       (wizard.rs)         │
//! │                   remove_item           │                               │
//! │                        │                │                               │
//! │                        └── tax no longer eligible? cleared ──►          │
//! │                                                                         │
//! │                   clear_draft ─────────────────────► (back to empty)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every mutating command answers with the full [`DraftResponse`] so the
//! dashboard re-renders from one source of truth.

use orderdesk_core::{
    CoreError, CustomerRef, DraftChange, EligibilityMode, LineItem, LineTax, Money, OrderWizard,
    SellerRef, ShippingDetails, TaxRate, Totals, WizardStep,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::state::{CatalogSnapshot, CatalogState, ConfigState, DraftState};

// =============================================================================
// Response Types
// =============================================================================

/// A line item with its computed subtotal.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemView {
    #[serde(flatten)]
    pub item: LineItem,
    pub subtotal: Money,
}

/// Totals formatted with the configured currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayTotals {
    pub subtotal: String,
    pub tax_amount: String,
    pub total: String,
}

/// Everything the dashboard renders for the current session.
///
/// ```json
/// {
///   "step": "SELECT_ITEMS",
///   "items": [{ "id": "...", "productRef": "chair", "quantity": 5, "subtotal": 50000, ... }],
///   "totals": { "subtotal": 50000, "taxAmount": 9000, "total": 59000 },
///   "display": { "subtotal": "S/ 500.00", "taxAmount": "S/ 90.00", "total": "S/ 590.00" },
///   "eligibility": "GOODS_OR_SERVICES_ONLY",
///   "selectedTaxId": "igv",
///   "change": { "item": { "itemId": "...", "requested": 10, "quantity": 5 }, "taxCleared": null }
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftResponse {
    pub step: WizardStep,
    pub items: Vec<LineItemView>,
    pub totals: Totals,
    pub display: DisplayTotals,
    pub eligibility: EligibilityMode,
    pub selected_tax_id: Option<String>,
    pub line_taxes: Vec<LineTax>,
    pub customer: Option<CustomerRef>,
    pub seller: Option<SellerRef>,
    pub shipping: Option<ShippingDetails>,
    /// What the command just did; empty for reads.
    pub change: DraftChange,
}

impl DraftResponse {
    pub fn build(wizard: &OrderWizard, config: &ConfigState, change: DraftChange) -> Self {
        let draft = wizard.draft();
        let totals = draft.totals();

        DraftResponse {
            step: wizard.step(),
            items: draft
                .items()
                .iter()
                .map(|item| LineItemView {
                    subtotal: item.subtotal(),
                    item: item.clone(),
                })
                .collect(),
            display: DisplayTotals {
                subtotal: config.format_currency(totals.subtotal),
                tax_amount: config.format_currency(totals.tax_amount),
                total: config.format_currency(totals.total),
            },
            totals,
            eligibility: draft.eligibility(),
            selected_tax_id: draft.selected_tax_id().map(str::to_string),
            line_taxes: draft.line_taxes(),
            customer: wizard.customer().cloned(),
            seller: wizard.seller().cloned(),
            shipping: wizard.shipping().cloned(),
            change,
        }
    }
}

/// Counts of what a catalog push installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogLoaded {
    pub products: usize,
    pub tax_rates: usize,
}

/// Surfaces silent coercions in the log.
fn log_change(change: &DraftChange) {
    if let Some(item) = change.item.as_ref().filter(|c| c.clamped()) {
        warn!(
            item_id = %item.item_id,
            requested = item.requested,
            quantity = item.quantity,
            "Quantity clamped into stock range"
        );
    }
    if let Some(tax_id) = &change.tax_cleared {
        warn!(tax_id = %tax_id, "Selected tax no longer eligible, cleared");
    }
}

/// Runs a draft mutation and renders the result under one lock.
fn mutate<F>(draft: &DraftState, config: &ConfigState, f: F) -> Result<DraftResponse, ApiError>
where
    F: FnOnce(&mut OrderWizard) -> Result<DraftChange, CoreError>,
{
    let response = draft.with_wizard_mut(|w| {
        let change = f(w)?;
        log_change(&change);
        Ok::<DraftResponse, CoreError>(DraftResponse::build(w, config, change))
    })?;
    Ok(response)
}

// =============================================================================
// Commands
// =============================================================================

/// Gets the current session.
pub fn get_draft(draft: &DraftState, config: &ConfigState) -> DraftResponse {
    debug!("get_draft command");
    draft.with_wizard(|w| DraftResponse::build(w, config, DraftChange::default()))
}

/// Adds a product to the draft.
///
/// ## Behavior
/// - Product already in the draft: its quantity grows
/// - Product not in the draft: added as a new line
/// - The result is clamped into `1..=available`; `change.item` tells the
///   dashboard when that happened
/// - Price and stock are frozen at the time of adding
///
/// ## Arguments
/// * `product_id` - Catalog product id
/// * `quantity` - Quantity to add (default: 1)
pub fn add_to_draft(
    catalog: &CatalogState,
    draft: &DraftState,
    config: &ConfigState,
    product_id: String,
    quantity: Option<i64>,
) -> Result<DraftResponse, ApiError> {
    let quantity = quantity.unwrap_or(1);
    debug!(product_id = %product_id, quantity = %quantity, "add_to_draft command");

    let product = catalog
        .product(&product_id)
        .ok_or_else(|| ApiError::not_found("Product", &product_id))?;

    mutate(draft, config, |w| w.draft_mut()?.add_item(&product, quantity))
}

/// Sets the quantity of a line. Out-of-range values are clamped, never rejected.
pub fn update_draft_item(
    draft: &DraftState,
    config: &ConfigState,
    item_id: String,
    quantity: i64,
) -> Result<DraftResponse, ApiError> {
    debug!(item_id = %item_id, quantity = %quantity, "update_draft_item command");
    mutate(draft, config, |w| w.draft_mut()?.update_quantity(&item_id, quantity))
}

/// Removes a line from the draft.
pub fn remove_from_draft(
    draft: &DraftState,
    config: &ConfigState,
    item_id: String,
) -> Result<DraftResponse, ApiError> {
    debug!(item_id = %item_id, "remove_from_draft command");
    mutate(draft, config, |w| w.draft_mut()?.remove_item(&item_id))
}

/// Removes every line. The selected tax goes with them.
pub fn clear_draft(draft: &DraftState, config: &ConfigState) -> Result<DraftResponse, ApiError> {
    debug!("clear_draft command");
    mutate(draft, config, |w| Ok(w.draft_mut()?.clear()))
}

/// Lists the catalog tax rates the current items allow, in catalog order.
pub fn list_eligible_taxes(catalog: &CatalogState, draft: &DraftState) -> Vec<TaxRate> {
    debug!("list_eligible_taxes command");
    let rates = catalog.tax_rates();
    draft.with_wizard(|w| {
        w.draft()
            .eligible_rates(&rates)
            .into_iter()
            .cloned()
            .collect()
    })
}

/// Selects the order tax.
///
/// ## Errors
/// - `NOT_FOUND` if the id is not in the catalog
/// - `TAX_ERROR` if the current items do not allow its category
pub fn select_tax(
    catalog: &CatalogState,
    draft: &DraftState,
    config: &ConfigState,
    tax_id: String,
) -> Result<DraftResponse, ApiError> {
    debug!(tax_id = %tax_id, "select_tax command");

    let rate = catalog
        .tax_rate(&tax_id)
        .ok_or_else(|| ApiError::not_found("Tax rate", &tax_id))?;

    mutate(draft, config, |w| {
        w.draft_mut()?.select_tax(&rate)?;
        Ok(DraftChange::default())
    })
}

/// Deselects the order tax.
pub fn clear_tax(draft: &DraftState, config: &ConfigState) -> Result<DraftResponse, ApiError> {
    debug!("clear_tax command");
    mutate(draft, config, |w| {
        w.draft_mut()?.clear_tax();
        Ok(DraftChange::default())
    })
}

/// Replaces the catalog snapshot the dashboard fetched from the REST API.
///
/// Lines already in the draft keep their frozen prices.
pub fn load_catalog(
    catalog: &CatalogState,
    snapshot: CatalogSnapshot,
) -> Result<CatalogLoaded, ApiError> {
    debug!("load_catalog command");
    let (products, tax_rates) = catalog.replace(snapshot)?;
    info!(products, tax_rates, "Catalog snapshot loaded");
    Ok(CatalogLoaded {
        products,
        tax_rates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use serde_json::json;

    fn catalog() -> CatalogState {
        let catalog = CatalogState::new();
        let snapshot: CatalogSnapshot = serde_json::from_value(json!({
            "products": [
                { "id": "chair", "name": "Chair", "unitPriceCents": 10000,
                  "availableQuantity": 5, "kind": "good" },
                { "id": "install", "name": "Installation", "unitPriceCents": 7500,
                  "availableQuantity": 10, "kind": "service" }
            ],
            "taxRates": [
                { "id": "igv", "category": "goods", "percentageBps": 1800, "description": "IGV" },
                { "id": "mixed", "category": "blended", "percentageBps": 1000, "description": "Mixed" }
            ]
        }))
        .unwrap();
        catalog.replace(snapshot).unwrap();
        catalog
    }

    #[test]
    fn test_add_clamps_and_reports() {
        let (catalog, draft, config) = (catalog(), DraftState::new(), ConfigState::default());

        let response =
            add_to_draft(&catalog, &draft, &config, "chair".to_string(), Some(10)).unwrap();
        assert_eq!(response.items.len(), 1);
        assert_eq!(response.items[0].item.quantity(), 5);
        assert_eq!(response.items[0].subtotal, Money::from_cents(50000));

        let change = response.change.item.unwrap();
        assert!(change.clamped());
        assert_eq!((change.requested, change.quantity), (10, 5));
    }

    #[test]
    fn test_select_tax_and_display() {
        let (catalog, draft, config) = (catalog(), DraftState::new(), ConfigState::default());
        add_to_draft(&catalog, &draft, &config, "chair".to_string(), Some(5)).unwrap();

        let response = select_tax(&catalog, &draft, &config, "igv".to_string()).unwrap();
        assert_eq!(response.selected_tax_id.as_deref(), Some("igv"));
        assert_eq!(response.display.total, "S/ 590.00");
        assert_eq!(response.totals.tax_amount, Money::from_cents(9000));
    }

    #[test]
    fn test_mixing_kinds_clears_tax() {
        let (catalog, draft, config) = (catalog(), DraftState::new(), ConfigState::default());
        add_to_draft(&catalog, &draft, &config, "chair".to_string(), None).unwrap();
        select_tax(&catalog, &draft, &config, "igv".to_string()).unwrap();

        let response =
            add_to_draft(&catalog, &draft, &config, "install".to_string(), None).unwrap();
        assert_eq!(response.eligibility, EligibilityMode::Mixed);
        assert_eq!(response.change.tax_cleared.as_deref(), Some("igv"));
        assert!(response.selected_tax_id.is_none());

        let ids: Vec<String> = list_eligible_taxes(&catalog, &draft)
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec!["mixed".to_string()]);
    }

    #[test]
    fn test_error_codes() {
        let (catalog, draft, config) = (catalog(), DraftState::new(), ConfigState::default());

        let err = add_to_draft(&catalog, &draft, &config, "ghost".to_string(), None).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = select_tax(&catalog, &draft, &config, "mixed".to_string()).unwrap_err();
        assert_eq!(err.code, ErrorCode::TaxError);

        let err = remove_from_draft(&draft, &config, "li-404".to_string()).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_clear_draft_empties_everything() {
        let (catalog, draft, config) = (catalog(), DraftState::new(), ConfigState::default());
        add_to_draft(&catalog, &draft, &config, "chair".to_string(), Some(2)).unwrap();
        select_tax(&catalog, &draft, &config, "igv".to_string()).unwrap();

        let response = clear_draft(&draft, &config).unwrap();
        assert!(response.items.is_empty());
        assert_eq!(response.eligibility, EligibilityMode::Empty);
        assert_eq!(response.totals, Totals::default());
        assert!(list_eligible_taxes(&catalog, &draft).is_empty());
    }
}
