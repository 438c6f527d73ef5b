//! # Catalog State
//!
//! Read-mostly snapshots of catalog products and tax rates.
//!
//! The dashboard fetches both lists from the REST API and pushes them here
//! (`load_catalog`), or the host reads them from a file at startup. The
//! engine only ever sees these snapshots; it never fetches.
//!
//! ## Thread Safety
//! Wrapped in `RwLock`: lookups happen on every add, replacements only when
//! the dashboard refreshes its query cache.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use orderdesk_core::validation::{validate_product_snapshot, validate_tax_rate, validate_unique_ids};
use orderdesk_core::{ProductSnapshot, TaxRate, ValidationError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors loading a catalog snapshot.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("malformed catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid catalog entry: {0}")]
    Invalid(#[from] ValidationError),
}

/// Wire shape of a catalog snapshot.
///
/// ```json
/// {
///   "products": [{ "id": "chair", "name": "Chair", "unitPriceCents": 10000,
///                  "availableQuantity": 5, "kind": "good" }],
///   "taxRates": [{ "id": "igv", "category": "goods", "percentageBps": 1800,
///                  "description": "IGV 18%" }]
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub products: Vec<ProductSnapshot>,
    #[serde(default)]
    pub tax_rates: Vec<TaxRate>,
}

impl CatalogSnapshot {
    /// Rejects malformed entries and duplicate ids.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_unique_ids("product.id", self.products.iter().map(|p| p.id.as_str()))?;
        validate_unique_ids("taxRate.id", self.tax_rates.iter().map(|t| t.id.as_str()))?;

        for product in &self.products {
            validate_product_snapshot(product)?;
        }
        for rate in &self.tax_rates {
            validate_tax_rate(rate)?;
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
struct Catalog {
    products: HashMap<String, ProductSnapshot>,
    // Provider order is kept for display.
    tax_rates: Vec<TaxRate>,
}

/// Host-managed catalog snapshots.
#[derive(Debug, Default)]
pub struct CatalogState {
    inner: RwLock<Catalog>,
}

impl CatalogState {
    /// An empty catalog; the dashboard is expected to push one.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and validates a snapshot document.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let snapshot: CatalogSnapshot = serde_json::from_str(raw)?;

        let state = CatalogState::new();
        state.replace(snapshot)?;
        Ok(state)
    }

    /// Swaps in a new snapshot. The old one stays if validation fails.
    ///
    /// Drafts keep the prices and stock they froze at add time.
    pub fn replace(&self, snapshot: CatalogSnapshot) -> Result<(usize, usize), CatalogError> {
        snapshot.validate()?;

        let counts = (snapshot.products.len(), snapshot.tax_rates.len());
        let catalog = Catalog {
            products: snapshot
                .products
                .into_iter()
                .map(|p| (p.id.clone(), p))
                .collect(),
            tax_rates: snapshot.tax_rates,
        };

        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = catalog;
        Ok(counts)
    }

    pub fn product(&self, id: &str) -> Option<ProductSnapshot> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .products
            .get(id)
            .cloned()
    }

    pub fn tax_rate(&self, id: &str) -> Option<TaxRate> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .tax_rates
            .iter()
            .find(|t| t.id == id)
            .cloned()
    }

    pub fn tax_rates(&self) -> Vec<TaxRate> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .tax_rates
            .clone()
    }
}
