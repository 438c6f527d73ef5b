//! # Validation Module
//!
//! Field checks for snapshots entering the engine and for the parties the
//! wizard collects.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Dashboard forms                                               │
//! │  ├── Required fields, formats                                           │
//! │  └── Immediate user feedback                                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                   │
//! │  ├── Snapshot sanity (prices, stock, tax range)                         │
//! │  └── Wizard step completeness (customer, seller, address)               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Order API (authoritative)                                     │
//! │  ├── Real stock                                                         │
//! │  └── Tax rate still exists                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Quantities are deliberately not validated here: the line item store
//! clamps them instead of rejecting.

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::types::{CustomerRef, ProductSnapshot, SellerRef, ShippingDetails, TaxRate};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_NAME_LEN: usize = 200;
const MAX_ADDRESS_LEN: usize = 300;
const MAX_NOTES_LEN: usize = 500;

/// Highest accepted unit price (10,000,000,000.00).
pub const MAX_UNIT_PRICE_CENTS: i64 = 1_000_000_000_000;

/// Highest accepted stock figure.
///
/// Together with `MAX_UNIT_PRICE_CENTS` this keeps any line subtotal
/// within `i64` cents.
pub const MAX_AVAILABLE_QUANTITY: i64 = 1_000_000;

// =============================================================================
// String Validators
// =============================================================================

fn require(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

fn optional(field: &str, value: Option<&str>, max: usize) -> ValidationResult<()> {
    match value {
        Some(v) if v.chars().count() > max => Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        }),
        _ => Ok(()),
    }
}

// =============================================================================
// Snapshot Validators
// =============================================================================

/// Validates a product snapshot before it can be added to a draft.
///
/// ## Rules
/// - `id` and `name` must be present
/// - price must be non-negative (zero is a free item)
/// - stock must be non-negative (zero stock is reported later as OutOfStock)
///
/// ```rust
/// use orderdesk_core::types::{ProductKind, ProductSnapshot};
/// use orderdesk_core::validation::validate_product_snapshot;
///
/// let product = ProductSnapshot {
///     id: "p-1".into(),
///     name: "Chair".into(),
///     unit_price_cents: 10000,
///     available_quantity: 5,
///     kind: ProductKind::Good,
/// };
/// assert!(validate_product_snapshot(&product).is_ok());
/// ```
pub fn validate_product_snapshot(product: &ProductSnapshot) -> ValidationResult<()> {
    require("product.id", &product.id, MAX_NAME_LEN)?;
    require("product.name", &product.name, MAX_NAME_LEN)?;

    if !(0..=MAX_UNIT_PRICE_CENTS).contains(&product.unit_price_cents) {
        return Err(ValidationError::OutOfRange {
            field: "product.unitPriceCents".to_string(),
            min: 0,
            max: MAX_UNIT_PRICE_CENTS,
        });
    }

    if !(0..=MAX_AVAILABLE_QUANTITY).contains(&product.available_quantity) {
        return Err(ValidationError::OutOfRange {
            field: "product.availableQuantity".to_string(),
            min: 0,
            max: MAX_AVAILABLE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a tax rate snapshot.
///
/// ## Rules
/// - `id` must be present
/// - percentage between 0 and 10000 bps (0% to 100% inclusive)
pub fn validate_tax_rate(rate: &TaxRate) -> ValidationResult<()> {
    require("taxRate.id", &rate.id, MAX_NAME_LEN)?;

    if rate.percentage_bps > 10000 {
        return Err(ValidationError::OutOfRange {
            field: "taxRate.percentageBps".to_string(),
            min: 0,
            max: 10000,
        });
    }

    Ok(())
}

/// Rejects snapshot lists that reuse an id.
pub fn validate_unique_ids<'a, I>(field: &str, ids: I) -> ValidationResult<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ValidationError::Duplicate {
                field: field.to_string(),
                value: id.to_string(),
            });
        }
    }
    Ok(())
}

// =============================================================================
// Party Validators
// =============================================================================

/// Customer identity is required before items can be picked.
pub fn validate_customer(customer: &CustomerRef) -> ValidationResult<()> {
    require("customer.id", &customer.id, MAX_NAME_LEN)?;
    require("customer.name", &customer.name, MAX_NAME_LEN)?;
    optional("customer.taxId", customer.tax_id.as_deref(), 50)
}

pub fn validate_seller(seller: &SellerRef) -> ValidationResult<()> {
    require("seller.id", &seller.id, MAX_NAME_LEN)?;
    require("seller.name", &seller.name, MAX_NAME_LEN)
}

/// Validates the delivery address of the outbound shipment.
///
/// ## Rules
/// - recipient, address line and city are required
/// - region and postal code are optional but bounded
/// - notes up to 500 characters
pub fn validate_shipping(shipping: &ShippingDetails) -> ValidationResult<()> {
    require("shipping.recipient", &shipping.recipient, MAX_NAME_LEN)?;
    require("shipping.addressLine", &shipping.address_line, MAX_ADDRESS_LEN)?;
    require("shipping.city", &shipping.city, MAX_NAME_LEN)?;
    optional("shipping.region", shipping.region.as_deref(), MAX_NAME_LEN)?;
    optional("shipping.postalCode", shipping.postal_code.as_deref(), 20)?;
    optional("shipping.notes", shipping.notes.as_deref(), MAX_NOTES_LEN)
}

// =============================================================================
// Unit Tests
// =============================================================================
