//! # Error Types
//!
//! Domain-specific error types for orderdesk-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  orderdesk-core errors (this file)                                      │
//! │  ├── CoreError        - Draft / wizard rule violations                  │
//! │  └── ValidationError  - Snapshot and party field failures               │
//! │                                                                         │
//! │  orderdesk app errors (separate crate)                                  │
//! │  └── ApiError         - What the dashboard sees (serialized)            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Front end               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT an Error
//! Out-of-range quantities are clamped and a tax that stops being eligible
//! is cleared. Both are reported on the mutation result instead of failing
//! the call. Totals on an empty draft are simply zero.

use thiserror::Error;

use crate::wizard::WizardStep;

// =============================================================================
// Core Error
// =============================================================================

/// Draft and wizard errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No line item with this id exists in the draft.
    #[error("Line item not found: {0}")]
    LineItemNotFound(String),

    /// The product has no stock, so no valid quantity exists for it.
    ///
    /// ## User Workflow
    /// ```text
    /// Select product (available: 0)
    ///      │
    ///      ▼
    /// OutOfStock { product_id: "p-9" }
    ///      │
    ///      ▼
    /// UI shows: "Product is out of stock"
    /// ```
    #[error("Product {product_id} is out of stock")]
    OutOfStock { product_id: String },

    /// Draft has reached the maximum number of distinct line items.
    #[error("Draft cannot have more than {max} items")]
    DraftTooLarge { max: usize },

    /// The change would push the order subtotal past `MAX_ORDER_SUBTOTAL_CENTS`.
    #[error("Order subtotal cannot exceed {max} cents")]
    AmountOverflow { max: i64 },

    /// The tax is not selectable for the current cart composition.
    #[error("Tax {tax_id} is not eligible for the current items")]
    TaxNotEligible { tax_id: String },

    /// The current wizard step is not complete enough to move forward.
    #[error("Step {step:?} is incomplete: {reason}")]
    StepIncomplete { step: WizardStep, reason: String },

    /// The requested wizard transition is not allowed from this step.
    #[error("Cannot {action} from step {step:?}")]
    InvalidTransition { step: WizardStep, action: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Duplicate value (e.g., two snapshots sharing an id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
