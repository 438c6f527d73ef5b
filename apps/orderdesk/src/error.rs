//! # API Error Type
//!
//! Unified error type for host commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Order Desk                             │
//! │                                                                         │
//! │  Dashboard                    Rust Host                                 │
//! │  ─────────                    ─────────                                 │
//! │                                                                         │
//! │  {"cmd":"add_to_draft",...}                                             │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │  Bad args? ───────── serde_json::Error ───────┐                  │  │
//! │  │         │                                      │                  │  │
//! │  │  Catalog? ───────── CatalogError ─────────────┼──► ApiError ────►│  │
//! │  │         │                                      │                  │  │
//! │  │  Draft rule? ────── CoreError ────────────────┘                  │  │
//! │  │         │                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  {"ok":false,"error":{"code":"NOT_FOUND","message":"..."}}              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use orderdesk_core::{CoreError, Money};
use serde::Serialize;

use crate::state::CatalogError;

/// API error returned from commands.
///
/// ```json
/// {
///   "code": "TAX_ERROR",
///   "message": "Tax igv is not eligible for the current items"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Unknown product, tax rate or line item
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Draft rule violated (stock, size, subtotal ceiling)
    DraftError,

    /// Tax selection refused
    TaxError,

    /// Wizard step incomplete or transition not allowed
    WorkflowError,

    /// Malformed request line or unknown command
    BadRequest,

    /// Internal error
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::BadRequest, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::LineItemNotFound(id) => ApiError::not_found("Line item", &id),
            CoreError::OutOfStock { product_id } => ApiError::new(
                ErrorCode::DraftError,
                format!("Product {} is out of stock", product_id),
            ),
            CoreError::DraftTooLarge { max } => ApiError::new(
                ErrorCode::DraftError,
                format!("Order cannot have more than {} items", max),
            ),
            CoreError::AmountOverflow { max } => ApiError::new(
                ErrorCode::DraftError,
                format!("Order subtotal cannot exceed {}", Money::from_cents(max)),
            ),
            CoreError::TaxNotEligible { tax_id } => ApiError::new(
                ErrorCode::TaxError,
                format!("Tax {} is not eligible for the current items", tax_id),
            ),
            err @ (CoreError::StepIncomplete { .. } | CoreError::InvalidTransition { .. }) => {
                ApiError::new(ErrorCode::WorkflowError, err.to_string())
            }
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

/// Converts catalog loading errors to API errors.
impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Parse(e) => ApiError::bad_request(format!("Invalid catalog: {}", e)),
            CatalogError::Invalid(e) => ApiError::validation(e.to_string()),
        }
    }
}

/// Malformed command arguments.
impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::bad_request(format!("Invalid arguments: {}", err))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use orderdesk_core::{ValidationError, WizardStep};
    use serde_json::json;

    #[test]
    fn test_core_error_codes() {
        let err: ApiError = CoreError::LineItemNotFound("li-1".to_string()).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Line item not found: li-1");

        let err: ApiError = CoreError::TaxNotEligible {
            tax_id: "igv".to_string(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::TaxError);

        let err: ApiError = CoreError::StepIncomplete {
            step: WizardStep::SelectItems,
            reason: "add at least one item".to_string(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::WorkflowError);

        let err: ApiError = CoreError::AmountOverflow { max: 250 }.into();
        assert_eq!(err.code, ErrorCode::DraftError);
        assert_eq!(err.message, "Order subtotal cannot exceed 2.50");

        let err: ApiError = CoreError::Validation(ValidationError::Required {
            field: "customer.id".to_string(),
        })
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_serialized_shape() {
        let err = ApiError::not_found("Product", "p-1");
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({ "code": "NOT_FOUND", "message": "Product not found: p-1" })
        );
    }
}
