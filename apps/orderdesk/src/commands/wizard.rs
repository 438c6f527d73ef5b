//! # Wizard Commands
//!
//! Commands that collect the order parties and move between steps.
//!
//! ## User Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Customer ──► Items ──► Seller ──► Shipping ──► Review ──► Submitted    │
//! │     │           │          │           │           │                    │
//! │ set_customer draft.rs  set_seller  set_shipping  submit_order           │
//! │                                                                         │
//! │  next_step / previous_step move one screen; cancel_order starts over.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use orderdesk_core::{
    CoreError, CustomerRef, DraftChange, OrderSubmission, OrderWizard, SellerRef,
    ShippingDetails, WizardStep,
};
use serde::Serialize;
use tracing::{debug, info};

use super::draft::DraftResponse;
use crate::error::ApiError;
use crate::state::{ConfigState, DraftState};

/// Result of a successful submission.
///
/// `payload` is the exact body to POST to the Order API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub step: WizardStep,
    pub submission: OrderSubmission,
    pub payload: String,
}

/// Pre-fills the configured seller on a fresh wizard.
pub fn apply_defaults(wizard: &mut OrderWizard, config: &ConfigState) -> Result<(), CoreError> {
    if let Some(seller) = &config.default_seller {
        wizard.set_seller(seller.clone())?;
    }
    Ok(())
}

fn update<F>(draft: &DraftState, config: &ConfigState, f: F) -> Result<DraftResponse, ApiError>
where
    F: FnOnce(&mut OrderWizard) -> Result<(), CoreError>,
{
    let response = draft.with_wizard_mut(|w| {
        f(w)?;
        Ok::<DraftResponse, CoreError>(DraftResponse::build(w, config, DraftChange::default()))
    })?;
    Ok(response)
}

pub fn set_customer(
    draft: &DraftState,
    config: &ConfigState,
    customer: CustomerRef,
) -> Result<DraftResponse, ApiError> {
    debug!(customer_id = %customer.id, "set_customer command");
    update(draft, config, |w| w.set_customer(customer))
}

pub fn set_seller(
    draft: &DraftState,
    config: &ConfigState,
    seller: SellerRef,
) -> Result<DraftResponse, ApiError> {
    debug!(seller_id = %seller.id, "set_seller command");
    update(draft, config, |w| w.set_seller(seller))
}

pub fn set_shipping(
    draft: &DraftState,
    config: &ConfigState,
    shipping: ShippingDetails,
) -> Result<DraftResponse, ApiError> {
    debug!("set_shipping command");
    update(draft, config, |w| w.set_shipping(shipping))
}

/// Moves forward one step.
///
/// ## Errors
/// `WORKFLOW_ERROR` when the current step is incomplete (no customer, no
/// items, ...) or there is no next step.
pub fn next_step(draft: &DraftState, config: &ConfigState) -> Result<DraftResponse, ApiError> {
    debug!("next_step command");
    update(draft, config, |w| {
        let step = w.advance()?;
        debug!(step = ?step, "Wizard advanced");
        Ok(())
    })
}

/// Moves back one step, keeping everything collected.
pub fn previous_step(draft: &DraftState, config: &ConfigState) -> Result<DraftResponse, ApiError> {
    debug!("previous_step command");
    update(draft, config, |w| w.back().map(|_| ()))
}

/// Assembles the Order API payload and freezes the session.
///
/// ## Submission Flow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  invoke submit_order (step must be REVIEW)                              │
/// │                    │                                                    │
/// │                    ▼                                                    │
/// │  ┌────────────────────────────────────────────────────────────────┐    │
/// │  │  1. Re-check customer, items, seller, shipping                 │    │
/// │  │  2. Build { customer, seller, shipping, items, selectedTaxId } │    │
/// │  │  3. Step becomes SUBMITTED; later edits are refused            │    │
/// │  └────────────────────────────────────────────────────────────────┘    │
/// │                    │                                                    │
/// │                    ▼                                                    │
/// │  Dashboard POSTs `payload`, then calls cancel_order for a new one      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn submit_order(draft: &DraftState) -> Result<SubmitResponse, ApiError> {
    debug!("submit_order command");

    let (step, submission) = draft.with_wizard_mut(|w| {
        let submission = w.submit()?;
        Ok::<_, CoreError>((w.step(), submission))
    })?;

    let payload = submission
        .to_json()
        .map_err(|e| ApiError::internal(format!("Failed to encode submission: {}", e)))?;

    info!(
        customer_id = %submission.customer.id,
        items = submission.items.len(),
        tax_id = ?submission.selected_tax_id,
        "Order submission assembled"
    );

    Ok(SubmitResponse {
        step,
        submission,
        payload,
    })
}

/// Discards the session and starts a new one.
pub fn cancel_order(draft: &DraftState, config: &ConfigState) -> Result<DraftResponse, ApiError> {
    debug!("cancel_order command");
    update(draft, config, |w| {
        w.cancel();
        apply_defaults(w, config)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn customer() -> CustomerRef {
        CustomerRef {
            id: "c-1".to_string(),
            name: "Acme".to_string(),
            tax_id: None,
        }
    }

    #[test]
    fn test_next_step_requires_customer() {
        let (draft, config) = (DraftState::new(), ConfigState::default());

        let err = next_step(&draft, &config).unwrap_err();
        assert_eq!(err.code, ErrorCode::WorkflowError);

        set_customer(&draft, &config, customer()).unwrap();
        let response = next_step(&draft, &config).unwrap();
        assert_eq!(response.step, WizardStep::SelectItems);

        let response = previous_step(&draft, &config).unwrap();
        assert_eq!(response.step, WizardStep::SelectCustomer);
        assert_eq!(response.customer, Some(customer()));
    }

    #[test]
    fn test_submit_outside_review() {
        let draft = DraftState::new();
        let err = submit_order(&draft).unwrap_err();
        assert_eq!(err.code, ErrorCode::WorkflowError);
    }

    #[test]
    fn test_cancel_applies_default_seller() {
        let draft = DraftState::new();
        let config = ConfigState {
            default_seller: Some(SellerRef {
                id: "s-1".to_string(),
                name: "Luis".to_string(),
            }),
            ..ConfigState::default()
        };

        set_customer(&draft, &config, customer()).unwrap();
        let response = cancel_order(&draft, &config).unwrap();
        assert_eq!(response.step, WizardStep::SelectCustomer);
        assert!(response.customer.is_none());
        assert_eq!(response.seller.unwrap().id, "s-1");
    }

    #[test]
    fn test_invalid_customer_rejected() {
        let (draft, config) = (DraftState::new(), ConfigState::default());
        let err = set_customer(
            &draft,
            &config,
            CustomerRef {
                id: " ".to_string(),
                name: "Acme".to_string(),
                tax_id: None,
            },
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }
}
