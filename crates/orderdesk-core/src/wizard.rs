//! # Order Wizard
//!
//! The multi-step flow that owns a draft from first click to submission.
//!
//! ## Step Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  SelectCustomer ◄─► SelectItems ◄─► SelectSeller ◄─► SelectShipping     │
//! │                                                            │  ▲         │
//! │                                                            ▼  │         │
//! │                                   Submitted ◄── submit ── Review        │
//! │                                                                         │
//! │  advance(): one step forward, only when the current step is complete    │
//! │  back():    one step backward, never from SelectCustomer or Submitted   │
//! │  cancel():  discard everything, start over at SelectCustomer            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Steps cannot be skipped. Once submitted, the draft is frozen.

use serde::Serialize;
use ts_rs::TS;

use crate::assembly::{assemble, OrderSubmission};
use crate::draft::OrderDraft;
use crate::error::{CoreError, CoreResult};
use crate::types::{CustomerRef, OrderParties, SellerRef, ShippingDetails};
use crate::validation::{validate_customer, validate_seller, validate_shipping};

/// A screen of the order-composition flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WizardStep {
    #[default]
    SelectCustomer,
    SelectItems,
    SelectSeller,
    SelectShipping,
    Review,
    Submitted,
}

impl WizardStep {
    /// The step `advance()` leads to. `Review` goes on only via submit.
    pub const fn next(&self) -> Option<WizardStep> {
        match self {
            WizardStep::SelectCustomer => Some(WizardStep::SelectItems),
            WizardStep::SelectItems => Some(WizardStep::SelectSeller),
            WizardStep::SelectSeller => Some(WizardStep::SelectShipping),
            WizardStep::SelectShipping => Some(WizardStep::Review),
            WizardStep::Review | WizardStep::Submitted => None,
        }
    }

    pub const fn previous(&self) -> Option<WizardStep> {
        match self {
            WizardStep::SelectCustomer | WizardStep::Submitted => None,
            WizardStep::SelectItems => Some(WizardStep::SelectCustomer),
            WizardStep::SelectSeller => Some(WizardStep::SelectItems),
            WizardStep::SelectShipping => Some(WizardStep::SelectSeller),
            WizardStep::Review => Some(WizardStep::SelectShipping),
        }
    }
}

/// Wizard state: current step, the draft, and the collected parties.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderWizard {
    step: WizardStep,
    draft: OrderDraft,
    customer: Option<CustomerRef>,
    seller: Option<SellerRef>,
    shipping: Option<ShippingDetails>,
}

impl OrderWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &OrderDraft {
        &self.draft
    }

    /// Mutable access to the draft, refused once the order is submitted.
    pub fn draft_mut(&mut self) -> CoreResult<&mut OrderDraft> {
        self.ensure_open("edit the draft")?;
        Ok(&mut self.draft)
    }

    pub fn customer(&self) -> Option<&CustomerRef> {
        self.customer.as_ref()
    }

    pub fn seller(&self) -> Option<&SellerRef> {
        self.seller.as_ref()
    }

    pub fn shipping(&self) -> Option<&ShippingDetails> {
        self.shipping.as_ref()
    }

    // =========================================================================
    // Party Collection
    // =========================================================================

    pub fn set_customer(&mut self, customer: CustomerRef) -> CoreResult<()> {
        self.ensure_open("set the customer")?;
        validate_customer(&customer)?;
        self.customer = Some(customer);
        Ok(())
    }

    pub fn set_seller(&mut self, seller: SellerRef) -> CoreResult<()> {
        self.ensure_open("set the seller")?;
        validate_seller(&seller)?;
        self.seller = Some(seller);
        Ok(())
    }

    pub fn set_shipping(&mut self, shipping: ShippingDetails) -> CoreResult<()> {
        self.ensure_open("set the shipping address")?;
        validate_shipping(&shipping)?;
        self.shipping = Some(shipping);
        Ok(())
    }

    /// All three parties, once collected.
    pub fn parties(&self) -> Option<OrderParties> {
        Some(OrderParties {
            customer: self.customer.clone()?,
            seller: self.seller.clone()?,
            shipping: self.shipping.clone()?,
        })
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Moves one step forward if the current step is complete.
    pub fn advance(&mut self) -> CoreResult<WizardStep> {
        let step = self.step();
        let next = step.next().ok_or_else(|| CoreError::InvalidTransition {
            step,
            action: "advance".to_string(),
        })?;

        if let Some(reason) = self.incomplete_reason(step) {
            return Err(CoreError::StepIncomplete {
                step,
                reason: reason.to_string(),
            });
        }

        self.step = next;
        Ok(next)
    }

    /// Moves one step backward. Collected data is kept.
    pub fn back(&mut self) -> CoreResult<WizardStep> {
        let step = self.step();
        let previous = step.previous().ok_or_else(|| CoreError::InvalidTransition {
            step,
            action: "go back".to_string(),
        })?;

        self.step = previous;
        Ok(previous)
    }

    /// Assembles the payload from `Review` and freezes the wizard.
    ///
    /// Every earlier step is re-checked, since items or parties may have
    /// been edited after their step was passed.
    pub fn submit(&mut self) -> CoreResult<OrderSubmission> {
        let step = self.step();
        if step != WizardStep::Review {
            return Err(CoreError::InvalidTransition {
                step,
                action: "submit".to_string(),
            });
        }

        for earlier in [
            WizardStep::SelectCustomer,
            WizardStep::SelectItems,
            WizardStep::SelectSeller,
            WizardStep::SelectShipping,
        ] {
            if let Some(reason) = self.incomplete_reason(earlier) {
                return Err(CoreError::StepIncomplete {
                    step: earlier,
                    reason: reason.to_string(),
                });
            }
        }

        let parties = self.parties().ok_or_else(|| CoreError::StepIncomplete {
            step,
            reason: "order parties are missing".to_string(),
        })?;

        let submission = assemble(&self.draft, &parties);
        self.step = WizardStep::Submitted;
        Ok(submission)
    }

    /// Discards the draft and everything collected.
    pub fn cancel(&mut self) {
        *self = OrderWizard::new();
    }

    fn incomplete_reason(&self, step: WizardStep) -> Option<&'static str> {
        match step {
            WizardStep::SelectCustomer if self.customer.is_none() => Some("select a customer"),
            WizardStep::SelectItems if self.draft.is_empty() => Some("add at least one item"),
            WizardStep::SelectSeller if self.seller.is_none() => Some("select a seller"),
            WizardStep::SelectShipping if self.shipping.is_none() => {
                Some("enter a delivery address")
            }
            _ => None,
        }
    }

    fn ensure_open(&self, action: &str) -> CoreResult<()> {
        if self.step() == WizardStep::Submitted {
            return Err(CoreError::InvalidTransition {
                step: WizardStep::Submitted,
                action: action.to_string(),
            });
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ProductKind, ProductSnapshot};

    fn customer() -> CustomerRef {
        CustomerRef {
            id: "c-1".to_string(),
            name: "Acme".to_string(),
            tax_id: None,
        }
    }

    fn seller() -> SellerRef {
        SellerRef {
            id: "s-1".to_string(),
            name: "Luis".to_string(),
        }
    }

    fn shipping() -> ShippingDetails {
        ShippingDetails {
            recipient: "Ana".to_string(),
            address_line: "Av. Central 120".to_string(),
            city: "Lima".to_string(),
            region: None,
            postal_code: None,
            notes: None,
        }
    }

    fn chair() -> ProductSnapshot {
        ProductSnapshot {
            id: "chair".to_string(),
            name: "Chair".to_string(),
            unit_price_cents: 10000,
            available_quantity: 5,
            kind: ProductKind::Good,
        }
    }

    #[test]
    fn test_step_order() {
        assert_eq!(WizardStep::SelectCustomer.next(), Some(WizardStep::SelectItems));
        assert_eq!(WizardStep::Review.next(), None);
        assert_eq!(WizardStep::SelectCustomer.previous(), None);
        assert_eq!(WizardStep::Review.previous(), Some(WizardStep::SelectShipping));
        assert_eq!(WizardStep::Submitted.previous(), None);
    }

    #[test]
    fn test_advance_requires_customer() {
        let mut wizard = OrderWizard::new();
        assert!(matches!(
            wizard.advance(),
            Err(CoreError::StepIncomplete {
                step: WizardStep::SelectCustomer,
                ..
            })
        ));

        wizard.set_customer(customer()).unwrap();
        assert_eq!(wizard.advance().unwrap(), WizardStep::SelectItems);
    }

    #[test]
    fn test_advance_requires_items() {
        let mut wizard = OrderWizard::new();
        wizard.set_customer(customer()).unwrap();
        wizard.advance().unwrap();

        assert!(wizard.advance().is_err());

        wizard.draft_mut().unwrap().add_item(&chair(), 1).unwrap();
        assert_eq!(wizard.advance().unwrap(), WizardStep::SelectSeller);
    }

    #[test]
    fn test_invalid_party_rejected() {
        let mut wizard = OrderWizard::new();
        let err = wizard
            .set_customer(CustomerRef {
                name: String::new(),
                ..customer()
            })
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(wizard.customer().is_none());
    }

    #[test]
    fn test_full_flow_and_freeze() {
        let mut wizard = OrderWizard::new();
        wizard.set_customer(customer()).unwrap();
        wizard.advance().unwrap();
        wizard.draft_mut().unwrap().add_item(&chair(), 2).unwrap();
        wizard.advance().unwrap();
        wizard.set_seller(seller()).unwrap();
        wizard.advance().unwrap();
        wizard.set_shipping(shipping()).unwrap();
        assert_eq!(wizard.advance().unwrap(), WizardStep::Review);

        let submission = wizard.submit().unwrap();
        assert_eq!(wizard.step(), WizardStep::Submitted);
        assert_eq!(submission.items.len(), 1);
        assert_eq!(submission.items[0].quantity, 2);

        assert!(matches!(
            wizard.draft_mut(),
            Err(CoreError::InvalidTransition { .. })
        ));
        assert!(wizard.back().is_err());
        assert!(wizard.submit().is_err());
    }

    #[test]
    fn test_submit_rechecks_items_removed_after_step() {
        let mut wizard = OrderWizard::new();
        wizard.set_customer(customer()).unwrap();
        wizard.advance().unwrap();
        let id = wizard
            .draft_mut()
            .unwrap()
            .add_item(&chair(), 1)
            .unwrap()
            .item
            .unwrap()
            .item_id;
        wizard.advance().unwrap();
        wizard.set_seller(seller()).unwrap();
        wizard.advance().unwrap();
        wizard.set_shipping(shipping()).unwrap();
        wizard.advance().unwrap();

        wizard.draft_mut().unwrap().remove_item(&id).unwrap();
        assert!(matches!(
            wizard.submit(),
            Err(CoreError::StepIncomplete {
                step: WizardStep::SelectItems,
                ..
            })
        ));
    }

    #[test]
    fn test_submit_only_from_review() {
        let mut wizard = OrderWizard::new();
        assert!(matches!(
            wizard.submit(),
            Err(CoreError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_back_keeps_data_and_cancel_resets() {
        let mut wizard = OrderWizard::new();
        wizard.set_customer(customer()).unwrap();
        wizard.advance().unwrap();
        wizard.draft_mut().unwrap().add_item(&chair(), 1).unwrap();

        assert_eq!(wizard.back().unwrap(), WizardStep::SelectCustomer);
        assert!(wizard.customer().is_some());
        assert_eq!(wizard.draft().items().len(), 1);

        wizard.cancel();
        assert_eq!(wizard.step(), WizardStep::SelectCustomer);
        assert!(wizard.customer().is_none());
        assert!(wizard.draft().is_empty());
    }
}
