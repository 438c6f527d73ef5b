//! # Draft State
//!
//! Holds the single order-composition session.
//!
//! ## Thread Safety
//! The wizard is wrapped in `Arc<Mutex<T>>` so every command sees and
//! mutates one consistent draft; commands never interleave inside it.
//!
//! ## Draft Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Draft State Operations                               │
//! │                                                                         │
//! │  Dashboard Action         Command                 Draft Change          │
//! │  ────────────────         ───────                 ────────────          │
//! │                                                                         │
//! │  Pick product ──────────► add_to_draft() ───────► add / accumulate      │
//! │  Change quantity ───────► update_draft_item() ──► clamp into stock      │
//! │  Click remove ──────────► remove_from_draft() ──► remove one line       │
//! │  Choose tax ────────────► select_tax() ─────────► eligible? store       │
//! │  Next / Back ───────────► next_step() ... ──────► wizard transition     │
//! │  Confirm ───────────────► submit_order() ───────► payload + freeze      │
//! │  Cancel ────────────────► cancel_order() ───────► discard               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use orderdesk_core::OrderWizard;

/// Host-managed wizard session.
#[derive(Debug, Clone, Default)]
pub struct DraftState {
    wizard: Arc<Mutex<OrderWizard>>,
}

impl DraftState {
    /// Creates a session at the first step with an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes a function with read access to the wizard.
    ///
    /// ```rust,ignore
    /// let totals = draft_state.with_wizard(|w| w.draft().totals());
    /// ```
    pub fn with_wizard<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&OrderWizard) -> R,
    {
        // Core mutations validate before they write, so a poisoned lock still
        // holds a consistent wizard.
        let wizard = self.wizard.lock().unwrap_or_else(PoisonError::into_inner);
        f(&wizard)
    }

    /// Executes a function with write access to the wizard.
    pub fn with_wizard_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut OrderWizard) -> R,
    {
        let mut wizard = self.wizard.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut wizard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orderdesk_core::WizardStep;

    #[test]
    fn test_shared_session() {
        let state = DraftState::new();
        let other = state.clone();

        state.with_wizard_mut(|w| {
            w.set_customer(orderdesk_core::CustomerRef {
                id: "c-1".to_string(),
                name: "Acme".to_string(),
                tax_id: None,
            })
            .unwrap();
            w.advance().unwrap();
        });

        assert_eq!(other.with_wizard(|w| w.step()), WizardStep::SelectItems);
    }
}
