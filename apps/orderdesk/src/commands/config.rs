//! # Config Commands
//!
//! Commands for retrieving host configuration.

use tracing::debug;

use crate::state::ConfigState;

/// Gets the current host configuration.
///
/// ## When Used
/// - Dashboard start (currency formatting)
/// - Pre-filling the seller step
///
/// ## Returns
/// Complete configuration state (read-only)
pub fn get_config(config: &ConfigState) -> ConfigState {
    debug!("get_config command");
    config.clone()
}
