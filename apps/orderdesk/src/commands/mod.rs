//! # Commands Module
//!
//! All commands exposed to the dashboard.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (request envelope, dispatch)
//! ├── draft.rs    ◄─── Line items, tax selection, catalog push
//! ├── wizard.rs   ◄─── Parties, step transitions, submission
//! └── config.rs   ◄─── Configuration retrieval
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Dashboard (one JSON object per line on stdin)                          │
//! │  ─────────                                                              │
//! │  {"id":7,"cmd":"add_to_draft","args":{"productId":"chair","quantity":2}}│
//! │         │                                                               │
//! │         ▼                                                               │
//! │  dispatch() ──► parse args ──► command fn(state it needs, args...)      │
//! │         │                                                               │
//! │         │ Result<T, ApiError>                                           │
//! │         ▼                                                               │
//! │  {"id":7,"ok":true,"data":{...}}                                        │
//! │  {"id":7,"ok":false,"error":{"code":"NOT_FOUND","message":"..."}}       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs the session
//! fn remove_from_draft(draft: &DraftState, config: &ConfigState, item_id: String)
//!
//! // Needs the catalog too
//! fn add_to_draft(catalog: &CatalogState, draft: &DraftState, config: &ConfigState, ...)
//! ```

pub mod config;
pub mod draft;
pub mod wizard;

use orderdesk_core::{CustomerRef, SellerRef, ShippingDetails};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::ApiError;
use crate::state::CatalogSnapshot;
use crate::Host;

/// One request line.
#[derive(Debug, Clone, Deserialize)]
pub struct Request {
    /// Echoed back so the dashboard can match responses.
    #[serde(default)]
    pub id: Option<Value>,
    pub cmd: String,
    #[serde(default)]
    pub args: Value,
}

/// One response line.
#[derive(Debug, Clone, Serialize)]
pub struct Response {
    pub id: Value,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

impl Response {
    pub fn success(id: Option<Value>, data: Value) -> Self {
        Response {
            id: id.unwrap_or(Value::Null),
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(id: Option<Value>, error: ApiError) -> Self {
        Response {
            id: id.unwrap_or(Value::Null),
            ok: false,
            data: None,
            error: Some(error),
        }
    }
}

// =============================================================================
// Argument Shapes
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddToDraftArgs {
    product_id: String,
    quantity: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateItemArgs {
    item_id: String,
    quantity: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemArgs {
    item_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaxArgs {
    tax_id: String,
}

#[derive(Debug, Deserialize)]
struct CustomerArgs {
    customer: CustomerRef,
}

#[derive(Debug, Deserialize)]
struct SellerArgs {
    seller: SellerRef,
}

#[derive(Debug, Deserialize)]
struct ShippingArgs {
    shipping: ShippingDetails,
}

fn parse<T: DeserializeOwned>(args: Value) -> Result<T, ApiError> {
    let args = match args {
        Value::Null => Value::Object(Default::default()),
        other => other,
    };
    Ok(serde_json::from_value(args)?)
}

fn reply<T: Serialize>(data: T) -> Result<Value, ApiError> {
    serde_json::to_value(data)
        .map_err(|e| ApiError::internal(format!("Failed to encode response: {}", e)))
}

// =============================================================================
// Dispatch
// =============================================================================

/// Routes a command by name to its handler.
pub fn dispatch(host: &Host, cmd: &str, args: Value) -> Result<Value, ApiError> {
    let Host {
        catalog,
        draft: session,
        config: cfg,
    } = host;

    match cmd {
        // Draft commands
        "get_draft" => reply(draft::get_draft(session, cfg)),
        "add_to_draft" => {
            let a: AddToDraftArgs = parse(args)?;
            reply(draft::add_to_draft(catalog, session, cfg, a.product_id, a.quantity)?)
        }
        "update_draft_item" => {
            let a: UpdateItemArgs = parse(args)?;
            reply(draft::update_draft_item(session, cfg, a.item_id, a.quantity)?)
        }
        "remove_from_draft" => {
            let a: ItemArgs = parse(args)?;
            reply(draft::remove_from_draft(session, cfg, a.item_id)?)
        }
        "clear_draft" => reply(draft::clear_draft(session, cfg)?),
        "list_eligible_taxes" => reply(draft::list_eligible_taxes(catalog, session)),
        "select_tax" => {
            let a: TaxArgs = parse(args)?;
            reply(draft::select_tax(catalog, session, cfg, a.tax_id)?)
        }
        "clear_tax" => reply(draft::clear_tax(session, cfg)?),
        "load_catalog" => {
            let snapshot: CatalogSnapshot = parse(args)?;
            reply(draft::load_catalog(catalog, snapshot)?)
        }
        // Wizard commands
        "set_customer" => {
            let a: CustomerArgs = parse(args)?;
            reply(wizard::set_customer(session, cfg, a.customer)?)
        }
        "set_seller" => {
            let a: SellerArgs = parse(args)?;
            reply(wizard::set_seller(session, cfg, a.seller)?)
        }
        "set_shipping" => {
            let a: ShippingArgs = parse(args)?;
            reply(wizard::set_shipping(session, cfg, a.shipping)?)
        }
        "next_step" => reply(wizard::next_step(session, cfg)?),
        "previous_step" => reply(wizard::previous_step(session, cfg)?),
        "submit_order" => reply(wizard::submit_order(session)?),
        "cancel_order" => reply(wizard::cancel_order(session, cfg)?),
        // Config commands
        "get_config" => reply(config::get_config(cfg)),
        unknown => Err(ApiError::bad_request(format!("Unknown command: {}", unknown))),
    }
}

/// Decodes one request line, runs it, and wraps the outcome.
pub fn handle_line(host: &Host, line: &str) -> Response {
    let value: Value = match serde_json::from_str(line) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "Malformed request line");
            let error = ApiError::bad_request(format!("Malformed request: {}", e));
            return Response::failure(None, error);
        }
    };

    // Recovered before the shape check so even a rejected request is matched.
    let id = value.get("id").cloned();
    let request: Request = match serde_json::from_value(value) {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, "Request has the wrong shape");
            let error = ApiError::bad_request(format!("Malformed request: {}", e));
            return Response::failure(id, error);
        }
    };

    match dispatch(host, &request.cmd, request.args) {
        Ok(data) => Response::success(request.id, data),
        Err(error) => {
            warn!(cmd = %request.cmd, code = ?error.code, "{}", error.message);
            Response::failure(request.id, error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{CatalogState, ConfigState};
    use serde_json::json;

    fn host() -> Host {
        Host::new(ConfigState::default(), CatalogState::new())
    }

    #[test]
    fn test_unknown_command() {
        let response = handle_line(&host(), r#"{"id":1,"cmd":"launch_rockets"}"#);
        assert!(!response.ok);
        assert_eq!(response.id, json!(1));
        assert_eq!(response.error.unwrap().message, "Unknown command: launch_rockets");
    }

    #[test]
    fn test_malformed_line() {
        let response = handle_line(&host(), "not json");
        assert!(!response.ok);
        assert_eq!(response.id, Value::Null);
    }

    #[test]
    fn test_wrong_shape_keeps_id() {
        let response = handle_line(&host(), r#"{"id":9,"cmd":5}"#);
        assert!(!response.ok);
        assert_eq!(response.id, json!(9));
        assert_eq!(
            response.error.unwrap().code,
            crate::error::ErrorCode::BadRequest
        );

        let response = handle_line(&host(), r#"[1, 2]"#);
        assert_eq!(response.id, Value::Null);
    }

    #[test]
    fn test_missing_args_are_bad_request() {
        let host = host();
        let err = dispatch(&host, "add_to_draft", Value::Null).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::BadRequest);
    }

    #[test]
    fn test_response_shape() {
        let response = handle_line(&host(), r#"{"id":"a","cmd":"get_draft"}"#);
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["ok"], json!(true));
        assert_eq!(value["data"]["step"], json!("SELECT_CUSTOMER"));
        assert_eq!(value["data"]["eligibility"], json!("EMPTY"));
        assert!(value.get("error").is_none());
    }
}
