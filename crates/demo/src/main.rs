//! Two-hop call chain: `create_order` asks `validate_order` first and relays
//! its fault instead of building its own error.

use std::sync::Arc;

use anyhow::Context;
use serde::Serialize;

use faultline_core::{FaultFactory, FaultMessage, forward, halt, halted_hint, impl_holder, registry};

const HINT_ENV: &str = "FAULTLINE_DEMO_HINT";
const DEFAULT_HINT: &str = "validation failed";

#[derive(Debug, Clone, Serialize)]
struct CreateOrderRequest {
    sku: String,
    quantity: u32,
}

#[derive(Debug, Default, Serialize)]
struct ValidateOrderResponse {
    fault: Option<Arc<FaultMessage>>,
}

impl_holder!(ValidateOrderResponse, fault, FaultMessage);

#[derive(Debug, Default, Serialize)]
struct CreateOrderResponse {
    order_id: Option<String>,
    fault: Option<Arc<FaultMessage>>,
}

impl_holder!(CreateOrderResponse, fault, FaultMessage);

/// What a transport layer would send back for one request.
#[derive(Debug, Serialize)]
struct Outcome {
    request: CreateOrderRequest,
    status: &'static str,
    response: CreateOrderResponse,
}

fn validate_order(req: &CreateOrderRequest, hint: &str) -> ValidateOrderResponse {
    let mut resp = ValidateOrderResponse::default();
    if req.sku.trim().is_empty() || req.quantity == 0 {
        halt(&mut resp, hint);
    }
    resp
}

fn create_order(req: &CreateOrderRequest, hint: &str) -> CreateOrderResponse {
    let mut resp = CreateOrderResponse::default();

    let validation = validate_order(req, hint);
    if forward(Some(&validation), &mut resp) {
        tracing::warn!(sku = %req.sku, "order rejected by validation");
        return resp;
    }

    resp.order_id = Some(format!("order-{}-{}", req.sku, req.quantity));
    tracing::info!(sku = %req.sku, quantity = req.quantity, "order created");
    resp
}

fn handle(req: CreateOrderRequest, hint: &str) -> Outcome {
    let response = create_order(&req, hint);
    let status = match halted_hint(Some(&response)) {
        Some(_) => "invalid_argument",
        None => "ok",
    };
    Outcome {
        request: req,
        status,
        response,
    }
}

/// Hint used when validation fails. A blank hint would read as "no fault",
/// so it falls back to the default like an unset variable.
fn demo_hint(value: Option<String>) -> String {
    value
        .filter(|hint| !hint.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_HINT.to_string())
}

fn main() -> anyhow::Result<()> {
    faultline_observability::init();

    registry::try_bootstrap(FaultFactory::<FaultMessage>::default())
        .context("failed to bootstrap the fault factory")?;

    let hint = demo_hint(std::env::var(HINT_ENV).ok());

    let outcomes = vec![
        handle(
            CreateOrderRequest {
                sku: "SKU-1".into(),
                quantity: 2,
            },
            &hint,
        ),
        handle(
            CreateOrderRequest {
                sku: String::new(),
                quantity: 0,
            },
            &hint,
        ),
    ];

    let out = serde_json::to_string_pretty(&outcomes).context("failed to encode outcomes")?;
    println!("{out}");
    Ok(())
}
