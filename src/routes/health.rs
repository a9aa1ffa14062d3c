use axum::{extract::State, response::Json};
use serde_json::json;

use crate::server::AppState;

/// Health check endpoint handler.
///
/// Returns a small JSON object showing the relay is up, together with the
/// public key of the payer that signs every register transaction.
///
/// # Route
/// - **Method**: GET
/// - **Path**: `/ping`
/// - **Response**: JSON object with status and payer fields
///
/// # Response Format
/// ```json
/// {
///   "status": "pong",
///   "payer": "<base58 payer pubkey>"
/// }
/// ```
///
/// # HTTP Status Codes
/// - **200 OK**: Server is running and the payer keypair is loaded
///
/// # Examples
/// ```bash
/// curl http://localhost:3000/ping
/// # Response: {"status":"pong","payer":"6bXk..."}
/// ```
///
/// # Usage in Monitoring
/// - Load balancer health checks
/// - Docker/Kubernetes liveness probes
/// - Confirming which payer a deployment is charging
///
/// No RPC call is made, so the response does not reflect cluster health.
pub async fn ping(State(state): State<AppState>) -> Json<serde_json::Value> {
    // Payer is fixed at startup, reading it never fails
    Json(json!({
        "status": "pong",
        "payer": state.register.payer_pubkey().to_string(),
    }))
}
