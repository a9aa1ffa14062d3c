use std::str::FromStr;

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

use crate::onchain_instance::{body::unpack_body, instance::RegisterOutcome};
use crate::server::AppState;

/// Body of `POST /api/v1/register`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Destination domain, defaults to the configured one
    pub destination: Option<u32>,
    /// Base58 key to register on the destination chain
    pub embedded_user: String,
    /// Recipient warp route, hex or base58
    pub recipient: String,
}

/// Submit one register transaction.
///
/// # Route
/// - **Method**: POST
/// - **Path**: `/api/v1/register`
///
/// # Request Format
/// ```json
/// {
///   "destination": 1,
///   "embeddedUser": "11111111111111111111111111111113",
///   "recipient": "0xddab628a0e1371ed348dc24e9d10869a79c7df797859e7f269a3bbcb4fec98ca"
/// }
/// ```
/// `destination` is optional and falls back to `DESTINATION_DOMAIN`.
///
/// # Response Format
/// ```json
/// {
///   "signature": "5h6x...",
///   "messageId": "0x8f5d...",
///   "success": true
/// }
/// ```
/// On failure `signature` and `messageId` are `null`, `success` is `false`
/// and `error` carries the message.
///
/// # HTTP Status Codes
/// - **200 OK**: Submission attempted, check `success`
/// - **400 Bad Request**: `embeddedUser` is not a base58 pubkey
///
/// # Examples
/// ```bash
/// curl -X POST http://localhost:3000/api/v1/register \
///   -H 'content-type: application/json' \
///   -d '{"embeddedUser":"11111111111111111111111111111113","recipient":"0xddab..."}'
/// ```
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<RegisterOutcome>, (StatusCode, String)> {
    // Reject a bad key before anything is signed
    let embedded_user = Pubkey::from_str(request.embedded_user.trim()).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            format!("Invalid embeddedUser `{}`: {}", request.embedded_user, e),
        )
    })?;
    let destination = request.destination.unwrap_or(state.default_destination);

    tracing::info!(
        "Register request: destination={} embedded_user={}",
        destination,
        embedded_user
    );

    // Every failure past this point is folded into the outcome
    let outcome = state
        .register
        .submit(destination, embedded_user.to_bytes(), &request.recipient)
        .await;
    Ok(Json(outcome))
}

/// Body of `POST /api/v1/register/decode-body`.
#[derive(Debug, Deserialize)]
pub struct DecodeBodyRequest {
    /// Dispatched message body, hex with or without `0x`
    pub body: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedBody {
    pub payer: String,
    pub embedded_user: String,
}

/// Split a dispatched body back into the payer and the registered key.
///
/// # Route
/// - **Method**: POST
/// - **Path**: `/api/v1/register/decode-body`
///
/// # Response Format
/// ```json
/// {
///   "payer": "<base58>",
///   "embeddedUser": "<base58>"
/// }
/// ```
///
/// # HTTP Status Codes
/// - **200 OK**: Body decoded
/// - **400 Bad Request**: Not hex, or shorter than 64 bytes
pub async fn decode_body(
    Json(request): Json<DecodeBodyRequest>,
) -> Result<Json<DecodedBody>, (StatusCode, String)> {
    let hex_body = request.body.trim();
    let bytes = hex::decode(hex_body.strip_prefix("0x").unwrap_or(hex_body))
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("Invalid hex body: {}", e)))?;
    let (payer, embedded_user) =
        unpack_body(&bytes).map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    Ok(Json(DecodedBody {
        payer: Pubkey::new_from_array(payer).to_string(),
        embedded_user: Pubkey::new_from_array(embedded_user).to_string(),
    }))
}
