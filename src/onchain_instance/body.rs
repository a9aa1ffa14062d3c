//! Body of the message the Register program dispatches through the mailbox,
//! and the recipient format the program accepts.

use solana_sdk::pubkey::{PUBKEY_BYTES, Pubkey};

use crate::error::RegisterError;

pub const BODY_LEN: usize = PUBKEY_BYTES * 2;

/// Body the Register program builds on chain: `payer || embedded_user`.
pub fn pack_body(payer: &Pubkey, embedded_user: &[u8; 32]) -> Vec<u8> {
    let mut body = Vec::with_capacity(BODY_LEN);
    body.extend_from_slice(payer.as_ref());
    body.extend_from_slice(embedded_user);
    body
}

/// Split a received body into `(payer, embedded_user)`. Trailing bytes are ignored.
pub fn unpack_body(body: &[u8]) -> Result<([u8; 32], [u8; 32]), RegisterError> {
    if body.len() < BODY_LEN {
        return Err(RegisterError::MalformedBody(body.len()));
    }
    let mut payer = [0u8; 32];
    let mut embedded_user = [0u8; 32];
    payer.copy_from_slice(&body[..PUBKEY_BYTES]);
    embedded_user.copy_from_slice(&body[PUBKEY_BYTES..BODY_LEN]);
    Ok((payer, embedded_user))
}

/// Parse a recipient as a 32 byte H256.
///
/// Accepts 64 hex digits with or without a `0x` prefix, or a base58 encoded 32 byte key.
pub fn parse_recipient(recipient: &str) -> Result<[u8; 32], RegisterError> {
    let invalid = || RegisterError::InvalidRecipient(recipient.to_string());

    if let Some(bytes) = hex_h256(recipient) {
        return Ok(bytes);
    }
    if recipient.starts_with("0x") {
        return Err(invalid());
    }

    let bytes = bs58::decode(recipient).into_vec().map_err(|_| invalid())?;
    bytes.try_into().map_err(|_| invalid())
}

/// Recipient string as it goes on the wire.
///
/// Hex recipients are passed through untouched since the program parses them
/// itself. Base58 recipients are rewritten to `0x` hex, which it cannot.
pub fn normalize_recipient(recipient: &str) -> Result<String, RegisterError> {
    let bytes = parse_recipient(recipient)?;
    if hex_h256(recipient).is_some() {
        Ok(recipient.to_string())
    } else {
        Ok(format!("0x{}", hex::encode(bytes)))
    }
}

fn hex_h256(recipient: &str) -> Option<[u8; 32]> {
    let digits = recipient.strip_prefix("0x").unwrap_or(recipient);
    if digits.len() != 64 {
        return None;
    }
    hex::decode(digits).ok()?.try_into().ok()
}
