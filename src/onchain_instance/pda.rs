//! Program derived addresses for the mailbox and the Register program.
//!
//! Seeds follow the Hyperlane sealevel mailbox conventions. Derivation itself
//! is the runtime's `find_program_address`, so results are bit-exact with
//! what the programs compute on chain.

use solana_sdk::pubkey::Pubkey;

use crate::error::RegisterError;

const DISPATCH_AUTHORITY_SEEDS: &[&[u8]] = &[b"hyperlane_dispatcher", b"-", b"dispatch_authority"];
const OUTBOX_SEEDS: &[&[u8]] = &[b"hyperlane", b"-", b"outbox"];

/// Derive a program address and its bump for `seeds` under `owner`.
pub fn derive(seeds: &[&[u8]], owner: &Pubkey) -> Result<(Pubkey, u8), RegisterError> {
    Pubkey::try_find_program_address(seeds, owner).ok_or(RegisterError::NoViableBump)
}

/// Dispatch authority the Register program signs mailbox dispatches with.
pub fn dispatch_authority(register_program: &Pubkey) -> Result<Pubkey, RegisterError> {
    derive(DISPATCH_AUTHORITY_SEEDS, register_program).map(|(key, _)| key)
}

/// Mailbox outbox account.
pub fn outbox(mailbox_program: &Pubkey) -> Result<Pubkey, RegisterError> {
    derive(OUTBOX_SEEDS, mailbox_program).map(|(key, _)| key)
}

/// Account the mailbox stores a dispatched message in, keyed by the unique message account.
pub fn dispatched_message(
    mailbox_program: &Pubkey,
    unique_message_account: &Pubkey,
) -> Result<Pubkey, RegisterError> {
    let seeds: &[&[u8]] = &[
        b"hyperlane",
        b"-",
        b"dispatched_message",
        b"-",
        unique_message_account.as_ref(),
    ];
    derive(seeds, mailbox_program).map(|(key, _)| key)
}
