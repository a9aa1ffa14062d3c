//! # Onchain Program Instance Module
//!
//! Everything needed to talk to the Register program deployed on Solana:
//! program-derived address derivation, instruction encoding, the dispatched
//! message body, and the submission pipeline itself.
//!
//! ## Features
//! - Mailbox / dispatch authority PDA derivation
//! - Borsh encoding of the `SendRegister` instruction
//! - Ordered account list for the Register program
//! - Transaction submission and message id extraction from logs

/// Message body relayed through the mailbox and recipient parsing
pub mod body;

/// Register instruction encoding and account list
pub mod instruction;

/// Register program instance and submission pipeline
pub mod instance;

/// Message id extraction from transaction logs
pub mod logs;

/// Program derived addresses used by the Register program
pub mod pda;

use solana_sdk::pubkey::Pubkey;

/// Register program id on the Hyperlane Solana deployment.
pub const REGISTER_PROGRAM_ID: Pubkey = solana_sdk::pubkey!("4KdqVph6eMnS2omUBLBH2u4G6wwqxG5hzesZpsFcSWod");

/// Hyperlane mailbox program id.
pub const MAILBOX_PROGRAM_ID: Pubkey = solana_sdk::pubkey!("75HBBLae3ddeneJVrZeyrDfv6vb7SMC3aCpBucSXS5aR");

/// Native system program.
pub const SYSTEM_PROGRAM_ID: Pubkey = solana_sdk::pubkey!("11111111111111111111111111111111");

/// SPL noop program the mailbox logs dispatched messages through.
pub const SPL_NOOP_PROGRAM_ID: Pubkey = solana_sdk::pubkey!("noopb9bkMVfRPU8AsbpTUg8AQkHtKwMYZiFUjNRtMmV");
