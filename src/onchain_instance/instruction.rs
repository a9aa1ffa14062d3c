//! Register program instruction encoding.
//!
//! Only schema version 2 is supported: the message carries a `recipient`
//! and the program walks an eight account list.

use borsh::{BorshDeserialize, BorshSerialize};
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};

use crate::error::RegisterError;
use super::{SPL_NOOP_PROGRAM_ID, SYSTEM_PROGRAM_ID, pda};

/// Version of the `SendRegister` payload and account layout this client speaks.
pub const REGISTER_SCHEMA_VERSION: u8 = 2;

/// Number of accounts the Register program expects.
pub const REGISTER_ACCOUNT_COUNT: usize = 8;

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct RegisterMessage {
    /// Hyperlane domain of the destination chain
    pub destination: u32,
    /// Key being registered on the destination chain
    pub embedded_user: [u8; 32],
    /// Recipient warp route, hex or base58 encoded
    pub recipient: String,
}

/// Instructions understood by the Register program.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub enum HyperlaneRegisterInstruction {
    SendRegister(RegisterMessage),
}

impl HyperlaneRegisterInstruction {
    pub fn into_instruction_data(self) -> Result<Vec<u8>, RegisterError> {
        Ok(borsh::to_vec(&self)?)
    }
}

/// Keys that vary per submission. Everything else in the account list is derived.
#[derive(Debug, Clone, Copy)]
pub struct RegisterAccounts {
    pub register_program: Pubkey,
    pub mailbox_program: Pubkey,
    pub payer: Pubkey,
    pub unique_message_account: Pubkey,
}

impl RegisterAccounts {
    /// Account list in the order the Register program reads it.
    ///
    /// 0. `[]` Mailbox program.
    /// 1. `[writable]` Outbox PDA.
    /// 2. `[]` Register dispatch authority.
    /// 3. `[]` System program.
    /// 4. `[]` SPL noop program.
    /// 5. `[signer, writable]` Payer.
    /// 6. `[signer, writable]` Unique message account.
    /// 7. `[writable]` Dispatched message PDA.
    pub fn to_account_metas(&self) -> Result<Vec<AccountMeta>, RegisterError> {
        let metas = vec![
            AccountMeta::new_readonly(self.mailbox_program, false),
            AccountMeta::new(pda::outbox(&self.mailbox_program)?, false),
            AccountMeta::new_readonly(pda::dispatch_authority(&self.register_program)?, false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
            AccountMeta::new_readonly(SPL_NOOP_PROGRAM_ID, false),
            AccountMeta::new(self.payer, true),
            AccountMeta::new(self.unique_message_account, true),
            AccountMeta::new(
                pda::dispatched_message(&self.mailbox_program, &self.unique_message_account)?,
                false,
            ),
        ];
        debug_assert_eq!(metas.len(), REGISTER_ACCOUNT_COUNT);
        Ok(metas)
    }
}

/// Build the `SendRegister` instruction for `message`.
pub fn send_register(
    accounts: &RegisterAccounts,
    message: RegisterMessage,
) -> Result<Instruction, RegisterError> {
    let data = HyperlaneRegisterInstruction::SendRegister(message).into_instruction_data()?;
    Ok(Instruction {
        program_id: accounts.register_program,
        accounts: accounts.to_account_metas()?,
        data,
    })
}
