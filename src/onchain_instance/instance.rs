use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use solana_client::{nonblocking::rpc_client::RpcClient, rpc_config::RpcTransactionConfig};
use solana_sdk::{
    commitment_config::CommitmentConfig,
    hash::Hash,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
    transaction::Transaction,
};
use solana_transaction_status::UiTransactionEncoding;

use crate::config::Config;
use crate::error::RegisterError;
use super::{
    MAILBOX_PROGRAM_ID, REGISTER_PROGRAM_ID,
    body::{normalize_recipient, pack_body},
    instruction::{RegisterAccounts, RegisterMessage, send_register},
    logs::extract_message_id,
};

/// The three RPC round trips a register submission makes.
#[async_trait]
pub trait RegisterRpc: Send + Sync {
    async fn latest_blockhash(&self) -> Result<Hash, RegisterError>;

    /// Send and block until the transaction reaches `confirmed`.
    async fn send_and_confirm(&self, transaction: &Transaction) -> Result<Signature, RegisterError>;

    /// Log lines of a confirmed transaction. Empty when the node returns no metadata.
    async fn transaction_logs(&self, signature: &Signature) -> Result<Vec<String>, RegisterError>;
}

#[async_trait]
impl RegisterRpc for RpcClient {
    async fn latest_blockhash(&self) -> Result<Hash, RegisterError> {
        Ok(self.get_latest_blockhash().await?)
    }

    async fn send_and_confirm(&self, transaction: &Transaction) -> Result<Signature, RegisterError> {
        Ok(self.send_and_confirm_transaction(transaction).await?)
    }

    async fn transaction_logs(&self, signature: &Signature) -> Result<Vec<String>, RegisterError> {
        let confirmed = self
            .get_transaction_with_config(
                signature,
                RpcTransactionConfig {
                    encoding: Some(UiTransactionEncoding::Json),
                    commitment: Some(CommitmentConfig::confirmed()),
                    max_supported_transaction_version: Some(0),
                },
            )
            .await?;

        Ok(confirmed
            .transaction
            .meta
            .and_then(|meta| Option::<Vec<String>>::from(meta.log_messages))
            .unwrap_or_default())
    }
}

/// Result of one register submission, shaped for JSON callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterOutcome {
    pub signature: Option<String>,
    pub message_id: Option<String>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RegisterOutcome {
    pub fn failed(err: &RegisterError) -> Self {
        Self {
            signature: None,
            message_id: None,
            success: false,
            error: Some(err.to_string()),
        }
    }
}

/// A confirmed submission.
#[derive(Debug, Clone)]
pub struct Submission {
    pub signature: Signature,
    pub message_id: Option<String>,
}

impl From<Submission> for RegisterOutcome {
    fn from(submission: Submission) -> Self {
        Self {
            signature: Some(submission.signature.to_string()),
            message_id: submission.message_id,
            success: true,
            error: None,
        }
    }
}

/// Register program client: owns the payer and the RPC connection.
pub struct RegisterProgramInstance {
    rpc: Arc<dyn RegisterRpc>,
    payer: Keypair,
    register_program: Pubkey,
    mailbox_program: Pubkey,
}

impl RegisterProgramInstance {
    pub fn new(rpc: Arc<dyn RegisterRpc>, payer: Keypair) -> Self {
        Self {
            rpc,
            payer,
            register_program: REGISTER_PROGRAM_ID,
            mailbox_program: MAILBOX_PROGRAM_ID,
        }
    }

    /// Connect to the configured cluster at `confirmed` commitment.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let rpc = RpcClient::new_with_commitment(
            config.rpc.cluster.url().to_string(),
            CommitmentConfig::confirmed(),
        );
        let payer = config.rpc.payer()?;
        Ok(Self::new(Arc::new(rpc), payer)
            .with_program_ids(config.programs.register_program, config.programs.mailbox_program))
    }

    pub fn with_program_ids(mut self, register_program: Pubkey, mailbox_program: Pubkey) -> Self {
        self.register_program = register_program;
        self.mailbox_program = mailbox_program;
        self
    }

    pub fn payer_pubkey(&self) -> Pubkey {
        self.payer.pubkey()
    }

    /// Submit one `SendRegister` and report the outcome. Never fails: every
    /// error is folded into `success: false` with a message.
    pub async fn submit(
        &self,
        destination: u32,
        embedded_user: [u8; 32],
        recipient: &str,
    ) -> RegisterOutcome {
        match self.try_submit(destination, embedded_user, recipient).await {
            Ok(submission) => submission.into(),
            Err(e) => {
                tracing::error!("Error executing register program: {}", e);
                RegisterOutcome::failed(&e)
            }
        }
    }

    /// The submission pipeline without the outer guard.
    pub async fn try_submit(
        &self,
        destination: u32,
        embedded_user: [u8; 32],
        recipient: &str,
    ) -> Result<Submission, RegisterError> {
        let message = RegisterMessage {
            destination,
            embedded_user,
            recipient: normalize_recipient(recipient)?,
        };
        tracing::info!("instruction: {:?}", message);

        let unique_message_account = Keypair::new();
        let accounts = RegisterAccounts {
            register_program: self.register_program,
            mailbox_program: self.mailbox_program,
            payer: self.payer.pubkey(),
            unique_message_account: unique_message_account.pubkey(),
        };
        let instruction = send_register(&accounts, message)?;
        tracing::info!("instruction data: {}", hex::encode(&instruction.data));
        for (index, meta) in instruction.accounts.iter().enumerate() {
            tracing::info!(
                "account {}: {} signer={} writable={}",
                index,
                meta.pubkey,
                meta.is_signer,
                meta.is_writable
            );
        }
        tracing::debug!(
            "expected dispatched body: {}",
            hex::encode(pack_body(&self.payer.pubkey(), &embedded_user))
        );

        let recent_blockhash = self.rpc.latest_blockhash().await?;
        let transaction = Transaction::new_signed_with_payer(
            &[instruction],
            Some(&self.payer.pubkey()),
            &[&self.payer, &unique_message_account],
            recent_blockhash,
        );

        tracing::info!("Sending transaction...");
        let signature = self.rpc.send_and_confirm(&transaction).await?;
        tracing::info!("Transaction confirmed!");
        tracing::info!("Signature: {}", signature);

        let logs = self.rpc.transaction_logs(&signature).await?;
        if !logs.is_empty() {
            tracing::info!("=== Transaction Logs ===");
            for (index, line) in logs.iter().enumerate() {
                tracing::info!("{}: {}", index + 1, line);
            }
        }

        let message_id = extract_message_id(&logs);
        match &message_id {
            Some(id) => tracing::info!("Message ID: {}", id),
            None => tracing::warn!("No register log line found for {}", signature),
        }

        Ok(Submission {
            signature,
            message_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use borsh::BorshDeserialize;

    use super::*;
    use crate::onchain_instance::{
        body::unpack_body,
        instruction::{HyperlaneRegisterInstruction, REGISTER_ACCOUNT_COUNT},
        pda,
    };

    const RECIPIENT: &str = "0x54b0b39fd02198dfaf116360668610d2a6c28833ed646a589cc54435c80f648d";

    #[derive(Default)]
    struct StubRpc {
        logs: Vec<String>,
        reject_send: bool,
        sent: Mutex<Vec<Transaction>>,
    }

    #[async_trait]
    impl RegisterRpc for StubRpc {
        async fn latest_blockhash(&self) -> Result<Hash, RegisterError> {
            Ok(Hash::new_unique())
        }

        async fn send_and_confirm(&self, transaction: &Transaction) -> Result<Signature, RegisterError> {
            if self.reject_send {
                return Err(RegisterError::Rpc("custom program error: 0x0".to_string()));
            }
            self.sent.lock().unwrap().push(transaction.clone());
            Ok(transaction.signatures[0])
        }

        async fn transaction_logs(&self, _signature: &Signature) -> Result<Vec<String>, RegisterError> {
            Ok(self.logs.clone())
        }
    }

    fn instance(rpc: Arc<StubRpc>) -> RegisterProgramInstance {
        RegisterProgramInstance::new(rpc, Keypair::new())
    }

    #[tokio::test]
    async fn test_submit_extracts_message_id() {
        let rpc = Arc::new(StubRpc {
            logs: vec![
                "Program log: invoking.....".to_string(),
                "Program log: register 0x8f5d".to_string(),
            ],
            ..Default::default()
        });
        let outcome = instance(rpc.clone()).submit(1, [3u8; 32], RECIPIENT).await;

        assert!(outcome.success);
        assert_eq!(outcome.message_id.as_deref(), Some("0x8f5d"));
        assert!(outcome.error.is_none());

        let sent = rpc.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(outcome.signature, Some(sent[0].signatures[0].to_string()));
    }

    #[tokio::test]
    async fn test_missing_log_line_is_not_a_failure() {
        let rpc = Arc::new(StubRpc {
            logs: vec!["Program log: getting instruction".to_string()],
            ..Default::default()
        });
        let outcome = instance(rpc).submit(1, [3u8; 32], RECIPIENT).await;

        assert!(outcome.success);
        assert!(outcome.signature.is_some());
        assert_eq!(outcome.message_id, None);
    }

    #[tokio::test]
    async fn test_bare_marker_gives_null_message_id() {
        let rpc = Arc::new(StubRpc {
            logs: vec!["Program log: register ".to_string()],
            ..Default::default()
        });
        let outcome = instance(rpc).submit(1, [3u8; 32], RECIPIENT).await;

        assert!(outcome.success);
        assert_eq!(outcome.message_id, None);
        let json = serde_json::to_value(&outcome).unwrap();
        assert!(json["messageId"].is_null());
    }

    #[tokio::test]
    async fn test_rejected_send_reports_failure() {
        let rpc = Arc::new(StubRpc {
            reject_send: true,
            ..Default::default()
        });
        let outcome = instance(rpc).submit(1, [3u8; 32], RECIPIENT).await;

        assert_eq!(outcome.signature, None);
        assert_eq!(outcome.message_id, None);
        assert!(!outcome.success);
        assert!(!outcome.error.unwrap_or_default().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_recipient_never_reaches_rpc() {
        let rpc = Arc::new(StubRpc::default());
        let outcome = instance(rpc.clone()).submit(1, [3u8; 32], "abc123").await;

        assert!(!outcome.success);
        assert!(outcome.error.unwrap().contains("abc123"));
        assert!(rpc.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_transaction_is_signed_by_payer_and_unique_account() {
        let rpc = Arc::new(StubRpc::default());
        let instance = instance(rpc.clone());
        let mut embedded_user = [0u8; 32];
        embedded_user[31] = 1;
        let submission = instance.try_submit(1, embedded_user, RECIPIENT).await.unwrap();

        let sent = rpc.sent.lock().unwrap();
        let transaction = &sent[0];
        assert!(transaction.verify().is_ok());
        assert_eq!(transaction.signatures.len(), 2);
        assert_eq!(transaction.signatures[0], submission.signature);
        assert_eq!(transaction.message.account_keys[0], instance.payer_pubkey());

        let compiled = &transaction.message.instructions[0];
        assert_eq!(compiled.accounts.len(), REGISTER_ACCOUNT_COUNT);
        assert_eq!(&compiled.data[..5], &[0x00, 0x01, 0x00, 0x00, 0x00]);

        let unique_account = transaction.message.account_keys[1];
        let account_keys: Vec<Pubkey> = compiled
            .accounts
            .iter()
            .map(|&i| transaction.message.account_keys[i as usize])
            .collect();
        assert_eq!(account_keys[6], unique_account);
        assert_eq!(
            account_keys[7],
            pda::dispatched_message(&MAILBOX_PROGRAM_ID, &unique_account).unwrap()
        );

        let HyperlaneRegisterInstruction::SendRegister(message) =
            HyperlaneRegisterInstruction::try_from_slice(&compiled.data).unwrap();
        assert_eq!(message.recipient, RECIPIENT);

        let body = pack_body(&instance.payer_pubkey(), &message.embedded_user);
        let (payer, embedded) = unpack_body(&body).unwrap();
        assert_eq!(payer, instance.payer_pubkey().to_bytes());
        assert_eq!(embedded, embedded_user);
    }

    #[tokio::test]
    async fn test_hex_recipient_is_sent_verbatim() {
        let rpc = Arc::new(StubRpc::default());
        let recipient = RECIPIENT[2..].to_ascii_uppercase();
        instance(rpc.clone())
            .try_submit(1, [0u8; 32], &recipient)
            .await
            .unwrap();

        let sent = rpc.sent.lock().unwrap();
        let data = &sent[0].message.instructions[0].data;
        assert_eq!(data.len(), 1 + 4 + 32 + 4 + 64);
        assert_eq!(&data[41..], recipient.as_bytes());
    }

    #[tokio::test]
    async fn test_each_submission_uses_fresh_unique_account() {
        let rpc = Arc::new(StubRpc::default());
        let instance = instance(rpc.clone());
        instance.try_submit(1, [3u8; 32], RECIPIENT).await.unwrap();
        instance.try_submit(1, [3u8; 32], RECIPIENT).await.unwrap();

        let sent = rpc.sent.lock().unwrap();
        assert_ne!(sent[0].message.account_keys[1], sent[1].message.account_keys[1]);
    }

    #[test]
    fn test_outcome_json_shape() {
        let json = serde_json::to_value(RegisterOutcome {
            signature: None,
            message_id: None,
            success: false,
            error: Some("boom".to_string()),
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "signature": null, "messageId": null, "success": false, "error": "boom" })
        );
    }
}
