//! Configuration module for environment variables and application settings

use std::{env, fmt, path::Path, str::FromStr};

use anchor_client::Cluster;
use anyhow::{Context, Result, anyhow};
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, read_keypair_file},
};

use crate::onchain_instance::{MAILBOX_PROGRAM_ID, REGISTER_PROGRAM_ID};

#[derive(Debug, Clone)]
pub struct Config {
    /// Cluster connection and signing key
    pub rpc: RpcConfig,

    /// Register and mailbox program ids
    pub programs: ProgramConfig,

    /// Parameters of the one-shot register submission
    pub invocation: InvocationConfig,

    /// HTTP server configuration
    pub server: ServerConfig,

    pub mode: RunMode,
}

#[derive(Clone)]
pub struct RpcConfig {
    pub cluster: Cluster,
    /// Base58 secret, JSON byte array, or path to a keypair file
    payer_keypair: String,
}

#[derive(Debug, Clone)]
pub struct ProgramConfig {
    pub register_program: Pubkey,
    pub mailbox_program: Pubkey,
}

#[derive(Debug, Clone)]
pub struct InvocationConfig {
    pub destination: u32,
    pub embedded_user: Option<Pubkey>,
    pub recipient: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Submit one register transaction and exit
    Once,
    /// Serve the register endpoint over HTTP
    Serve,
}

impl FromStr for RunMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "once" => Ok(RunMode::Once),
            "serve" | "server" => Ok(RunMode::Serve),
            other => Err(anyhow!("unknown REGISTER_MODE `{}`, expected `once` or `serve`", other)),
        }
    }
}

impl fmt::Debug for RpcConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RpcConfig")
            .field("cluster", &self.cluster)
            .field("payer_keypair", &"<redacted>")
            .finish()
    }
}

impl RpcConfig {
    /// Decode the payer keypair.
    pub fn payer(&self) -> Result<Keypair> {
        parse_keypair(&self.payer_keypair)
    }
}

impl InvocationConfig {
    /// Embedded user and recipient, both required for a one-shot submission.
    pub fn require(&self) -> Result<([u8; 32], &str)> {
        let embedded_user = self
            .embedded_user
            .ok_or_else(|| anyhow!("EMBEDDED_USER environment variable is required"))?;
        let recipient = self
            .recipient
            .as_deref()
            .ok_or_else(|| anyhow!("RECIPIENT environment variable is required"))?;
        Ok((embedded_user.to_bytes(), recipient))
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            rpc: RpcConfig {
                cluster: Cluster::from_str(
                    &env::var("RPC_URL").unwrap_or_else(|_| "testnet".to_string()),
                )
                .context("RPC_URL is not a cluster name or URL")?,
                payer_keypair: env::var("PAYER_KEYPAIR")
                    .map_err(|_| anyhow!("PAYER_KEYPAIR environment variable is required"))?,
            },

            programs: ProgramConfig {
                register_program: pubkey_var("REGISTER_PROGRAM_ID")?.unwrap_or(REGISTER_PROGRAM_ID),
                mailbox_program: pubkey_var("MAILBOX_PROGRAM_ID")?.unwrap_or(MAILBOX_PROGRAM_ID),
            },

            invocation: InvocationConfig {
                destination: env::var("DESTINATION_DOMAIN")
                    .unwrap_or_else(|_| "1".to_string())
                    .parse()
                    .context("DESTINATION_DOMAIN must be a u32 domain id")?,
                embedded_user: pubkey_var("EMBEDDED_USER")?,
                recipient: env::var("RECIPIENT").ok(),
            },

            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("PORT")
                    .unwrap_or_else(|_| "3000".to_string())
                    .parse()
                    .unwrap_or(3000),
            },

            mode: env::var("REGISTER_MODE")
                .unwrap_or_else(|_| "once".to_string())
                .parse()?,
        })
    }
}

fn pubkey_var(name: &str) -> Result<Option<Pubkey>> {
    match env::var(name) {
        Ok(value) => Pubkey::from_str(value.trim())
            .map(Some)
            .with_context(|| format!("{} is not a valid base58 pubkey", name)),
        Err(_) => Ok(None),
    }
}

/// Parse a keypair given as a JSON byte array, a keypair file path, or base58.
pub fn parse_keypair(value: &str) -> Result<Keypair> {
    let value = value.trim();
    if value.starts_with('[') {
        let bytes: Vec<u8> =
            serde_json::from_str(value).context("Failed to parse keypair byte array")?;
        return Keypair::try_from(&bytes[..]).context("Failed to create keypair from bytes");
    }
    if Path::new(value).is_file() {
        return read_keypair_file(value)
            .map_err(|e| anyhow!("Failed to read keypair file {}: {}", value, e));
    }
    let bytes = bs58::decode(value)
        .into_vec()
        .context("Failed to decode private key")?;
    Keypair::try_from(&bytes[..]).context("Failed to create keypair from bytes")
}
