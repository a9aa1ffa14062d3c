//! # Register Relay
//!
//! Client for the Hyperlane Register program on Solana. It builds a
//! `SendRegister` instruction, submits it alongside a fresh unique message
//! account, and reads the dispatched message id back from the transaction
//! logs.
//!
//! ## Architecture
//! - `config`: Environment variable configuration
//! - `error`: Submission pipeline errors
//! - `onchain_instance`: PDA derivation, instruction encoding and submission
//! - `server`/`routes`: Optional HTTP surface over the same submission
//!
//! ## Environment Setup
//! ```bash
//! export PAYER_KEYPAIR=~/.config/solana/id.json
//! export RPC_URL=testnet
//! export EMBEDDED_USER=11111111111111111111111111111113
//! export RECIPIENT=0xddab628a0e1371ed348dc24e9d10869a79c7df797859e7f269a3bbcb4fec98ca
//! cargo run
//! ```
//!
//! Set `REGISTER_MODE=serve` to expose `POST /api/v1/register` instead of
//! submitting once and exiting.

mod config;
mod error;
mod onchain_instance;
mod routes;
mod server;

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, RunMode};
use crate::onchain_instance::instance::RegisterProgramInstance;
use crate::server::AppState;

/// Application entry point.
///
/// Loads `.env`, initializes tracing, reads configuration and then either
/// submits a single register transaction or serves the HTTP API.
///
/// # Logging Configuration
/// - Compact console output without module targets
/// - Level filter taken from `RUST_LOG`, defaulting to `info`
///
/// # Run Modes
/// - `REGISTER_MODE=once` (default): submit using `DESTINATION_DOMAIN`,
///   `EMBEDDED_USER` and `RECIPIENT`, print the outcome as JSON, exit
/// - `REGISTER_MODE=serve`: bind `SERVER_HOST:PORT` and run until terminated
///
/// # Error Handling
/// Configuration errors (missing `PAYER_KEYPAIR`, bad pubkeys, unknown mode)
/// end the process with an error. A failed submission does not: it is
/// printed as `{"success": false, "error": ...}` and the process exits
/// normally.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Optional .env file, real environment wins
    dotenv::dotenv().ok();

    // Initialize the tracing subscriber for structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .compact(),
        )
        .init();

    tracing::info!("🏁 Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    // Load configuration from environment variables
    let config = Config::from_env()?;
    tracing::info!("🌐 Cluster: {}", config.rpc.cluster.url());
    tracing::info!("Register program: {}", config.programs.register_program);
    tracing::info!("Mailbox program: {}", config.programs.mailbox_program);
    tracing::info!(
        "SendRegister schema v{}",
        onchain_instance::instruction::REGISTER_SCHEMA_VERSION
    );

    // Connect to the cluster and decode the payer
    let instance = RegisterProgramInstance::from_config(&config)?;
    tracing::info!("Payer: {}", instance.payer_pubkey());

    match config.mode {
        RunMode::Once => {
            let (embedded_user, recipient) = config.invocation.require()?;
            let outcome = instance
                .submit(config.invocation.destination, embedded_user, recipient)
                .await;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        RunMode::Serve => {
            let state = AppState {
                register: Arc::new(instance),
                default_destination: config.invocation.destination,
            };
            server::start(&config.server, state).await?;
        }
    }

    Ok(())
}
