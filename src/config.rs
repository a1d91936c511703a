//! Configuration
//!
//! TOML configuration for the escrow client: the RPC endpoint, the escrow
//! program id, and submission tunables. Loaded from
//! `config/escrow-client.toml` by default, overridable via the
//! `ESCROW_CONFIG_PATH` env var or an explicit path.

use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

/// Escrow client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EscrowConfig {
    /// RPC endpoint URL of the Solana node
    pub rpc_url: String,
    /// Program id of the escrow program (base58)
    pub program_id: String,
    /// Lamports withheld from native transfers to keep fees payable
    #[serde(default = "default_fee_reserve_lamports")]
    pub fee_reserve_lamports: u64,
    /// How long to wait for transaction confirmation in milliseconds
    #[serde(default = "default_confirm_timeout_ms")]
    pub confirm_timeout_ms: u64,
    /// Interval between confirmation status polls in milliseconds
    #[serde(default = "default_confirm_poll_interval_ms")]
    pub confirm_poll_interval_ms: u64,
    /// Env var name that stores the signer private key (base58)
    #[serde(default = "default_signer_key_env")]
    pub signer_key_env: String,
}

fn default_fee_reserve_lamports() -> u64 {
    crate::transfer::FEE_RESERVE_LAMPORTS
}

fn default_confirm_timeout_ms() -> u64 {
    30_000
}

fn default_confirm_poll_interval_ms() -> u64 {
    500
}

fn default_signer_key_env() -> String {
    "ESCROW_SIGNER_KEY".to_string()
}

impl EscrowConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Optional path to config file. If None, uses
    ///   ESCROW_CONFIG_PATH env var or the default path.
    ///
    /// # Returns
    ///
    /// * `Ok(EscrowConfig)` - Loaded and validated configuration
    /// * `Err(anyhow::Error)` - File missing, unparsable, or invalid
    pub fn load_from_path(path: Option<&str>) -> anyhow::Result<Self> {
        let config_path = path
            .map(|p| p.to_string())
            .or_else(|| std::env::var("ESCROW_CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/escrow-client.toml".to_string());

        if std::path::Path::new(&config_path).exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: EscrowConfig = toml::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Err(anyhow::anyhow!(
                "Configuration file '{}' not found. Please copy the template:\n\
                cp config/escrow-client.template.toml config/escrow-client.toml\n\
                Then edit config/escrow-client.toml with your actual values.",
                config_path
            ))
        }
    }

    /// Loads configuration from the default path.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from_path(None)
    }

    /// Validates the configuration for consistency and correctness.
    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.rpc_url.starts_with("http://") && !self.rpc_url.starts_with("https://") {
            return Err(anyhow::anyhow!(
                "Configuration error: rpc_url must be an http(s) URL, got '{}'",
                self.rpc_url
            ));
        }

        Pubkey::from_str(&self.program_id).map_err(|_| {
            anyhow::anyhow!(
                "Configuration error: program_id '{}' is not a valid base58 pubkey",
                self.program_id
            )
        })?;

        if self.confirm_timeout_ms == 0 {
            return Err(anyhow::anyhow!(
                "Configuration error: confirm_timeout_ms must be positive"
            ));
        }

        if self.confirm_poll_interval_ms == 0 {
            return Err(anyhow::anyhow!(
                "Configuration error: confirm_poll_interval_ms must be positive"
            ));
        }

        Ok(())
    }
}
