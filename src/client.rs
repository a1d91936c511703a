//! Escrow client façade
//!
//! Combines address derivation, offer lookup, transfer construction, and
//! transaction submission behind the operations a caller sees: look up an
//! offer, send the native asset, send a token, take an offer (stubbed).
//! The network handle and signer are explicit capabilities; nothing here is
//! process-wide state.

use anyhow::{Context, Result};
use solana_sdk::{pubkey::Pubkey, signature::Signature};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::EscrowConfig;
use crate::error::{LookupError, TakeOfferError, TransferError};
use crate::offer::{self, OfferReader, OfferStatus};
use crate::pda;
use crate::rpc::RpcClient;
use crate::signer::TransactionSigner;
use crate::submit::TransactionSubmitter;
use crate::transfer::{self, TransferRequest, NATIVE_DECIMALS};

/// Client for the on-chain escrow program.
pub struct EscrowClient {
    rpc: RpcClient,
    program_id: Pubkey,
    fee_reserve: u64,
    confirm_timeout: Duration,
    poll_interval: Duration,
}

impl EscrowClient {
    /// Creates a new escrow client from configuration.
    pub fn new(config: &EscrowConfig) -> Result<Self> {
        let program_id = Pubkey::from_str(&config.program_id)
            .map_err(|_| anyhow::anyhow!("Invalid escrow program_id (expected base58 string)"))?;

        let rpc = RpcClient::new(&config.rpc_url).context("Failed to create RPC client")?;

        Ok(Self {
            rpc,
            program_id,
            fee_reserve: config.fee_reserve_lamports,
            confirm_timeout: Duration::from_millis(config.confirm_timeout_ms),
            poll_interval: Duration::from_millis(config.confirm_poll_interval_ms),
        })
    }

    /// The escrow program this client talks to.
    pub fn program_id(&self) -> Pubkey {
        self.program_id
    }

    /// Derives the offer PDA for a (maker, id) pair.
    pub fn offer_address(&self, maker: &Pubkey, offer_id: u64) -> (Pubkey, u8) {
        pda::derive_offer_address(maker, offer_id, &self.program_id)
    }

    /// Looks up an offer by maker address and offer id strings.
    ///
    /// Input parsing happens before any network I/O. `NotFound` and
    /// `AlreadySettled` come back as distinct [`OfferStatus`] variants so the
    /// caller can tell "no such offer" from "the offer is gone".
    pub async fn lookup_offer(&self, maker: &str, offer_id: &str) -> Result<OfferStatus, LookupError> {
        let maker = Pubkey::from_str(maker)
            .map_err(|_| LookupError::InvalidInput(format!("invalid maker address: {maker}")))?;
        let offer_id = u64::from_str(offer_id)
            .map_err(|_| LookupError::InvalidInput(format!("invalid offer id: {offer_id}")))?;

        let reader = OfferReader::new(&self.rpc, self.program_id);
        let status = reader.get_offer(&maker, offer_id).await?;

        match &status {
            OfferStatus::Live(view) => info!(
                %maker, offer_id, offer_address = %view.offer_address,
                amount_offered = view.token_a_offered_amount, "offer is live"
            ),
            OfferStatus::AlreadySettled(view) => info!(
                %maker, offer_id, offer_address = %view.offer_address, "offer already settled"
            ),
            OfferStatus::NotFound => info!(%maker, offer_id, "offer not found"),
        }

        Ok(status)
    }

    /// Returns whether the offer record exists for a (maker, id) pair.
    pub async fn offer_exists(&self, maker: &Pubkey, offer_id: u64) -> Result<bool, LookupError> {
        let reader = OfferReader::new(&self.rpc, self.program_id);
        Ok(reader.offer_exists(maker, offer_id).await?)
    }

    /// Sends the native asset to a recipient.
    ///
    /// Validates locally first, then fetches the sender's balance, builds a
    /// single transfer instruction, and submits it. The configured fee
    /// reserve stays behind so the sender can still pay fees.
    pub async fn send_native(
        &self,
        signer: &dyn TransactionSigner,
        recipient: &str,
        amount: f64,
    ) -> Result<Signature, TransferError> {
        // Local validation before any network I/O.
        let recipient = transfer::parse_recipient(recipient)?;
        transfer::to_base_units(amount, NATIVE_DECIMALS)?;

        let sender = signer.pubkey();
        let available_balance = self.rpc.get_balance(&sender).await?;

        let request = TransferRequest {
            sender,
            recipient,
            asset: None,
            amount,
            decimals: NATIVE_DECIMALS,
            available_balance,
        };
        let instructions = transfer::build_transfer(&request, true, self.fee_reserve)?;

        let signature = self.submitter().submit(&instructions, signer).await?;
        info!(%signature, %recipient, amount, "native transfer confirmed");
        Ok(signature)
    }

    /// Sends `amount` of the token `mint` to a recipient.
    ///
    /// If the recipient has no holding account for the mint yet, its creation
    /// is prepended to the transfer, funded by the sender.
    pub async fn send_token(
        &self,
        signer: &dyn TransactionSigner,
        mint: &str,
        recipient: &str,
        amount: f64,
        decimals: u8,
    ) -> Result<Signature, TransferError> {
        // Local validation before any network I/O.
        let mint = Pubkey::from_str(mint)
            .map_err(|_| TransferError::InvalidAsset(mint.to_string()))?;
        let recipient = transfer::parse_recipient(recipient)?;
        transfer::to_base_units(amount, decimals)?;

        let sender = signer.pubkey();
        let sender_holding = pda::associated_token_address(&sender, &mint)?;
        let recipient_holding = pda::associated_token_address(&recipient, &mint)?;

        // Sender holding account absent means a zero balance, which the
        // builder rejects as insufficient.
        let available_balance = match self.rpc.get_account_data(&sender_holding).await? {
            Some(data) => offer::parse_token_amount(&data)
                .map_err(|e| TransferError::SubmissionFailed(e.to_string()))?,
            None => 0,
        };

        let recipient_holding_exists = self.rpc.account_exists(&recipient_holding).await?;

        let request = TransferRequest {
            sender,
            recipient,
            asset: Some(mint),
            amount,
            decimals,
            available_balance,
        };
        let instructions =
            transfer::build_transfer(&request, recipient_holding_exists, self.fee_reserve)?;

        let signature = self.submitter().submit(&instructions, signer).await?;
        info!(
            %signature, %mint, %recipient, amount,
            created_holding = !recipient_holding_exists, "token transfer confirmed"
        );
        Ok(signature)
    }

    /// Takes an offer: swap the wanted amount into the vault and receive the
    /// collateral.
    ///
    /// Not implemented yet. Inputs are logged and a typed `NotSupported`
    /// error is returned so callers can surface it instead of failing
    /// silently.
    pub async fn take_offer(
        &self,
        maker: &Pubkey,
        offer_address: &Pubkey,
        token_mint_a: &Pubkey,
        token_mint_b: &Pubkey,
    ) -> Result<Signature, TakeOfferError> {
        warn!(
            %maker, %offer_address, %token_mint_a, %token_mint_b,
            "take_offer requested but not supported yet"
        );
        Err(TakeOfferError::NotSupported)
    }

    fn submitter(&self) -> TransactionSubmitter<'_> {
        TransactionSubmitter::new(&self.rpc, self.confirm_timeout, self.poll_interval)
    }
}
