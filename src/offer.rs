//! Offer account layout and lookup
//!
//! Reads an offer record and its vault from the network and reconciles them
//! into one consistent view. The amount offered is always the live vault
//! balance, never a stored field: the protocol drains the vault when an offer
//! is taken, so a present record with an empty (or missing) vault means the
//! offer is already settled.

use borsh::{BorshDeserialize, BorshSerialize};
use solana_sdk::pubkey::Pubkey;
use tracing::debug;

use crate::error::RpcError;
use crate::pda;
use crate::rpc::RpcClient;

/// SPL token account layout: mint(32) + owner(32) + amount(8) + rest.
const TOKEN_ACCOUNT_LEN: usize = 165;
const TOKEN_AMOUNT_OFFSET: usize = 64;

// ============================================================================
// ACCOUNT STRUCTURES
// ============================================================================

/// On-chain offer record (Anchor account, 8-byte discriminator first).
#[derive(BorshDeserialize, BorshSerialize, Debug, Clone)]
pub struct OfferAccount {
    pub discriminator: [u8; 8],
    /// Offer id chosen by the maker; unique per maker, not globally.
    pub id: u64,
    pub maker: Pubkey,
    /// Mint of the asset the maker deposited (collateral in the vault).
    pub token_mint_a: Pubkey,
    /// Mint of the asset the maker wants in exchange.
    pub token_mint_b: Pubkey,
    pub token_b_wanted_amount: u64,
    pub bump: u8,
}

/// Reconciled view of an offer: the on-chain record plus the derived
/// addresses and the live vault balance.
#[derive(Debug, Clone)]
pub struct OfferView {
    pub id: u64,
    pub maker: Pubkey,
    pub token_mint_a: Pubkey,
    pub token_mint_b: Pubkey,
    pub token_b_wanted_amount: u64,
    /// Current vault balance in base units. Zero means settled.
    pub token_a_offered_amount: u64,
    pub offer_address: Pubkey,
    pub vault: Pubkey,
}

/// Outcome of an offer lookup. Settled and absent offers are distinct
/// outcomes, not errors: the caller-facing remediation differs.
#[derive(Debug, Clone)]
pub enum OfferStatus {
    /// Record exists and the vault still holds collateral.
    Live(OfferView),
    /// Record exists but the vault is drained: the offer was taken.
    AlreadySettled(OfferView),
    /// No record on-chain for this (maker, id).
    NotFound,
}

// ============================================================================
// READER
// ============================================================================

/// Reads and reconciles offer state from the network.
pub struct OfferReader<'a> {
    rpc: &'a RpcClient,
    program_id: Pubkey,
}

impl<'a> OfferReader<'a> {
    pub fn new(rpc: &'a RpcClient, program_id: Pubkey) -> Self {
        Self { rpc, program_id }
    }

    /// Fetches the offer record and vault for a (maker, id) pair.
    ///
    /// A missing vault account is treated as a zero balance, not an error:
    /// the vault is closed when the offer is taken.
    pub async fn get_offer(&self, maker: &Pubkey, offer_id: u64) -> Result<OfferStatus, RpcError> {
        let (offer_address, _bump) = pda::derive_offer_address(maker, offer_id, &self.program_id);

        let Some(data) = self.rpc.get_account_data(&offer_address).await? else {
            debug!(%offer_address, offer_id, "offer record not found");
            return Ok(OfferStatus::NotFound);
        };

        let account = OfferAccount::try_from_slice(&data)
            .map_err(|e| RpcError::Malformed(format!("invalid offer account data: {e}")))?;

        let vault = pda::associated_token_address(&offer_address, &account.token_mint_a)
            .map_err(|e| RpcError::Malformed(e.to_string()))?;

        let token_a_offered_amount = match self.rpc.get_account_data(&vault).await? {
            Some(vault_data) => parse_token_amount(&vault_data)?,
            // Vault closed: offer was taken.
            None => 0,
        };

        let view = OfferView {
            id: account.id,
            maker: account.maker,
            token_mint_a: account.token_mint_a,
            token_mint_b: account.token_mint_b,
            token_b_wanted_amount: account.token_b_wanted_amount,
            token_a_offered_amount,
            offer_address,
            vault,
        };

        if token_a_offered_amount > 0 {
            Ok(OfferStatus::Live(view))
        } else {
            Ok(OfferStatus::AlreadySettled(view))
        }
    }

    /// Returns whether the offer record exists on-chain. Presence alone does
    /// not mean the offer is still live; use [`get_offer`](Self::get_offer)
    /// for that.
    pub async fn offer_exists(&self, maker: &Pubkey, offer_id: u64) -> Result<bool, RpcError> {
        let (offer_address, _bump) = pda::derive_offer_address(maker, offer_id, &self.program_id);
        self.rpc.account_exists(&offer_address).await
    }
}

/// Extracts the balance from raw SPL token account bytes.
pub fn parse_token_amount(data: &[u8]) -> Result<u64, RpcError> {
    if data.len() < TOKEN_ACCOUNT_LEN {
        return Err(RpcError::Malformed(format!(
            "token account too short: {} bytes",
            data.len()
        )));
    }
    let bytes: [u8; 8] = data[TOKEN_AMOUNT_OFFSET..TOKEN_AMOUNT_OFFSET + 8]
        .try_into()
        .map_err(|_| RpcError::Malformed("token amount bytes".to_string()))?;
    Ok(u64::from_le_bytes(bytes))
}
