//! Deterministic address derivation
//!
//! Pure functions computing the program-derived addresses the escrow protocol
//! depends on: the offer PDA and associated token (holding) accounts. The
//! offer seed scheme - the literal `"offer"`, the maker key, and the 8-byte
//! little-endian offer id, in that order - is a wire-format contract shared
//! with existing on-chain state and must not change.

use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_program, sysvar,
};
use std::str::FromStr;

use crate::error::AddressError;

/// Seed prefix for offer PDAs.
pub const OFFER_SEED: &[u8] = b"offer";

// Well-known program ID from Solana mainnet/devnet docs.
pub const ASSOCIATED_TOKEN_PROGRAM_ID: &str = "ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL";

/// Derives the offer PDA for a (maker, offer id) pair.
///
/// Deterministic over its inputs: the same maker, id, and program id always
/// yield the same address and bump.
pub fn derive_offer_address(maker: &Pubkey, offer_id: u64, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[OFFER_SEED, maker.as_ref(), &offer_id.to_le_bytes()],
        program_id,
    )
}

/// Returns the associated token program id as a Pubkey.
pub fn associated_token_program_id() -> Result<Pubkey, AddressError> {
    Pubkey::from_str(ASSOCIATED_TOKEN_PROGRAM_ID)
        .map_err(|_| AddressError("invalid associated token program id constant".to_string()))
}

/// Derives the associated token account (the canonical holding account) for
/// an owner and mint.
///
/// Used both for offer vaults (owner = offer PDA) and wallet transfers
/// (owner = sender/recipient). Pure derivation, no network access.
pub fn associated_token_address(owner: &Pubkey, mint: &Pubkey) -> Result<Pubkey, AddressError> {
    let program_id = associated_token_program_id()?;
    Ok(associated_token_address_with_program_id(owner, mint, &program_id))
}

/// Derives the ATA address using an explicit associated token program id.
pub fn associated_token_address_with_program_id(
    owner: &Pubkey,
    mint: &Pubkey,
    program_id: &Pubkey,
) -> Pubkey {
    Pubkey::find_program_address(
        &[owner.as_ref(), spl_token::id().as_ref(), mint.as_ref()],
        program_id,
    )
    .0
}

/// Builds the instruction creating the associated token account for `owner`
/// and `mint`, funded by `payer`.
pub fn create_associated_token_account_instruction(
    payer: &Pubkey,
    owner: &Pubkey,
    mint: &Pubkey,
) -> Result<Instruction, AddressError> {
    let program_id = associated_token_program_id()?;
    let ata = associated_token_address_with_program_id(owner, mint, &program_id);

    Ok(Instruction {
        program_id,
        accounts: vec![
            AccountMeta::new(*payer, true),
            AccountMeta::new(ata, false),
            AccountMeta::new_readonly(*owner, false),
            AccountMeta::new_readonly(*mint, false),
            AccountMeta::new_readonly(system_program::id(), false),
            AccountMeta::new_readonly(spl_token::id(), false),
            AccountMeta::new_readonly(sysvar::rent::id(), false),
        ],
        data: vec![],
    })
}
