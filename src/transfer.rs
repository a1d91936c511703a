//! Transfer construction
//!
//! Pure validation and instruction assembly for native and token transfers.
//! Nothing in this module touches the network or signs anything: whether the
//! recipient's holding account exists is an input flag, so the conditional
//! creation-instruction insertion can be tested as a pure function.

use solana_sdk::{instruction::Instruction, pubkey::Pubkey, system_instruction};
use std::str::FromStr;

use crate::error::{AddressError, TransferError};
use crate::pda;

/// Decimals of the native asset (lamports per SOL = 10^9).
pub const NATIVE_DECIMALS: u8 = 9;

/// Lamports withheld from a native transfer so the sender can still pay
/// the transaction fee (0.001 SOL).
pub const FEE_RESERVE_LAMPORTS: u64 = 1_000_000;

/// One value transfer, constructed per call and consumed into a transaction.
#[derive(Debug, Clone)]
pub struct TransferRequest {
    pub sender: Pubkey,
    pub recipient: Pubkey,
    /// Mint of the asset to move; `None` means the native asset.
    pub asset: Option<Pubkey>,
    /// Amount in display units (e.g. 1.5 SOL, 0.25 tokens).
    pub amount: f64,
    pub decimals: u8,
    /// Sender's balance of the asset, in base units.
    pub available_balance: u64,
}

/// Parses a recipient address string.
pub fn parse_recipient(address: &str) -> Result<Pubkey, TransferError> {
    Pubkey::from_str(address).map_err(|_| TransferError::InvalidRecipient(address.to_string()))
}

/// Converts a display amount into base units, rounding down.
///
/// The result never exceeds `amount * 10^decimals`: rounding down guards
/// against over-sending at the wire boundary, where amounts are integers.
pub fn to_base_units(amount: f64, decimals: u8) -> Result<u64, TransferError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(TransferError::InvalidAmount(amount));
    }
    let scaled = (amount * 10f64.powi(decimals as i32)).floor();
    if scaled < 1.0 || scaled > u64::MAX as f64 {
        return Err(TransferError::InvalidAmount(amount));
    }
    Ok(scaled as u64)
}

/// Builds the ordered instruction sequence for a transfer.
///
/// Native: a single system transfer, after checking the sender retains
/// `fee_reserve` lamports on top of the amount. Token: an SPL transfer
/// between the derived holding accounts, prepending the recipient
/// holding-account creation (funded by the sender) iff
/// `recipient_holding_exists` is false. Creation is always ordered before
/// the transfer.
pub fn build_transfer(
    request: &TransferRequest,
    recipient_holding_exists: bool,
    fee_reserve: u64,
) -> Result<Vec<Instruction>, TransferError> {
    match request.asset {
        None => build_native_transfer(request, fee_reserve),
        Some(mint) => build_token_transfer(request, &mint, recipient_holding_exists),
    }
}

fn build_native_transfer(
    request: &TransferRequest,
    fee_reserve: u64,
) -> Result<Vec<Instruction>, TransferError> {
    let lamports = to_base_units(request.amount, request.decimals)?;
    let required = lamports
        .checked_add(fee_reserve)
        .ok_or(TransferError::InvalidAmount(request.amount))?;
    if required > request.available_balance {
        return Err(TransferError::InsufficientBalance {
            required,
            available: request.available_balance,
        });
    }

    Ok(vec![system_instruction::transfer(
        &request.sender,
        &request.recipient,
        lamports,
    )])
}

fn build_token_transfer(
    request: &TransferRequest,
    mint: &Pubkey,
    recipient_holding_exists: bool,
) -> Result<Vec<Instruction>, TransferError> {
    let base_units = to_base_units(request.amount, request.decimals)?;
    if base_units > request.available_balance {
        return Err(TransferError::InsufficientBalance {
            required: base_units,
            available: request.available_balance,
        });
    }

    let sender_holding = pda::associated_token_address(&request.sender, mint)?;
    let recipient_holding = pda::associated_token_address(&request.recipient, mint)?;

    let mut instructions = Vec::with_capacity(2);
    if !recipient_holding_exists {
        instructions.push(pda::create_associated_token_account_instruction(
            &request.sender,
            &request.recipient,
            mint,
        )?);
    }

    let transfer_ix = spl_token::instruction::transfer(
        &spl_token::id(),
        &sender_holding,
        &recipient_holding,
        &request.sender,
        &[],
        base_units,
    )
    .map_err(|e| AddressError(format!("token transfer instruction: {e}")))?;
    instructions.push(transfer_ix);

    Ok(instructions)
}
