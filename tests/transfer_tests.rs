//! Unit tests for transfer validation and construction
//!
//! All pure: no mock server. The conditional creation-instruction insertion
//! is exercised as a function of the existence flag alone.

use escrow_client::error::TransferError;
use escrow_client::transfer::{
    self, TransferRequest, FEE_RESERVE_LAMPORTS, NATIVE_DECIMALS,
};
use escrow_client::pda;
use solana_sdk::{pubkey::Pubkey, system_program};

const SOL: u64 = 1_000_000_000;

fn native_request(amount: f64, available_balance: u64) -> TransferRequest {
    TransferRequest {
        sender: Pubkey::new_unique(),
        recipient: Pubkey::new_unique(),
        asset: None,
        amount,
        decimals: NATIVE_DECIMALS,
        available_balance,
    }
}

fn token_request(amount: f64, decimals: u8, available_balance: u64) -> TransferRequest {
    TransferRequest {
        sender: Pubkey::new_unique(),
        recipient: Pubkey::new_unique(),
        asset: Some(Pubkey::new_unique()),
        amount,
        decimals,
        available_balance,
    }
}

// ============================================================================
// AMOUNT SCALING
// ============================================================================

/// What is tested: round-down scaling never exceeds the original amount
/// Why: over-sending due to rounding at the wire boundary must be impossible
#[test]
fn test_scaling_never_over_sends() {
    let samples: &[(f64, u8)] = &[
        (0.1, 9),
        (1.5, 9),
        (0.000123, 6),
        (123.456789, 6),
        (0.333333333, 9),
        (42.0, 0),
        (7.999999, 2),
    ];

    for &(amount, decimals) in samples {
        let base = transfer::to_base_units(amount, decimals).expect("scale amount");
        let scale = 10f64.powi(decimals as i32);
        assert!(
            (base as f64) <= amount * scale,
            "{base} base units exceed {amount} at {decimals} decimals"
        );
    }
}

/// What is tested: non-positive, non-finite, and dust amounts are rejected
/// Why: amounts must be positive finite numbers that survive integer scaling
#[test]
fn test_invalid_amounts_rejected() {
    for amount in [0.0, -1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        assert!(matches!(
            transfer::to_base_units(amount, 9),
            Err(TransferError::InvalidAmount(_))
        ));
    }
    // Rounds down to zero base units.
    assert!(matches!(
        transfer::to_base_units(0.4, 0),
        Err(TransferError::InvalidAmount(_))
    ));
}

/// What is tested: recipient strings must parse as account identifiers
/// Why: InvalidRecipient is a local check before any network I/O
#[test]
fn test_invalid_recipient_rejected() {
    assert!(matches!(
        transfer::parse_recipient("not-a-pubkey"),
        Err(TransferError::InvalidRecipient(_))
    ));
    assert!(transfer::parse_recipient(&Pubkey::new_unique().to_string()).is_ok());
}

// ============================================================================
// NATIVE TRANSFERS
// ============================================================================

/// What is tested: spending the full balance leaves no fee reserve and fails
/// Why: the sender must always retain enough to pay the transaction fee
#[test]
fn test_native_reserve_enforced() {
    let request = native_request(5.0, 5 * SOL);
    let result = transfer::build_transfer(&request, true, FEE_RESERVE_LAMPORTS);
    assert!(matches!(
        result,
        Err(TransferError::InsufficientBalance { .. })
    ));
}

/// What is tested: amount == balance - reserve builds a single instruction
/// Why: the reserve boundary itself must still be spendable
#[test]
fn test_native_at_reserve_boundary() {
    let request = native_request(4.999, 5 * SOL);
    let instructions =
        transfer::build_transfer(&request, true, FEE_RESERVE_LAMPORTS).expect("build transfer");

    assert_eq!(instructions.len(), 1);
    assert_eq!(instructions[0].program_id, system_program::id());
    // Sender signs, recipient receives.
    assert_eq!(instructions[0].accounts[0].pubkey, request.sender);
    assert!(instructions[0].accounts[0].is_signer);
    assert_eq!(instructions[0].accounts[1].pubkey, request.recipient);
}

// ============================================================================
// TOKEN TRANSFERS
// ============================================================================

/// What is tested: existing recipient holding account yields one instruction
/// Why: unconditionally creating the account would waste fees
#[test]
fn test_token_transfer_existing_holding() {
    let request = token_request(1.0, 6, 10_000_000);
    let instructions = transfer::build_transfer(&request, true, FEE_RESERVE_LAMPORTS)
        .expect("build transfer");

    assert_eq!(instructions.len(), 1);
    assert_eq!(instructions[0].program_id, spl_token::id());
}

/// What is tested: missing recipient holding account prepends its creation
/// Why: omitting the creation makes the transfer fail on-chain; order matters
#[test]
fn test_token_transfer_missing_holding() {
    let request = token_request(1.0, 6, 10_000_000);
    let instructions = transfer::build_transfer(&request, false, FEE_RESERVE_LAMPORTS)
        .expect("build transfer");

    assert_eq!(instructions.len(), 2);
    // Creation strictly before the transfer, funded by the sender.
    assert_eq!(
        instructions[0].program_id,
        pda::associated_token_program_id().expect("ata program id")
    );
    assert_eq!(instructions[0].accounts[0].pubkey, request.sender);
    assert_eq!(instructions[1].program_id, spl_token::id());
}

/// What is tested: token amounts above the supplied balance are rejected
/// Why: the balance pre-check is local and uses caller-supplied base units
#[test]
fn test_token_insufficient_balance() {
    let request = token_request(2.0, 6, 1_000_000);
    let result = transfer::build_transfer(&request, true, FEE_RESERVE_LAMPORTS);
    assert!(matches!(
        result,
        Err(TransferError::InsufficientBalance {
            required: 2_000_000,
            available: 1_000_000
        })
    ));
}

/// What is tested: token path routes between the derived holding accounts
/// Why: transfers move between ATAs, never the wallet addresses themselves
#[test]
fn test_token_transfer_uses_holding_accounts() {
    let request = token_request(1.0, 6, 10_000_000);
    let mint = request.asset.expect("token request has a mint");
    let instructions =
        transfer::build_transfer(&request, true, FEE_RESERVE_LAMPORTS).expect("build transfer");

    let sender_holding = pda::associated_token_address(&request.sender, &mint).expect("ata");
    let recipient_holding = pda::associated_token_address(&request.recipient, &mint).expect("ata");

    let transfer_ix = &instructions[0];
    assert_eq!(transfer_ix.accounts[0].pubkey, sender_holding);
    assert_eq!(transfer_ix.accounts[1].pubkey, recipient_holding);
    // The wallet owner authorizes as signer.
    assert_eq!(transfer_ix.accounts[2].pubkey, request.sender);
    assert!(transfer_ix.accounts[2].is_signer);
}
