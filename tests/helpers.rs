//! Shared test helpers for escrow client tests
//!
//! Builders for mocked JSON-RPC responses and on-chain account bytes.

#![allow(dead_code)]

use base64::{engine::general_purpose::STANDARD, Engine as _};
use borsh::BorshSerialize;
use escrow_client::offer::OfferAccount;
use serde_json::json;
use solana_sdk::pubkey::Pubkey;
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// SPL token account length; the balance sits at offset 64 (u64 LE).
pub const TOKEN_ACCOUNT_LEN: usize = 165;

/// Builds base64 account data for an offer record.
pub fn offer_account_base64(
    id: u64,
    maker: Pubkey,
    token_mint_a: Pubkey,
    token_mint_b: Pubkey,
    token_b_wanted_amount: u64,
) -> String {
    let account = OfferAccount {
        discriminator: [6u8; 8],
        id,
        maker,
        token_mint_a,
        token_mint_b,
        token_b_wanted_amount,
        bump: 254,
    };
    STANDARD.encode(account.try_to_vec().expect("borsh serialize offer"))
}

/// Builds base64 account data for an SPL token account holding `amount`.
pub fn token_account_base64(amount: u64) -> String {
    let mut data = vec![0u8; TOKEN_ACCOUNT_LEN];
    data[64..72].copy_from_slice(&amount.to_le_bytes());
    STANDARD.encode(data)
}

/// Mounts a getAccountInfo mock returning base64 data for one address.
pub async fn mount_account(server: &MockServer, address: &Pubkey, data_base64: &str) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "method": "getAccountInfo",
            "params": [address.to_string()]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "result": {
                "context": { "slot": 1 },
                "value": { "data": [data_base64, "base64"] }
            },
            "id": 1
        })))
        .mount(server)
        .await;
}

/// Mounts a getAccountInfo mock reporting the account as absent.
pub async fn mount_missing_account(server: &MockServer, address: &Pubkey) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "method": "getAccountInfo",
            "params": [address.to_string()]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "result": { "context": { "slot": 1 }, "value": null },
            "id": 1
        })))
        .mount(server)
        .await;
}

/// Mounts a getLatestBlockhash mock returning a fresh-looking blockhash.
pub async fn mount_blockhash(server: &MockServer, blockhash: &str) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "method": "getLatestBlockhash" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "result": {
                "context": { "slot": 1 },
                "value": { "blockhash": blockhash, "lastValidBlockHeight": 100 }
            },
            "id": 1
        })))
        .mount(server)
        .await;
}

/// Mounts a sendTransaction mock echoing the given signature string.
pub async fn mount_send_transaction(server: &MockServer, signature: &str) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "method": "sendTransaction" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "result": signature,
            "id": 1
        })))
        .mount(server)
        .await;
}

/// Mounts a getBalance mock returning a lamport balance for one address.
pub async fn mount_balance(server: &MockServer, address: &Pubkey, lamports: u64) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "method": "getBalance",
            "params": [address.to_string()]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "result": { "context": { "slot": 1 }, "value": lamports },
            "id": 1
        })))
        .mount(server)
        .await;
}

/// Mounts a getSignatureStatuses mock reporting a confirmed transaction.
pub async fn mount_confirmed_status(server: &MockServer) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "method": "getSignatureStatuses" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "result": {
                "context": { "slot": 5 },
                "value": [{
                    "slot": 5,
                    "confirmations": null,
                    "err": null,
                    "confirmationStatus": "confirmed",
                    "status": { "Ok": null }
                }]
            },
            "id": 1
        })))
        .mount(server)
        .await;
}
