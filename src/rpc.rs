//! Solana JSON-RPC network capability
//!
//! This module provides the single network handle the rest of the crate
//! reads and submits through: account fetches (base64), lamport balances,
//! blockhash retrieval, raw transaction submission, and signature status
//! polling. Each call is one request with no internal retry; the handle is
//! safe to share across concurrent calls.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use solana_sdk::{hash::Hash, pubkey::Pubkey, signature::Signature, transaction::Transaction};
use std::str::FromStr;
use std::time::Duration;

use crate::error::RpcError;

// ============================================================================
// JSON-RPC TYPES
// ============================================================================

#[derive(Debug, Serialize)]
struct JsonRpcRequest {
    jsonrpc: String,
    method: String,
    params: serde_json::Value,
    id: u64,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse<T> {
    result: Option<T>,
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct RpcAccount {
    data: (String, String),
}

#[derive(Debug, Deserialize)]
struct AccountInfoResult {
    value: Option<RpcAccount>,
}

#[derive(Debug, Deserialize)]
struct BalanceResult {
    value: u64,
}

#[derive(Debug, Deserialize)]
struct BlockhashValue {
    blockhash: String,
}

#[derive(Debug, Deserialize)]
struct BlockhashResult {
    value: BlockhashValue,
}

#[derive(Debug, Deserialize)]
struct SignatureStatusesResult {
    value: Vec<Option<TransactionStatus>>,
}

/// Status of a submitted transaction as reported by the node.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionStatus {
    /// Durability level reached ("processed", "confirmed", "finalized").
    pub confirmation_status: Option<String>,
    /// On-chain execution error, if the transaction failed.
    pub err: Option<serde_json::Value>,
}

// ============================================================================
// CLIENT
// ============================================================================

/// Handle to a Solana JSON-RPC node.
pub struct RpcClient {
    client: Client,
    rpc_url: String,
}

impl RpcClient {
    /// Creates a new RPC handle for the given node URL.
    pub fn new(rpc_url: &str) -> Result<Self, RpcError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .no_proxy()
            .build()?;

        Ok(Self {
            client,
            rpc_url: rpc_url.to_string(),
        })
    }

    /// Issues one JSON-RPC call and returns the parsed `result` field.
    async fn call<T: for<'de> Deserialize<'de>>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<Option<T>, RpcError> {
        let request = JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
            id: 1,
        };

        let response: JsonRpcResponse<T> = self
            .client
            .post(&self.rpc_url)
            .json(&request)
            .send()
            .await?
            .json()
            .await?;

        if let Some(error) = response.error {
            return Err(RpcError::Node(format!("{method}: {}", error.message)));
        }

        Ok(response.result)
    }

    /// Reads raw account data (base64-decoded) for any account.
    /// Returns `None` if the account does not exist.
    pub async fn get_account_data(&self, pubkey: &Pubkey) -> Result<Option<Vec<u8>>, RpcError> {
        let params = serde_json::json!([
            pubkey.to_string(),
            { "encoding": "base64" }
        ]);

        let result: AccountInfoResult = self
            .call("getAccountInfo", params)
            .await?
            .ok_or_else(|| RpcError::Malformed("getAccountInfo returned no result".to_string()))?;

        let Some(account) = result.value else {
            return Ok(None);
        };

        let data = STANDARD
            .decode(&account.data.0)
            .map_err(|e| RpcError::Malformed(format!("invalid base64 account data: {e}")))?;
        Ok(Some(data))
    }

    /// Returns whether an account exists on-chain.
    pub async fn account_exists(&self, pubkey: &Pubkey) -> Result<bool, RpcError> {
        Ok(self.get_account_data(pubkey).await?.is_some())
    }

    /// Returns the lamport balance of an account (0 if absent).
    pub async fn get_balance(&self, pubkey: &Pubkey) -> Result<u64, RpcError> {
        let params = serde_json::json!([pubkey.to_string()]);

        let result: BalanceResult = self
            .call("getBalance", params)
            .await?
            .ok_or_else(|| RpcError::Malformed("getBalance returned no result".to_string()))?;

        Ok(result.value)
    }

    /// Fetches the latest blockhash (the freshness token every transaction
    /// must carry). Never cache this across submission attempts.
    pub async fn get_latest_blockhash(&self) -> Result<Hash, RpcError> {
        let params = serde_json::json!([{ "commitment": "confirmed" }]);

        let result: BlockhashResult = self
            .call("getLatestBlockhash", params)
            .await?
            .ok_or_else(|| {
                RpcError::Malformed("getLatestBlockhash returned no result".to_string())
            })?;

        Hash::from_str(&result.value.blockhash)
            .map_err(|e| RpcError::Malformed(format!("invalid blockhash: {e}")))
    }

    /// Submits a signed transaction and returns its signature.
    pub async fn send_transaction(&self, transaction: &Transaction) -> Result<Signature, RpcError> {
        let bytes = bincode::serialize(transaction)
            .map_err(|e| RpcError::Malformed(format!("transaction serialization failed: {e}")))?;
        let encoded = STANDARD.encode(bytes);

        let params = serde_json::json!([
            encoded,
            { "encoding": "base64", "preflightCommitment": "confirmed" }
        ]);

        let result: String = self
            .call("sendTransaction", params)
            .await?
            .ok_or_else(|| RpcError::Malformed("sendTransaction returned no result".to_string()))?;

        Signature::from_str(&result)
            .map_err(|e| RpcError::Malformed(format!("invalid transaction signature: {e}")))
    }

    /// Polls the status of one submitted transaction.
    /// Returns `None` while the node has not observed the signature.
    pub async fn get_signature_status(
        &self,
        signature: &Signature,
    ) -> Result<Option<TransactionStatus>, RpcError> {
        let params = serde_json::json!([
            [signature.to_string()],
            { "searchTransactionHistory": false }
        ]);

        let result: SignatureStatusesResult =
            self.call("getSignatureStatuses", params).await?.ok_or_else(|| {
                RpcError::Malformed("getSignatureStatuses returned no result".to_string())
            })?;

        Ok(result.value.into_iter().next().flatten())
    }
}
