//! Transaction submission
//!
//! Assembles instructions into a signed transaction, submits it, and waits
//! for confirmation. One logical attempt per call: a fresh blockhash is
//! fetched every time and never reused, and there is no internal retry.

use solana_sdk::{instruction::Instruction, signature::Signature, transaction::Transaction};
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{debug, info};

use crate::error::SubmitError;
use crate::rpc::RpcClient;
use crate::signer::TransactionSigner;

/// Durability levels accepted as confirmation.
const CONFIRMED_LEVELS: [&str; 2] = ["confirmed", "finalized"];

/// Submits signed transactions and waits for finality.
pub struct TransactionSubmitter<'a> {
    rpc: &'a RpcClient,
    confirm_timeout: Duration,
    poll_interval: Duration,
}

impl<'a> TransactionSubmitter<'a> {
    pub fn new(rpc: &'a RpcClient, confirm_timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            rpc,
            confirm_timeout,
            poll_interval,
        }
    }

    /// Signs, submits, and confirms one transaction.
    ///
    /// The signer is also the fee payer. Signing refusal, node rejection,
    /// and confirmation timeout are distinct failure kinds. There is no
    /// idempotency key: after a `ConfirmationTimeout` the transaction may
    /// still land, so callers must re-query the returned signature's status
    /// before retrying, never blind-resubmit.
    pub async fn submit(
        &self,
        instructions: &[Instruction],
        signer: &dyn TransactionSigner,
    ) -> Result<Signature, SubmitError> {
        let fee_payer = signer.pubkey();
        let recent_blockhash = self.rpc.get_latest_blockhash().await?;

        let mut transaction = Transaction::new_with_payer(instructions, Some(&fee_payer));
        signer
            .sign_transaction(&mut transaction, recent_blockhash)
            .map_err(|rejection| SubmitError::SigningRejected(rejection.to_string()))?;

        let signature = self
            .rpc
            .send_transaction(&transaction)
            .await
            .map_err(|e| SubmitError::SubmissionFailed(e.to_string()))?;
        info!(%signature, %fee_payer, "transaction submitted, awaiting confirmation");

        self.wait_for_confirmation(&signature).await?;
        Ok(signature)
    }

    /// Polls the signature status until it reaches a confirmed level or the
    /// deadline passes. The deadline is finite; abandoning the wait leaves
    /// the transaction's final status unknown, not cancelled.
    async fn wait_for_confirmation(&self, signature: &Signature) -> Result<(), SubmitError> {
        let deadline = Instant::now() + self.confirm_timeout;

        loop {
            if let Some(status) = self.rpc.get_signature_status(signature).await? {
                if let Some(err) = status.err {
                    return Err(SubmitError::SubmissionFailed(format!(
                        "transaction {signature} failed on-chain: {err}"
                    )));
                }
                if let Some(level) = status.confirmation_status.as_deref() {
                    if CONFIRMED_LEVELS.contains(&level) {
                        debug!(%signature, level, "transaction confirmed");
                        return Ok(());
                    }
                }
            }

            if Instant::now() >= deadline {
                return Err(SubmitError::ConfirmationTimeout(*signature));
            }
            sleep(self.poll_interval).await;
        }
    }
}
