//! Transaction signer capability
//!
//! Signing is a capability passed into the submitter, never ambient state: a
//! wallet-backed signer can decline, and that refusal must reach the caller
//! as a typed outcome rather than a panic or a silent failure.

use anyhow::{Context, Result};
use solana_sdk::{
    hash::Hash,
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    transaction::Transaction,
};

use crate::error::SigningRejection;

/// Capability to sign a transaction on behalf of the fee payer.
pub trait TransactionSigner: Send + Sync {
    /// The public key the signer signs for (also used as fee payer).
    fn pubkey(&self) -> Pubkey;

    /// Signs the transaction in place with the given recent blockhash.
    /// A signer may decline; the rejection reason is surfaced to the caller.
    fn sign_transaction(
        &self,
        transaction: &mut Transaction,
        recent_blockhash: Hash,
    ) -> Result<(), SigningRejection>;
}

/// Signer backed by a locally held keypair.
pub struct KeypairSigner {
    keypair: Keypair,
}

impl KeypairSigner {
    pub fn new(keypair: Keypair) -> Self {
        Self { keypair }
    }

    /// Loads the keypair from an env var holding the base58-encoded 64-byte
    /// private key (seed + public key).
    pub fn from_env(env_var: &str) -> Result<Self> {
        let private_key_b58 = std::env::var(env_var)
            .with_context(|| format!("Missing signer private key env var: {env_var}"))?;
        let bytes = bs58::decode(&private_key_b58)
            .into_vec()
            .context("Invalid base58 encoding")?;
        let keypair = Keypair::try_from(bytes.as_slice())
            .map_err(|e| anyhow::anyhow!("Invalid keypair bytes: {e}"))?;
        Ok(Self::new(keypair))
    }
}

impl TransactionSigner for KeypairSigner {
    fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    fn sign_transaction(
        &self,
        transaction: &mut Transaction,
        recent_blockhash: Hash,
    ) -> Result<(), SigningRejection> {
        transaction
            .try_sign(&[&self.keypair], recent_blockhash)
            .map_err(|e| SigningRejection(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::system_instruction;

    /// Test that a keypair signer signs a transaction it is fee payer of
    /// Why: the submitter relies on the signer filling every signature slot
    #[test]
    fn test_keypair_signer_signs() {
        let keypair = Keypair::new();
        let signer = KeypairSigner::new(keypair);
        let ix = system_instruction::transfer(&signer.pubkey(), &Pubkey::new_unique(), 1);
        let mut tx = Transaction::new_with_payer(&[ix], Some(&signer.pubkey()));
        signer
            .sign_transaction(&mut tx, Hash::new_unique())
            .expect("sign");
        assert!(tx.is_signed());
    }
}
