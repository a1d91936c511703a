//! Escrow client library
//!
//! Client for an on-chain offer escrow program: deterministic address
//! derivation, offer lookup with vault-balance reconciliation, and
//! construction and submission of native / token transfers.

pub mod client;
pub mod config;
pub mod error;
pub mod offer;
pub mod pda;
pub mod rpc;
pub mod signer;
pub mod submit;
pub mod transfer;

// Re-export public types for convenience
pub use client::EscrowClient;
pub use config::EscrowConfig;
pub use error::{
    AddressError, LookupError, RpcError, SigningRejection, SubmitError, TakeOfferError,
    TransferError,
};
pub use offer::{OfferAccount, OfferReader, OfferStatus, OfferView};
pub use rpc::RpcClient;
pub use signer::{KeypairSigner, TransactionSigner};
pub use submit::TransactionSubmitter;
pub use transfer::{TransferRequest, FEE_RESERVE_LAMPORTS, NATIVE_DECIMALS};
