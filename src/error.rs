//! Error types
//!
//! Every caller-visible failure is a typed variant so call sites can match
//! exhaustively instead of inspecting strings. Lookup, transfer, and
//! submission paths each keep their own taxonomy; conversions between them
//! never collapse distinct failure kinds.

use solana_sdk::signature::Signature;
use thiserror::Error;

/// Failures of the JSON-RPC network capability.
#[derive(Error, Debug)]
pub enum RpcError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("rpc node error: {0}")]
    Node(String),

    #[error("malformed rpc response: {0}")]
    Malformed(String),
}

/// Address derivation failed (invalid program id constant).
#[derive(Error, Debug)]
#[error("address derivation failed: {0}")]
pub struct AddressError(pub String);

/// A signer declined to sign, with the reason it gave.
#[derive(Error, Debug)]
#[error("{0}")]
pub struct SigningRejection(pub String);

/// Failures of the offer lookup path.
///
/// `NotFound` and `AlreadySettled` are not errors; they are
/// [`crate::offer::OfferStatus`] variants. Only malformed input and network
/// failure reach this enum.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("offer lookup failed: {0}")]
    Rpc(#[from] RpcError),
}

/// Failures of a single transaction submission attempt.
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("signing rejected: {0}")]
    SigningRejected(String),

    #[error("submission failed: {0}")]
    SubmissionFailed(String),

    #[error("confirmation timed out for transaction {0}")]
    ConfirmationTimeout(Signature),

    #[error("submission failed: {0}")]
    Rpc(#[from] RpcError),
}

/// Failures of the native / token transfer flows.
#[derive(Error, Debug)]
pub enum TransferError {
    #[error("invalid recipient address: {0}")]
    InvalidRecipient(String),

    #[error("invalid asset id: {0}")]
    InvalidAsset(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(f64),

    #[error("insufficient balance: need {required} base units, have {available}")]
    InsufficientBalance { required: u64, available: u64 },

    #[error("signing rejected: {0}")]
    SigningRejected(String),

    #[error("submission failed: {0}")]
    SubmissionFailed(String),

    #[error("confirmation timed out for transaction {0}")]
    ConfirmationTimeout(Signature),

    #[error(transparent)]
    Address(#[from] AddressError),
}

impl From<SubmitError> for TransferError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::SigningRejected(reason) => TransferError::SigningRejected(reason),
            SubmitError::SubmissionFailed(reason) => TransferError::SubmissionFailed(reason),
            SubmitError::ConfirmationTimeout(sig) => TransferError::ConfirmationTimeout(sig),
            SubmitError::Rpc(err) => TransferError::SubmissionFailed(err.to_string()),
        }
    }
}

impl From<RpcError> for TransferError {
    fn from(err: RpcError) -> Self {
        TransferError::SubmissionFailed(err.to_string())
    }
}

/// Failures of the take-offer flow.
#[derive(Error, Debug)]
pub enum TakeOfferError {
    /// The take transaction is not implemented yet. Returned unconditionally
    /// so callers can render "not yet supported" instead of a silent failure.
    #[error("taking offers is not supported yet")]
    NotSupported,
}
