use anchor_lang::solana_program::pubkey::PubkeyError;
use solana_client::client_error::ClientError;
use solana_sdk::signature::Signature;
use thiserror::Error;

/// Bytes that do not hold a record of the expected shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("expected {expected} bytes, found {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("empty instruction payload")]
    EmptyPayload,

    #[error("unknown instruction tag {0}")]
    UnknownTag(u8),

    #[error("malformed record: ({0})")]
    Malformed(String),
}

#[derive(Error, Debug)]
pub enum DonationError {
    #[error("amount is not valid: ({0})")]
    InvalidAmount(String),

    #[error("wallet connection failed: ({0})")]
    WalletConnection(String),

    #[error("wallet refused to sign: ({0})")]
    SigningRejected(String),

    #[error("solana client error: ({0})")]
    Network(#[from] ClientError),

    #[error("decode error: ({0})")]
    Decode(#[from] DecodeError),

    #[error("transaction {signature} was not confirmed in time")]
    ConfirmationTimeout { signature: Signature },

    #[error("transaction {signature} failed: ({reason})")]
    TransactionFailed { signature: Signature, reason: String },

    #[error("error in public key derivation: ({0})")]
    Derivation(#[from] PubkeyError),

    #[error("donor key is empty")]
    EmptyDonorKey,
}

pub type Result<T> = std::result::Result<T, DonationError>;
