use anchor_lang::prelude::*;

use crate::error::DecodeError;

/// Body of a withdraw instruction. `timestamp` picks the donation account.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct WithdrawalRequest {
    pub timestamp: u64,
}

impl WithdrawalRequest {
    pub const LEN: usize = 8; // timestamp: u64

    pub fn new(timestamp: u64) -> Self {
        Self { timestamp }
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(Self::LEN);
        // Serializing into a Vec cannot fail.
        let _ = self.serialize(&mut data);
        data
    }

    pub fn decode(data: &[u8]) -> std::result::Result<Self, DecodeError> {
        if data.len() != Self::LEN {
            return Err(DecodeError::LengthMismatch {
                expected: Self::LEN,
                actual: data.len(),
            });
        }
        Self::try_from_slice(data).map_err(|err| DecodeError::Malformed(err.to_string()))
    }
}
