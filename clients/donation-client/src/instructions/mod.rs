pub mod donate;
pub mod withdraw;

pub use donate::*;
pub use withdraw::*;

use crate::constants::{DONATE_TAG, WITHDRAW_TAG};
use crate::error::DecodeError;
use crate::state::{DonationRecord, WithdrawalRequest};

/// Instruction payloads understood by the donation program.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DonationInstruction {
    /// Accounts expected:
    ///
    /// 0. `[signer, writable]` Donor paying for the donation
    /// 1. `[writable]` Donation account derived from donor and timestamp
    /// 2. `[]` The System Program
    Donate(DonationRecord),

    /// Accounts expected:
    ///
    /// 0. `[signer, writable]` Requester receiving the lamports
    /// 1. `[writable]` Donation account being drained
    /// 2. `[]` Donor the account was derived from
    /// 3. `[]` The System Program
    Withdraw(WithdrawalRequest),
}

impl DonationInstruction {
    pub fn pack(&self) -> Vec<u8> {
        let (tag, body) = match self {
            DonationInstruction::Donate(record) => (DONATE_TAG, record.encode()),
            DonationInstruction::Withdraw(request) => (WITHDRAW_TAG, request.encode()),
        };
        let mut data = Vec::with_capacity(1 + body.len());
        data.push(tag);
        data.extend_from_slice(&body);
        data
    }

    pub fn unpack(input: &[u8]) -> std::result::Result<Self, DecodeError> {
        let (tag, body) = input.split_first().ok_or(DecodeError::EmptyPayload)?;
        match *tag {
            DONATE_TAG => Ok(Self::Donate(DonationRecord::decode(body)?)),
            WITHDRAW_TAG => Ok(Self::Withdraw(WithdrawalRequest::decode(body)?)),
            other => Err(DecodeError::UnknownTag(other)),
        }
    }
}
