use anchor_lang::prelude::*;

use crate::error::DecodeError;

/// Account data the program writes for every donation.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct DonationRecord {
    pub donor: Pubkey,  // Donor's wallet
    pub amount: u64,    // Lamports donated
    pub timestamp: u64, // Unix seconds, also the address seed
}

impl DonationRecord {
    pub const LEN: usize = 32 // donor: Pubkey
        + 8     // amount: u64
        + 8;    // timestamp: u64

    pub fn new(donor: Pubkey, amount: u64, timestamp: u64) -> Self {
        Self {
            donor,
            amount,
            timestamp,
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(Self::LEN);
        // Serializing into a Vec cannot fail.
        let _ = self.serialize(&mut data);
        data
    }

    /// Accepts exactly `LEN` bytes; anything else belongs to another record shape.
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

/// A decoded program account, as returned by a scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DonationView {
    pub address: Pubkey,
    pub donor: Pubkey,
    pub amount: u64,
    pub timestamp: u64,
}

impl DonationView {
    pub fn new(address: Pubkey, record: DonationRecord) -> Self {
        Self {
            address,
            donor: record.donor,
            amount: record.amount,
            timestamp: record.timestamp,
        }
    }

    pub fn record(&self) -> DonationRecord {
        DonationRecord::new(self.donor, self.amount, self.timestamp)
    }
}
