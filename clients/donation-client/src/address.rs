//! Per-donation account addresses.
//!
//! A donation account is found again at withdrawal time purely from the
//! donor key and the donation timestamp, so every function here is pure.
//! The timestamp enters the seeds as its decimal string, the same bytes the
//! program feeds to `find_program_address`.

use anchor_lang::prelude::Pubkey;

use crate::error::{DonationError, Result};

/// How a donation account address is derived from `(donor, timestamp)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DerivationStrategy {
    /// Program-derived address over `[donor, timestamp]`; the program creates the account.
    #[default]
    ProgramAddress,
    /// `create_with_seed(donor, timestamp, program)`; the client creates the account.
    AccountWithSeed,
}

/// What the program (or the system program) needs to re-check the address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DerivationProof {
    Bump(u8),
    Seed(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DerivedAddress {
    pub address: Pubkey,
    pub proof: DerivationProof,
}

pub fn timestamp_seed(timestamp: u64) -> String {
    timestamp.to_string()
}

pub fn derive_donation_pda(program_id: &Pubkey, donor: &Pubkey, timestamp: u64) -> (Pubkey, u8) {
    let seed = timestamp_seed(timestamp);
    Pubkey::find_program_address(&[donor.as_ref(), seed.as_bytes()], program_id)
}

pub fn derive_donation_address_with_seed(
    program_id: &Pubkey,
    donor: &Pubkey,
    timestamp: u64,
) -> Result<Pubkey> {
    Ok(Pubkey::create_with_seed(
        donor,
        &timestamp_seed(timestamp),
        program_id,
    )?)
}

impl DerivationStrategy {
    pub fn derive(
        &self,
        donor: &Pubkey,
        timestamp: u64,
        program_id: &Pubkey,
    ) -> Result<DerivedAddress> {
        if *donor == Pubkey::default() {
            return Err(DonationError::EmptyDonorKey);
        }
        match self {
            DerivationStrategy::ProgramAddress => {
                let (address, bump) = derive_donation_pda(program_id, donor, timestamp);
                Ok(DerivedAddress {
                    address,
                    proof: DerivationProof::Bump(bump),
                })
            }
            DerivationStrategy::AccountWithSeed => {
                let address = derive_donation_address_with_seed(program_id, donor, timestamp)?;
                Ok(DerivedAddress {
                    address,
                    proof: DerivationProof::Seed(timestamp_seed(timestamp)),
                })
            }
        }
    }
}
