use anchor_lang::prelude::{msg, Pubkey};

use crate::error::DecodeError;
use crate::ledger::ProgramAccount;
use crate::state::{DonationRecord, DonationView};

/// Decodes each scanned account independently.
pub fn decode_accounts(
    accounts: &[ProgramAccount],
) -> impl Iterator<Item = (Pubkey, Result<DonationRecord, DecodeError>)> + '_ {
    accounts
        .iter()
        .map(|account| (account.pubkey, DonationRecord::decode(&account.data)))
}

/// A missing or empty filter matches every donor. Anything else must equal
/// the donor's base58 text exactly.
pub fn matches_donor(donation: &DonationView, donor_filter: Option<&str>) -> bool {
    match donor_filter {
        Some(filter) if !filter.is_empty() => donation.donor.to_string() == filter,
        _ => true,
    }
}

/// Decodable donations, optionally restricted to one donor.
///
/// Accounts that do not decode are logged and left out; they never stop the scan.
pub fn collect_donations(
    accounts: &[ProgramAccount],
    donor_filter: Option<&str>,
) -> Vec<DonationView> {
    decode_accounts(accounts)
        .filter_map(|(address, decoded)| match decoded {
            Ok(record) => Some(DonationView::new(address, record)),
            Err(err) => {
                msg!("skipping account {}: {}", address, err);
                None
            }
        })
        .filter(|donation| matches_donor(donation, donor_filter))
        .collect()
}
