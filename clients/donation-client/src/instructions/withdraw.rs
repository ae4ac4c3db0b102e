use anchor_lang::prelude::msg;
use anchor_lang::solana_program::{
    hash::Hash,
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_program,
};
use solana_sdk::transaction::Transaction;

use crate::address::DerivationStrategy;
use crate::instructions::DonationInstruction;
use crate::state::{DonationView, WithdrawalRequest};

/// Which scanned donations a withdraw-all sweeps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WithdrawScope {
    /// Only donations made by the connected wallet.
    #[default]
    OwnDonations,
    /// Every donation the program holds, for an administrator sweeping the program.
    AllDonations,
}

impl WithdrawScope {
    pub fn includes(&self, requester: &Pubkey, donation: &DonationView) -> bool {
        match self {
            WithdrawScope::OwnDonations => donation.donor == *requester,
            WithdrawScope::AllDonations => true,
        }
    }
}

pub fn withdraw_instruction(
    program_id: &Pubkey,
    requester: &Pubkey,
    donation: &DonationView,
) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*requester, true),
            AccountMeta::new(donation.address, false),
            AccountMeta::new_readonly(donation.donor, false),
            AccountMeta::new_readonly(system_program::ID, false),
        ],
        data: DonationInstruction::Withdraw(WithdrawalRequest::new(donation.timestamp)).pack(),
    }
}

/// Result of picking withdraw targets out of a scan.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WithdrawSelection {
    pub targets: Vec<DonationView>,
    /// In scope, but not at the address their donor and timestamp derive to.
    pub skipped: usize,
}

/// Keeps the donations in `scope` whose address re-derives from their own
/// donor and timestamp. Anything else could not be authorised by the program.
pub fn select_withdraw_targets(
    program_id: &Pubkey,
    requester: &Pubkey,
    scope: WithdrawScope,
    strategy: DerivationStrategy,
    donations: Vec<DonationView>,
) -> WithdrawSelection {
    let mut selection = WithdrawSelection::default();
    for donation in donations
        .into_iter()
        .filter(|donation| scope.includes(requester, donation))
    {
        match strategy.derive(&donation.donor, donation.timestamp, program_id) {
            Ok(derived) if derived.address == donation.address => {
                selection.targets.push(donation)
            }
            Ok(derived) => {
                msg!(
                    "skipping {}: expected derived address {}",
                    donation.address,
                    derived.address
                );
                selection.skipped += 1;
            }
            Err(err) => {
                msg!("skipping {}: {}", donation.address, err);
                selection.skipped += 1;
            }
        }
    }
    selection
}

/// One transaction carrying a withdraw instruction per target.
pub fn build_withdraw_transaction(
    program_id: &Pubkey,
    requester: &Pubkey,
    targets: &[DonationView],
    recent_blockhash: Hash,
) -> Transaction {
    let instructions: Vec<Instruction> = targets
        .iter()
        .map(|donation| withdraw_instruction(program_id, requester, donation))
        .collect();

    let mut transaction = Transaction::new_with_payer(&instructions, Some(requester));
    transaction.message.recent_blockhash = recent_blockhash;
    transaction
}
