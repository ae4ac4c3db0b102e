use anchor_lang::solana_program::{
    hash::Hash,
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_instruction, system_program,
};
use solana_sdk::transaction::Transaction;

use crate::address::{DerivationProof, DerivedAddress};
use crate::error::{DonationError, Result};
use crate::instructions::DonationInstruction;
use crate::state::DonationRecord;

/// Parses the amount typed by the user as whole lamports.
///
/// Zero is accepted here; the program is the one that refuses empty donations.
pub fn parse_amount(input: &str) -> Result<u64> {
    let amount = input.trim();
    if amount.is_empty() {
        return Err(DonationError::InvalidAmount("amount is required".to_string()));
    }
    if amount.starts_with('-') {
        return Err(DonationError::InvalidAmount(format!("{amount} is negative")));
    }
    amount
        .parse::<u64>()
        .map_err(|err| DonationError::InvalidAmount(format!("{amount}: {err}")))
}

/// Inputs gathered before a donate transaction can be assembled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DonatePlan {
    pub record: DonationRecord,
    pub target: DerivedAddress,
    pub rent_lamports: u64,
    pub recent_blockhash: Hash,
}

pub fn donate_instruction(
    program_id: &Pubkey,
    record: &DonationRecord,
    donation_account: &Pubkey,
) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(record.donor, true),
            AccountMeta::new(*donation_account, false),
            AccountMeta::new_readonly(system_program::ID, false),
        ],
        data: DonationInstruction::Donate(*record).pack(),
    }
}

/// Allocates a seed-derived donation account owned by the program.
pub fn create_donation_account_instruction(
    program_id: &Pubkey,
    donor: &Pubkey,
    donation_account: &Pubkey,
    seed: &str,
    rent_lamports: u64,
) -> Instruction {
    system_instruction::create_account_with_seed(
        donor,
        donation_account,
        donor,
        seed,
        rent_lamports,
        DonationRecord::LEN as u64,
        program_id,
    )
}

/// Unsigned donate transaction, fee paid by the donor.
pub fn build_donate_transaction(program_id: &Pubkey, plan: &DonatePlan) -> Transaction {
    let donor = plan.record.donor;
    let mut instructions = Vec::with_capacity(2);
    if let DerivationProof::Seed(seed) = &plan.target.proof {
        instructions.push(create_donation_account_instruction(
            program_id,
            &donor,
            &plan.target.address,
            seed,
            plan.rent_lamports,
        ));
    }
    instructions.push(donate_instruction(
        program_id,
        &plan.record,
        &plan.target.address,
    ));

    let mut transaction = Transaction::new_with_payer(&instructions, Some(&donor));
    transaction.message.recent_blockhash = plan.recent_blockhash;
    transaction
}
