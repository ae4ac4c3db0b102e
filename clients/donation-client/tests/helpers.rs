//! Test helpers for the donation client

#![allow(dead_code)]

use std::sync::Mutex;

use anchor_lang::solana_program::hash::{hash, Hash};
use anchor_lang::prelude::Pubkey;
use solana_client::client_error::{ClientError, ClientErrorKind};
use solana_sdk::{signature::Signature, transaction::Transaction};

use donation_client::{
    derive_donation_pda, ClientConfig, DonationError, DonationRecord, KeypairWallet,
    LedgerClient, ProgramAccount, Result, Session, TimestampSource, WalletSigner,
};

pub const T: u64 = 1_700_000_000;

/// Generate a deterministic pubkey for testing
pub fn test_pubkey(seed: &str) -> Pubkey {
    Pubkey::new_from_array(hash(seed.as_bytes()).to_bytes())
}

/// A donation account sitting at its program-derived address.
pub fn donation_account(donor: &Pubkey, amount: u64, timestamp: u64) -> ProgramAccount {
    let (pubkey, _) = derive_donation_pda(&donation_client::ID, donor, timestamp);
    ProgramAccount {
        pubkey,
        data: DonationRecord::new(*donor, amount, timestamp).encode(),
    }
}

pub fn foreign_account(data: Vec<u8>) -> ProgramAccount {
    ProgramAccount {
        pubkey: Pubkey::new_unique(),
        data,
    }
}

pub struct FixedClock(pub u64);

impl TimestampSource for FixedClock {
    fn unix_timestamp(&self) -> u64 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    TimesOut,
    Fails,
}

/// In-memory ledger that records every call made against it.
pub struct FakeLedger {
    pub rent: u64,
    pub blockhash: Hash,
    pub accounts: Vec<ProgramAccount>,
    pub confirmation: Confirmation,
    pub offline: bool,
    calls: Mutex<Vec<&'static str>>,
    sent: Mutex<Vec<Transaction>>,
}

impl FakeLedger {
    pub fn new() -> Self {
        Self {
            rent: 1_224_960,
            blockhash: hash(b"recent-blockhash"),
            accounts: Vec::new(),
            confirmation: Confirmation::Confirmed,
            offline: false,
            calls: Mutex::new(Vec::new()),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn with_accounts(mut self, accounts: Vec<ProgramAccount>) -> Self {
        self.accounts = accounts;
        self
    }

    pub fn confirming(mut self, confirmation: Confirmation) -> Self {
        self.confirmation = confirmation;
        self
    }

    pub fn offline(mut self) -> Self {
        self.offline = true;
        self
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn sent(&self) -> Vec<Transaction> {
        self.sent.lock().unwrap().clone()
    }

    fn record(&self, call: &'static str) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        if self.offline {
            let err: ClientError = ClientErrorKind::Custom("connection refused".to_string()).into();
            return Err(err.into());
        }
        Ok(())
    }
}

impl LedgerClient for FakeLedger {
    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> Result<u64> {
        self.record("rent")?;
        assert_eq!(data_len, DonationRecord::LEN);
        Ok(self.rent)
    }

    async fn latest_blockhash(&self) -> Result<Hash> {
        self.record("blockhash")?;
        Ok(self.blockhash)
    }

    async fn program_accounts(&self, program_id: &Pubkey) -> Result<Vec<ProgramAccount>> {
        self.record("program_accounts")?;
        assert_eq!(*program_id, donation_client::ID);
        Ok(self.accounts.clone())
    }

    async fn send_transaction(&self, transaction: &Transaction) -> Result<Signature> {
        self.record("send")?;
        self.sent.lock().unwrap().push(transaction.clone());
        Ok(transaction.signatures[0])
    }

    async fn confirm_transaction(&self, signature: &Signature) -> Result<()> {
        self.record("confirm")?;
        match self.confirmation {
            Confirmation::Confirmed => Ok(()),
            Confirmation::TimesOut => Err(DonationError::ConfirmationTimeout {
                signature: *signature,
            }),
            Confirmation::Fails => Err(DonationError::TransactionFailed {
                signature: *signature,
                reason: "custom program error: 0x1".to_string(),
            }),
        }
    }
}

/// Wallet whose user declines either the connection or every signature.
pub struct RefusingWallet {
    pub key: Pubkey,
    pub refuse_connect: bool,
}

impl WalletSigner for RefusingWallet {
    async fn connect(&self) -> Result<Pubkey> {
        if self.refuse_connect {
            return Err(DonationError::WalletConnection(
                "user rejected the request".to_string(),
            ));
        }
        Ok(self.key)
    }

    fn public_key(&self) -> Option<Pubkey> {
        None
    }

    async fn sign_transaction(&self, _transaction: Transaction) -> Result<Transaction> {
        Err(DonationError::SigningRejected(
            "user rejected the request".to_string(),
        ))
    }
}

pub fn session_with(ledger: FakeLedger, wallet: KeypairWallet) -> Session<FakeLedger, KeypairWallet> {
    Session::new(ledger, wallet, ClientConfig::default()).with_clock(FixedClock(T))
}
