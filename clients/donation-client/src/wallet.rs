use std::sync::atomic::{AtomicBool, Ordering};

use anchor_lang::prelude::Pubkey;
use solana_sdk::{
    signature::{Keypair, Signer},
    transaction::Transaction,
};

use crate::error::{DonationError, Result};

/// A wallet that holds the user's key and signs on their behalf.
#[allow(async_fn_in_trait)]
pub trait WalletSigner {
    /// Suspends until the user approves the connection.
    async fn connect(&self) -> Result<Pubkey>;

    /// `None` until connected.
    fn public_key(&self) -> Option<Pubkey>;

    async fn sign_transaction(&self, transaction: Transaction) -> Result<Transaction>;
}

/// Signs with a local keypair. Connecting never needs user approval.
pub struct KeypairWallet {
    keypair: Keypair,
    connected: AtomicBool,
}

impl KeypairWallet {
    pub fn new(keypair: Keypair) -> Self {
        Self {
            keypair,
            connected: AtomicBool::new(false),
        }
    }

    pub fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }
}

impl WalletSigner for KeypairWallet {
    async fn connect(&self) -> Result<Pubkey> {
        self.connected.store(true, Ordering::Release);
        Ok(self.keypair.pubkey())
    }

    fn public_key(&self) -> Option<Pubkey> {
        self.connected
            .load(Ordering::Acquire)
            .then(|| self.keypair.pubkey())
    }

    async fn sign_transaction(&self, mut transaction: Transaction) -> Result<Transaction> {
        if self.public_key().is_none() {
            return Err(DonationError::WalletConnection(
                "wallet is not connected".to_string(),
            ));
        }
        let recent_blockhash = transaction.message.recent_blockhash;
        transaction
            .try_sign(&[&self.keypair], recent_blockhash)
            .map_err(|err| DonationError::SigningRejected(err.to_string()))?;
        Ok(transaction)
    }
}
