//! The ledger node, seen through the five calls the client needs.

use std::time::Duration;

use anchor_lang::solana_program::{hash::Hash, pubkey::Pubkey};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{commitment_config::CommitmentConfig, signature::Signature, transaction::Transaction};
use tokio::time::{sleep, Instant};

use crate::config::ClientConfig;
use crate::error::{DonationError, Result};

/// Raw account returned by a program scan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgramAccount {
    pub pubkey: Pubkey,
    pub data: Vec<u8>,
}

#[allow(async_fn_in_trait)]
pub trait LedgerClient {
    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> Result<u64>;

    async fn latest_blockhash(&self) -> Result<Hash>;

    /// Every account owned by `program_id`, in one response.
    async fn program_accounts(&self, program_id: &Pubkey) -> Result<Vec<ProgramAccount>>;

    async fn send_transaction(&self, transaction: &Transaction) -> Result<Signature>;

    /// Resolves once `signature` is confirmed; fails with
    /// `ConfirmationTimeout` when the node's window runs out first.
    async fn confirm_transaction(&self, signature: &Signature) -> Result<()>;
}

pub struct RpcLedger {
    rpc: RpcClient,
    commitment: CommitmentConfig,
    confirm_timeout: Duration,
    poll_interval: Duration,
}

impl RpcLedger {
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_client(
            RpcClient::new_with_commitment(config.cluster_url.clone(), config.commitment),
            config,
        )
    }

    /// Wraps an existing client; the cluster URL in `config` is not used.
    pub fn with_client(rpc: RpcClient, config: &ClientConfig) -> Self {
        Self {
            rpc,
            commitment: config.commitment,
            confirm_timeout: config.confirm_timeout,
            poll_interval: config.poll_interval,
        }
    }

    pub fn url(&self) -> String {
        self.rpc.url()
    }
}

impl LedgerClient for RpcLedger {
    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> Result<u64> {
        Ok(self.rpc.get_minimum_balance_for_rent_exemption(data_len).await?)
    }

    async fn latest_blockhash(&self) -> Result<Hash> {
        Ok(self.rpc.get_latest_blockhash().await?)
    }

    async fn program_accounts(&self, program_id: &Pubkey) -> Result<Vec<ProgramAccount>> {
        let accounts = self.rpc.get_program_accounts(program_id).await?;
        Ok(accounts
            .into_iter()
            .map(|(pubkey, account)| ProgramAccount {
                pubkey,
                data: account.data,
            })
            .collect())
    }

    async fn send_transaction(&self, transaction: &Transaction) -> Result<Signature> {
        Ok(self.rpc.send_transaction(transaction).await?)
    }

    async fn confirm_transaction(&self, signature: &Signature) -> Result<()> {
        let deadline = Instant::now() + self.confirm_timeout;
        loop {
            let status = self
                .rpc
                .get_signature_status_with_commitment(signature, self.commitment)
                .await?;
            match status {
                Some(Ok(())) => return Ok(()),
                Some(Err(err)) => {
                    return Err(DonationError::TransactionFailed {
                        signature: *signature,
                        reason: err.to_string(),
                    })
                }
                None if Instant::now() >= deadline => {
                    return Err(DonationError::ConfirmationTimeout {
                        signature: *signature,
                    })
                }
                None => sleep(self.poll_interval).await,
            }
        }
    }
}
