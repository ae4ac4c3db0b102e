use std::time::Duration;

use anchor_lang::prelude::Pubkey;
use solana_sdk::commitment_config::CommitmentConfig;

use crate::address::DerivationStrategy;
use crate::constants::{
    DEFAULT_CLUSTER_URL, DEFAULT_CONFIRM_TIMEOUT, DEFAULT_POLL_INTERVAL, DEVNET_CLUSTER_URL,
};
use crate::instructions::WithdrawScope;

/// Settings fixed for the lifetime of a session.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub cluster_url: String,
    pub program_id: Pubkey,
    pub commitment: CommitmentConfig,
    pub strategy: DerivationStrategy,
    pub withdraw_scope: WithdrawScope,
    pub confirm_timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CLUSTER_URL)
    }
}

impl ClientConfig {
    pub fn new(cluster_url: impl Into<String>) -> Self {
        Self {
            cluster_url: cluster_url.into(),
            program_id: crate::ID,
            commitment: CommitmentConfig::confirmed(),
            strategy: DerivationStrategy::default(),
            withdraw_scope: WithdrawScope::default(),
            confirm_timeout: DEFAULT_CONFIRM_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn devnet() -> Self {
        Self::new(DEVNET_CLUSTER_URL)
    }

    pub fn with_program_id(mut self, program_id: Pubkey) -> Self {
        self.program_id = program_id;
        self
    }

    pub fn with_commitment(mut self, commitment: CommitmentConfig) -> Self {
        self.commitment = commitment;
        self
    }

    pub fn with_strategy(mut self, strategy: DerivationStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_withdraw_scope(mut self, scope: WithdrawScope) -> Self {
        self.withdraw_scope = scope;
        self
    }

    pub fn with_confirm_timeout(mut self, timeout: Duration, poll_interval: Duration) -> Self {
        self.confirm_timeout = timeout;
        self.poll_interval = poll_interval;
        self
    }
}
