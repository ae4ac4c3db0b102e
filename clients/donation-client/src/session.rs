//! Entry points for donating, listing and withdrawing.
//!
//! A `Session` owns the ledger, wallet and configuration for the whole
//! process. Operations borrow it immutably, so several of them may be in
//! flight at once; the connected wallet key is the only state they share.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use anchor_lang::prelude::{msg, Pubkey};
use solana_sdk::{signature::Signature, transaction::Transaction};
use tokio::sync::OnceCell;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::instructions::{
    build_donate_transaction, build_withdraw_transaction, parse_amount, select_withdraw_targets,
    DonatePlan, WithdrawSelection,
};
use crate::ledger::LedgerClient;
use crate::query::collect_donations;
use crate::state::{DonationRecord, DonationView};
use crate::wallet::WalletSigner;

/// Source of the donation timestamp, in Unix seconds.
pub trait TimestampSource {
    fn unix_timestamp(&self) -> u64;
}

pub struct SystemClock;

impl TimestampSource for SystemClock {
    fn unix_timestamp(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or_default()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DonateStage {
    Idle,
    WalletConnecting,
    Building,
    AwaitingSignature,
    Submitted,
    Confirmed,
    Failed,
}

impl fmt::Display for DonateStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DonateStage::Idle => "idle",
            DonateStage::WalletConnecting => "wallet-connecting",
            DonateStage::Building => "building",
            DonateStage::AwaitingSignature => "awaiting-signature",
            DonateStage::Submitted => "submitted",
            DonateStage::Confirmed => "confirmed",
            DonateStage::Failed => "failed",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DonationReceipt {
    pub signature: Signature,
    pub address: Pubkey,
    pub record: DonationRecord,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WithdrawReceipt {
    /// `None` when there was nothing to withdraw and nothing was submitted.
    pub signature: Option<Signature>,
    pub withdrawn: Vec<DonationView>,
    /// In-scope donations left out because their address did not re-derive.
    pub skipped: usize,
}

type ConnectHook = Box<dyn Fn(&Pubkey) + Send + Sync>;
type StageHook = Box<dyn Fn(DonateStage) + Send + Sync>;

struct StageTracker<'a> {
    current: DonateStage,
    hook: Option<&'a (dyn Fn(DonateStage) + Send + Sync)>,
}

impl StageTracker<'_> {
    fn enter(&mut self, next: DonateStage) {
        msg!("donate: {} -> {}", self.current, next);
        self.current = next;
        if let Some(hook) = self.hook {
            hook(next);
        }
    }
}

pub struct Session<L, W> {
    ledger: L,
    wallet: W,
    config: ClientConfig,
    clock: Box<dyn TimestampSource + Send + Sync>,
    connected: OnceCell<Pubkey>,
    on_connect: Option<ConnectHook>,
    on_stage: Option<StageHook>,
}

impl<L: LedgerClient, W: WalletSigner> Session<L, W> {
    pub fn new(ledger: L, wallet: W, config: ClientConfig) -> Self {
        Self {
            ledger,
            wallet,
            config,
            clock: Box::new(SystemClock),
            connected: OnceCell::new(),
            on_connect: None,
            on_stage: None,
        }
    }

    pub fn with_clock(mut self, clock: impl TimestampSource + Send + Sync + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Called once, with the wallet key, when the session connects the wallet.
    pub fn on_connect(mut self, hook: impl Fn(&Pubkey) + Send + Sync + 'static) -> Self {
        self.on_connect = Some(Box::new(hook));
        self
    }

    /// Called on every donate stage transition.
    pub fn on_stage(mut self, hook: impl Fn(DonateStage) + Send + Sync + 'static) -> Self {
        self.on_stage = Some(Box::new(hook));
        self
    }

    pub fn program_id(&self) -> &Pubkey {
        &self.config.program_id
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn wallet(&self) -> &W {
        &self.wallet
    }

    /// Connects the wallet on first use and returns its key.
    pub async fn connect(&self) -> Result<Pubkey> {
        let key = self
            .connected
            .get_or_try_init(|| self.connect_wallet())
            .await?;
        Ok(*key)
    }

    async fn connect_wallet(&self) -> Result<Pubkey> {
        if let Some(key) = self.wallet.public_key() {
            return Ok(key);
        }
        let key = self.wallet.connect().await?;
        msg!("wallet connected {}", key);
        if let Some(hook) = &self.on_connect {
            hook(&key);
        }
        Ok(key)
    }

    pub async fn donate(&self, amount: &str) -> Result<DonationReceipt> {
        let mut tracker = StageTracker {
            current: DonateStage::Idle,
            hook: self.on_stage.as_deref(),
        };
        match self.run_donate(amount, &mut tracker).await {
            Ok(receipt) => {
                tracker.enter(DonateStage::Confirmed);
                Ok(receipt)
            }
            Err(err) => {
                tracker.enter(DonateStage::Failed);
                msg!("donate failed: {}", err);
                Err(err)
            }
        }
    }

    async fn run_donate(
        &self,
        amount: &str,
        tracker: &mut StageTracker<'_>,
    ) -> Result<DonationReceipt> {
        let amount = parse_amount(amount)?;

        tracker.enter(DonateStage::WalletConnecting);
        let donor = self.connect().await?;

        tracker.enter(DonateStage::Building);
        let timestamp = self.clock.unix_timestamp();
        let record = DonationRecord::new(donor, amount, timestamp);
        let target = self
            .config
            .strategy
            .derive(&donor, timestamp, self.program_id())?;
        let (rent_lamports, recent_blockhash) = tokio::try_join!(
            self.ledger
                .minimum_balance_for_rent_exemption(DonationRecord::LEN),
            self.ledger.latest_blockhash(),
        )?;
        msg!(
            "donating {} lamports to {} (rent {}, timestamp {})",
            amount,
            target.address,
            rent_lamports,
            timestamp
        );
        let plan = DonatePlan {
            record,
            target,
            rent_lamports,
            recent_blockhash,
        };
        let transaction = build_donate_transaction(self.program_id(), &plan);

        tracker.enter(DonateStage::AwaitingSignature);
        let signed = self.wallet.sign_transaction(transaction).await?;
        let signature = self.ledger.send_transaction(&signed).await?;

        tracker.enter(DonateStage::Submitted);
        self.await_confirmation(&signature).await?;

        Ok(DonationReceipt {
            signature,
            address: plan.target.address,
            record,
        })
    }

    /// All decodable donations held by the program, optionally for one donor.
    pub async fn list_donations(&self, donor_filter: Option<&str>) -> Result<Vec<DonationView>> {
        let accounts = self.ledger.program_accounts(self.program_id()).await?;
        let donations = collect_donations(&accounts, donor_filter);
        msg!(
            "{} of {} program accounts are donations in scope",
            donations.len(),
            accounts.len()
        );
        Ok(donations)
    }

    /// Withdraws every donation in the configured scope with one transaction.
    pub async fn withdraw_all(&self) -> Result<WithdrawReceipt> {
        let requester = self.connect().await?;
        let donations = self.list_donations(None).await?;
        let WithdrawSelection { targets, skipped } = select_withdraw_targets(
            self.program_id(),
            &requester,
            self.config.withdraw_scope,
            self.config.strategy,
            donations,
        );
        if targets.is_empty() {
            msg!("nothing to withdraw for {} ({} skipped)", requester, skipped);
            return Ok(WithdrawReceipt {
                signature: None,
                withdrawn: Vec::new(),
                skipped,
            });
        }

        let recent_blockhash = self.ledger.latest_blockhash().await?;
        let transaction =
            build_withdraw_transaction(self.program_id(), &requester, &targets, recent_blockhash);
        let signed = self.wallet.sign_transaction(transaction).await?;
        let signature = self.submit(&signed).await?;

        Ok(WithdrawReceipt {
            signature: Some(signature),
            withdrawn: targets,
            skipped,
        })
    }

    async fn submit(&self, signed: &Transaction) -> Result<Signature> {
        let signature = self.ledger.send_transaction(signed).await?;
        self.await_confirmation(&signature).await?;
        Ok(signature)
    }

    async fn await_confirmation(&self, signature: &Signature) -> Result<()> {
        msg!("Submitted transaction {}, awaiting confirmation", signature);
        self.ledger.confirm_transaction(signature).await?;
        msg!("Transaction {} confirmed", signature);
        Ok(())
    }
}
