#![allow(unexpected_cfgs)]
use anchor_lang::declare_id;

pub mod address;
pub mod config;
pub mod constants;
pub mod error;
pub mod instructions;
pub mod ledger;
pub mod query;
pub mod session;
pub mod state;
pub mod wallet;

pub use crate::address::*;
pub use crate::config::*;
pub use crate::error::*;
pub use crate::instructions::*;
pub use crate::ledger::*;
pub use crate::query::*;
pub use crate::session::*;
pub use crate::state::*;
pub use crate::wallet::*;

declare_id!("FBfmBnS8qGQ3oR3AnNg8kCxRM3mTA38DiQVdsTzhBvP5");
