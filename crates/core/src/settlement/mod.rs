//! Shared-expense settlement.
//!
//! A run passes through three stages:
//! - `balance` - contributions to signed balances plus a truncation remainder
//! - `remainder` - the remainder charged to one randomly chosen account
//! - `resolver` - greedy matching of borrowers and creditors into transfers
//!
//! `SettlementEngine` drives all three and returns a `Settlement`.

pub mod balance;
pub mod engine;
pub mod error;
pub mod remainder;
pub mod resolver;
pub mod types;

#[cfg(test)]
mod props;

pub use balance::{BalanceCalculator, BalanceSheet};
pub use engine::{Settlement, SettlementEngine};
pub use error::{ErrorKind, SettlementError};
pub use remainder::RemainderAllocator;
pub use resolver::DebtResolver;
pub use types::{Account, AccountState, Contribution, Transaction};
