//! Greedy debt resolution.
//!
//! Accounts are visited in input order. Each unsatisfied account is driven to
//! zero by repeatedly transferring a "typical share" (capped at the average
//! contribution) with the first opposite-sign account able to absorb it. When
//! no account can absorb the full share, the first opposite-sign account is
//! drained completely instead.
//!
//! Every transfer moves both parties toward zero without crossing it, so the
//! sum of absolute balances strictly decreases and the loop terminates. The
//! heuristic does not minimise the number of transfers.

use rust_decimal::Decimal;

use super::error::SettlementError;
use super::types::{Account, Transaction};

/// Converts zero-sum balances into a sequence of transfers.
#[derive(Debug, Clone, Copy)]
pub struct DebtResolver {
    average: Decimal,
}

impl DebtResolver {
    /// Creates a resolver that prefers transfers of size `average`.
    #[must_use]
    pub const fn new(average: Decimal) -> Self {
        Self { average }
    }

    /// Resolves all balances to zero, mutating `accounts` in place.
    ///
    /// Identity is positional, so two accounts never match themselves even
    /// when their names collide.
    ///
    /// # Errors
    ///
    /// Returns an invariant error if the balances do not sum to zero, or if
    /// an unsatisfied account finds no counterparty or computes a zero transfer.
    pub fn resolve(&self, accounts: &mut [Account]) -> Result<Vec<Transaction>, SettlementError> {
        let imbalance: Decimal = accounts.iter().map(|a| a.balance).sum();
        if !imbalance.is_zero() {
            return Err(SettlementError::UnbalancedAccounts(imbalance));
        }

        let mut transactions = Vec::new();
        while accounts.iter().any(|a| !a.is_satisfied()) {
            for index in 0..accounts.len() {
                while !accounts[index].is_satisfied() {
                    transactions.push(self.step(accounts, index)?);
                }
            }
        }
        Ok(transactions)
    }

    /// Performs one transfer reducing the balance of `accounts[index]`.
    fn step(&self, accounts: &mut [Account], index: usize) -> Result<Transaction, SettlementError> {
        let owed = accounts[index].balance.abs();
        // A zero average means the pool is smaller than one minor unit per head.
        let mut credit = if self.average.is_zero() {
            owed
        } else {
            owed.min(self.average)
        };

        let partner = match find_partner(accounts, index, |p| p.balance.abs() >= credit) {
            Some(partner) => partner,
            None => {
                let partner = find_partner(accounts, index, |_| true)
                    .ok_or_else(|| SettlementError::NoPartner(accounts[index].name.clone()))?;
                credit = accounts[partner].balance.abs();
                partner
            }
        };

        if credit.is_zero() {
            return Err(SettlementError::ZeroTransfer(accounts[index].name.clone()));
        }

        Ok(transfer(accounts, index, partner, credit))
    }
}

/// Finds the first account opposing `accounts[index]` that satisfies `accepts`.
fn find_partner(
    accounts: &[Account],
    index: usize,
    accepts: impl Fn(&Account) -> bool,
) -> Option<usize> {
    let account = &accounts[index];
    accounts
        .iter()
        .enumerate()
        .find(|(i, p)| *i != index && account.opposes(p) && accepts(p))
        .map(|(i, _)| i)
}

/// Moves `credit` between the two accounts and records the transfer.
fn transfer(accounts: &mut [Account], index: usize, partner: usize, credit: Decimal) -> Transaction {
    if accounts[index].is_borrower() {
        accounts[index].balance -= credit;
        accounts[partner].balance += credit;
        Transaction::new(
            accounts[index].name.clone(),
            accounts[partner].name.clone(),
            credit,
        )
    } else {
        accounts[index].balance += credit;
        accounts[partner].balance -= credit;
        Transaction::new(
            accounts[partner].name.clone(),
            accounts[index].name.clone(),
            credit,
        )
    }
}
