//! Settlement domain types.
//!
//! Sign convention for account balances:
//! - balance > 0: Borrower, owes money into the pool
//! - balance < 0: Creditor, is owed money by the pool
//! - balance == 0: Satisfied

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A participant's contribution to the shared pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    /// Participant name, unique within one settlement.
    pub name: String,
    /// Amount paid into the pool.
    pub amount: Decimal,
}

impl Contribution {
    /// Creates a new contribution.
    #[must_use]
    pub fn new(name: impl Into<String>, amount: Decimal) -> Self {
        Self {
            name: name.into(),
            amount,
        }
    }
}

/// Where an account stands during resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountState {
    /// Owes money into the pool.
    Borrower,
    /// Is owed money by the pool.
    Creditor,
    /// Requires no further transfers.
    Satisfied,
}

/// Per-participant state for one settlement run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Participant name.
    pub name: String,
    /// What the participant contributed.
    pub deposit: Decimal,
    /// Outstanding signed balance.
    pub balance: Decimal,
}

impl Account {
    /// Creates an account with `balance = average - deposit`.
    #[must_use]
    pub fn open(name: impl Into<String>, deposit: Decimal, average: Decimal) -> Self {
        Self {
            name: name.into(),
            deposit,
            balance: average - deposit,
        }
    }

    /// Returns the account state derived from the balance sign.
    #[must_use]
    pub fn state(&self) -> AccountState {
        if self.balance.is_zero() {
            AccountState::Satisfied
        } else if self.balance.is_sign_positive() {
            AccountState::Borrower
        } else {
            AccountState::Creditor
        }
    }

    /// Returns true if the balance is zero.
    #[must_use]
    pub fn is_satisfied(&self) -> bool {
        self.balance.is_zero()
    }

    /// Returns true if the account owes money.
    #[must_use]
    pub fn is_borrower(&self) -> bool {
        self.state() == AccountState::Borrower
    }

    /// Returns true if the account is owed money.
    #[must_use]
    pub fn is_creditor(&self) -> bool {
        self.state() == AccountState::Creditor
    }

    /// Returns true if one account is a borrower and the other a creditor.
    #[must_use]
    pub fn opposes(&self, other: &Self) -> bool {
        matches!(
            (self.state(), other.state()),
            (AccountState::Borrower, AccountState::Creditor)
                | (AccountState::Creditor, AccountState::Borrower)
        )
    }
}

/// A single peer-to-peer transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Paying participant.
    pub from: String,
    /// Receiving participant.
    pub to: String,
    /// Transferred amount, always positive.
    pub amount: Decimal,
}

impl Transaction {
    /// Creates a new transaction.
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>, amount: Decimal) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            amount,
        }
    }
}

impl std::fmt::Display for Transaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}: {}", self.from, self.to, self.amount)
    }
}
