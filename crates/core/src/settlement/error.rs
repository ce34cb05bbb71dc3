//! Settlement error types.
//!
//! Every failure belongs to one of two kinds: input the caller must fix, or an
//! internal invariant that no longer holds. A failed run never returns a
//! partial transaction list.

use rust_decimal::Decimal;
use thiserror::Error;

/// Broad classification of settlement failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The contributions cannot be settled as given.
    InvalidInput,
    /// The resolver reached a state that valid input cannot produce.
    InternalInvariantViolation,
}

/// Errors that can occur during a settlement run.
#[derive(Debug, Error)]
pub enum SettlementError {
    // ========== Input Errors ==========
    /// No contributions were supplied.
    #[error("At least one contribution is required")]
    EmptyContributions,

    /// A contribution amount is below zero.
    #[error("Contribution from {name} is negative: {amount}")]
    NegativeAmount {
        /// Participant name.
        name: String,
        /// Offending amount.
        amount: Decimal,
    },

    /// A contribution amount is finer than the currency's minor unit.
    #[error("Contribution from {name} has more than {decimal_places} decimal places: {amount}")]
    ExcessPrecision {
        /// Participant name.
        name: String,
        /// Offending amount.
        amount: Decimal,
        /// Allowed number of decimal places.
        decimal_places: u32,
    },

    /// A participant name is empty or whitespace.
    #[error("Participant name at position {0} is blank")]
    BlankName(usize),

    /// The same participant name appears twice.
    #[error("Participant {0} appears more than once")]
    DuplicateParticipant(String),

    /// The contribution total does not fit the decimal range.
    #[error("Contribution total is too large")]
    AmountOverflow,

    // ========== Invariant Errors ==========
    /// Opening balances do not sum to zero.
    #[error("Account balances do not sum to zero (imbalance {0})")]
    UnbalancedAccounts(Decimal),

    /// An unsatisfied account has no counterparty of opposite sign.
    #[error("No counterparty with an opposite balance for {0}")]
    NoPartner(String),

    /// A transfer computed to zero while the account is still unsatisfied.
    #[error("Computed a zero transfer for {0}")]
    ZeroTransfer(String),
}

impl SettlementError {
    /// Returns the broad kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyContributions
            | Self::NegativeAmount { .. }
            | Self::ExcessPrecision { .. }
            | Self::BlankName(_)
            | Self::DuplicateParticipant(_)
            | Self::AmountOverflow => ErrorKind::InvalidInput,

            Self::UnbalancedAccounts(_) | Self::NoPartner(_) | Self::ZeroTransfer(_) => {
                ErrorKind::InternalInvariantViolation
            }
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyContributions => "EMPTY_CONTRIBUTIONS",
            Self::NegativeAmount { .. } => "NEGATIVE_AMOUNT",
            Self::ExcessPrecision { .. } => "EXCESS_PRECISION",
            Self::BlankName(_) => "BLANK_NAME",
            Self::DuplicateParticipant(_) => "DUPLICATE_PARTICIPANT",
            Self::AmountOverflow => "AMOUNT_OVERFLOW",
            Self::UnbalancedAccounts(_) => "UNBALANCED_ACCOUNTS",
            Self::NoPartner(_) => "NO_PARTNER",
            Self::ZeroTransfer(_) => "ZERO_TRANSFER",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::InvalidInput => 400,
            ErrorKind::InternalInvariantViolation => 500,
        }
    }

    /// Returns true if the caller can fix the error by changing the input.
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(self.kind(), ErrorKind::InvalidInput)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            SettlementError::EmptyContributions.kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            SettlementError::DuplicateParticipant("A".into()).kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            SettlementError::NoPartner("A".into()).kind(),
            ErrorKind::InternalInvariantViolation
        );
        assert_eq!(
            SettlementError::ZeroTransfer("A".into()).kind(),
            ErrorKind::InternalInvariantViolation
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            SettlementError::EmptyContributions.error_code(),
            "EMPTY_CONTRIBUTIONS"
        );
        assert_eq!(
            SettlementError::NegativeAmount {
                name: "A".into(),
                amount: dec!(-1),
            }
            .error_code(),
            "NEGATIVE_AMOUNT"
        );
        assert_eq!(
            SettlementError::UnbalancedAccounts(dec!(0.01)).error_code(),
            "UNBALANCED_ACCOUNTS"
        );
    }

    #[test]
    fn test_http_status_codes() {
        assert_eq!(SettlementError::EmptyContributions.http_status_code(), 400);
        assert_eq!(SettlementError::BlankName(0).http_status_code(), 400);
        assert_eq!(
            SettlementError::NoPartner("A".into()).http_status_code(),
            500
        );
    }

    #[test]
    fn test_error_display() {
        let err = SettlementError::ExcessPrecision {
            name: "Max".into(),
            amount: dec!(10.005),
            decimal_places: 2,
        };
        assert_eq!(
            err.to_string(),
            "Contribution from Max has more than 2 decimal places: 10.005"
        );

        let err = SettlementError::UnbalancedAccounts(dec!(0.01));
        assert_eq!(
            err.to_string(),
            "Account balances do not sum to zero (imbalance 0.01)"
        );
    }
}
