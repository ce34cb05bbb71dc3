//! Balance calculation from raw contributions.

use std::collections::HashSet;

use rust_decimal::{Decimal, RoundingStrategy};

use super::error::SettlementError;
use super::types::{Account, Contribution};

/// Opening position of a settlement run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceSheet {
    /// One account per contribution, in input order.
    pub accounts: Vec<Account>,
    /// Sum of all contributions.
    pub total: Decimal,
    /// Per-participant share, truncated to the minor unit.
    pub average: Decimal,
    /// `total - average * n`, always less than `n` minor units.
    pub remainder: Decimal,
}

/// Turns contributions into signed balances.
#[derive(Debug, Clone, Copy)]
pub struct BalanceCalculator {
    decimal_places: u32,
}

impl BalanceCalculator {
    /// Creates a calculator working at `decimal_places` precision.
    #[must_use]
    pub const fn new(decimal_places: u32) -> Self {
        Self { decimal_places }
    }

    /// Returns the precision amounts are settled at.
    #[must_use]
    pub const fn decimal_places(&self) -> u32 {
        self.decimal_places
    }

    /// Computes the balance sheet for `contributions`.
    ///
    /// # Errors
    ///
    /// Returns an input error for an empty list, a blank or repeated name,
    /// a negative amount, an amount finer than the minor unit, or a total
    /// too large to split at that precision.
    pub fn calculate(&self, contributions: &[Contribution]) -> Result<BalanceSheet, SettlementError> {
        if contributions.is_empty() {
            return Err(SettlementError::EmptyContributions);
        }

        let mut seen = HashSet::with_capacity(contributions.len());
        let mut total = Decimal::ZERO;

        for (position, contribution) in contributions.iter().enumerate() {
            let name = contribution.name.trim();
            if name.is_empty() {
                return Err(SettlementError::BlankName(position));
            }
            if !seen.insert(name) {
                return Err(SettlementError::DuplicateParticipant(name.to_string()));
            }
            self.validate_amount(name, contribution.amount)?;

            total = total
                .checked_add(contribution.amount)
                .ok_or(SettlementError::AmountOverflow)?;
        }

        let count = Decimal::from(contributions.len());
        let (average, remainder) = self.split_total(total, count)?;

        let accounts = contributions
            .iter()
            .map(|c| Account::open(c.name.trim(), c.amount, average))
            .collect();

        Ok(BalanceSheet {
            accounts,
            total,
            average,
            remainder,
        })
    }

    /// Splits `total` into `count` equal shares truncated to the minor unit,
    /// plus a remainder in `[0, count)` minor units.
    ///
    /// Near the top of the decimal range the division itself rounds to the
    /// available digits and may round up, so the share is stepped down one
    /// minor unit when it overshoots.
    fn split_total(&self, total: Decimal, count: Decimal) -> Result<(Decimal, Decimal), SettlementError> {
        let unit = Decimal::new(1, self.decimal_places);
        let mut average = (total / count)
            .round_dp_with_strategy(self.decimal_places, RoundingStrategy::ToZero);

        let shared = match average.checked_mul(count) {
            Some(shared) if shared <= total => shared,
            _ => {
                average = average
                    .checked_sub(unit)
                    .ok_or(SettlementError::AmountOverflow)?;
                average
                    .checked_mul(count)
                    .filter(|shared| *shared <= total)
                    .ok_or(SettlementError::AmountOverflow)?
            }
        };

        let remainder = total - shared;
        let bound = unit.checked_mul(count).ok_or(SettlementError::AmountOverflow)?;
        if remainder >= bound {
            // Minor units are no longer representable at this magnitude
            return Err(SettlementError::AmountOverflow);
        }

        Ok((average, remainder))
    }

    fn validate_amount(&self, name: &str, amount: Decimal) -> Result<(), SettlementError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(SettlementError::NegativeAmount {
                name: name.to_string(),
                amount,
            });
        }
        if amount.normalize().scale() > self.decimal_places {
            return Err(SettlementError::ExcessPrecision {
                name: name.to_string(),
                amount,
                decimal_places: self.decimal_places,
            });
        }
        Ok(())
    }
}
