//! Settlement engine orchestrating the three stages of a run.

use rand::Rng;
use rust_decimal::Decimal;
use splitpot_shared::types::Currency;

use super::balance::{BalanceCalculator, BalanceSheet};
use super::error::SettlementError;
use super::remainder::RemainderAllocator;
use super::resolver::DebtResolver;
use super::types::{Account, Contribution, Transaction};

/// Result of one settlement run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    /// Currency the run was settled in.
    pub currency: Currency,
    /// Opening accounts after remainder allocation, in input order.
    pub accounts: Vec<Account>,
    /// Sum of all contributions.
    pub total: Decimal,
    /// Per-participant share.
    pub average: Decimal,
    /// Truncation remainder charged to one account.
    pub remainder: Decimal,
    /// Index into `accounts` of the account charged with the remainder.
    pub remainder_holder: Option<usize>,
    /// Transfers in generation order.
    pub transactions: Vec<Transaction>,
}

impl Settlement {
    /// Returns the transfers in generation order.
    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Consumes the settlement, keeping only the transfers.
    #[must_use]
    pub fn into_transactions(self) -> Vec<Transaction> {
        self.transactions
    }

    /// Returns true if nobody needs to pay anybody.
    #[must_use]
    pub fn is_settled_up(&self) -> bool {
        self.transactions.is_empty()
    }
}

/// Engine for settling a shared-expense pool.
///
/// Holds no per-run state, so one engine can serve concurrent callers as
/// long as each supplies its own random source.
#[derive(Debug, Clone, Copy)]
pub struct SettlementEngine {
    currency: Currency,
    calculator: BalanceCalculator,
}

impl SettlementEngine {
    /// Creates an engine settling at `decimal_places` precision.
    #[must_use]
    pub const fn new(currency: Currency, decimal_places: u32) -> Self {
        Self {
            currency,
            calculator: BalanceCalculator::new(decimal_places),
        }
    }

    /// Creates an engine settling at the currency's minor-unit precision.
    #[must_use]
    pub const fn for_currency(currency: Currency) -> Self {
        Self::new(currency, currency.minor_units())
    }

    /// Returns the settlement currency.
    #[must_use]
    pub const fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns the settlement precision.
    #[must_use]
    pub const fn decimal_places(&self) -> u32 {
        self.calculator.decimal_places()
    }

    /// Settles `contributions`, drawing the remainder holder from `rng`.
    ///
    /// # Errors
    ///
    /// Returns an input error if the contributions are rejected, or an
    /// invariant error if resolution cannot complete. Nothing is returned
    /// on failure.
    pub fn settle(
        &self,
        contributions: &[Contribution],
        rng: &mut impl Rng,
    ) -> Result<Settlement, SettlementError> {
        let BalanceSheet {
            mut accounts,
            total,
            average,
            remainder,
        } = self.calculator.calculate(contributions)?;

        let remainder_holder = RemainderAllocator::allocate(&mut accounts, remainder, rng);
        let opening = accounts.clone();
        let transactions = DebtResolver::new(average).resolve(&mut accounts)?;

        Ok(Settlement {
            currency: self.currency,
            accounts: opening,
            total,
            average,
            remainder,
            remainder_holder,
            transactions,
        })
    }
}

impl Default for SettlementEngine {
    fn default() -> Self {
        Self::for_currency(Currency::Rub)
    }
}
