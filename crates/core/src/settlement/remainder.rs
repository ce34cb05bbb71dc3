//! Remainder allocation.
//!
//! Truncating the average to the minor unit leaves up to `n - 1` minor units
//! unassigned. Charging all of it to a single account keeps the balances
//! summing to exactly zero without fractional-unit transfers.

use rand::Rng;
use rust_decimal::Decimal;

use super::types::Account;

/// Assigns the truncation remainder to one randomly chosen account.
pub struct RemainderAllocator;

impl RemainderAllocator {
    /// Adds `remainder` to the balance of a uniformly chosen account.
    ///
    /// Returns the index of the chosen account, or `None` when there is
    /// nothing to allocate. No random number is drawn in that case.
    pub fn allocate(
        accounts: &mut [Account],
        remainder: Decimal,
        rng: &mut impl Rng,
    ) -> Option<usize> {
        if remainder.is_zero() || accounts.is_empty() {
            return None;
        }

        let index = rng.random_range(0..accounts.len());
        accounts[index].balance += remainder;
        Some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rust_decimal_macros::dec;

    fn accounts() -> Vec<Account> {
        vec![
            Account::open("A", dec!(100), dec!(33.33)),
            Account::open("B", dec!(0), dec!(33.33)),
            Account::open("C", dec!(0), dec!(33.33)),
        ]
    }

    #[test]
    fn test_zero_remainder_is_noop() {
        let mut accounts = accounts();
        let before = accounts.clone();
        let mut rng = StdRng::seed_from_u64(7);

        assert_eq!(
            RemainderAllocator::allocate(&mut accounts, Decimal::ZERO, &mut rng),
            None
        );
        assert_eq!(accounts, before);
    }

    #[test]
    fn test_remainder_restores_zero_sum() {
        let mut accounts = accounts();
        let mut rng = StdRng::seed_from_u64(7);

        let index = RemainderAllocator::allocate(&mut accounts, dec!(0.01), &mut rng).unwrap();

        assert!(index < accounts.len());
        let sum: Decimal = accounts.iter().map(|a| a.balance).sum();
        assert_eq!(sum, Decimal::ZERO);
    }

    #[test]
    fn test_only_chosen_account_changes() {
        let mut accounts = accounts();
        let before = accounts.clone();
        let mut rng = StdRng::seed_from_u64(99);

        let index = RemainderAllocator::allocate(&mut accounts, dec!(0.01), &mut rng).unwrap();

        for (i, (after, before)) in accounts.iter().zip(&before).enumerate() {
            if i == index {
                assert_eq!(after.balance, before.balance + dec!(0.01));
            } else {
                assert_eq!(after, before);
            }
        }
    }

    #[test]
    fn test_same_seed_same_choice() {
        let picks: Vec<Option<usize>> = (0..2)
            .map(|_| {
                let mut rng = StdRng::seed_from_u64(2024);
                RemainderAllocator::allocate(&mut accounts(), dec!(0.02), &mut rng)
            })
            .collect();
        assert_eq!(picks[0], picks[1]);
    }

    #[test]
    fn test_every_account_can_be_chosen() {
        let mut hits = [false; 3];
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..200 {
            let index = RemainderAllocator::allocate(&mut accounts(), dec!(0.01), &mut rng).unwrap();
            hits[index] = true;
        }
        assert!(hits.iter().all(|hit| *hit));
    }
}
