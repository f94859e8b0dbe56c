//! Allocation: how many packages of each size to buy for one flower.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use bouquet_catalog::PackagingOption;
use bouquet_core::{DomainError, DomainResult};

use crate::pricing::unit_price;

/// Mapping `package_size -> package_count`.
///
/// Every stored count is at least one; sizes with no packages are absent.
/// Allocations are values: combining two builds a new one instead of
/// mutating either side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Allocation(BTreeMap<u32, u64>);

impl Allocation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy with `count` packages of `size`. A zero count removes the size.
    pub fn with(mut self, size: u32, count: u64) -> Self {
        if count == 0 {
            self.0.remove(&size);
        } else {
            self.0.insert(size, count);
        }
        self
    }

    /// Returns a copy with one more package of `size`.
    pub fn incremented(&self, size: u32) -> Self {
        let count = self.count(size) + 1;
        self.clone().with(size, count)
    }

    /// Sum of both allocations, adding counts where sizes coincide.
    pub fn merge(&self, other: &Allocation) -> Self {
        let mut merged = self.0.clone();
        for (&size, &count) in &other.0 {
            *merged.entry(size).or_insert(0) += count;
        }
        Self(merged)
    }

    pub fn count(&self, size: u32) -> u64 {
        self.0.get(&size).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `(package_size, package_count)` pairs, largest package first.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u64)> + '_ {
        self.0.iter().rev().map(|(&size, &count)| (size, count))
    }

    /// Total flowers delivered: `Σ size × count`.
    pub fn supplied(&self) -> u64 {
        self.0
            .iter()
            .map(|(&size, &count)| u64::from(size).saturating_mul(count))
            .fold(0, u64::saturating_add)
    }

    /// Total price: `Σ count × price(size)` against the given option list.
    ///
    /// Fails with `InvalidInput` when the total does not fit in a `Decimal`.
    pub fn total_price(&self, options: &[PackagingOption]) -> DomainResult<Decimal> {
        self.0.iter().try_fold(Decimal::ZERO, |total, (&size, &count)| {
            unit_price(size, options)
                .checked_mul(Decimal::from(count))
                .and_then(|line| total.checked_add(line))
                .ok_or_else(|| {
                    DomainError::invalid_input(format!(
                        "price of {count} packages of {size} overflows"
                    ))
                })
        })
    }
}

impl FromIterator<(u32, u64)> for Allocation {
    fn from_iter<I: IntoIterator<Item = (u32, u64)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |allocation, (size, count)| {
                let total = allocation.count(size) + count;
                allocation.with(size, total)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn merge_sums_shared_sizes_and_leaves_inputs_untouched() {
        let left: Allocation = [(10, 1), (5, 2)].into_iter().collect();
        let right: Allocation = [(5, 1), (1, 3)].into_iter().collect();

        let merged = left.merge(&right);

        assert_eq!(merged.count(10), 1);
        assert_eq!(merged.count(5), 3);
        assert_eq!(merged.count(1), 3);
        assert_eq!(left.count(5), 2);
        assert_eq!(right.count(5), 1);
    }

    #[test]
    fn incremented_adds_a_missing_size() {
        let allocation = Allocation::new().incremented(25);
        assert_eq!(allocation.count(25), 1);
        assert_eq!(allocation.len(), 1);
    }

    #[test]
    fn zero_counts_are_never_stored() {
        let allocation = Allocation::new().with(10, 0);
        assert!(allocation.is_empty());

        let collected: Allocation = [(10, 0), (5, 0)].into_iter().collect();
        assert!(collected.is_empty());
    }

    #[test]
    fn supplied_and_price_follow_counts() {
        let options = [
            PackagingOption::new(10, dec!(1.00)),
            PackagingOption::new(5, dec!(0.75)),
        ];
        let allocation: Allocation = [(10, 1), (5, 2)].into_iter().collect();

        assert_eq!(allocation.supplied(), 20);
        assert_eq!(allocation.total_price(&options).unwrap(), dec!(2.50));
    }

    #[test]
    fn price_overflow_is_an_error() {
        let options = [PackagingOption::new(10, Decimal::MAX)];
        let allocation = Allocation::new().with(10, 2);

        let err = allocation.total_price(&options).unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[test]
    fn iterates_largest_package_first() {
        let allocation: Allocation = [(5, 1), (25, 2), (10, 3)].into_iter().collect();
        let sizes: Vec<u32> = allocation.iter().map(|(size, _)| size).collect();
        assert_eq!(sizes, vec![25, 10, 5]);
    }
}
