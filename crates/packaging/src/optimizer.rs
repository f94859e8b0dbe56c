//! Package allocation optimizer.
//!
//! Given one flower's demand and the packages it is sold in, choose how many
//! packages of each size to buy so that at least the demand is delivered at a
//! low total price.
//!
//! ## Search
//!
//! Sizes are visited largest first. At each level, with `s` the largest size
//! left, `q = demand / s` and `r = demand % s`:
//!
//! ```text
//! r == 0                  -> {s: q}
//! r != 0, s is smallest   -> {s: q + 1}
//! r != 0, smaller sizes   -> cheaper of
//!                              A: {s: q + 1}                     (round up)
//!                              B: {s: q} + solve(r, smaller sizes) (recurse)
//!                            A only when strictly cheaper; ties go to B
//! ```
//!
//! Each level removes one size, so the recursion depth is bounded by the number
//! of options.
//!
//! ## Not an exact optimum
//!
//! The search never buys more than one extra package of a larger size and never
//! skips a size that divides the remaining demand evenly, so the result is not
//! always the cheapest covering combination. The tie-break is part of the
//! contract: equal prices resolve to the recursive branch.

use bouquet_catalog::{PackagingOption, validate};
use bouquet_core::{DomainError, DomainResult};

use crate::allocation::Allocation;

/// A validated option list, sorted by package size, largest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageOptions(Vec<PackagingOption>);

impl PackageOptions {
    /// Validate and sort a flower's options.
    ///
    /// Rejects zero sizes, negative prices and repeated sizes.
    pub fn new(mut options: Vec<PackagingOption>) -> DomainResult<Self> {
        validate::packaging_options(&options)?;
        options.sort_by(|a, b| b.package_size.cmp(&a.package_size));
        Ok(Self(options))
    }

    pub fn as_slice(&self) -> &[PackagingOption] {
        &self.0
    }

    /// Cover `demand` flowers. Zero demand yields an empty allocation.
    pub fn allocate(&self, demand: u64) -> DomainResult<Allocation> {
        if demand == 0 {
            return Ok(Allocation::new());
        }
        if self.0.is_empty() {
            return Err(DomainError::invalid_input(format!(
                "no packaging options to cover a demand of {demand}"
            )));
        }
        solve(demand, &self.0)
    }
}

/// Cover `demand` flowers using `options` (any order).
///
/// Fails with `InvalidInput` for negative demand, for a positive demand with
/// no options, for any option list [`PackageOptions::new`] rejects, and when
/// comparing candidate prices overflows `Decimal`.
pub fn optimize(demand: i64, options: &[PackagingOption]) -> DomainResult<Allocation> {
    let demand = u64::try_from(demand).map_err(|_| {
        DomainError::invalid_input(format!("demand cannot be negative (got {demand})"))
    })?;
    PackageOptions::new(options.to_vec())?.allocate(demand)
}

/// `options` must be non-empty and sorted largest first.
fn solve(demand: u64, options: &[PackagingOption]) -> DomainResult<Allocation> {
    let Some((largest, smaller)) = options.split_first() else {
        return Ok(Allocation::new());
    };
    if demand == 0 {
        return Ok(Allocation::new());
    }

    let size = u64::from(largest.package_size);
    let tentative = Allocation::new().with(largest.package_size, demand / size);
    let remainder = demand % size;

    if remainder == 0 {
        return Ok(tentative);
    }

    let round_up = tentative.incremented(largest.package_size);
    if smaller.is_empty() {
        return Ok(round_up);
    }

    let recursed = tentative.merge(&solve(remainder, smaller)?);

    if round_up.total_price(options)? < recursed.total_price(options)? {
        Ok(round_up)
    } else {
        Ok(recursed)
    }
}
