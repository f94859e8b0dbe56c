//! Stateless validation rules shared by the catalog and the planner.
//!
//! Plain functions over borrowed data: nothing here is constructed per call
//! and nothing holds state between calls.

use std::collections::HashSet;

use rust_decimal::Decimal;

use bouquet_core::{DomainError, DomainResult};

use crate::flower::PackagingOption;

/// Names must contain something other than whitespace.
pub fn name(entity: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::invalid_input(format!(
            "{entity} name cannot be empty"
        )));
    }
    Ok(())
}

/// Composition quantities are stored signed but must never be negative.
pub fn quantity(context: &str, value: i64) -> DomainResult<()> {
    if value < 0 {
        return Err(DomainError::invalid_input(format!(
            "{context}: quantity cannot be negative (got {value})"
        )));
    }
    Ok(())
}

/// Packaging options must have positive sizes, non-negative prices and no
/// repeated sizes.
pub fn packaging_options(options: &[PackagingOption]) -> DomainResult<()> {
    let mut seen = HashSet::with_capacity(options.len());

    for option in options {
        if option.package_size == 0 {
            return Err(DomainError::invalid_input("package size must be positive"));
        }
        if option.unit_price < Decimal::ZERO {
            return Err(DomainError::invalid_input(format!(
                "package of {} has a negative price ({})",
                option.package_size, option.unit_price
            )));
        }
        if !seen.insert(option.package_size) {
            return Err(DomainError::invalid_input(format!(
                "duplicate package size {}",
                option.package_size
            )));
        }
    }
    Ok(())
}

/// Case-insensitive substring match used by the listing filters.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
