//! Response shaping: one line per (flower, package size) to buy.

use rust_decimal::Decimal;
use serde::Serialize;

use bouquet_catalog::{Flower, PackagingOption};
use bouquet_core::{DomainError, DomainResult, FlowerId};

use crate::allocation::Allocation;
use crate::pricing::unit_price;

/// One purchase instruction: `package_count` packages of `package_size`
/// flowers of one type, at `unit_price` each.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FlowerPackagingLine {
    pub flower_id: FlowerId,
    pub flower_name: String,
    pub package_size: u32,
    pub package_count: u64,
    pub unit_price: Decimal,
}

impl FlowerPackagingLine {
    /// `unit_price × package_count`, or `InvalidInput` if that overflows.
    pub fn line_total(&self) -> DomainResult<Decimal> {
        self.unit_price
            .checked_mul(Decimal::from(self.package_count))
            .ok_or_else(|| {
                DomainError::invalid_input(format!(
                    "line total for {} x {} of {} overflows",
                    self.package_count, self.package_size, self.flower_name
                ))
            })
    }

    pub fn flowers_supplied(&self) -> u64 {
        u64::from(self.package_size).saturating_mul(self.package_count)
    }
}

/// Expand one flower's allocation into lines, largest package first.
pub fn lines_for(
    flower: &Flower,
    allocation: &Allocation,
    options: &[PackagingOption],
) -> Vec<FlowerPackagingLine> {
    allocation
        .iter()
        .map(|(package_size, package_count)| FlowerPackagingLine {
            flower_id: flower.id,
            flower_name: flower.name.clone(),
            package_size,
            package_count,
            unit_price: unit_price(package_size, options),
        })
        .collect()
}

/// Sum of every line's total.
pub fn total_cost(lines: &[FlowerPackagingLine]) -> DomainResult<Decimal> {
    lines.iter().try_fold(Decimal::ZERO, |total, line| {
        total
            .checked_add(line.line_total()?)
            .ok_or_else(|| DomainError::invalid_input("total cost overflows"))
    })
}
