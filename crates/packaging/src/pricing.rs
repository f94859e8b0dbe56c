//! Unit price lookup.

use rust_decimal::Decimal;

use bouquet_catalog::PackagingOption;

/// Price of one package of `size`, or zero when no option has that size.
///
/// Every caller only asks for sizes taken from the same option list, so the
/// fallback is unreachable in correct use and is logged when hit.
pub fn unit_price(size: u32, options: &[PackagingOption]) -> Decimal {
    match options.iter().find(|option| option.package_size == size) {
        Some(option) => option.unit_price,
        None => {
            tracing::warn!(package_size = size, "price requested for unknown package size");
            Decimal::ZERO
        }
    }
}
