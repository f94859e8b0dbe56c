//! Value object trait: equality by value, not identity.
//!
//! Packaging options and composition rows are value objects: a `(10, 2.50)`
//! package is interchangeable with any other `(10, 2.50)` package of the same
//! flower.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one with the new values.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct PackagingOption {
///     package_size: u32,
///     unit_price: Decimal,
/// }
///
/// impl ValueObject for PackagingOption {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
