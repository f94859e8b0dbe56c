//! `bouquet-packaging`: turns an event into a flower shopping list.
//!
//! The [`demand`] aggregator sums how many of each flower an event needs, the
//! [`optimizer`] picks fixed-size packages covering each flower's demand, and
//! [`service::PackagingService`] ties both to a [`bouquet_catalog::CatalogReader`].

pub mod allocation;
pub mod cancel;
pub mod demand;
pub mod optimizer;
pub mod pricing;
pub mod report;
pub mod service;

pub use allocation::Allocation;
pub use cancel::CancelToken;
pub use demand::{DemandMap, aggregate_demand};
pub use optimizer::{PackageOptions, optimize};
pub use pricing::unit_price;
pub use report::{FlowerPackagingLine, total_cost};
pub use service::PackagingService;

#[cfg(test)]
mod test_support;
