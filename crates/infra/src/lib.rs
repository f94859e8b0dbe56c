//! Infrastructure layer: catalog storage and fixture loading.

pub mod catalog;
pub mod fixture;


pub use catalog::InMemoryCatalog;
pub use fixture::{CatalogFixture, FixtureError, load_catalog};
