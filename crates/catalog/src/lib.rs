//! Catalog domain module.
//!
//! Flowers (with their purchasable packaging), products (bundles of flowers)
//! and events (bundles of products), plus the read interface the packaging
//! planner consumes. Pure domain types: no IO, no HTTP, no storage.

pub mod event;
pub mod flower;
pub mod product;
pub mod reader;
pub mod validate;

pub use event::{Event, EventFilter, EventUpdate, NewEvent, ProductInEvent};
pub use flower::{Flower, FlowerFilter, FlowerUpdate, NewFlower, PackagingOption};
pub use product::{FlowerInProduct, NewProduct, Product, ProductFilter, ProductUpdate};
pub use reader::CatalogReader;
