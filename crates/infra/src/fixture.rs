//! JSON catalog fixtures.
//!
//! A fixture lists flowers, products and events with explicit ids, plus the
//! composition of each product and event. Loading one seeds an
//! [`InMemoryCatalog`] in dependency order: flowers, then products and their
//! flowers, then events and their products.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use bouquet_catalog::{FlowerInProduct, NewEvent, NewFlower, NewProduct, ProductInEvent};
use bouquet_core::{DomainError, EventId, FlowerId, ProductId};

use crate::catalog::InMemoryCatalog;

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed to read fixture {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed fixture: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("fixture rejected by catalog: {0}")]
    Domain(#[from] DomainError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogFixture {
    #[serde(default)]
    pub flowers: Vec<FlowerFixture>,
    #[serde(default)]
    pub products: Vec<ProductFixture>,
    #[serde(default)]
    pub events: Vec<EventFixture>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowerFixture {
    pub id: FlowerId,
    #[serde(flatten)]
    pub flower: NewFlower,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFixture {
    pub id: ProductId,
    #[serde(flatten)]
    pub product: NewProduct,
    #[serde(default)]
    pub flowers: Vec<FlowerInProduct>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFixture {
    pub id: EventId,
    #[serde(flatten)]
    pub event: NewEvent,
    #[serde(default)]
    pub products: Vec<ProductInEvent>,
}

impl CatalogFixture {
    pub fn from_json(json: &str) -> Result<Self, FixtureError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| FixtureError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Seed `catalog` with every record in the fixture.
    ///
    /// Stops at the first rejected record; records seeded before it stay.
    pub fn seed(self, catalog: &InMemoryCatalog) -> Result<(), FixtureError> {
        for FlowerFixture { id, flower } in self.flowers {
            catalog.create_flower_with_id(id, flower)?;
        }

        for ProductFixture {
            id,
            product,
            flowers,
        } in self.products
        {
            catalog.create_product_with_id(id, product)?;
            if !flowers.is_empty() {
                catalog.add_flowers_to_product(id, flowers)?;
            }
        }

        for EventFixture {
            id,
            event,
            products,
        } in self.events
        {
            catalog.create_event_with_id(id, event)?;
            if !products.is_empty() {
                catalog.add_products_to_event(id, products)?;
            }
        }

        Ok(())
    }

    /// Build a fresh catalog from this fixture.
    pub fn into_catalog(self) -> Result<InMemoryCatalog, FixtureError> {
        let catalog = InMemoryCatalog::new();
        self.seed(&catalog)?;
        Ok(catalog)
    }
}

/// Read a fixture file and build a catalog from it.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<InMemoryCatalog, FixtureError> {
    let fixture = CatalogFixture::from_path(path)?;
    let catalog = fixture.into_catalog()?;
    tracing::info!("catalog fixture loaded");
    Ok(catalog)
}
