use serde::{Deserialize, Serialize};

use bouquet_core::{DomainResult, Entity, FlowerId, ProductId, ValueObject};

use crate::validate;

/// Entity: a sellable arrangement made of flowers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl Product {
    pub fn create(id: ProductId, request: NewProduct) -> DomainResult<Self> {
        validate::name("product", &request.name)?;

        Ok(Self {
            id,
            name: request.name.trim().to_string(),
            description: request.description,
        })
    }

    pub fn apply(&mut self, update: ProductUpdate) -> DomainResult<()> {
        validate::name("product", &update.name)?;

        self.name = update.name.trim().to_string();
        self.description = update.description;
        Ok(())
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Composition row: how many flowers of one type go into one unit of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlowerInProduct {
    pub flower_id: FlowerId,
    /// Stored as a signed integer; negative values are rejected on write and read.
    pub quantity: i64,
}

impl FlowerInProduct {
    pub fn new(flower_id: FlowerId, quantity: i64) -> Self {
        Self {
            flower_id,
            quantity,
        }
    }
}

impl ValueObject for FlowerInProduct {}

/// Request: create a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Request: edit a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Listing filter. Text criteria match case-insensitively as substrings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFilter {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        let name_ok = self
            .name
            .as_deref()
            .is_none_or(|needle| validate::contains_ignore_case(&product.name, needle));
        let description_ok = self
            .description
            .as_deref()
            .is_none_or(|needle| validate::contains_ignore_case(&product.description, needle));
        name_ok && description_ok
    }
}
