use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bouquet_core::{DomainResult, Entity, FlowerId, ValueObject};

use crate::validate;

/// A purchasable bundle of one flower type: a fixed flower count at a fixed price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackagingOption {
    /// Flowers per package (always positive once validated).
    pub package_size: u32,
    /// Price of one package.
    pub unit_price: Decimal,
}

impl PackagingOption {
    pub fn new(package_size: u32, unit_price: Decimal) -> Self {
        Self {
            package_size,
            unit_price,
        }
    }
}

impl ValueObject for PackagingOption {}

/// Entity: a flower type and the packages it can be bought in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flower {
    pub id: FlowerId,
    pub name: String,
    #[serde(default)]
    pub packaging: Vec<PackagingOption>,
}

impl Flower {
    /// Build a flower from a creation request, validating name and packaging.
    pub fn create(id: FlowerId, request: NewFlower) -> DomainResult<Self> {
        validate::name("flower", &request.name)?;
        validate::packaging_options(&request.packaging)?;

        Ok(Self {
            id,
            name: request.name.trim().to_string(),
            packaging: request.packaging,
        })
    }

    /// Apply an edit. Packaging is left untouched unless the update carries it.
    pub fn apply(&mut self, update: FlowerUpdate) -> DomainResult<()> {
        validate::name("flower", &update.name)?;
        if let Some(packaging) = &update.packaging {
            validate::packaging_options(packaging)?;
        }

        self.name = update.name.trim().to_string();
        if let Some(packaging) = update.packaging {
            self.packaging = packaging;
        }
        Ok(())
    }
}

impl Entity for Flower {
    type Id = FlowerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Request: create a flower.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFlower {
    pub name: String,
    #[serde(default)]
    pub packaging: Vec<PackagingOption>,
}

/// Request: edit a flower.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowerUpdate {
    pub name: String,
    #[serde(default)]
    pub packaging: Option<Vec<PackagingOption>>,
}

/// Listing filter. Text criteria match case-insensitively as substrings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowerFilter {
    pub name: Option<String>,
    /// Only flowers sold in a package of exactly this size.
    pub package_size: Option<u32>,
}

impl FlowerFilter {
    pub fn matches(&self, flower: &Flower) -> bool {
        let name_ok = self
            .name
            .as_deref()
            .is_none_or(|needle| validate::contains_ignore_case(&flower.name, needle));
        let size_ok = self.package_size.is_none_or(|size| {
            flower
                .packaging
                .iter()
                .any(|option| option.package_size == size)
        });
        name_ok && size_ok
    }
}
