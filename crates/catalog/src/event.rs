use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use bouquet_core::{DomainResult, Entity, EventId, ProductId, ValueObject};

use crate::validate;

/// Entity: an occasion that needs a set of products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub description: String,
}

impl Event {
    pub fn create(id: EventId, request: NewEvent) -> DomainResult<Self> {
        validate::name("event", &request.name)?;

        Ok(Self {
            id,
            name: request.name.trim().to_string(),
            date: request.date,
            phone: request.phone,
            email: request.email,
            address: request.address,
            description: request.description,
        })
    }

    pub fn apply(&mut self, update: EventUpdate) -> DomainResult<()> {
        validate::name("event", &update.name)?;

        self.name = update.name.trim().to_string();
        self.date = update.date;
        self.phone = update.phone;
        self.email = update.email;
        self.address = update.address;
        self.description = update.description;
        Ok(())
    }
}

impl Entity for Event {
    type Id = EventId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Composition row: how many units of a product an event needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductInEvent {
    pub product_id: ProductId,
    pub quantity: i64,
}

impl ProductInEvent {
    pub fn new(product_id: ProductId, quantity: i64) -> Self {
        Self {
            product_id,
            quantity,
        }
    }
}

impl ValueObject for ProductInEvent {}

/// Request: create an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEvent {
    pub name: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub description: String,
}

/// Request: edit an event (full replacement of its editable fields).
pub type EventUpdate = NewEvent;

/// Listing filter. `date` matches exactly; text criteria match
/// case-insensitively as substrings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFilter {
    pub name: Option<String>,
    pub date: Option<NaiveDate>,
    pub address: Option<String>,
    pub description: Option<String>,
}

impl EventFilter {
    pub fn matches(&self, event: &Event) -> bool {
        let text = |needle: &Option<String>, haystack: &str| {
            needle
                .as_deref()
                .is_none_or(|needle| validate::contains_ignore_case(haystack, needle))
        };

        text(&self.name, &event.name)
            && self.date.is_none_or(|date| date == event.date)
            && text(&self.address, &event.address)
            && text(&self.description, &event.description)
    }
}
