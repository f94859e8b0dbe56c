//! Call-recording catalog reader for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use bouquet_catalog::{
    CatalogReader, Event, Flower, FlowerInProduct, PackagingOption, ProductInEvent,
};
use bouquet_core::{DomainError, DomainResult, EventId, FlowerId, ProductId};

pub(crate) fn sample_event() -> Event {
    Event {
        id: EventId::new(),
        name: "Spring Gala".to_string(),
        date: NaiveDate::from_ymd_opt(2026, 4, 12).unwrap(),
        phone: String::new(),
        email: String::new(),
        address: String::new(),
        description: String::new(),
    }
}

pub(crate) fn flower(name: &str, packaging: Vec<PackagingOption>) -> Flower {
    Flower {
        id: FlowerId::new(),
        name: name.to_string(),
        packaging,
    }
}

/// In-test reader that logs which collaborator methods actually ran.
#[derive(Debug, Default)]
pub(crate) struct RecordingReader {
    event: Option<Event>,
    products: Vec<ProductInEvent>,
    compositions: HashMap<ProductId, Vec<FlowerInProduct>>,
    flowers: HashMap<FlowerId, Flower>,
    calls: Mutex<Vec<&'static str>>,
}

impl RecordingReader {
    pub(crate) fn with_event(mut self, event: Event) -> Self {
        self.event = Some(event);
        self
    }

    pub(crate) fn with_products(mut self, products: Vec<ProductInEvent>) -> Self {
        self.products = products;
        self
    }

    pub(crate) fn with_flowers(mut self, product: ProductId, rows: Vec<FlowerInProduct>) -> Self {
        self.compositions.insert(product, rows);
        self
    }

    pub(crate) fn with_flower(mut self, flower: Flower) -> Self {
        self.flowers.insert(flower.id, flower);
        self
    }

    pub(crate) fn event_id(&self) -> EventId {
        self.event.as_ref().map(|event| event.id).unwrap_or_default()
    }

    pub(crate) fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }

    fn flower(&self, flower_id: FlowerId) -> DomainResult<&Flower> {
        self.flowers
            .get(&flower_id)
            .ok_or_else(|| DomainError::not_found("flower", flower_id))
    }
}

#[async_trait]
impl CatalogReader for RecordingReader {
    async fn get_event(&self, event_id: EventId) -> DomainResult<Event> {
        self.record("get_event");
        self.event
            .clone()
            .filter(|event| event.id == event_id)
            .ok_or_else(|| DomainError::not_found("event", event_id))
    }

    async fn list_products_of_event(
        &self,
        _event_id: EventId,
    ) -> DomainResult<Vec<ProductInEvent>> {
        self.record("list_products_of_event");
        Ok(self.products.clone())
    }

    async fn list_flowers_of_product(
        &self,
        product_id: ProductId,
    ) -> DomainResult<Vec<FlowerInProduct>> {
        self.record("list_flowers_of_product");
        self.compositions
            .get(&product_id)
            .cloned()
            .ok_or_else(|| DomainError::not_found("product", product_id))
    }

    async fn get_flower(&self, flower_id: FlowerId) -> DomainResult<Flower> {
        self.record("get_flower");
        self.flower(flower_id).cloned()
    }

    async fn list_packaging_options(
        &self,
        flower_id: FlowerId,
    ) -> DomainResult<Vec<PackagingOption>> {
        self.record("list_packaging_options");
        Ok(self.flower(flower_id)?.packaging.clone())
    }
}
