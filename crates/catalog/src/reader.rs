//! Read interface the packaging planner consumes.

use std::sync::Arc;

use async_trait::async_trait;

use bouquet_core::{DomainResult, EventId, FlowerId, ProductId};

use crate::{Event, Flower, FlowerInProduct, PackagingOption, ProductInEvent};

/// Read-only view of the catalog store.
///
/// Implementations report missing records as `DomainError::NotFound` and store
/// failures as `DomainError::Unavailable`. Callers never retry; whatever an
/// implementation returns is propagated as-is.
#[async_trait]
pub trait CatalogReader: Send + Sync {
    async fn get_event(&self, event_id: EventId) -> DomainResult<Event>;

    /// Products attached to an event, with how many units of each it needs.
    async fn list_products_of_event(&self, event_id: EventId)
    -> DomainResult<Vec<ProductInEvent>>;

    /// Flowers making up one unit of a product.
    async fn list_flowers_of_product(
        &self,
        product_id: ProductId,
    ) -> DomainResult<Vec<FlowerInProduct>>;

    async fn get_flower(&self, flower_id: FlowerId) -> DomainResult<Flower>;

    async fn list_packaging_options(
        &self,
        flower_id: FlowerId,
    ) -> DomainResult<Vec<PackagingOption>>;
}

#[async_trait]
impl<R> CatalogReader for Arc<R>
where
    R: CatalogReader + ?Sized,
{
    async fn get_event(&self, event_id: EventId) -> DomainResult<Event> {
        (**self).get_event(event_id).await
    }

    async fn list_products_of_event(
        &self,
        event_id: EventId,
    ) -> DomainResult<Vec<ProductInEvent>> {
        (**self).list_products_of_event(event_id).await
    }

    async fn list_flowers_of_product(
        &self,
        product_id: ProductId,
    ) -> DomainResult<Vec<FlowerInProduct>> {
        (**self).list_flowers_of_product(product_id).await
    }

    async fn get_flower(&self, flower_id: FlowerId) -> DomainResult<Flower> {
        (**self).get_flower(flower_id).await
    }

    async fn list_packaging_options(
        &self,
        flower_id: FlowerId,
    ) -> DomainResult<Vec<PackagingOption>> {
        (**self).list_packaging_options(flower_id).await
    }
}
