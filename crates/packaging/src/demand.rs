//! Demand aggregation: how many of each flower an event needs.

use std::collections::HashMap;

use bouquet_catalog::{CatalogReader, validate};
use bouquet_core::{DomainError, DomainResult, EventId, FlowerId};

use crate::cancel::CancelToken;

/// `flower -> required quantity`. Flowers with zero demand are absent.
pub type DemandMap = HashMap<FlowerId, u64>;

/// Sum flower demand across every product attached to `event_id`.
///
/// Each flower contributes `flowers per product unit × product units in the
/// event`. Fails with `NotFound` before any other read when the event does not
/// exist; any collaborator error aborts the whole aggregation.
pub async fn aggregate_demand<R>(
    reader: &R,
    event_id: EventId,
    cancel: &CancelToken,
) -> DomainResult<DemandMap>
where
    R: CatalogReader + ?Sized,
{
    cancel.guard(reader.get_event(event_id)).await?;

    let products = cancel.guard(reader.list_products_of_event(event_id)).await?;

    let mut demand = DemandMap::new();
    for product in products {
        validate::quantity("product in event", product.quantity)?;

        let flowers = cancel
            .guard(reader.list_flowers_of_product(product.product_id))
            .await?;

        for flower in flowers {
            validate::quantity("flower in product", flower.quantity)?;

            let needed = flower
                .quantity
                .checked_mul(product.quantity)
                .and_then(|n| u64::try_from(n).ok())
                .ok_or_else(|| overflow(flower.flower_id))?;

            let total = demand.entry(flower.flower_id).or_insert(0);
            *total = total
                .checked_add(needed)
                .ok_or_else(|| overflow(flower.flower_id))?;
        }

        tracing::debug!(
            %event_id,
            product_id = %product.product_id,
            units = product.quantity,
            "product demand folded in"
        );
    }

    demand.retain(|_, quantity| *quantity > 0);
    Ok(demand)
}

fn overflow(flower_id: FlowerId) -> DomainError {
    DomainError::invalid_input(format!("demand for flower {flower_id} overflows"))
}
