//! Event packaging service: "what do I need to buy for this event?"

use bouquet_catalog::CatalogReader;
use bouquet_core::{DomainResult, EventId};

use crate::cancel::CancelToken;
use crate::demand::aggregate_demand;
use crate::optimizer::PackageOptions;
use crate::report::{FlowerPackagingLine, lines_for};

/// Computes per-flower package purchases for an event.
///
/// Generic over the catalog reader so tests and the in-memory store plug in
/// the same way a database-backed reader would.
#[derive(Debug, Clone)]
pub struct PackagingService<R> {
    reader: R,
}

impl<R> PackagingService<R>
where
    R: CatalogReader,
{
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    /// Aggregate the event's flower demand, then allocate packages per flower.
    ///
    /// Lines are ordered by flower name, then by package size (largest first).
    /// Callers should not rely on that order for anything but display.
    ///
    /// Any error (missing event/product/flower, invalid packaging, store
    /// failure, cancellation) aborts the whole computation.
    #[tracing::instrument(skip(self, cancel), fields(flowers))]
    pub async fn compute_event_packaging(
        &self,
        event_id: EventId,
        cancel: &CancelToken,
    ) -> DomainResult<Vec<FlowerPackagingLine>> {
        let demand = aggregate_demand(&self.reader, event_id, cancel).await?;
        tracing::Span::current().record("flowers", demand.len());

        let mut flowers: Vec<_> = demand.into_iter().collect();
        flowers.sort_unstable_by_key(|(flower_id, _)| *flower_id);

        let mut lines = Vec::new();
        for (flower_id, quantity) in flowers {
            let flower = cancel.guard(self.reader.get_flower(flower_id)).await?;
            let options = cancel
                .guard(self.reader.list_packaging_options(flower_id))
                .await?;

            let options = PackageOptions::new(options)?;
            let allocation = options.allocate(quantity)?;

            tracing::debug!(
                %flower_id,
                flower = %flower.name,
                demand = quantity,
                supplied = allocation.supplied(),
                "allocated packages"
            );

            lines.extend(lines_for(&flower, &allocation, options.as_slice()));
        }

        lines.sort_by(|a, b| {
            a.flower_name
                .cmp(&b.flower_name)
                .then(a.flower_id.cmp(&b.flower_id))
                .then(b.package_size.cmp(&a.package_size))
        });

        tracing::info!(%event_id, lines = lines.len(), "event packaging computed");
        Ok(lines)
    }
}
