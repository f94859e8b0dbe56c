//! `bouquet`: plan flower package purchases for catalog events.

use std::sync::Arc;

use anyhow::Context;

use bouquet_catalog::EventFilter;
use bouquet_core::EventId;
use bouquet_infra::{InMemoryCatalog, load_catalog};
use bouquet_packaging::{CancelToken, PackagingService};

use crate::config::{CliConfig, Command, OutputFormat};
use crate::output::{PlanReport, events_json, events_text};

mod config;
mod output;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::load().unwrap_or_else(|e| e.exit());

    bouquet_observability::init(config.log_format, &config.log_level);

    let catalog = load_catalog(&config.catalog)
        .with_context(|| format!("loading catalog {}", config.catalog.display()))?;
    let catalog = Arc::new(catalog);

    let rendered = match config.command {
        Command::Plan { event_id } => plan(catalog, event_id, config.output).await?,
        Command::Events { name } => list_events(&catalog, name, config.output)?,
    };

    print!("{rendered}");
    Ok(())
}

async fn plan(
    catalog: Arc<InMemoryCatalog>,
    event_id: EventId,
    output: OutputFormat,
) -> anyhow::Result<String> {
    let cancel = CancelToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received; cancelling");
            on_interrupt.cancel();
        }
    });

    let event = catalog
        .event(event_id)
        .with_context(|| format!("looking up event {event_id}"))?;
    let service = PackagingService::new(Arc::clone(&catalog));
    let lines = service
        .compute_event_packaging(event_id, &cancel)
        .await
        .with_context(|| format!("computing packaging for event {event_id}"))?;

    let report = PlanReport::new(&event, lines)?;
    Ok(match output {
        OutputFormat::Text => report.to_text()?,
        OutputFormat::Json => report.to_json()? + "\n",
    })
}

fn list_events(
    catalog: &InMemoryCatalog,
    name: Option<String>,
    output: OutputFormat,
) -> anyhow::Result<String> {
    let filter = EventFilter {
        name,
        ..EventFilter::default()
    };
    let events = catalog.list_events(&filter)?;

    Ok(match output {
        OutputFormat::Text => events_text(&events),
        OutputFormat::Json => events_json(&events)? + "\n",
    })
}
