//! Rendering of command results.

use rust_decimal::Decimal;
use serde::Serialize;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

use bouquet_catalog::Event;
use bouquet_core::{DomainResult, EventId};
use bouquet_packaging::{FlowerPackagingLine, total_cost};

/// Everything `bouquet plan` reports for one event.
#[derive(Debug, Clone, Serialize)]
pub struct PlanReport {
    pub event_id: EventId,
    pub event_name: String,
    pub lines: Vec<FlowerPackagingLine>,
    pub total_cost: Decimal,
}

impl PlanReport {
    pub fn new(event: &Event, lines: Vec<FlowerPackagingLine>) -> DomainResult<Self> {
        let total_cost = total_cost(&lines)?;
        Ok(Self {
            event_id: event.id,
            event_name: event.name.clone(),
            lines,
            total_cost,
        })
    }

    pub fn to_text(&self) -> DomainResult<String> {
        let heading = format!("{} ({})", self.event_name, self.event_id);
        if self.lines.is_empty() {
            return Ok(format!("{heading}\nnothing to buy\n"));
        }

        let mut builder = Builder::default();
        builder.push_record(["Flower", "Size", "Count", "Unit price", "Total"]);
        for line in &self.lines {
            builder.push_record([
                line.flower_name.clone(),
                line.package_size.to_string(),
                line.package_count.to_string(),
                line.unit_price.to_string(),
                line.line_total()?.to_string(),
            ]);
        }

        let mut table = builder.build();
        table.with(Style::modern_rounded());
        table.modify(Columns::new(1..), Alignment::right());

        Ok(format!("{heading}\n{table}\ntotal: {}\n", self.total_cost))
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

pub fn events_text(events: &[Event]) -> String {
    if events.is_empty() {
        return "no events\n".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(["Id", "Date", "Name"]);
    for event in events {
        builder.push_record([
            event.id.to_string(),
            event.date.to_string(),
            event.name.clone(),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());
    format!("{table}\n")
}

pub fn events_json(events: &[Event]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(events)
}
