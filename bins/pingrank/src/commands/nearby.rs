//! Nearby command - rows clustered around the anchor record

use crate::context::Context;
use crate::{InputArgs, OutputFormat};
use anyhow::Result;
use pingrank_cli::output::{format_count, format_km, render_table, Status};
use pingrank_core::export::{nearby_to_json, write_nearby_csv};
use pingrank_core::{AnchorStrategy, NearbyResult};
use std::io;

/// Run the nearby command
pub fn run(
    ctx: &Context,
    input: &InputArgs,
    radius: Option<f64>,
    strategy: &AnchorStrategy,
    format: OutputFormat,
) -> Result<()> {
    let radius_km = ctx.radius_km(radius);
    let batch = ctx.load_batch(input)?;
    super::report_skipped(&batch);

    let Some(nearby) = batch.nearby(radius_km, strategy)? else {
        Status::info("No data to anchor on");
        return Ok(());
    };

    match format {
        OutputFormat::Csv => write_nearby_csv(io::stdout().lock(), batch.headers(), &nearby)?,
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&nearby_to_json(batch.headers(), &nearby))?);
        }
        OutputFormat::Table => print_table(&nearby),
    }

    Ok(())
}

fn print_table(nearby: &NearbyResult) {
    let anchor = &nearby.anchor;
    Status::header(&format!(
        "Anchor {} at ({}, {})",
        anchor.id,
        anchor.latitude(),
        anchor.longitude()
    ));

    if nearby.is_isolated() {
        Status::info(&format!(
            "Anchor {} found, nobody within {} km",
            anchor.id, nearby.radius_km
        ));
        return;
    }

    let headers: Vec<String> = ["#", "ID", "Latitude", "Longitude", "Distance"]
        .iter()
        .map(|h| h.to_string())
        .collect();
    let rows: Vec<Vec<String>> = nearby
        .members
        .iter()
        .map(|m| {
            vec![
                m.nearby_order.to_string(),
                m.record.id.clone(),
                m.record.latitude().to_string(),
                m.record.longitude().to_string(),
                format_km(m.distance_from_anchor_km),
            ]
        })
        .collect();

    print!("{}", render_table(&headers, &rows));
    Status::info(&format!(
        "{} within {} km",
        format_count(nearby.members.len(), "record", "records"),
        nearby.radius_km
    ));
}
