//! Rank command - every row ordered by distance from the reference point

use crate::context::Context;
use crate::{InputArgs, OutputFormat};
use anyhow::Result;
use pingrank_cli::output::{format_count, format_km, render_table, Status};
use pingrank_core::export::{ranked_to_json, write_ranked_csv};
use pingrank_core::RankedRecord;
use std::io;

/// Run the rank command
pub fn run(ctx: &Context, input: &InputArgs, format: OutputFormat, limit: Option<usize>) -> Result<()> {
    let batch = ctx.load_batch(input)?;
    super::report_skipped(&batch);

    let shown = limit.unwrap_or(usize::MAX).min(batch.ranked().len());
    let ranked = &batch.ranked()[..shown];

    match format {
        OutputFormat::Csv => write_ranked_csv(io::stdout().lock(), batch.headers(), ranked)?,
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&ranked_to_json(batch.headers(), ranked))?);
        }
        OutputFormat::Table => {
            let reference = batch.reference();
            Status::header(&format!(
                "Distance from ({}, {})",
                reference.latitude, reference.longitude
            ));
            print!("{}", render_table(&table_headers(), &table_rows(ranked)));
            let total = format_count(batch.ranked().len(), "record", "records");
            if shown < batch.ranked().len() {
                Status::info(&format!("{} of {} ranked", shown, total));
            } else {
                Status::info(&format!("{} ranked", total));
            }
        }
    }

    Ok(())
}

fn table_headers() -> Vec<String> {
    ["#", "ID", "Latitude", "Longitude", "Distance"]
        .iter()
        .map(|h| h.to_string())
        .collect()
}

fn table_rows(ranked: &[RankedRecord]) -> Vec<Vec<String>> {
    ranked
        .iter()
        .map(|entry| {
            vec![
                entry.distance_order.to_string(),
                entry.record.id.clone(),
                entry.record.latitude().to_string(),
                entry.record.longitude().to_string(),
                format_km(entry.distance_km),
            ]
        })
        .collect()
}
