//! Summary command - distance statistics

use crate::context::Context;
use crate::InputArgs;
use anyhow::Result;
use pingrank_cli::output::{format_km, Status};

/// Run the summary command
pub fn run(ctx: &Context, input: &InputArgs, json: bool) -> Result<()> {
    let batch = ctx.load_batch(input)?;
    let summary = batch.summary();

    if json {
        let output = serde_json::json!({
            "reference": batch.reference(),
            "total_rows": batch.total_rows(),
            "skipped_rows": batch.skipped(),
            "distance": summary,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    super::report_skipped(&batch);
    Status::header("Distance summary");
    println!("  Records:  {}", summary.count);
    println!("  Closest:  {}", format_km(summary.min_km));
    println!("  Farthest: {}", format_km(summary.max_km));
    println!("  Mean:     {}", format_km(summary.mean_km));

    Ok(())
}
