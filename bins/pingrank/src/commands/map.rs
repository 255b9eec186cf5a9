//! Map command - `{id, lat, lon}` points for map rendering

use crate::context::Context;
use crate::InputArgs;
use anyhow::Result;

/// Run the map command
pub fn run(ctx: &Context, input: &InputArgs) -> Result<()> {
    let batch = ctx.load_batch(input)?;
    super::report_skipped(&batch);
    println!("{}", serde_json::to_string_pretty(&batch.map_points())?);
    Ok(())
}
