//! CLI command implementations

pub mod map;
pub mod nearby;
pub mod rank;
pub mod share;
pub mod summary;

use pingrank_cli::output::format_count;
use pingrank_cli::output::Status;
use pingrank_core::ProcessedBatch;

/// Warn on stderr when rows were dropped during cleaning
pub(crate) fn report_skipped(batch: &ProcessedBatch) {
    if batch.skipped() > 0 {
        Status::warning(&format!(
            "Skipped {} of {} with missing, non-numeric or out-of-range coordinates",
            format_count(batch.skipped(), "row", "rows"),
            batch.total_rows()
        ));
    }
}
