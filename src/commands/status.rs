use std::io::{self, Write};

use anyhow::{Context, Result};
use tracing::{info, warn};

use super::output::write_json;
use crate::cli::StatusArgs;
use crate::dataset::load;

pub fn run(args: StatusArgs) -> Result<()> {
    let source = args.source.data_source();
    info!(source = %source, "status requested");

    let dataset =
        load(&source).with_context(|| format!("failed to load dataset from {source}"))?;
    let summary = dataset.summary();

    match dataset.baseline() {
        Some(baseline) => info!(
            area = baseline.area_name(),
            share = baseline.foreign_language_share(),
            "baseline row present"
        ),
        None if dataset.is_empty() => warn!("dataset has no valid rows"),
        None => warn!("baseline row missing"),
    }

    if args.json {
        return write_json(&summary);
    }

    let mut output = io::BufWriter::new(io::stdout().lock());
    writeln!(output, "Source: {source}")?;
    if let Some(provenance) = dataset.provenance() {
        writeln!(
            output,
            "Rows: parsed={} accepted={} dropped={}",
            provenance.rows_parsed, summary.record_count, provenance.rows_dropped
        )?;
        writeln!(output, "Loaded at: {}", provenance.loaded_at)?;
        writeln!(output, "SHA-256: {}", provenance.sha256)?;
    }
    writeln!(output, "Baseline present: {}", summary.baseline_present)?;
    output.flush()?;
    Ok(())
}
