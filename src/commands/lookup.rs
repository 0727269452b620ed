use std::io::{self, Write};

use anyhow::{Context, Result};
use tracing::{info, warn};

use super::output::{write_json, write_text_view};
use crate::cli::LookupArgs;
use crate::dataset::{Record, load};
use crate::state::{AppEvent, AppState, derive_view, transition};

pub fn run(args: LookupArgs) -> Result<()> {
    let source = args.source.data_source();
    info!(source = %source, query = %args.query, "lookup requested");

    let state = transition(AppState::default(), AppEvent::LoadFinished(load(&source)));
    let state = transition(state, AppEvent::QueryChanged(args.query));
    let view = derive_view(&state);

    if let Some(load_error) = view.load_error {
        warn!(error = load_error, "dataset unavailable");
    }
    info!(
        records = state.dataset().len(),
        suggestions = view.suggestions.len(),
        selected = view.selected.map(Record::area_name).unwrap_or_default(),
        comparison = view.comparison.map(|c| c.as_str()).unwrap_or_default(),
        "lookup resolved"
    );

    if args.json {
        return write_json(&view);
    }

    let mut output = io::BufWriter::new(io::stdout().lock());
    write_text_view(&mut output, &view).context("failed to write lookup result")?;
    output.flush()?;
    Ok(())
}
