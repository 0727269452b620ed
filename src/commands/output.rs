use std::io::{self, Write};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::dataset::{BASELINE_AREA, Record};
use crate::format::{format_integer, format_percent};
use crate::state::View;

pub(super) fn write_json<T: Serialize>(value: &T) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());
    serde_json::to_writer_pretty(&mut output, value).context("failed to serialize json output")?;
    writeln!(output)?;
    output.flush()?;
    Ok(())
}

pub(super) fn write_text_view<W: Write>(output: &mut W, view: &View<'_>) -> io::Result<()> {
    if !view.query.trim().is_empty() {
        writeln!(output, "Haku: {}", view.query)?;
    }

    if !view.suggestions.is_empty() {
        writeln!(output, "Ehdotukset:")?;
        for (index, suggestion) in view.suggestions.iter().enumerate() {
            writeln!(output, "  {}. {}", index + 1, suggestion.area_name())?;
        }
    }

    writeln!(output)?;
    match view.selected {
        None => writeln!(output, "Hae kuntaa ja näet tuloksen.")?,
        Some(selected) => write_result_card(output, view, selected)?,
    }

    if let Some(load_error) = view.load_error {
        writeln!(output)?;
        writeln!(output, "{load_error}")?;
    }

    if view.missing_baseline {
        writeln!(output)?;
        writeln!(
            output,
            "Huom: \"{BASELINE_AREA}\" -riviä ei löytynyt datasta (tarkista, että alue-sarakkeessa lukee täsmälleen {BASELINE_AREA})."
        )?;
    }

    Ok(())
}

fn write_result_card<W: Write>(
    output: &mut W,
    view: &View<'_>,
    selected: &Record,
) -> io::Result<()> {
    writeln!(output, "{}", selected.area_name())?;
    writeln!(
        output,
        "Vieraskielisten osuus kunnan varhaiskasvatuksessa on {}",
        format_percent(selected.foreign_language_share())
    )?;
    writeln!(
        output,
        "Varhaiskasvatuksessa on yhteensä {} lasta, joista vieraskielisiä on {}.",
        format_integer(selected.total_children()),
        format_integer(selected.foreign_language_children())
    )?;

    let Some(baseline) = view.baseline else {
        return Ok(());
    };

    if let Some(comparison) = view.comparison {
        writeln!(output)?;
        writeln!(output, "{}", comparison.sentence())?;
    }

    writeln!(output)?;
    writeln!(
        output,
        "Koko Suomen päiväkodeissa vieraskielisten osuus on {}. Varhaiskasvatuksessa on yhteensä {} lasta, joista vieraskielisiä on {}.",
        format_percent(baseline.foreign_language_share()),
        format_integer(baseline.total_children()),
        format_integer(baseline.foreign_language_children())
    )?;
    writeln!(output, "Lähde: Tilastokeskus")?;
    Ok(())
}
