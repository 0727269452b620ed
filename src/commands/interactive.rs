use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use tracing::{info, warn};

use super::output::write_text_view;
use crate::cli::InteractiveArgs;
use crate::dataset::load;
use crate::source::DataSource;
use crate::state::{AppEvent, AppState, derive_view, transition};

#[derive(Debug, PartialEq, Eq)]
enum SessionInput {
    Query(String),
    Pick(usize),
    Reload,
    Quit,
}

fn parse_input(line: &str) -> SessionInput {
    let trimmed = line.trim();
    match trimmed {
        ":quit" | ":q" => return SessionInput::Quit,
        ":reload" => return SessionInput::Reload,
        _ => {}
    }

    if let Some(rest) = trimmed.strip_prefix(":pick") {
        if let Ok(index) = rest.trim().parse::<usize>() {
            return SessionInput::Pick(index);
        }
    }

    SessionInput::Query(line.to_string())
}

pub fn run(args: InteractiveArgs) -> Result<()> {
    let source = args.source.data_source();
    info!(source = %source, "interactive session started");

    let stdin = io::stdin();
    let mut output = io::BufWriter::new(io::stdout().lock());
    run_session(&source, stdin.lock(), &mut output)
}

/// Last rendered frame, keyed on what the view derives from.
#[derive(Default)]
struct FrameCache {
    key: Option<(String, u64)>,
    frame: String,
}

impl FrameCache {
    fn render(&mut self, state: &AppState) -> Result<&str> {
        let key = (state.query().to_string(), state.dataset_version());
        if self.key.as_ref() != Some(&key) {
            let mut buffer = Vec::new();
            write_text_view(&mut buffer, &derive_view(state)).context("failed to render view")?;
            self.frame = String::from_utf8_lossy(&buffer).into_owned();
            self.key = Some(key);
        }
        Ok(&self.frame)
    }
}

fn run_session<R: BufRead, W: Write>(source: &DataSource, input: R, output: &mut W) -> Result<()> {
    let mut cache = FrameCache::default();
    let mut state = AppState::default();

    writeln!(output, "Ladataan aineistoa: {source}")?;
    output.flush()?;
    state = transition(state, AppEvent::LoadFinished(load(source)));
    write_frame(output, cache.render(&state)?)?;

    for line in input.lines() {
        let line = line.context("failed to read input line")?;

        state = match parse_input(&line) {
            SessionInput::Quit => break,
            SessionInput::Reload => {
                info!(source = %source, "reloading dataset");
                transition(state, AppEvent::LoadFinished(load(source)))
            }
            SessionInput::Pick(position) => {
                let picked = derive_view(&state)
                    .suggestions
                    .get(position.wrapping_sub(1))
                    .map(|record| record.area_name().to_string());
                match picked {
                    Some(area_name) => transition(state, AppEvent::SuggestionClicked(area_name)),
                    None => {
                        warn!(position, "no suggestion at position");
                        state
                    }
                }
            }
            SessionInput::Query(query) => transition(state, AppEvent::QueryChanged(query)),
        };

        write_frame(output, cache.render(&state)?)?;
    }

    output.flush()?;
    Ok(())
}

fn write_frame<W: Write>(output: &mut W, frame: &str) -> Result<()> {
    writeln!(output, "----")?;
    output.write_all(frame.as_bytes())?;
    output.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn temp_csv(name: &str, text: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "kotikunta-{name}-{}.csv",
            std::process::id()
        ));
        std::fs::write(&path, text).expect("write temp csv");
        path
    }

    fn session(source: &DataSource, input: &str) -> String {
        let mut output = Vec::new();
        run_session(source, Cursor::new(input.to_string()), &mut output).expect("session");
        String::from_utf8(output).expect("utf-8 output")
    }

    #[test]
    fn parse_input_recognizes_commands() {
        assert_eq!(parse_input(":quit"), SessionInput::Quit);
        assert_eq!(parse_input(" :reload "), SessionInput::Reload);
        assert_eq!(parse_input(":pick 2"), SessionInput::Pick(2));
        assert_eq!(
            parse_input(":pick two"),
            SessionInput::Query(":pick two".to_string())
        );
        assert_eq!(
            parse_input("  Helsinki "),
            SessionInput::Query("  Helsinki ".to_string())
        );
    }

    #[test]
    fn session_resolves_each_line_and_picks_suggestions() {
        let path = temp_csv(
            "session",
            "alue;kaikki;vieraskieliset\nKerava;100;10\nKemi;100;1\nKOKO MAA;1000;50\n",
        );
        let source = DataSource::File(path.clone());

        let rendered = session(&source, "ke\n:pick 2\n:quit\nignored\n");
        let _ = std::fs::remove_file(&path);

        let frames: Vec<&str> = rendered.split("----\n").collect();
        assert_eq!(frames.len(), 4);
        assert!(frames[0].starts_with("Ladataan aineistoa:"));
        assert!(frames[1].contains("Hae kuntaa ja näet tuloksen."));
        assert!(frames[2].contains("  1. Kerava"));
        assert!(frames[2].contains("  2. Kemi"));
        assert!(frames[2].contains("Osuus on suurempi"));
        assert!(frames[3].contains("Haku: Kemi"));
        assert!(frames[3].contains("Osuus on pienempi"));
        assert!(!rendered.contains("ignored"));
    }

    #[test]
    fn unreadable_source_renders_load_error_on_every_frame() {
        let path = temp_csv(
            "gone",
            "alue;kaikki;vieraskieliset\nHelsinki;1000;150\nKOKO MAA;500000;40000\n",
        );
        let source = DataSource::File(path.clone());
        assert!(session(&source, "Helsinki\n").contains("15,0 %"));

        std::fs::remove_file(&path).expect("remove temp csv");
        let rendered = session(&source, "Helsinki\n:reload\n");

        assert_eq!(rendered.matches("Datan lataus epäonnistui.").count(), 3);
        assert!(!rendered.contains("15,0 %"));
    }

    #[test]
    fn frame_cache_reuses_frame_for_same_query_and_version() {
        let state = transition(AppState::default(), AppEvent::QueryChanged("x".to_string()));
        let mut cache = FrameCache::default();

        let first = cache.render(&state).expect("render").to_string();
        let key = cache.key.clone();
        let second = cache.render(&state).expect("render").to_string();

        assert_eq!(first, second);
        assert_eq!(cache.key, key);
        assert_eq!(key, Some(("x".to_string(), 0)));
    }
}
