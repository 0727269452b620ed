use serde::Serialize;

use crate::dataset::{Dataset, Record};
use crate::normalize::normalize_str;

pub const MAX_SUGGESTIONS: usize = 8;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Resolution<'a> {
    pub suggestions: Vec<&'a Record>,
    pub selected: Option<&'a Record>,
}

/// Resolves free text against the non-baseline records: substring matches in
/// dataset order as suggestions, an exact key match preferred as selection.
pub fn resolve<'a>(query: &str, dataset: &'a Dataset) -> Resolution<'a> {
    let needle = normalize_str(query);
    if needle.is_empty() {
        return Resolution::default();
    }

    let suggestions: Vec<&Record> = dataset
        .candidates()
        .filter(|record| record.normalized_key().contains(needle.as_str()))
        .take(MAX_SUGGESTIONS)
        .collect();

    let selected = dataset
        .candidates()
        .find(|record| record.normalized_key() == needle)
        .or_else(|| suggestions.first().copied());

    Resolution {
        suggestions,
        selected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(area: &str, total: f64, foreign: f64) -> Record {
        Record::new(area, total, foreign).expect("valid record")
    }

    fn sample() -> Dataset {
        Dataset::new(
            vec![
                record("Helsinki", 1000.0, 150.0),
                record("KOKO MAA", 500_000.0, 40_000.0),
            ],
            None,
        )
    }

    fn names(records: &[&Record]) -> Vec<String> {
        records.iter().map(|r| r.area_name().to_string()).collect()
    }

    #[test]
    fn partial_query_selects_first_suggestion() {
        let dataset = sample();
        let resolution = resolve("helsin", &dataset);

        assert_eq!(names(&resolution.suggestions), vec!["Helsinki"]);
        let selected = resolution.selected.expect("selection expected");
        assert_eq!(selected.area_name(), "Helsinki");
        assert!((selected.foreign_language_share() - 15.0).abs() < 1e-9);
    }

    #[test]
    fn baseline_name_resolves_to_nothing() {
        let dataset = sample();
        let resolution = resolve("koko maa", &dataset);

        assert!(resolution.suggestions.is_empty());
        assert!(resolution.selected.is_none());

        let resolution = resolve("  KOKO   MAA ", &dataset);
        assert!(resolution.selected.is_none());
    }

    #[test]
    fn blank_query_resolves_to_nothing() {
        let dataset = sample();
        assert_eq!(resolve("", &dataset), Resolution::default());
        assert_eq!(resolve(" \t ", &dataset), Resolution::default());
    }

    #[test]
    fn query_is_case_and_whitespace_insensitive() {
        let dataset = sample();
        let resolution = resolve("  HELSINKI ", &dataset);
        assert_eq!(resolution.selected.map(Record::area_name), Some("Helsinki"));
    }

    #[test]
    fn suggestions_are_capped_and_keep_dataset_order() {
        let areas = [
            "Kaarina", "Kajaani", "Kangasala", "Kauhava", "Kempele", "Kerava", "Kaskinen",
            "Kotka", "Kouvola", "Kauniainen", "KOKO MAA",
        ];
        let dataset = Dataset::new(areas.iter().map(|a| record(a, 10.0, 1.0)).collect(), None);

        let resolution = resolve("ka", &dataset);
        assert_eq!(
            names(&resolution.suggestions),
            vec![
                "Kaarina",
                "Kajaani",
                "Kangasala",
                "Kauhava",
                "Kaskinen",
                "Kotka",
                "Kauniainen"
            ]
        );

        let resolution = resolve("k", &dataset);
        assert_eq!(resolution.suggestions.len(), MAX_SUGGESTIONS);
        assert_eq!(names(&resolution.suggestions)[..2], ["Kaarina", "Kajaani"]);
        assert!(
            resolution
                .suggestions
                .iter()
                .all(|r| r.area_name() != "KOKO MAA")
        );
    }

    #[test]
    fn exact_match_beats_earlier_substring_match() {
        let dataset = Dataset::new(
            vec![
                record("Pedersören kunta", 100.0, 5.0),
                record("Vöyri", 100.0, 2.0),
                record("Kunta", 100.0, 9.0),
            ],
            None,
        );

        let resolution = resolve("kunta", &dataset);
        assert_eq!(
            names(&resolution.suggestions),
            vec!["Pedersören kunta", "Kunta"]
        );
        assert_eq!(resolution.selected.map(Record::area_name), Some("Kunta"));
    }

    #[test]
    fn exact_match_outside_suggestion_window_still_wins() {
        let mut records: Vec<Record> = (0..10)
            .map(|i| record(&format!("Salo {i}"), 10.0, 1.0))
            .collect();
        records.push(record("Salo", 10.0, 2.0));
        let dataset = Dataset::new(records, None);

        let resolution = resolve("salo", &dataset);
        assert_eq!(resolution.suggestions.len(), MAX_SUGGESTIONS);
        assert!(resolution.suggestions.iter().all(|r| r.area_name() != "Salo"));
        assert_eq!(resolution.selected.map(Record::area_name), Some("Salo"));
    }

    #[test]
    fn no_match_yields_no_selection() {
        let dataset = sample();
        let resolution = resolve("tampere", &dataset);
        assert!(resolution.suggestions.is_empty());
        assert!(resolution.selected.is_none());
    }
}
