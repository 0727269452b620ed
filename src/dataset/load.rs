use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info, warn};

use super::coerce::coerce_number;
use super::{Dataset, Provenance, Record, RowRejection};
use crate::error::LoadError;
use crate::source::DataSource;
use crate::util::{now_utc_string, sha256_bytes};

const AREA_COLUMNS: [&str; 3] = ["alue", "Alue", "ALUE"];
const TOTAL_COLUMN: &str = "kaikki";
const FOREIGN_LANGUAGE_COLUMN: &str = "vieraskieliset";

/// Fetches the source and builds a validated dataset from it.
pub fn load(source: &DataSource) -> Result<Dataset, LoadError> {
    let body = source.fetch_bytes()?;
    parse_dataset(&body, &source.location())
}

/// Header positions of the columns the loader reads.
#[derive(Debug, Default)]
struct ColumnMap {
    // In lookup order; the first one the row actually has wins.
    area: Vec<usize>,
    total: Option<usize>,
    foreign_language: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Self {
        let position = |name: &str| headers.iter().position(|header| header == name);

        Self {
            area: AREA_COLUMNS.iter().filter_map(|name| position(*name)).collect(),
            total: position(TOTAL_COLUMN),
            foreign_language: position(FOREIGN_LANGUAGE_COLUMN),
        }
    }

    fn read_record(&self, row: &StringRecord) -> Result<Record, RowRejection> {
        let area = self
            .area
            .iter()
            .find_map(|&index| row.get(index))
            .unwrap_or_default();
        let total = coerce_number(self.total.and_then(|index| row.get(index)));
        let foreign_language =
            coerce_number(self.foreign_language.and_then(|index| row.get(index)));

        Record::new(area, total, foreign_language)
    }
}

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Parses `;`-delimited UTF-8 input. Rows failing validation, including rows
/// that are not valid UTF-8, are dropped one by one; only an unreadable
/// header fails the whole parse.
pub fn parse_dataset(input: impl AsRef<[u8]>, location: &str) -> Result<Dataset, LoadError> {
    let input = input.as_ref();
    let input = input.strip_prefix(UTF8_BOM).unwrap_or(input);

    let mut reader = ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|source| LoadError::Parse {
            location: location.to_string(),
            source,
        })?
        .clone();
    let columns = ColumnMap::from_headers(&headers);

    if columns.area.is_empty() || columns.total.is_none() || columns.foreign_language.is_none() {
        warn!(
            source = location,
            headers = ?headers.iter().collect::<Vec<_>>(),
            "expected columns missing from header"
        );
    }

    let mut records = Vec::new();
    let mut rows_parsed = 0_usize;
    let mut rows_dropped = 0_usize;

    for (index, row) in reader.records().enumerate() {
        rows_parsed += 1;
        let row = match row {
            Ok(row) => row,
            Err(err) => {
                rows_dropped += 1;
                debug!(row = index + 1, error = %err, "dropped unreadable row");
                continue;
            }
        };

        match columns.read_record(&row) {
            Ok(record) => records.push(record),
            Err(reason) => {
                rows_dropped += 1;
                debug!(row = index + 1, reason = reason.as_str(), "dropped malformed row");
            }
        }
    }

    let provenance = Provenance {
        location: location.to_string(),
        sha256: sha256_bytes(input),
        loaded_at: now_utc_string(),
        rows_parsed,
        rows_dropped,
    };
    let dataset = Dataset::new(records, Some(provenance));

    info!(
        source = location,
        rows_parsed,
        rows_dropped,
        records = dataset.len(),
        baseline = dataset.baseline().is_some(),
        "dataset loaded"
    );
    if !dataset.is_empty() && dataset.baseline().is_none() {
        warn!(source = location, "baseline row missing from dataset");
    }

    Ok(dataset)
}
