use serde::Serialize;

use crate::normalize::{is_space, normalize_str};

mod coerce;
mod load;

pub use load::{load, parse_dataset};

/// Area name of the national aggregate row.
pub const BASELINE_AREA: &str = "KOKO MAA";

pub fn baseline_key() -> String {
    normalize_str(BASELINE_AREA)
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RowRejection {
    MissingArea,
    NonFiniteTotal,
    NonPositiveTotal,
    NonFiniteForeignLanguage,
    NegativeForeignLanguage,
}

impl RowRejection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingArea => "missing_area",
            Self::NonFiniteTotal => "non_finite_total",
            Self::NonPositiveTotal => "non_positive_total",
            Self::NonFiniteForeignLanguage => "non_finite_foreign_language",
            Self::NegativeForeignLanguage => "negative_foreign_language",
        }
    }
}

/// One area of the dataset. Fields are fixed at construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    area_name: String,
    #[serde(skip)]
    normalized_key: String,
    total_children: f64,
    foreign_language_children: f64,
    foreign_language_share: f64,
}

impl Record {
    pub fn new(
        area_name: &str,
        total_children: f64,
        foreign_language_children: f64,
    ) -> Result<Self, RowRejection> {
        let area_name = area_name.trim_matches(is_space);
        if area_name.is_empty() {
            return Err(RowRejection::MissingArea);
        }
        if !total_children.is_finite() {
            return Err(RowRejection::NonFiniteTotal);
        }
        if total_children <= 0.0 {
            return Err(RowRejection::NonPositiveTotal);
        }
        if !foreign_language_children.is_finite() {
            return Err(RowRejection::NonFiniteForeignLanguage);
        }
        if foreign_language_children < 0.0 {
            return Err(RowRejection::NegativeForeignLanguage);
        }

        Ok(Self {
            area_name: area_name.to_string(),
            normalized_key: normalize_str(area_name),
            total_children,
            foreign_language_children,
            foreign_language_share: foreign_language_children / total_children * 100.0,
        })
    }

    pub fn area_name(&self) -> &str {
        &self.area_name
    }

    pub fn normalized_key(&self) -> &str {
        &self.normalized_key
    }

    pub fn total_children(&self) -> f64 {
        self.total_children
    }

    pub fn foreign_language_children(&self) -> f64 {
        self.foreign_language_children
    }

    pub fn foreign_language_share(&self) -> f64 {
        self.foreign_language_share
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Provenance {
    pub location: String,
    pub sha256: String,
    pub loaded_at: String,
    pub rows_parsed: usize,
    pub rows_dropped: usize,
}

/// Validated records in source order, with the baseline located by key.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
    baseline_index: Option<usize>,
    provenance: Option<Provenance>,
}

impl Dataset {
    pub fn new(records: Vec<Record>, provenance: Option<Provenance>) -> Self {
        let key = baseline_key();
        let baseline_index = records
            .iter()
            .position(|record| record.normalized_key() == key);

        Self {
            records,
            baseline_index,
            provenance,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn baseline(&self) -> Option<&Record> {
        self.baseline_index.and_then(|index| self.records.get(index))
    }

    /// Records eligible for matching: everything except baseline rows.
    pub fn candidates(&self) -> impl Iterator<Item = &Record> {
        let key = baseline_key();
        self.records
            .iter()
            .filter(move |record| record.normalized_key() != key)
    }

    pub fn provenance(&self) -> Option<&Provenance> {
        self.provenance.as_ref()
    }

    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            record_count: self.len(),
            baseline_present: self.baseline().is_some(),
            provenance: self.provenance.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub record_count: usize,
    pub baseline_present: bool,
    pub provenance: Option<Provenance>,
}
