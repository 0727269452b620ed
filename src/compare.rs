use serde::Serialize;

use crate::dataset::Record;

/// Percentage-point difference below which two shares count as equal.
pub const ABOUT_EQUAL_THRESHOLD: f64 = 0.5;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    AboutEqual,
    Above,
    Below,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AboutEqual => "about-equal",
            Self::Above => "above",
            Self::Below => "below",
        }
    }

    pub fn sentence(self) -> &'static str {
        match self {
            Self::AboutEqual => "Osuus on samaa luokkaa kuin koko Suomessa.",
            Self::Above => "Osuus on suurempi kuin tyypillisesti koko maassa.",
            Self::Below => "Osuus on pienempi kuin tyypillisesti koko maassa.",
        }
    }
}

pub fn compare(selected: &Record, baseline: &Record) -> Category {
    let delta = selected.foreign_language_share() - baseline.foreign_language_share();

    if delta.abs() < ABOUT_EQUAL_THRESHOLD {
        Category::AboutEqual
    } else if delta > 0.0 {
        Category::Above
    } else {
        Category::Below
    }
}
