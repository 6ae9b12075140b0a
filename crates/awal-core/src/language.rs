use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AwalError;

/// One of the two fixed language buckets of the corpus.
///
/// The declaration order is the canonical corpus order: every French quote
/// comes before every Kabyle quote when iterating or searching.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Language {
    #[default]
    #[serde(rename = "fr")]
    French,
    #[serde(rename = "kab")]
    Kabyle,
}

impl Language {
    /// Both languages in canonical order.
    pub const ALL: [Language; 2] = [Language::French, Language::Kabyle];

    /// Short code used by the wire format and the CLI.
    pub fn code(self) -> &'static str {
        match self {
            Language::French => "fr",
            Language::Kabyle => "kab",
        }
    }

    /// Slot in per-language arrays.
    pub(crate) fn slot(self) -> usize {
        match self {
            Language::French => 0,
            Language::Kabyle => 1,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = AwalError;

    /// Accepts the short code or the English name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fr" | "french" => Ok(Language::French),
            "kab" | "kabyle" => Ok(Language::Kabyle),
            _ => Err(AwalError::UnknownLanguage(s.to_string())),
        }
    }
}
