//! JSON serde for the preloaded corpus dataset.
//!
//! The dataset is one object keyed by language code (`fr`, `kab`), each
//! holding an array of quotes. The translation field is stored as `def`;
//! `translation` is accepted on input too.

use serde::{Deserialize, Serialize};

use crate::corpus::Corpus;
use crate::error::{AwalError, Result};
use crate::language::Language;
use crate::quote::Quote;

// --- Wire format types ---

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct WireCorpus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fr: Option<Vec<WireQuote>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kab: Option<Vec<WireQuote>>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct WireQuote {
    pub text: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, alias = "translation", skip_serializing_if = "Option::is_none")]
    pub def: Option<String>,
}

// --- Conversion ---

impl From<WireQuote> for Quote {
    fn from(w: WireQuote) -> Self {
        Quote {
            text: w.text,
            author: w.author,
            source: w.source,
            translation: w.def,
        }
    }
}

impl From<&Quote> for WireQuote {
    fn from(q: &Quote) -> Self {
        WireQuote {
            text: q.text.clone(),
            author: q.author.clone(),
            source: q.source.clone(),
            def: q.translation.clone(),
        }
    }
}

impl WireCorpus {
    /// Convert to a domain corpus. Both language keys must be present.
    pub fn into_corpus(self) -> Result<Corpus> {
        let convert = |bucket: Option<Vec<WireQuote>>, lang: Language| {
            bucket
                .map(|quotes| quotes.into_iter().map(Quote::from).collect::<Vec<_>>())
                .ok_or(AwalError::MissingLanguage(lang))
        };
        let french = convert(self.fr, Language::French)?;
        let kabyle = convert(self.kab, Language::Kabyle)?;
        Ok(Corpus::new(french, kabyle))
    }

    pub fn from_corpus(corpus: &Corpus) -> Self {
        let bucket = |lang: Language| -> Option<Vec<WireQuote>> {
            Some(corpus.get_all(lang).iter().map(WireQuote::from).collect())
        };
        WireCorpus {
            fr: bucket(Language::French),
            kab: bucket(Language::Kabyle),
        }
    }
}

// --- Public API ---

/// Parse a dataset JSON document into a corpus.
pub fn parse_corpus(json: &str) -> Result<Corpus> {
    let wire: WireCorpus = serde_json::from_str(json)?;
    let corpus = wire.into_corpus()?;
    tracing::debug!(
        fr = corpus.count(Language::French),
        kab = corpus.count(Language::Kabyle),
        "corpus parsed"
    );
    Ok(corpus)
}

/// Serialize a corpus to pretty-printed dataset JSON.
pub fn export_corpus(corpus: &Corpus) -> Result<String> {
    Ok(serde_json::to_string_pretty(&WireCorpus::from_corpus(corpus))?)
}
