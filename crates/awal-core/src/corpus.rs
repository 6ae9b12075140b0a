use std::collections::HashMap;

use crate::error::{AwalError, Result};
use crate::language::Language;
use crate::quote::Quote;

/// Immutable quote collection partitioned by language.
///
/// Built once at startup; nothing mutates it afterwards, so it can be shared
/// freely (e.g. behind an `Arc`) between controllers.
#[derive(Clone, Debug, Default)]
pub struct Corpus {
    buckets: [Vec<Quote>; 2],
}

impl Corpus {
    /// Build from a language -> quotes mapping. Every language must be present,
    /// even if its bucket is empty.
    pub fn from_buckets(mut buckets: HashMap<Language, Vec<Quote>>) -> Result<Self> {
        let french = buckets
            .remove(&Language::French)
            .ok_or(AwalError::MissingLanguage(Language::French))?;
        let kabyle = buckets
            .remove(&Language::Kabyle)
            .ok_or(AwalError::MissingLanguage(Language::Kabyle))?;
        Ok(Self::new(french, kabyle))
    }

    pub fn new(french: Vec<Quote>, kabyle: Vec<Quote>) -> Self {
        Self {
            buckets: [french, kabyle],
        }
    }

    pub fn get_all(&self, language: Language) -> &[Quote] {
        &self.buckets[language.slot()]
    }

    pub fn count(&self, language: Language) -> usize {
        self.buckets[language.slot()].len()
    }

    /// Total quotes across both languages.
    pub fn total(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn get(&self, language: Language, index: usize) -> Option<&Quote> {
        self.buckets[language.slot()].get(index)
    }

    /// Position of the first quote in `language` sharing `quote`'s key.
    pub fn index_of(&self, language: Language, quote: &Quote) -> Option<usize> {
        self.get_all(language)
            .iter()
            .position(|q| q.same_as(quote))
    }

    /// First language and index holding a quote with `quote`'s key.
    pub fn locate(&self, quote: &Quote) -> Option<(Language, usize)> {
        Language::ALL
            .into_iter()
            .find_map(|lang| self.index_of(lang, quote).map(|i| (lang, i)))
    }

    /// Every quote in canonical order: French first, then Kabyle, each in
    /// index order.
    pub fn iter(&self) -> impl Iterator<Item = (Language, usize, &Quote)> {
        Language::ALL.into_iter().flat_map(move |lang| {
            self.get_all(lang)
                .iter()
                .enumerate()
                .map(move |(i, q)| (lang, i, q))
        })
    }
}
