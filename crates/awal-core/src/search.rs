use crate::corpus::Corpus;
use crate::language::Language;
use crate::quote::Quote;

/// Queries shorter than this (in characters) return nothing.
pub const MIN_QUERY_CHARS: usize = 2;

/// A search match with its location in the corpus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchHit<'a> {
    pub quote: &'a Quote,
    pub language: Language,
    pub index: usize,
}

/// Case-insensitive literal substring search over text, author, source and
/// translation of every quote, in canonical corpus order.
pub fn search<'a>(corpus: &'a Corpus, query: &str) -> Vec<SearchHit<'a>> {
    if query.chars().count() < MIN_QUERY_CHARS {
        return Vec::new();
    }
    let needle = query.to_lowercase();

    corpus
        .iter()
        .filter(|(_, _, quote)| quote.matches_lowercase(&needle))
        .map(|(language, index, quote)| SearchHit {
            quote,
            language,
            index,
        })
        .collect()
}
