use std::fmt;

/// A single quote from the corpus.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Quote {
    pub text: String,
    pub author: String,
    pub source: Option<String>,
    /// Gloss of a Kabyle quote.
    pub translation: Option<String>,
}

impl Quote {
    pub fn new(text: &str, author: &str) -> Self {
        Self {
            text: text.to_string(),
            author: author.to_string(),
            source: None,
            translation: None,
        }
    }

    pub fn with_source(mut self, source: &str) -> Self {
        self.source = Some(source.to_string());
        self
    }

    pub fn with_translation(mut self, translation: &str) -> Self {
        self.translation = Some(translation.to_string());
        self
    }

    /// Deduplication key. Two quotes are the same quote iff their text is equal;
    /// author and source are ignored.
    pub fn key(&self) -> &str {
        &self.text
    }

    /// Same quote by key.
    pub fn same_as(&self, other: &Quote) -> bool {
        self.key() == other.key()
    }

    /// Literal substring match of an already-lowercased needle against every
    /// searchable field. Missing optional fields never match.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        let hit = |field: &str| field.to_lowercase().contains(needle);
        hit(&self.text)
            || hit(&self.author)
            || self.source.as_deref().is_some_and(hit)
            || self.translation.as_deref().is_some_and(hit)
    }
}

/// `"text" — author, source`
impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" — {}", self.text, self.author)?;
        if let Some(source) = &self.source {
            write!(f, ", {source}")?;
        }
        Ok(())
    }
}
