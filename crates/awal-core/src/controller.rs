use std::collections::HashMap;
use std::sync::Arc;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::corpus::Corpus;
use crate::error::{AwalError, Result};
use crate::history::History;
use crate::language::Language;
use crate::pool::SamplingPool;
use crate::quote::Quote;
use crate::search::{SearchHit, search};

/// Whether a quote is currently displayed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RotationState {
    /// Nothing shown yet (intro screen).
    Idle,
    Showing,
}

#[derive(Clone, Debug)]
struct Shown {
    quote: Quote,
    language: Language,
}

/// Owns all mutable rotation state: sampling pools, history, current quote.
///
/// Every transition is synchronous and runs to completion. A rotation first
/// retires the current quote into history, then draws, then commits the new
/// current quote. Failed transitions leave the state untouched.
pub struct RotationController<R = SmallRng> {
    corpus: Arc<Corpus>,
    pool: SamplingPool,
    history: History,
    current: Option<Shown>,
    target: Language,
    refresh_pending: bool,
    rng: R,
}

impl RotationController<SmallRng> {
    /// Validate a language -> quotes mapping and build an OS-seeded controller.
    pub fn initialize(buckets: HashMap<Language, Vec<Quote>>) -> Result<Self> {
        Ok(Self::new(Corpus::from_buckets(buckets)?))
    }

    pub fn new(corpus: impl Into<Arc<Corpus>>) -> Self {
        Self::with_rng(corpus, SmallRng::from_os_rng())
    }

    /// Deterministic controller for a given seed.
    pub fn seeded(corpus: impl Into<Arc<Corpus>>, seed: u64) -> Self {
        Self::with_rng(corpus, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RotationController<R> {
    pub fn with_rng(corpus: impl Into<Arc<Corpus>>, rng: R) -> Self {
        let corpus = corpus.into();
        Self {
            pool: SamplingPool::new(&corpus),
            corpus,
            history: History::new(),
            current: None,
            target: Language::default(),
            refresh_pending: false,
            rng,
        }
    }

    /// Start in `language` instead of the default.
    pub fn with_language(mut self, language: Language) -> Self {
        self.target = language;
        self
    }

    /// Show a random unseen quote from `language`.
    pub fn advance(&mut self, language: Language) -> Result<&Quote> {
        if self.corpus.count(language) == 0 {
            return Err(AwalError::EmptyLanguage(language));
        }

        if let Some(prev) = self.current.take() {
            self.history.record(prev.quote);
        }

        let index = self.pool.draw_next(language, &mut self.rng)?;
        let quote = self.corpus.get_all(language)[index].clone();
        tracing::debug!(%language, index, "advanced to random quote");

        Ok(self.show(quote, language))
    }

    /// Advance in the current target language.
    pub fn advance_current(&mut self) -> Result<&Quote> {
        self.advance(self.target)
    }

    /// Show a specific quote, e.g. picked from history or search results.
    ///
    /// Re-selecting the quote already shown changes nothing. Otherwise the
    /// quote's corpus index is withdrawn from `language`'s pool so random
    /// rotation does not offer it again this cycle.
    pub fn select(&mut self, quote: Quote, language: Language) -> &Quote {
        let shown = match self.current.take() {
            Some(current) if current.quote.same_as(&quote) => {
                tracing::trace!("selected quote is already current");
                current
            }
            previous => {
                if let Some(prev) = previous {
                    self.history.record(prev.quote);
                }
                match self.corpus.index_of(language, &quote) {
                    Some(index) => self.pool.exclude_if_present(language, index),
                    None => tracing::debug!(%language, "selected quote not found in corpus"),
                }
                self.target = language;
                self.refresh_pending = true;
                Shown { quote, language }
            }
        };
        &self.current.insert(shown).quote
    }

    /// Change the target language.
    ///
    /// While idle this only retargets the next advance. While showing it
    /// advances into the new language. Re-choosing the target is a no-op.
    pub fn switch_language(&mut self, language: Language) -> Result<Option<&Quote>> {
        if language == self.target {
            return Ok(None);
        }
        match self.state() {
            RotationState::Idle => {
                self.target = language;
                Ok(None)
            }
            RotationState::Showing => self.advance(language).map(Some),
        }
    }

    fn show(&mut self, quote: Quote, language: Language) -> &Quote {
        self.target = language;
        self.refresh_pending = true;
        &self.current.insert(Shown { quote, language }).quote
    }

    /// Consume the advisory display-refresh signal raised by the last
    /// transition into `Showing`. Unconsumed signals are simply overwritten.
    pub fn take_refresh(&mut self) -> bool {
        std::mem::take(&mut self.refresh_pending)
    }

    pub fn history(&self) -> &[Quote] {
        self.history.list()
    }

    pub fn search(&self, query: &str) -> Vec<SearchHit<'_>> {
        search(&self.corpus, query)
    }

    pub fn current(&self) -> Option<&Quote> {
        self.current.as_ref().map(|s| &s.quote)
    }

    pub fn current_language(&self) -> Option<Language> {
        self.current.as_ref().map(|s| s.language)
    }

    pub fn target_language(&self) -> Language {
        self.target
    }

    pub fn state(&self) -> RotationState {
        if self.current.is_some() {
            RotationState::Showing
        } else {
            RotationState::Idle
        }
    }

    /// Quotes of `language` still unseen in the current cycle.
    pub fn remaining(&self, language: Language) -> usize {
        self.pool.remaining(language)
    }

    pub fn corpus(&self) -> &Arc<Corpus> {
        &self.corpus
    }
}
