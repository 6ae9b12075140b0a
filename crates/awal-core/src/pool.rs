use rand::Rng;

use crate::corpus::Corpus;
use crate::error::{AwalError, Result};
use crate::language::Language;

/// Per-language bag of corpus indices not yet shown in the current cycle.
///
/// Draws are without replacement: no index repeats until every other index
/// of that language has been drawn (or excluded) once. An empty bag is
/// refilled with the full index range on the next draw.
#[derive(Clone, Debug)]
pub struct SamplingPool {
    unseen: [Vec<usize>; 2],
    sizes: [usize; 2],
}

impl SamplingPool {
    /// Full pools for every language of `corpus`.
    pub fn new(corpus: &Corpus) -> Self {
        let sizes = Language::ALL.map(|lang| corpus.count(lang));
        Self {
            unseen: sizes.map(|n| (0..n).collect()),
            sizes,
        }
    }

    /// Draw a uniformly random unseen index for `language` and remove it
    /// from the bag.
    pub fn draw_next<R: Rng + ?Sized>(
        &mut self,
        language: Language,
        rng: &mut R,
    ) -> Result<usize> {
        let size = self.sizes[language.slot()];
        if size == 0 {
            return Err(AwalError::EmptyLanguage(language));
        }

        let pool = &mut self.unseen[language.slot()];
        if pool.is_empty() {
            pool.extend(0..size);
            tracing::debug!(%language, size, "sampling pool refilled");
        }

        // Bag order is irrelevant.
        let pos = rng.random_range(0..pool.len());
        Ok(pool.swap_remove(pos))
    }

    /// Remove `index` from `language`'s bag if it is still there.
    pub fn exclude_if_present(&mut self, language: Language, index: usize) {
        let pool = &mut self.unseen[language.slot()];
        if let Some(pos) = pool.iter().position(|&i| i == index) {
            pool.swap_remove(pos);
            tracing::trace!(%language, index, "excluded from sampling pool");
        }
    }

    /// Indices still unseen in the current cycle.
    pub fn remaining(&self, language: Language) -> usize {
        self.unseen[language.slot()].len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quote::Quote;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use std::collections::HashSet;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(42)
    }

    fn corpus(french: usize, kabyle: usize) -> Corpus {
        let make = |n: usize, prefix: &str| -> Vec<Quote> {
            (0..n)
                .map(|i| Quote::new(&format!("{prefix}{i}"), "Anon"))
                .collect()
        };
        Corpus::new(make(french, "fr"), make(kabyle, "kab"))
    }

    #[test]
    fn test_full_cycle_has_no_repeats() {
        let mut rng = rng();
        let mut pool = SamplingPool::new(&corpus(10, 3));
        let drawn: HashSet<usize> = (0..10)
            .map(|_| pool.draw_next(Language::French, &mut rng).unwrap())
            .collect();
        assert_eq!(drawn, (0..10).collect());
        assert_eq!(pool.remaining(Language::French), 0);
        // Other language untouched
        assert_eq!(pool.remaining(Language::Kabyle), 3);
    }

    #[test]
    fn test_exhaustion_refills() {
        let mut rng = rng();
        let mut pool = SamplingPool::new(&corpus(3, 0));
        for _ in 0..3 {
            pool.draw_next(Language::French, &mut rng).unwrap();
        }
        let next = pool.draw_next(Language::French, &mut rng).unwrap();
        assert!(next < 3);
        assert_eq!(pool.remaining(Language::French), 2);
    }

    #[test]
    fn test_empty_language_fails() {
        let mut rng = rng();
        let mut pool = SamplingPool::new(&corpus(2, 0));
        let err = pool.draw_next(Language::Kabyle, &mut rng).unwrap_err();
        assert!(matches!(err, AwalError::EmptyLanguage(Language::Kabyle)));
    }

    #[test]
    fn test_single_quote_always_zero() {
        let mut rng = rng();
        let mut pool = SamplingPool::new(&corpus(1, 0));
        for _ in 0..5 {
            assert_eq!(pool.draw_next(Language::French, &mut rng).unwrap(), 0);
        }
    }

    #[test]
    fn test_exclude_if_present() {
        let mut rng = rng();
        let mut pool = SamplingPool::new(&corpus(4, 0));
        pool.exclude_if_present(Language::French, 2);
        assert!(!pool.unseen[Language::French.slot()].contains(&2));
        assert_eq!(pool.remaining(Language::French), 3);

        // Absent index: no-op
        pool.exclude_if_present(Language::French, 2);
        pool.exclude_if_present(Language::French, 99);
        assert_eq!(pool.remaining(Language::French), 3);

        for _ in 0..3 {
            assert_ne!(pool.draw_next(Language::French, &mut rng).unwrap(), 2);
        }
    }

    #[test]
    fn test_size_invariant() {
        let mut rng = rng();
        let mut pool = SamplingPool::new(&corpus(5, 2));
        for step in 0..40 {
            let lang = if step % 3 == 0 {
                Language::Kabyle
            } else {
                Language::French
            };
            pool.draw_next(lang, &mut rng).unwrap();
            assert!(pool.remaining(Language::French) <= 5);
            assert!(pool.remaining(Language::Kabyle) <= 2);
        }
    }
}
