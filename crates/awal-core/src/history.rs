use crate::quote::Quote;

/// Number of previously shown quotes kept.
pub const HISTORY_CAPACITY: usize = 3;

/// Most-recent-first list of previously shown quotes, distinct by key.
#[derive(Clone, Debug, Default)]
pub struct History {
    entries: Vec<Quote>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a quote that just stopped being current.
    ///
    /// Recording the quote already at the front is a no-op. Otherwise any
    /// older entry with the same key is dropped before the quote is
    /// prepended, and the list is truncated to [`HISTORY_CAPACITY`].
    pub fn record(&mut self, quote: Quote) {
        if self.entries.first().is_some_and(|front| front.same_as(&quote)) {
            return;
        }
        self.entries.retain(|q| !q.same_as(&quote));
        self.entries.insert(0, quote);
        self.entries.truncate(HISTORY_CAPACITY);
    }

    pub fn list(&self) -> &[Quote] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(text: &str) -> Quote {
        Quote::new(text, "Anon")
    }

    fn texts(h: &History) -> Vec<&str> {
        h.list().iter().map(|q| q.text.as_str()).collect()
    }

    #[test]
    fn test_most_recent_first() {
        let mut h = History::new();
        h.record(q("A"));
        h.record(q("B"));
        assert_eq!(texts(&h), vec!["B", "A"]);
    }

    #[test]
    fn test_capacity_truncates_oldest() {
        let mut h = History::new();
        for t in ["A", "B", "C", "D", "E"] {
            h.record(q(t));
        }
        assert_eq!(texts(&h), vec!["E", "D", "C"]);
    }

    #[test]
    fn test_front_duplicate_is_noop() {
        let mut h = History::new();
        h.record(q("A"));
        h.record(q("B"));
        h.record(Quote::new("B", "Different author"));
        assert_eq!(texts(&h), vec!["B", "A"]);
        // The original entry is kept, not replaced.
        assert_eq!(h.list()[0].author, "Anon");
    }

    #[test]
    fn test_dedup_moves_to_front() {
        let mut h = History::new();
        h.record(q("A"));
        h.record(q("B"));
        h.record(q("C"));
        h.record(q("A"));
        assert_eq!(texts(&h), vec!["A", "C", "B"]);
    }

    #[test]
    fn test_dedup_keeps_capacity_slots() {
        let mut h = History::new();
        h.record(q("A"));
        h.record(q("B"));
        h.record(q("A"));
        assert_eq!(h.len(), 2);
        assert_eq!(texts(&h), vec!["A", "B"]);
    }

    #[test]
    fn test_empty() {
        let h = History::new();
        assert!(h.is_empty());
        assert!(h.list().is_empty());
    }
}
