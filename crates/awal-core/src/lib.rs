//! Bilingual quote rotation engine.
//!
//! Cycles through a fixed French/Kabyle quote corpus without repeating a
//! quote until its language has been exhausted, keeps a short recency
//! history, and searches the corpus by substring.
//!
//! Zero I/O: the corpus is handed in preloaded, and presentation (rendering,
//! key bindings, sharing) lives with the caller.

pub mod controller;
pub mod corpus;
pub mod error;
pub mod history;
pub mod language;
pub mod pool;
pub mod quote;
pub mod search;
pub mod wire;

pub use controller::{RotationController, RotationState};
pub use corpus::Corpus;
pub use error::{AwalError, Result};
pub use history::{HISTORY_CAPACITY, History};
pub use language::Language;
pub use pool::SamplingPool;
pub use quote::Quote;
pub use search::{MIN_QUERY_CHARS, SearchHit, search};
pub use wire::{export_corpus, parse_corpus};
