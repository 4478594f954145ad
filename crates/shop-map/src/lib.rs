//! Header mapping for product uploads.
//!
//! Maps uploaded column names onto the canonical header catalog:
//!
//! - [`score`] rates one uploaded name against one canonical header
//!   (exact 100, containment 80, word overlap up to 60);
//! - [`MappingEngine`] produces top-3 suggestions per column and the initial
//!   automatic [`HeaderMap`](shop_model::HeaderMap);
//! - [`MappingState`] layers authoritative user overrides on top.

#![deny(unsafe_code)]

mod engine;
mod error;
mod score;
mod state;
mod utils;

pub use engine::{ColumnSuggestions, MappingEngine, MappingResult};
pub use error::MappingError;
pub use score::{
    AUTO_MAP_MIN_SCORE, CONTAINS_SCORE, EXACT_SCORE, MAX_SUGGESTIONS, MatchKind, MatchScore,
    SUGGESTION_MIN_SCORE, Suggestion, WORD_OVERLAP_WEIGHT, score,
};
pub use state::{ColumnStatus, MappingState, MappingSummary};
pub use utils::{normalize_text, tokenize};
