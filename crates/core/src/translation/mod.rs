//! Translation batch rules.
//!
//! A translated entity always carries its names as a batch of
//! (language, name) pairs. The rules here decide whether a batch is
//! acceptable before any store access happens; the persistence layer
//! re-checks nothing that is decided here.

pub mod batch;
pub mod scope;
pub mod types;

pub use batch::{BatchError, validate_batch};
pub use scope::{ScopeEntry, is_name_available};
pub use types::TranslationDraft;
