//! HTML extraction: selector cascades, the events listing and fight cards.
//!
//! Every function here takes page text and returns owned records; parsed
//! documents never outlive the call.

pub mod cascade;
pub mod fights;
pub mod listing;

pub use cascade::SelectorCascade;
pub use fights::{FightCard, FightExtractor, FightMode};
pub use listing::{ListingEntry, ListingExtractor, ListingPage};

/// Result of extracting one node: a value, or the reason the node was dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemOutcome<T> {
    Extracted(T),
    Skipped { index: usize, reason: String },
}

impl<T> ItemOutcome<T> {
    pub fn is_extracted(&self) -> bool {
        matches!(self, ItemOutcome::Extracted(_))
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            ItemOutcome::Extracted(value) => Some(value),
            ItemOutcome::Skipped { .. } => None,
        }
    }
}
