//! Player configuration: name plus decklist.
//!
//! A decklist maps card names to copy counts. `BTreeMap` keeps deck
//! instantiation order deterministic regardless of how the map was built.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configuration for one player in an episode.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Display name, also used as the behavior-tracker key.
    pub name: String,
    /// Card name to copy count.
    pub decklist: BTreeMap<String, usize>,
}

impl PlayerConfig {
    /// Create a config from a name and (card name, count) pairs.
    #[must_use]
    pub fn new(name: impl Into<String>, decklist: &[(&str, usize)]) -> Self {
        Self {
            name: name.into(),
            decklist: decklist
                .iter()
                .map(|(card, count)| (card.to_string(), *count))
                .collect(),
        }
    }

    /// Total number of cards in the deck.
    #[must_use]
    pub fn deck_size(&self) -> usize {
        self.decklist.values().sum()
    }
}
