//! In-game card instances.

use crate::cards::CardDefinition;
use crate::core::{ObjectId, PlayerId};
use serde::{Deserialize, Serialize};

/// A concrete copy of a card in a game.
///
/// Carries its own `ObjectId` and owner; printed data is a clone of the
/// registry definition so the game state is self-contained.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: ObjectId,
    pub owner: PlayerId,
    /// Index of the definition in the registry this card was minted from.
    pub registry_key: u32,
    pub definition: CardDefinition,
}

impl Card {
    #[must_use]
    pub fn new(id: ObjectId, owner: PlayerId, registry_key: u32, definition: CardDefinition) -> Self {
        Self {
            id,
            owner,
            registry_key,
            definition,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    /// Creature toughness, or 0 for non-creatures.
    #[must_use]
    pub fn toughness(&self) -> i32 {
        self.definition.toughness.unwrap_or(0)
    }

    /// Creature power, or 0 for non-creatures.
    #[must_use]
    pub fn power(&self) -> i32 {
        self.definition.power.unwrap_or(0)
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.definition.name, self.id.raw())
    }
}
