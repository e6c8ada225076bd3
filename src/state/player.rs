//! Per-player runtime state.

use crate::core::{Mana, ObjectId, PlayerId};
use serde::{Deserialize, Serialize};

/// Starting life total.
pub const STARTING_LIFE: i32 = 20;

/// One player's mutable state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// This player's object ID (players occupy the low end of the ID space).
    pub id: ObjectId,
    /// Stable 0-based seat index.
    pub index: PlayerId,
    pub name: String,
    pub life: i32,
    pub alive: bool,
    /// Set when the player drew from an empty library; the loss is applied
    /// at the next state-based-action check.
    pub drew_when_empty: bool,
    pub mana_pool: Mana,
}

impl Player {
    #[must_use]
    pub fn new(index: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id: ObjectId::player(index),
            index,
            name: name.into(),
            life: STARTING_LIFE,
            alive: true,
            drew_when_empty: false,
            mana_pool: Mana::empty(),
        }
    }

    /// Reduce life by `amount`.
    pub fn take_damage(&mut self, amount: i32) {
        self.life -= amount;
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} life)", self.name, self.life)
    }
}
