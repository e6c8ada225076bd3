//! Action spaces: the ordered choice sets surfaced at decision points.
//!
//! A space is answered by index. Ordering is deterministic: the same
//! state always enumerates the same actions in the same order. Every
//! space carries a generation stamp; the engine refuses to execute
//! against a superseded space, so a stale index can never corrupt state.

use crate::agent::Action;
use crate::core::PlayerId;
use serde::{Deserialize, Serialize};

/// What kind of decision a space represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionSpaceType {
    Priority,
    DeclareAttacker,
    DeclareBlocker,
    /// Terminal marker: the game is over, no actions are available.
    GameOver,
}

/// An ordered set of choices for one player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSpace {
    pub space_type: ActionSpaceType,
    /// The player who must choose; `None` only for `GameOver`.
    pub player: Option<PlayerId>,
    pub actions: Vec<Action>,
    /// Stamp assigned when the space is surfaced. Executing against an
    /// older stamp is rejected as fatal.
    pub generation: u64,
}

impl ActionSpace {
    #[must_use]
    pub fn new(space_type: ActionSpaceType, player: Option<PlayerId>, actions: Vec<Action>) -> Self {
        Self {
            space_type,
            player,
            actions,
            generation: 0,
        }
    }

    /// The terminal space surfaced once the game ends.
    #[must_use]
    pub fn game_over() -> Self {
        Self::new(ActionSpaceType::GameOver, None, Vec::new())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// A space with at most one option carries no real decision.
    #[must_use]
    pub fn is_trivial(&self) -> bool {
        self.actions.len() <= 1
    }
}

impl std::fmt::Display for ActionSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}[", self.space_type)?;
        for (i, action) in self.actions.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{i}: {action}")?;
        }
        write!(f, "]")
    }
}
