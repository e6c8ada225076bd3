//! Actions: the atomic choices surfaced to agents.

use crate::core::{ObjectId, PlayerId};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Classification of an action, stable across episodes for encoders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionType {
    PriorityPlayLand,
    PriorityCastSpell,
    PriorityPassPriority,
    DeclareAttacker,
    DeclareBlocker,
}

/// What an action does, with the objects it touches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    PlayLand { card: ObjectId },
    CastSpell { card: ObjectId },
    PassPriority,
    DeclareAttacker { attacker: ObjectId, attack: bool },
    DeclareBlocker {
        blocker: ObjectId,
        /// `None` declines to block.
        attacker: Option<ObjectId>,
    },
}

impl ActionKind {
    #[must_use]
    pub const fn action_type(&self) -> ActionType {
        match self {
            ActionKind::PlayLand { .. } => ActionType::PriorityPlayLand,
            ActionKind::CastSpell { .. } => ActionType::PriorityCastSpell,
            ActionKind::PassPriority => ActionType::PriorityPassPriority,
            ActionKind::DeclareAttacker { .. } => ActionType::DeclareAttacker,
            ActionKind::DeclareBlocker { .. } => ActionType::DeclareBlocker,
        }
    }

    /// The objects this action references, for observation encoding.
    #[must_use]
    pub fn focus(&self) -> SmallVec<[ObjectId; 2]> {
        match self {
            ActionKind::PlayLand { card } | ActionKind::CastSpell { card } => {
                SmallVec::from_slice(&[*card])
            }
            ActionKind::PassPriority => SmallVec::new(),
            ActionKind::DeclareAttacker { attacker, .. } => SmallVec::from_slice(&[*attacker]),
            ActionKind::DeclareBlocker { blocker, attacker } => {
                let mut focus = SmallVec::from_slice(&[*blocker]);
                if let Some(attacker) = attacker {
                    focus.push(*attacker);
                }
                focus
            }
        }
    }
}

/// One selectable choice for one player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub player: PlayerId,
    pub kind: ActionKind,
}

impl Action {
    #[must_use]
    pub const fn new(player: PlayerId, kind: ActionKind) -> Self {
        Self { player, kind }
    }

    #[must_use]
    pub const fn action_type(&self) -> ActionType {
        self.kind.action_type()
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            ActionKind::PlayLand { card } => write!(f, "{}: play land {card}", self.player),
            ActionKind::CastSpell { card } => write!(f, "{}: cast {card}", self.player),
            ActionKind::PassPriority => write!(f, "{}: pass", self.player),
            ActionKind::DeclareAttacker { attacker, attack } => {
                if *attack {
                    write!(f, "{}: attack with {attacker}", self.player)
                } else {
                    write!(f, "{}: don't attack with {attacker}", self.player)
                }
            }
            ActionKind::DeclareBlocker { blocker, attacker } => match attacker {
                Some(attacker) => {
                    write!(f, "{}: block {attacker} with {blocker}", self.player)
                }
                None => write!(f, "{}: don't block with {blocker}", self.player),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_types() {
        let player = PlayerId::new(0);
        assert_eq!(
            Action::new(player, ActionKind::PassPriority).action_type(),
            ActionType::PriorityPassPriority
        );
        assert_eq!(
            Action::new(player, ActionKind::PlayLand { card: ObjectId(4) }).action_type(),
            ActionType::PriorityPlayLand
        );
    }

    #[test]
    fn test_focus() {
        assert!(ActionKind::PassPriority.focus().is_empty());

        let focus = ActionKind::CastSpell { card: ObjectId(9) }.focus();
        assert_eq!(focus.as_slice(), &[ObjectId(9)]);

        let focus = ActionKind::DeclareBlocker {
            blocker: ObjectId(5),
            attacker: Some(ObjectId(7)),
        }
        .focus();
        assert_eq!(focus.as_slice(), &[ObjectId(5), ObjectId(7)]);

        let focus = ActionKind::DeclareBlocker {
            blocker: ObjectId(5),
            attacker: None,
        }
        .focus();
        assert_eq!(focus.as_slice(), &[ObjectId(5)]);
    }

    #[test]
    fn test_display() {
        let action = Action::new(PlayerId::new(1), ActionKind::PassPriority);
        assert_eq!(action.to_string(), "Player 1: pass");
    }
}
