//! Combat: attacker/blocker declaration and damage.
//!
//! Declarations are surfaced one creature at a time. At the start of the
//! declare-attackers step the active player's eligible creatures are
//! queued; each is offered a two-option space (attack / don't). Blockers
//! work the same way for the defending player, with one option per
//! attacker plus a decline option last. The damage step is fully
//! turn-based: blocked attackers trade damage with their blockers,
//! unblocked attackers hit the defending player.

use crate::agent::{Action, ActionKind, ActionSpace, ActionSpaceType};
use crate::core::ObjectId;
use crate::flow::TurnSystem;
use crate::state::GameState;
use serde::{Deserialize, Serialize};

/// Combat bookkeeping for the current turn.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatState {
    /// Declared attackers, in declaration order.
    pub attackers: Vec<ObjectId>,
    /// Blocker assignments per attacker, in declaration order.
    pub blocks: Vec<(ObjectId, Vec<ObjectId>)>,
    /// Creatures still awaiting an attack declaration (drained from the back).
    pub pending_attackers: Vec<ObjectId>,
    /// Creatures still awaiting a block declaration (drained from the back).
    pub pending_blockers: Vec<ObjectId>,
}

impl CombatState {
    /// Record an attack declaration.
    pub fn declare_attacker(&mut self, attacker: ObjectId) {
        self.attackers.push(attacker);
        self.blocks.push((attacker, Vec::new()));
    }

    /// Record a block declaration.
    pub fn declare_blocker(&mut self, blocker: ObjectId, attacker: ObjectId) {
        if let Some((_, blockers)) = self.blocks.iter_mut().find(|(a, _)| *a == attacker) {
            blockers.push(blocker);
        }
    }
}

/// Surface the next attack declaration, or `None` when the queue is empty.
pub(crate) fn declare_attackers_tick(
    state: &GameState,
    turn: &mut TurnSystem,
) -> Option<ActionSpace> {
    if !turn.step_initialized {
        turn.combat.pending_attackers = state.eligible_attackers(turn.active_player);
        turn.step_initialized = true;
        tracing::debug!(
            target: "combat",
            eligible = turn.combat.pending_attackers.len(),
            "declare attackers begins"
        );
    }

    let attacker = turn.combat.pending_attackers.pop()?;
    let player = turn.active_player;
    Some(ActionSpace::new(
        ActionSpaceType::DeclareAttacker,
        Some(player),
        vec![
            Action::new(
                player,
                ActionKind::DeclareAttacker {
                    attacker,
                    attack: true,
                },
            ),
            Action::new(
                player,
                ActionKind::DeclareAttacker {
                    attacker,
                    attack: false,
                },
            ),
        ],
    ))
}

/// Surface the next block declaration, or `None` when the queue is empty.
///
/// With no declared attackers there is nothing to block, so the queue
/// starts empty and the step is immediately done.
pub(crate) fn declare_blockers_tick(
    state: &GameState,
    turn: &mut TurnSystem,
) -> Option<ActionSpace> {
    if !turn.step_initialized {
        turn.combat.pending_blockers = if turn.combat.attackers.is_empty() {
            Vec::new()
        } else {
            state.eligible_blockers(turn.non_active_player())
        };
        turn.step_initialized = true;
        tracing::debug!(
            target: "combat",
            eligible = turn.combat.pending_blockers.len(),
            "declare blockers begins"
        );
    }

    let blocker = turn.combat.pending_blockers.pop()?;
    let player = turn.non_active_player();
    let mut actions: Vec<Action> = turn
        .combat
        .attackers
        .iter()
        .map(|&attacker| {
            Action::new(
                player,
                ActionKind::DeclareBlocker {
                    blocker,
                    attacker: Some(attacker),
                },
            )
        })
        .collect();
    actions.push(Action::new(
        player,
        ActionKind::DeclareBlocker {
            blocker,
            attacker: None,
        },
    ));

    Some(ActionSpace::new(
        ActionSpaceType::DeclareBlocker,
        Some(player),
        actions,
    ))
}

/// Assign combat damage. Returns the total dealt to the defending player.
pub(crate) fn deal_combat_damage(state: &mut GameState, turn: &TurnSystem) -> i32 {
    let defender = turn.non_active_player();
    let mut player_damage = 0;

    let blocks = turn.combat.blocks.clone();
    for (attacker, blockers) in &blocks {
        // The attacker may have left the battlefield since declaration.
        if state.permanent(*attacker).is_none() {
            continue;
        }
        let attacker_power = state.card(*attacker).power();

        let mut damage_to_attacker = 0;
        let mut blocked = false;
        for &blocker in blockers {
            if state.permanent(blocker).is_none() {
                continue;
            }
            blocked = true;
            let blocker_power = state.card(blocker).power();
            damage_to_attacker += blocker_power;
            tracing::info!(
                target: "combat",
                blocker = %state.card(blocker),
                attacker = %state.card(*attacker),
                "blocks"
            );
            if let Some(permanent) = state.permanent_mut(blocker) {
                permanent.take_damage(attacker_power);
            }
        }

        if blocked {
            if let Some(permanent) = state.permanent_mut(*attacker) {
                permanent.take_damage(damage_to_attacker);
            }
        } else {
            tracing::info!(
                target: "combat",
                attacker = %state.card(*attacker),
                damage = attacker_power,
                defender = %defender,
                "hits the defending player"
            );
            state.player_mut(defender).take_damage(attacker_power);
            player_damage += attacker_power;
        }
    }

    player_damage
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardRegistry;
    use crate::core::{PlayerConfig, PlayerId};
    use crate::state::ZoneType;

    const P0: PlayerId = PlayerId(0);
    const P1: PlayerId = PlayerId(1);

    fn setup() -> (GameState, TurnSystem) {
        let configs = vec![
            PlayerConfig::new("hero", &[("Grey Ogre", 20), ("Mountain", 20)]),
            PlayerConfig::new("villain", &[("Llanowar Elves", 20), ("Forest", 20)]),
        ];
        let state = GameState::new(&configs, &CardRegistry::standard(), 3).unwrap();
        let mut turn = TurnSystem::new(P0, 2);
        turn.step = crate::flow::StepType::DeclareAttackers;
        (state, turn)
    }

    fn battlefield_creature(state: &mut GameState, player: PlayerId, name: &str) -> ObjectId {
        let id = state
            .zones
            .list(ZoneType::Library, player)
            .iter()
            .copied()
            .find(|&id| state.card(id).name() == name)
            .unwrap();
        state.move_card(id, ZoneType::Battlefield);
        state.permanent_mut(id).unwrap().summoning_sick = false;
        id
    }

    #[test]
    fn test_attack_declarations_one_per_creature() {
        let (mut state, mut turn) = setup();
        let a = battlefield_creature(&mut state, P0, "Grey Ogre");
        let b = battlefield_creature(&mut state, P0, "Grey Ogre");

        let space = declare_attackers_tick(&state, &mut turn).unwrap();
        assert_eq!(space.space_type, ActionSpaceType::DeclareAttacker);
        assert_eq!(space.player, Some(P0));
        assert_eq!(space.actions.len(), 2);

        let second = declare_attackers_tick(&state, &mut turn).unwrap();
        assert_eq!(second.actions.len(), 2);

        // Both creatures covered, then the queue is done.
        let offered: Vec<ObjectId> = [space, second]
            .iter()
            .map(|s| match s.actions[0].kind {
                ActionKind::DeclareAttacker { attacker, .. } => attacker,
                _ => unreachable!(),
            })
            .collect();
        assert!(offered.contains(&a) && offered.contains(&b));
        assert!(declare_attackers_tick(&state, &mut turn).is_none());
    }

    #[test]
    fn test_no_blocker_queue_without_attackers() {
        let (mut state, mut turn) = setup();
        battlefield_creature(&mut state, P1, "Llanowar Elves");
        turn.step = crate::flow::StepType::DeclareBlockers;

        assert!(declare_blockers_tick(&state, &mut turn).is_none());
    }

    #[test]
    fn test_block_options_per_attacker_plus_decline() {
        let (mut state, mut turn) = setup();
        let ogre = battlefield_creature(&mut state, P0, "Grey Ogre");
        let elves = battlefield_creature(&mut state, P1, "Llanowar Elves");

        state.permanent_mut(ogre).unwrap().attack();
        turn.combat.declare_attacker(ogre);
        turn.step = crate::flow::StepType::DeclareBlockers;
        turn.step_initialized = false;

        let space = declare_blockers_tick(&state, &mut turn).unwrap();
        assert_eq!(space.space_type, ActionSpaceType::DeclareBlocker);
        assert_eq!(space.player, Some(P1));
        assert_eq!(space.actions.len(), 2);
        assert_eq!(
            space.actions[0].kind,
            ActionKind::DeclareBlocker {
                blocker: elves,
                attacker: Some(ogre)
            }
        );
        assert_eq!(
            space.actions.last().unwrap().kind,
            ActionKind::DeclareBlocker {
                blocker: elves,
                attacker: None
            }
        );
    }

    #[test]
    fn test_unblocked_damage_hits_player() {
        let (mut state, mut turn) = setup();
        let ogre = battlefield_creature(&mut state, P0, "Grey Ogre");
        state.permanent_mut(ogre).unwrap().attack();
        turn.combat.declare_attacker(ogre);

        let dealt = deal_combat_damage(&mut state, &turn);
        assert_eq!(dealt, 2);
        assert_eq!(state.player(P1).life, 18);
    }

    #[test]
    fn test_blocked_attackers_trade_damage() {
        let (mut state, mut turn) = setup();
        let ogre = battlefield_creature(&mut state, P0, "Grey Ogre");
        let elves = battlefield_creature(&mut state, P1, "Llanowar Elves");

        state.permanent_mut(ogre).unwrap().attack();
        turn.combat.declare_attacker(ogre);
        turn.combat.declare_blocker(elves, ogre);

        let dealt = deal_combat_damage(&mut state, &turn);
        assert_eq!(dealt, 0);
        assert_eq!(state.player(P1).life, 20);
        assert_eq!(state.permanent(elves).unwrap().damage, 2);
        assert_eq!(state.permanent(ogre).unwrap().damage, 1);
        assert!(state
            .permanent(elves)
            .unwrap()
            .has_lethal_damage(state.card(elves)));
        assert!(!state
            .permanent(ogre)
            .unwrap()
            .has_lethal_damage(state.card(ogre)));
    }

    #[test]
    fn test_destroyed_participants_are_skipped() {
        let (mut state, mut turn) = setup();
        let ogre = battlefield_creature(&mut state, P0, "Grey Ogre");
        state.permanent_mut(ogre).unwrap().attack();
        turn.combat.declare_attacker(ogre);
        state.destroy(ogre);

        let dealt = deal_combat_damage(&mut state, &turn);
        assert_eq!(dealt, 0);
        assert_eq!(state.player(P1).life, 20);
    }
}
