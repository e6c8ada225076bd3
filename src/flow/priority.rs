//! The priority system: pass counting, state-based actions, and stack
//! resolution.
//!
//! During a priority window, players receive action spaces in
//! active-player-first order, tracked by `pass_count`. When everyone has
//! passed, the top of the stack resolves and priority restarts from the
//! active player; with an empty stack the window closes instead.
//!
//! State-based actions run once per priority round: players at zero or
//! negative life lose, players who drew from an empty library lose, and
//! creatures with lethal damage are destroyed.

use crate::agent::{Action, ActionKind, ActionSpace, ActionSpaceType};
use crate::core::{ObjectId, PlayerId};
use crate::flow::TurnSystem;
use crate::state::{GameState, ZoneType};
use serde::{Deserialize, Serialize};

/// Pass-count and state-based-action bookkeeping for one priority window.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrioritySystem {
    /// How many players have passed in succession this round.
    pub pass_count: usize,
    /// Whether state-based actions ran for this round.
    pub sba_done: bool,
    /// Set once every player passed on an empty stack; the step's window
    /// is closed for good.
    pub complete: bool,
}

impl PrioritySystem {
    /// Reopen the window, at a step boundary or after a non-pass action.
    pub fn reset(&mut self) {
        self.pass_count = 0;
        self.sba_done = false;
        self.complete = false;
    }
}

/// Fewer than two players alive.
#[must_use]
pub(crate) fn is_game_over(state: &GameState) -> bool {
    state.players.iter().filter(|p| p.alive).count() < 2
}

/// Sorcery-speed casting: active player, empty stack, main step.
#[must_use]
pub(crate) fn can_cast_sorceries(state: &GameState, turn: &TurnSystem, player: PlayerId) -> bool {
    player == turn.active_player && state.zones.stack().is_empty() && turn.step.is_main()
}

/// Land play: sorcery speed plus an unused land drop.
#[must_use]
pub(crate) fn can_play_land(state: &GameState, turn: &TurnSystem, player: PlayerId) -> bool {
    can_cast_sorceries(state, turn, player) && turn.lands_played < 1
}

/// Whether the player has any option besides passing.
fn can_player_act(state: &GameState, turn: &TurnSystem, player: PlayerId) -> bool {
    let hand = state.zones.list(ZoneType::Hand, player);
    if hand.is_empty() {
        return false;
    }

    let land_ok = can_play_land(state, turn, player);
    let cast_ok = can_cast_sorceries(state, turn, player);
    let mut producible = None;

    for &id in hand {
        let card = state.card(id);
        if card.definition.types.is_land() {
            if land_ok {
                return true;
            }
            continue;
        }
        if !card.definition.types.is_castable() || !cast_ok {
            continue;
        }
        match &card.definition.mana_cost {
            None => return true,
            Some(cost) => {
                let mana =
                    producible.get_or_insert_with(|| state.producible_mana(player));
                if mana.can_pay(cost) {
                    return true;
                }
            }
        }
    }

    false
}

/// Enumerate a player's priority actions: playable lands and castable
/// spells in hand order, then always a pass action last.
#[must_use]
pub(crate) fn priority_actions(state: &GameState, turn: &TurnSystem, player: PlayerId) -> Vec<Action> {
    let hand = state.zones.list(ZoneType::Hand, player);
    let mut actions = Vec::with_capacity(hand.len() + 1);

    let land_ok = can_play_land(state, turn, player);
    let cast_ok = can_cast_sorceries(state, turn, player);
    let mut producible = None;

    for &id in hand {
        let card = state.card(id);
        if card.definition.types.is_land() && land_ok {
            tracing::debug!(target: "priority", card = %card, "playable land");
            actions.push(Action::new(player, ActionKind::PlayLand { card: id }));
        } else if card.definition.types.is_castable() && cast_ok {
            let payable = match &card.definition.mana_cost {
                None => true,
                Some(cost) => {
                    let mana =
                        producible.get_or_insert_with(|| state.producible_mana(player));
                    mana.can_pay(cost)
                }
            };
            if payable {
                tracing::debug!(target: "priority", card = %card, "castable spell");
                actions.push(Action::new(player, ActionKind::CastSpell { card: id }));
            }
        }
    }

    actions.push(Action::new(player, ActionKind::PassPriority));
    actions
}

/// Whether the current step's priority window has closed.
#[must_use]
pub(crate) fn priority_complete(turn: &TurnSystem) -> bool {
    turn.priority.complete
}

/// Advance the priority round.
///
/// Returns the next action space to surface, or `None` when the round is
/// over (or the game ended during state-based actions). With
/// `skip_trivial`, players whose only option is passing are passed over
/// without surfacing a space at all.
pub(crate) fn priority_tick(
    state: &mut GameState,
    turn: &mut TurnSystem,
    skip_trivial: bool,
) -> Option<ActionSpace> {
    tracing::debug!(target: "priority", pass_count = turn.priority.pass_count, "priority tick");

    if !turn.priority.sba_done {
        perform_state_based_actions(state);
        turn.priority.sba_done = true;
        if is_game_over(state) {
            return None;
        }
    }

    let player_count = state.players.len();
    while turn.priority.pass_count < player_count {
        let player = turn.priority_player(player_count);

        if skip_trivial && !can_player_act(state, turn, player) {
            tracing::debug!(target: "priority", %player, "auto-passes (no actions)");
            turn.priority.pass_count += 1;
            continue;
        }

        tracing::debug!(target: "priority", %player, "generating actions");
        let actions = priority_actions(state, turn, player);
        return Some(ActionSpace::new(
            ActionSpaceType::Priority,
            Some(player),
            actions,
        ));
    }

    tracing::debug!(target: "priority", "all players have passed");
    turn.priority.pass_count = 0;
    turn.priority.sba_done = false;

    if state.zones.top_of_stack().is_some() {
        resolve_top_of_stack(state);
        return priority_tick(state, turn, skip_trivial);
    }

    turn.priority.complete = true;
    None
}

/// Apply state-based actions: loss checks, then lethal-damage destruction.
pub(crate) fn perform_state_based_actions(state: &mut GameState) {
    for i in 0..state.players.len() {
        let player = PlayerId(i as u8);
        if state.player(player).life <= 0 {
            tracing::info!(target: "priority", %player, "loses at zero life");
            state.player_mut(player).alive = false;
        }
        if state.player(player).drew_when_empty {
            tracing::info!(target: "priority", %player, "loses to an empty library");
            state.player_mut(player).alive = false;
        }
    }

    if is_game_over(state) {
        return;
    }

    let mut to_destroy: Vec<ObjectId> = Vec::new();
    for i in 0..state.players.len() {
        let player = PlayerId(i as u8);
        for &id in state.battlefield(player) {
            if let Some(permanent) = state.permanent(id) {
                if permanent.has_lethal_damage(state.card(id)) {
                    to_destroy.push(id);
                }
            }
        }
    }
    for id in to_destroy {
        tracing::info!(target: "priority", card = %state.card(id), "has lethal damage");
        state.destroy(id);
    }
}

/// Resolve the top object of the stack.
///
/// Permanents move to the battlefield; anything else goes to its owner's
/// graveyard.
pub(crate) fn resolve_top_of_stack(state: &mut GameState) {
    let Some(id) = state.zones.top_of_stack() else {
        return;
    };
    tracing::info!(target: "priority", card = %state.card(id), "resolves");
    if state.card(id).definition.types.is_permanent() {
        state.move_card(id, ZoneType::Battlefield);
    } else {
        state.move_card(id, ZoneType::Graveyard);
    }
}
