//! Observations: the agent-facing projection of game state.
//!
//! Built fresh at every decision point. The agent is always the first
//! configured player ("hero"); the decision holder is exposed through
//! `TurnData::priority_player_id` and the action space. Hidden zones
//! stay hidden: the opponent's hand and library appear only as counts.

use crate::agent::{ActionSpace, ActionSpaceType, ActionType};
use crate::core::{ObjectId, PlayerId};
use crate::flow::{PhaseType, StepType};
use crate::game::Game;
use crate::state::ZoneType;
use serde::{Deserialize, Serialize};

/// Where in the turn the decision point sits.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnData {
    pub turn_number: u64,
    pub phase: PhaseType,
    pub step: StepType,
    pub active_player_id: PlayerId,
    pub agent_player_id: PlayerId,
    /// The player the pending action space belongs to, if any.
    pub priority_player_id: Option<PlayerId>,
}

/// One player's visible summary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerData {
    pub id: ObjectId,
    pub player_index: PlayerId,
    pub is_agent: bool,
    pub is_active: bool,
    pub life: i32,
    pub alive: bool,
    /// Card counts in canonical zone order.
    pub zone_counts: [usize; 7],
}

/// A visible card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardData {
    pub id: ObjectId,
    pub registry_key: u32,
    pub owner_id: PlayerId,
    pub zone: ZoneType,
    pub mana_value: u32,
    pub power: i32,
    pub toughness: i32,
    pub is_land: bool,
    pub is_creature: bool,
    pub is_castable: bool,
}

/// A battlefield permanent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermanentData {
    pub id: ObjectId,
    pub controller_id: PlayerId,
    pub tapped: bool,
    pub summoning_sick: bool,
    pub damage: i32,
    pub attacking: bool,
    pub power: i32,
    pub toughness: i32,
    pub is_land: bool,
    pub is_creature: bool,
}

/// One selectable option, reduced to type plus object references.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOption {
    pub action_type: ActionType,
    pub focus: Vec<ObjectId>,
}

/// The pending decision, as the agent sees it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSpaceData {
    pub space_type: ActionSpaceType,
    pub player: Option<PlayerId>,
    pub actions: Vec<ActionOption>,
    pub generation: u64,
}

impl ActionSpaceData {
    fn from_space(space: &ActionSpace) -> Self {
        Self {
            space_type: space.space_type,
            player: space.player,
            actions: space
                .actions
                .iter()
                .map(|a| ActionOption {
                    action_type: a.action_type(),
                    focus: a.kind.focus().to_vec(),
                })
                .collect(),
            generation: space.generation,
        }
    }
}

/// Snapshot of everything the agent may see at a decision point.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub game_over: bool,
    /// Whether the agent won; meaningful only when `game_over` is set.
    pub won: bool,
    pub turn: TurnData,
    pub action_space: ActionSpaceData,
    pub agent: PlayerData,
    pub opponent: PlayerData,
    pub agent_cards: Vec<CardData>,
    pub opponent_cards: Vec<CardData>,
    pub agent_permanents: Vec<PermanentData>,
    pub opponent_permanents: Vec<PermanentData>,
}

impl Observation {
    /// Agent role: always the first configured player.
    pub const AGENT: PlayerId = PlayerId(0);

    #[must_use]
    pub fn new(game: &Game) -> Self {
        let agent_id = Self::AGENT;
        let opponent_id = agent_id.opponent();
        let space = game.action_space().expect("observation at decision point");

        let game_over = game.is_over();
        let won = game_over && game.winner() == Some(agent_id);

        Self {
            game_over,
            won,
            turn: TurnData {
                turn_number: game.turn.turn_number,
                phase: game.turn.step.phase(),
                step: game.turn.step,
                active_player_id: game.turn.active_player,
                agent_player_id: agent_id,
                priority_player_id: space.player,
            },
            action_space: ActionSpaceData::from_space(space),
            agent: Self::player_data(game, agent_id),
            opponent: Self::player_data(game, opponent_id),
            agent_cards: Self::visible_cards(game, agent_id, true),
            opponent_cards: Self::visible_cards(game, opponent_id, false),
            agent_permanents: Self::permanents(game, agent_id),
            opponent_permanents: Self::permanents(game, opponent_id),
        }
    }

    fn player_data(game: &Game, id: PlayerId) -> PlayerData {
        let player = game.state.player(id);
        PlayerData {
            id: player.id,
            player_index: id,
            is_agent: id == Self::AGENT,
            is_active: id == game.turn.active_player,
            life: player.life,
            alive: player.alive,
            zone_counts: game.state.zones.counts_for(id),
        }
    }

    fn visible_cards(game: &Game, owner: PlayerId, include_hand: bool) -> Vec<CardData> {
        let mut cards = Vec::new();
        for zone in ZoneType::ALL {
            if zone == ZoneType::Library {
                continue;
            }
            if zone == ZoneType::Hand && !include_hand {
                continue;
            }
            for &id in game.state.zones.list(zone, owner) {
                let card = game.state.card(id);
                cards.push(CardData {
                    id,
                    registry_key: card.registry_key,
                    owner_id: owner,
                    zone,
                    mana_value: card.definition.mana_value(),
                    power: card.power(),
                    toughness: card.toughness(),
                    is_land: card.definition.types.is_land(),
                    is_creature: card.definition.types.is_creature(),
                    is_castable: card.definition.types.is_castable(),
                });
            }
        }
        cards
    }

    fn permanents(game: &Game, controller: PlayerId) -> Vec<PermanentData> {
        game.state
            .battlefield(controller)
            .iter()
            .filter_map(|&id| {
                let permanent = game.state.permanent(id)?;
                let card = game.state.card(id);
                Some(PermanentData {
                    id,
                    controller_id: permanent.controller,
                    tapped: permanent.tapped,
                    summoning_sick: permanent.summoning_sick,
                    damage: permanent.damage,
                    attacking: permanent.attacking,
                    power: card.power(),
                    toughness: card.toughness(),
                    is_land: card.definition.types.is_land(),
                    is_creature: card.definition.types.is_creature(),
                })
            })
            .collect()
    }

    /// Internal-consistency predicate, used by tests and debugging tools.
    #[must_use]
    pub fn validate(&self) -> bool {
        if self.won && !self.game_over {
            return false;
        }
        if !self.agent.is_agent || self.opponent.is_agent {
            return false;
        }
        if self.agent.player_index == self.opponent.player_index {
            return false;
        }
        if self.turn.agent_player_id != self.agent.player_index {
            return false;
        }
        if self.turn.priority_player_id != self.action_space.player {
            return false;
        }
        if self.action_space.space_type == ActionSpaceType::GameOver {
            if !self.game_over || !self.action_space.actions.is_empty() {
                return false;
            }
        } else if self.action_space.actions.is_empty() {
            return false;
        }
        if self.agent_permanents.len() != self.agent.zone_counts[ZoneType::Battlefield.index()] {
            return false;
        }
        if self.opponent_permanents.len()
            != self.opponent.zone_counts[ZoneType::Battlefield.index()]
        {
            return false;
        }
        if self.agent_cards.iter().any(|c| c.owner_id != self.agent.player_index) {
            return false;
        }
        if self
            .opponent_cards
            .iter()
            .any(|c| c.owner_id != self.opponent.player_index || c.zone == ZoneType::Hand)
        {
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerConfig;

    fn game() -> Game {
        let configs = vec![
            PlayerConfig::new("hero", &[("Mountain", 20), ("Grey Ogre", 20)]),
            PlayerConfig::new("villain", &[("Forest", 20), ("Llanowar Elves", 20)]),
        ];
        Game::new(
            &configs,
            9,
            true,
            crate::infra::Profiler::new(false),
            crate::core::PlayerMap::new(2, |_| crate::agent::BehaviorTracker::new(false)),
        )
        .unwrap()
    }

    #[test]
    fn test_observation_validates() {
        let game = game();
        let obs = Observation::new(&game);
        assert!(obs.validate());
        assert!(!obs.game_over);
        assert!(!obs.won);
    }

    #[test]
    fn test_agent_is_first_player() {
        let game = game();
        let obs = Observation::new(&game);
        assert_eq!(obs.agent.player_index, PlayerId(0));
        assert!(obs.agent.is_agent);
        assert!(!obs.opponent.is_agent);
    }

    #[test]
    fn test_zone_counts_sum_to_deck() {
        let game = game();
        let obs = Observation::new(&game);
        assert_eq!(obs.agent.zone_counts.iter().sum::<usize>(), 40);
        assert_eq!(obs.opponent.zone_counts.iter().sum::<usize>(), 40);
        assert_eq!(obs.agent.zone_counts[ZoneType::Hand.index()], 7);
    }

    #[test]
    fn test_opponent_hand_is_hidden() {
        let game = game();
        let obs = Observation::new(&game);
        assert!(obs
            .opponent_cards
            .iter()
            .all(|c| c.zone != ZoneType::Hand && c.zone != ZoneType::Library));
        // Counts still expose hand size.
        assert_eq!(obs.opponent.zone_counts[ZoneType::Hand.index()], 7);
    }

    #[test]
    fn test_agent_hand_is_visible() {
        let game = game();
        let obs = Observation::new(&game);
        let hand_cards = obs
            .agent_cards
            .iter()
            .filter(|c| c.zone == ZoneType::Hand)
            .count();
        assert_eq!(hand_cards, 7);
    }

    #[test]
    fn test_action_space_data_matches_pending_space() {
        let game = game();
        let obs = Observation::new(&game);
        let space = game.action_space().unwrap();
        assert_eq!(obs.action_space.actions.len(), space.len());
        assert_eq!(obs.action_space.generation, space.generation);
        assert_eq!(obs.action_space.player, space.player);
    }

    #[test]
    fn test_serde_roundtrip() {
        let game = game();
        let obs = Observation::new(&game);
        let json = serde_json::to_string(&obs).unwrap();
        let back: Observation = serde_json::from_str(&json).unwrap();
        assert_eq!(obs, back);
    }
}
