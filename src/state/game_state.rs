//! The aggregate game state.
//!
//! `GameState` owns the players, every card instance, zone locations,
//! battlefield state, and the episode RNG. Flow code mutates it through
//! the methods here; all card movement funnels through `move_card` so
//! battlefield entry/exit bookkeeping cannot be skipped.

use crate::cards::{Card, CardRegistry};
use crate::core::{ConfigError, GameRng, Mana, ManaCost, ObjectId, PlayerConfig, PlayerId};
use crate::state::{Permanent, Player, ZoneType, Zones};
use rustc_hash::FxHashMap;

/// Exactly two players per episode.
pub const PLAYER_COUNT: usize = 2;

/// Full mutable state of one episode.
#[derive(Clone, Debug)]
pub struct GameState {
    pub players: Vec<Player>,
    pub zones: Zones,
    cards: FxHashMap<ObjectId, Card>,
    permanents: FxHashMap<ObjectId, Permanent>,
    pub rng: GameRng,
    next_object_id: u32,
}

impl GameState {
    /// Build the initial state: validate configs, mint decks into
    /// libraries, and shuffle. Hands are drawn by the caller as part of
    /// game start.
    pub fn new(
        configs: &[PlayerConfig],
        registry: &CardRegistry,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        Self::validate_configs(configs, registry)?;

        let mut state = Self {
            players: configs
                .iter()
                .enumerate()
                .map(|(i, c)| Player::new(PlayerId(i as u8), c.name.clone()))
                .collect(),
            zones: Zones::new(PLAYER_COUNT),
            cards: FxHashMap::default(),
            permanents: FxHashMap::default(),
            rng: GameRng::new(seed),
            next_object_id: ObjectId::first_non_player(PLAYER_COUNT),
        };

        for (i, config) in configs.iter().enumerate() {
            let owner = PlayerId(i as u8);
            for (name, count) in &config.decklist {
                for _ in 0..*count {
                    let id = state.allocate_id();
                    let card = registry.mint(name, id, owner);
                    state.cards.insert(id, card);
                    state.zones.insert(id, owner, ZoneType::Library);
                }
            }
            state.zones.shuffle_library(owner, &mut state.rng);
        }

        Ok(state)
    }

    /// Check configs without building any state, so callers can reject
    /// bad input before discarding a running episode.
    pub fn validate_configs(
        configs: &[PlayerConfig],
        registry: &CardRegistry,
    ) -> Result<(), ConfigError> {
        if configs.len() != PLAYER_COUNT {
            return Err(ConfigError::PlayerCount {
                expected: PLAYER_COUNT,
                actual: configs.len(),
            });
        }
        for config in configs {
            if config.deck_size() == 0 {
                return Err(ConfigError::EmptyDeck {
                    player: config.name.clone(),
                });
            }
            for name in config.decklist.keys() {
                if !registry.contains(name) {
                    return Err(ConfigError::UnknownCard {
                        player: config.name.clone(),
                        name: name.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    fn allocate_id(&mut self) -> ObjectId {
        let id = ObjectId(self.next_object_id);
        self.next_object_id += 1;
        id
    }

    // --- lookups ---

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id.index()]
    }

    /// Look up a card. Panics on an unknown ID; IDs only come from this
    /// state's own zones.
    #[must_use]
    pub fn card(&self, id: ObjectId) -> &Card {
        self.cards
            .get(&id)
            .unwrap_or_else(|| panic!("no card {id}"))
    }

    /// Battlefield state for a card, if it is on the battlefield.
    #[must_use]
    pub fn permanent(&self, card: ObjectId) -> Option<&Permanent> {
        self.permanents.get(&card)
    }

    pub fn permanent_mut(&mut self, card: ObjectId) -> Option<&mut Permanent> {
        self.permanents.get_mut(&card)
    }

    /// Total minted cards, for conservation checks.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    // --- movement ---

    /// Move a card to a zone, maintaining battlefield state.
    ///
    /// Entering the battlefield creates a `Permanent`; leaving drops it.
    pub fn move_card(&mut self, id: ObjectId, to: ZoneType) {
        let owner = self.card(id).owner;
        let from = self.zones.location(id);
        self.zones.move_to(id, owner, to);

        if from == Some(ZoneType::Battlefield) && to != ZoneType::Battlefield {
            self.permanents.remove(&id);
        }
        if to == ZoneType::Battlefield && from != Some(ZoneType::Battlefield) {
            tracing::info!(target: "state", card = %self.card(id), "enters battlefield");
            let permanent = Permanent::new(self.card(id));
            self.permanents.insert(id, permanent);
        }
    }

    /// Draw one card. Drawing from an empty library sets the loss flag
    /// instead; the player loses at the next state-based-action check.
    pub fn draw_card(&mut self, player: PlayerId) {
        match self.zones.top_of_library(player) {
            Some(card) => {
                tracing::debug!(target: "state", %player, card = %self.card(card), "draws");
                self.move_card(card, ZoneType::Hand);
            }
            None => {
                tracing::debug!(target: "state", %player, "draws from empty library");
                self.player_mut(player).drew_when_empty = true;
            }
        }
    }

    pub fn draw_cards(&mut self, player: PlayerId, count: usize) {
        for _ in 0..count {
            self.draw_card(player);
        }
    }

    // --- battlefield queries ---

    /// Battlefield cards controlled by a player, in entry order.
    #[must_use]
    pub fn battlefield(&self, player: PlayerId) -> &[ObjectId] {
        self.zones.list(ZoneType::Battlefield, player)
    }

    /// Creatures that may be declared as attackers.
    #[must_use]
    pub fn eligible_attackers(&self, player: PlayerId) -> Vec<ObjectId> {
        self.battlefield(player)
            .iter()
            .copied()
            .filter(|&id| {
                self.permanent(id)
                    .is_some_and(|p| p.can_attack(self.card(id)))
            })
            .collect()
    }

    /// Creatures that may be declared as blockers.
    #[must_use]
    pub fn eligible_blockers(&self, player: PlayerId) -> Vec<ObjectId> {
        self.battlefield(player)
            .iter()
            .copied()
            .filter(|&id| {
                self.permanent(id)
                    .is_some_and(|p| p.can_block(self.card(id)))
            })
            .collect()
    }

    /// Attacking creatures a player controls, in entry order.
    #[must_use]
    pub fn attackers(&self, player: PlayerId) -> Vec<ObjectId> {
        self.battlefield(player)
            .iter()
            .copied()
            .filter(|&id| self.permanent(id).is_some_and(|p| p.attacking))
            .collect()
    }

    /// Total mana a player could produce from untapped permanents.
    #[must_use]
    pub fn producible_mana(&self, player: PlayerId) -> Mana {
        let mut total = Mana::empty();
        for &id in self.battlefield(player) {
            if let Some(permanent) = self.permanent(id) {
                total.add(&permanent.producible_mana(self.card(id)));
            }
        }
        total
    }

    /// Tap untapped producers until the player's pool covers `cost`.
    ///
    /// Panics if producible mana cannot cover the cost; callers check
    /// `producible_mana().can_pay()` when enumerating actions.
    pub fn tap_for_mana(&mut self, player: PlayerId, cost: &ManaCost) {
        assert!(
            self.producible_mana(player).can_pay(cost),
            "not enough producible mana for {cost}"
        );

        let battlefield: Vec<ObjectId> = self.battlefield(player).to_vec();
        for id in battlefield {
            if self.player(player).mana_pool.can_pay(cost) {
                break;
            }
            let produced = match self.permanent(id) {
                Some(permanent) => permanent.producible_mana(self.card(id)),
                None => continue,
            };
            if produced.total() > 0 {
                tracing::debug!(target: "state", card = %self.card(id), "taps for mana");
                if let Some(permanent) = self.permanent_mut(id) {
                    permanent.tap();
                }
                self.player_mut(player).mana_pool.add(&produced);
            }
        }
    }

    /// Move a battlefield card to its owner's graveyard.
    pub fn destroy(&mut self, card: ObjectId) {
        tracing::info!(target: "state", card = %self.card(card), "is destroyed");
        self.move_card(card, ZoneType::Graveyard);
    }
}
