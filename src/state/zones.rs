//! Zone tracking.
//!
//! Every card is in exactly one zone at all times. `Zones` keeps a
//! location map for O(1) lookups plus ordered per-player lists per zone,
//! so library order (draw from the back) and stack order are explicit.
//!
//! The stack is conceptually shared between players; a separate ordered
//! list preserves global cast order across the per-player bookkeeping.

use crate::core::{GameRng, ObjectId, PlayerId, PlayerMap};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// The zones a card can occupy, in canonical order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoneType {
    Library,
    Hand,
    Battlefield,
    Graveyard,
    Exile,
    Stack,
    Command,
}

impl ZoneType {
    /// All zones in canonical order, matching observation count arrays.
    pub const ALL: [ZoneType; 7] = [
        ZoneType::Library,
        ZoneType::Hand,
        ZoneType::Battlefield,
        ZoneType::Graveyard,
        ZoneType::Exile,
        ZoneType::Stack,
        ZoneType::Command,
    ];

    /// Position in the canonical order.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            ZoneType::Library => 0,
            ZoneType::Hand => 1,
            ZoneType::Battlefield => 2,
            ZoneType::Graveyard => 3,
            ZoneType::Exile => 4,
            ZoneType::Stack => 5,
            ZoneType::Command => 6,
        }
    }

    /// Whether cards in this zone are visible to both players.
    #[must_use]
    pub const fn is_public(self) -> bool {
        !matches!(self, ZoneType::Library | ZoneType::Hand)
    }
}

impl std::fmt::Display for ZoneType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ZoneType::Library => "library",
            ZoneType::Hand => "hand",
            ZoneType::Battlefield => "battlefield",
            ZoneType::Graveyard => "graveyard",
            ZoneType::Exile => "exile",
            ZoneType::Stack => "stack",
            ZoneType::Command => "command",
        };
        write!(f, "{name}")
    }
}

/// Card-location tracker for all zones.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zones {
    locations: FxHashMap<ObjectId, ZoneType>,
    /// Ordered card lists, zone-major then owner.
    lists: Vec<PlayerMap<Vec<ObjectId>>>,
    /// Global stack order (bottom first), across both players.
    stack: Vec<ObjectId>,
}

impl Zones {
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            locations: FxHashMap::default(),
            lists: ZoneType::ALL
                .iter()
                .map(|_| PlayerMap::with_default(player_count))
                .collect(),
            stack: Vec::new(),
        }
    }

    /// Place a freshly minted card into a zone.
    ///
    /// Panics if the card is already tracked.
    pub fn insert(&mut self, card: ObjectId, owner: PlayerId, zone: ZoneType) {
        let previous = self.locations.insert(card, zone);
        assert!(previous.is_none(), "card {card} already placed");
        self.lists[zone.index()][owner].push(card);
        if zone == ZoneType::Stack {
            self.stack.push(card);
        }
    }

    /// Move a card to a new zone, appending to the destination list.
    pub fn move_to(&mut self, card: ObjectId, owner: PlayerId, to: ZoneType) {
        let from = self
            .locations
            .insert(card, to)
            .unwrap_or_else(|| panic!("card {card} is not tracked"));
        let list = &mut self.lists[from.index()][owner];
        if let Some(pos) = list.iter().position(|&id| id == card) {
            list.remove(pos);
        }
        if from == ZoneType::Stack {
            if let Some(pos) = self.stack.iter().position(|&id| id == card) {
                self.stack.remove(pos);
            }
        }
        self.lists[to.index()][owner].push(card);
        if to == ZoneType::Stack {
            self.stack.push(card);
        }
    }

    /// Which zone a card is in.
    #[must_use]
    pub fn location(&self, card: ObjectId) -> Option<ZoneType> {
        self.locations.get(&card).copied()
    }

    #[must_use]
    pub fn contains(&self, card: ObjectId, zone: ZoneType) -> bool {
        self.location(card) == Some(zone)
    }

    /// Ordered cards a player has in a zone.
    #[must_use]
    pub fn list(&self, zone: ZoneType, owner: PlayerId) -> &[ObjectId] {
        &self.lists[zone.index()][owner]
    }

    #[must_use]
    pub fn size(&self, zone: ZoneType, owner: PlayerId) -> usize {
        self.lists[zone.index()][owner].len()
    }

    /// Per-zone counts for one player, in canonical zone order.
    #[must_use]
    pub fn counts_for(&self, owner: PlayerId) -> [usize; 7] {
        let mut counts = [0; 7];
        for zone in ZoneType::ALL {
            counts[zone.index()] = self.size(zone, owner);
        }
        counts
    }

    /// Top card of a player's library (the next draw).
    #[must_use]
    pub fn top_of_library(&self, owner: PlayerId) -> Option<ObjectId> {
        self.list(ZoneType::Library, owner).last().copied()
    }

    /// Shuffle a player's library in place.
    pub fn shuffle_library(&mut self, owner: PlayerId, rng: &mut GameRng) {
        rng.shuffle(&mut self.lists[ZoneType::Library.index()][owner]);
    }

    /// The shared stack, bottom first.
    #[must_use]
    pub fn stack(&self) -> &[ObjectId] {
        &self.stack
    }

    #[must_use]
    pub fn top_of_stack(&self) -> Option<ObjectId> {
        self.stack.last().copied()
    }

    /// Total number of tracked cards, for conservation checks.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.locations.len()
    }
}
