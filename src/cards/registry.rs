//! Card registry: name-keyed definitions and the standard set.
//!
//! The registry owns every definition available to a game and mints
//! `Card` instances from decklists. `standard()` ships the five basic
//! lands plus two early-set creatures, enough for land/creature/combat
//! gameplay.

use crate::cards::{Card, CardDefinition};
use crate::core::{Color, ObjectId, PlayerId};
use rustc_hash::FxHashMap;

/// Registry of card definitions, keyed by name.
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    definitions: Vec<CardDefinition>,
    by_name: FxHashMap<String, usize>,
}

impl CardRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard set: basic lands plus vanilla and mana creatures.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();

        registry.register(CardDefinition::basic_land("Plains", Color::White, "Plains"));
        registry.register(CardDefinition::basic_land("Island", Color::Blue, "Island"));
        registry.register(CardDefinition::basic_land("Swamp", Color::Black, "Swamp"));
        registry.register(CardDefinition::basic_land(
            "Mountain",
            Color::Red,
            "Mountain",
        ));
        registry.register(CardDefinition::basic_land("Forest", Color::Green, "Forest"));

        registry.register(CardDefinition::mana_creature(
            "Llanowar Elves",
            "G",
            1,
            1,
            Color::Green,
            &["Elf", "Druid"],
        ));
        registry.register(CardDefinition::vanilla_creature(
            "Grey Ogre",
            "2R",
            2,
            2,
            &["Ogre"],
        ));

        registry
    }

    /// Register a definition. Replaces any existing card with the same name.
    pub fn register(&mut self, definition: CardDefinition) {
        if let Some(&key) = self.by_name.get(&definition.name) {
            self.definitions[key] = definition;
        } else {
            self.by_name
                .insert(definition.name.clone(), self.definitions.len());
            self.definitions.push(definition);
        }
    }

    /// Look up a definition by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CardDefinition> {
        self.by_name.get(name).map(|&key| &self.definitions[key])
    }

    /// Whether a card name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Number of registered definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Mint a card instance for `owner`.
    ///
    /// Panics if the name is unknown; decklists are validated against the
    /// registry before any card is minted.
    #[must_use]
    pub fn mint(&self, name: &str, id: ObjectId, owner: PlayerId) -> Card {
        let key = *self
            .by_name
            .get(name)
            .unwrap_or_else(|| panic!("unknown card '{name}'"));
        Card::new(id, owner, key as u32, self.definitions[key].clone())
    }
}
