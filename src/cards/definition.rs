//! Static card definitions.
//!
//! A `CardDefinition` is immutable printed data: name, cost, type line,
//! power/toughness, and any mana it produces when tapped. In-game state
//! (location, tapped, damage) lives on `Card` and `Permanent`.

use crate::core::{Color, Mana, ManaCost};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The card types that can appear on a type line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CardType {
    Creature,
    Instant,
    Sorcery,
    Planeswalker,
    Land,
    Enchantment,
    Artifact,
    Kindred,
    Battle,
}

/// The set of types on a card's type line.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardTypes {
    types: BTreeSet<CardType>,
}

impl CardTypes {
    #[must_use]
    pub fn new(types: &[CardType]) -> Self {
        Self {
            types: types.iter().copied().collect(),
        }
    }

    #[must_use]
    pub fn contains(&self, card_type: CardType) -> bool {
        self.types.contains(&card_type)
    }

    #[must_use]
    pub fn is_creature(&self) -> bool {
        self.contains(CardType::Creature)
    }

    #[must_use]
    pub fn is_land(&self) -> bool {
        self.contains(CardType::Land)
    }

    /// Whether this card stays on the battlefield when it resolves.
    #[must_use]
    pub fn is_permanent(&self) -> bool {
        const PERMANENT_TYPES: [CardType; 6] = [
            CardType::Creature,
            CardType::Land,
            CardType::Artifact,
            CardType::Enchantment,
            CardType::Planeswalker,
            CardType::Battle,
        ];
        PERMANENT_TYPES.iter().any(|t| self.contains(*t))
    }

    /// Whether this card is cast via the stack (everything but lands).
    #[must_use]
    pub fn is_castable(&self) -> bool {
        !self.is_land() && !self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = CardType> + '_ {
        self.types.iter().copied()
    }
}

/// Immutable printed card data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub name: String,
    /// `None` for lands, which are played rather than cast.
    pub mana_cost: Option<ManaCost>,
    pub types: CardTypes,
    pub supertypes: Vec<String>,
    pub subtypes: Vec<String>,
    /// Mana added to its controller's pool when tapped for mana.
    pub produces: Option<Mana>,
    pub power: Option<i32>,
    pub toughness: Option<i32>,
    pub text: String,
}

impl CardDefinition {
    /// A basic land producing one mana of `color`.
    #[must_use]
    pub fn basic_land(name: &str, color: Color, subtype: &str) -> Self {
        Self {
            name: name.to_string(),
            mana_cost: None,
            types: CardTypes::new(&[CardType::Land]),
            supertypes: vec!["Basic".to_string()],
            subtypes: vec![subtype.to_string()],
            produces: Some(Mana::single(color)),
            power: None,
            toughness: None,
            text: format!("T: Add {}.", color.symbol()),
        }
    }

    /// A creature with no abilities.
    #[must_use]
    pub fn vanilla_creature(
        name: &str,
        cost: &str,
        power: i32,
        toughness: i32,
        subtypes: &[&str],
    ) -> Self {
        Self {
            name: name.to_string(),
            mana_cost: ManaCost::parse(cost),
            types: CardTypes::new(&[CardType::Creature]),
            supertypes: Vec::new(),
            subtypes: subtypes.iter().map(|s| s.to_string()).collect(),
            produces: None,
            power: Some(power),
            toughness: Some(toughness),
            text: String::new(),
        }
    }

    /// A creature that taps for one mana of `color`.
    #[must_use]
    pub fn mana_creature(
        name: &str,
        cost: &str,
        power: i32,
        toughness: i32,
        color: Color,
        subtypes: &[&str],
    ) -> Self {
        let mut def = Self::vanilla_creature(name, cost, power, toughness, subtypes);
        def.produces = Some(Mana::single(color));
        def.text = format!("T: Add {}.", color.symbol());
        def
    }

    /// Total converted cost; zero for lands.
    #[must_use]
    pub fn mana_value(&self) -> u32 {
        self.mana_cost.as_ref().map_or(0, ManaCost::mana_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_land() {
        let forest = CardDefinition::basic_land("Forest", Color::Green, "Forest");
        assert!(forest.types.is_land());
        assert!(forest.types.is_permanent());
        assert!(!forest.types.is_castable());
        assert!(forest.mana_cost.is_none());
        assert_eq!(forest.produces.as_ref().unwrap().amount(Color::Green), 1);
        assert_eq!(forest.mana_value(), 0);
    }

    #[test]
    fn test_vanilla_creature() {
        let ogre = CardDefinition::vanilla_creature("Grey Ogre", "2R", 2, 2, &["Ogre"]);
        assert!(ogre.types.is_creature());
        assert!(ogre.types.is_permanent());
        assert!(ogre.types.is_castable());
        assert_eq!(ogre.mana_value(), 3);
        assert_eq!(ogre.power, Some(2));
        assert_eq!(ogre.toughness, Some(2));
    }

    #[test]
    fn test_mana_creature() {
        let elves =
            CardDefinition::mana_creature("Llanowar Elves", "G", 1, 1, Color::Green, &["Elf"]);
        assert!(elves.types.is_creature());
        assert_eq!(elves.produces.as_ref().unwrap().amount(Color::Green), 1);
        assert_eq!(elves.mana_value(), 1);
    }

    #[test]
    fn test_type_set() {
        let types = CardTypes::new(&[CardType::Creature, CardType::Artifact]);
        assert!(types.contains(CardType::Creature));
        assert!(types.contains(CardType::Artifact));
        assert!(!types.contains(CardType::Land));
        assert!(types.is_permanent());
        assert!(types.is_castable());
    }

    #[test]
    fn test_empty_type_set_not_castable() {
        assert!(!CardTypes::default().is_castable());
        assert!(!CardTypes::default().is_permanent());
    }
}
