//! Battlefield state attached to a card.

use crate::cards::Card;
use crate::core::{Mana, ObjectId, PlayerId};
use serde::{Deserialize, Serialize};

/// A card's battlefield presence.
///
/// Keyed by the card's `ObjectId`; created when the card enters the
/// battlefield and dropped when it leaves.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permanent {
    /// The card this permanent wraps.
    pub card: ObjectId,
    pub controller: PlayerId,
    pub tapped: bool,
    pub summoning_sick: bool,
    pub damage: i32,
    pub attacking: bool,
}

impl Permanent {
    /// Create battlefield state for a card entering the battlefield.
    ///
    /// Creatures enter summoning-sick; other permanents do not.
    #[must_use]
    pub fn new(card: &Card) -> Self {
        Self {
            card: card.id,
            controller: card.owner,
            tapped: false,
            summoning_sick: card.definition.types.is_creature(),
            damage: 0,
            attacking: false,
        }
    }

    #[must_use]
    pub fn can_tap(&self, card: &Card) -> bool {
        !self.tapped && !(self.summoning_sick && card.definition.types.is_creature())
    }

    #[must_use]
    pub fn can_attack(&self, card: &Card) -> bool {
        card.definition.types.is_creature() && !self.tapped && !self.summoning_sick
    }

    #[must_use]
    pub fn can_block(&self, card: &Card) -> bool {
        card.definition.types.is_creature() && !self.tapped
    }

    #[must_use]
    pub fn has_lethal_damage(&self, card: &Card) -> bool {
        card.definition.types.is_creature() && self.damage >= card.toughness()
    }

    /// Mana this permanent would add if tapped for mana right now.
    #[must_use]
    pub fn producible_mana(&self, card: &Card) -> Mana {
        match &card.definition.produces {
            Some(mana) if self.can_tap(card) => mana.clone(),
            _ => Mana::empty(),
        }
    }

    pub fn untap(&mut self) {
        self.tapped = false;
    }

    pub fn tap(&mut self) {
        self.tapped = true;
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.damage += amount;
    }

    pub fn clear_damage(&mut self) {
        self.damage = 0;
    }

    /// Declare as an attacker: marks and taps.
    pub fn attack(&mut self) {
        self.attacking = true;
        self.tap();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardDefinition;
    use crate::core::Color;

    fn ogre() -> Card {
        Card::new(
            ObjectId(5),
            PlayerId::new(0),
            0,
            CardDefinition::vanilla_creature("Grey Ogre", "2R", 2, 2, &["Ogre"]),
        )
    }

    fn mountain() -> Card {
        Card::new(
            ObjectId(6),
            PlayerId::new(0),
            1,
            CardDefinition::basic_land("Mountain", Color::Red, "Mountain"),
        )
    }

    #[test]
    fn test_creature_enters_sick() {
        let card = ogre();
        let perm = Permanent::new(&card);
        assert!(perm.summoning_sick);
        assert!(!perm.can_attack(&card));
        assert!(perm.can_block(&card));
        assert!(!perm.can_tap(&card));
    }

    #[test]
    fn test_land_enters_ready() {
        let card = mountain();
        let perm = Permanent::new(&card);
        assert!(!perm.summoning_sick);
        assert!(perm.can_tap(&card));
        assert_eq!(perm.producible_mana(&card).amount(Color::Red), 1);
    }

    #[test]
    fn test_tapped_land_produces_nothing() {
        let card = mountain();
        let mut perm = Permanent::new(&card);
        perm.tap();
        assert_eq!(perm.producible_mana(&card).total(), 0);
    }

    #[test]
    fn test_lethal_damage() {
        let card = ogre();
        let mut perm = Permanent::new(&card);
        perm.take_damage(1);
        assert!(!perm.has_lethal_damage(&card));
        perm.take_damage(1);
        assert!(perm.has_lethal_damage(&card));
        perm.clear_damage();
        assert!(!perm.has_lethal_damage(&card));
    }

    #[test]
    fn test_attack_taps() {
        let card = ogre();
        let mut perm = Permanent::new(&card);
        perm.summoning_sick = false;
        assert!(perm.can_attack(&card));
        perm.attack();
        assert!(perm.attacking);
        assert!(perm.tapped);
        assert!(!perm.can_attack(&card));
        assert!(!perm.can_block(&card));
    }
}
