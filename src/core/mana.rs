//! Mana model: colors, costs, and pools.
//!
//! ## Cost Strings
//!
//! Costs parse from compact strings: `"G"` is one green pip, `"2R"` is two
//! generic plus one red, `"WW"` is two white. Generic digits may appear
//! anywhere but conventionally lead.
//!
//! ## Payment
//!
//! A pool can pay a cost when every colored pip is covered by mana of that
//! color and the leftover total covers the generic part. `pay` deducts
//! colored pips first, then drains generic from the remaining mana in
//! color order.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The five colors plus colorless.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    Colorless,
    White,
    Blue,
    Black,
    Red,
    Green,
}

impl Color {
    /// All colors in canonical order.
    pub const ALL: [Color; 6] = [
        Color::Colorless,
        Color::White,
        Color::Blue,
        Color::Black,
        Color::Red,
        Color::Green,
    ];

    /// Single-letter symbol used in cost strings.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Color::Colorless => 'C',
            Color::White => 'W',
            Color::Blue => 'U',
            Color::Black => 'B',
            Color::Red => 'R',
            Color::Green => 'G',
        }
    }

    /// Parse a single cost symbol.
    #[must_use]
    pub fn from_symbol(symbol: char) -> Option<Color> {
        match symbol {
            'C' => Some(Color::Colorless),
            'W' => Some(Color::White),
            'U' => Some(Color::Blue),
            'B' => Some(Color::Black),
            'R' => Some(Color::Red),
            'G' => Some(Color::Green),
            _ => None,
        }
    }
}

/// A casting cost: colored pips plus a generic amount.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManaCost {
    pips: BTreeMap<Color, u32>,
    generic: u32,
}

impl ManaCost {
    /// A cost of zero.
    #[must_use]
    pub fn free() -> Self {
        Self::default()
    }

    /// Parse a cost string like `"2R"` or `"WW"`.
    ///
    /// Returns `None` for unrecognized symbols.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let mut cost = ManaCost::default();
        for ch in text.chars() {
            if let Some(digit) = ch.to_digit(10) {
                cost.generic = cost.generic * 10 + digit;
            } else {
                let color = Color::from_symbol(ch)?;
                *cost.pips.entry(color).or_insert(0) += 1;
            }
        }
        Some(cost)
    }

    /// Number of pips of a specific color.
    #[must_use]
    pub fn pips(&self, color: Color) -> u32 {
        self.pips.get(&color).copied().unwrap_or(0)
    }

    /// The generic portion of the cost.
    #[must_use]
    pub fn generic(&self) -> u32 {
        self.generic
    }

    /// Total converted cost (generic plus all pips).
    #[must_use]
    pub fn mana_value(&self) -> u32 {
        self.generic + self.pips.values().sum::<u32>()
    }
}

impl std::fmt::Display for ManaCost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.generic > 0 || self.pips.is_empty() {
            write!(f, "{}", self.generic)?;
        }
        for color in Color::ALL {
            for _ in 0..self.pips(color) {
                write!(f, "{}", color.symbol())?;
            }
        }
        Ok(())
    }
}

/// An amount of mana, e.g. a player's mana pool or a permanent's output.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mana {
    amounts: BTreeMap<Color, u32>,
}

impl Mana {
    /// An empty amount.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// A single mana of one color.
    #[must_use]
    pub fn single(color: Color) -> Self {
        let mut mana = Mana::default();
        mana.amounts.insert(color, 1);
        mana
    }

    /// Amount of a specific color.
    #[must_use]
    pub fn amount(&self, color: Color) -> u32 {
        self.amounts.get(&color).copied().unwrap_or(0)
    }

    /// Total mana across all colors.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.amounts.values().sum()
    }

    /// Add another amount into this one.
    pub fn add(&mut self, other: &Mana) {
        for (color, amount) in &other.amounts {
            *self.amounts.entry(*color).or_insert(0) += amount;
        }
    }

    /// Remove all mana.
    pub fn clear(&mut self) {
        self.amounts.clear();
    }

    /// Whether this amount can pay the given cost.
    #[must_use]
    pub fn can_pay(&self, cost: &ManaCost) -> bool {
        let mut remaining = self.total();
        for color in Color::ALL {
            let need = cost.pips(color);
            if self.amount(color) < need {
                return false;
            }
            remaining -= need;
        }
        remaining >= cost.generic()
    }

    /// Deduct the given cost from this amount.
    ///
    /// Colored pips are deducted first, then generic drains the remainder
    /// in canonical color order. Panics if the cost is not payable; callers
    /// check `can_pay` first.
    pub fn pay(&mut self, cost: &ManaCost) {
        assert!(self.can_pay(cost), "mana pool cannot pay {cost}");

        for color in Color::ALL {
            let need = cost.pips(color);
            if need > 0 {
                *self.amounts.get_mut(&color).unwrap() -= need;
            }
        }

        let mut generic = cost.generic();
        for color in Color::ALL {
            if generic == 0 {
                break;
            }
            let have = self.amount(color);
            let spend = have.min(generic);
            if spend > 0 {
                *self.amounts.get_mut(&color).unwrap() -= spend;
                generic -= spend;
            }
        }

        self.amounts.retain(|_, amount| *amount > 0);
    }
}

impl std::fmt::Display for Mana {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.total() == 0 {
            return write!(f, "0");
        }
        for color in Color::ALL {
            for _ in 0..self.amount(color) {
                write!(f, "{}", color.symbol())?;
            }
        }
        Ok(())
    }
}
