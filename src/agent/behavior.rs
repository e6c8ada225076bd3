//! Per-player behavior statistics.
//!
//! Counters accumulate across episodes so training code can watch how a
//! policy's habits evolve: how often it plays lands, casts, attacks, and
//! blocks, plus damage totals and win rate. Rates are per turn (or per
//! game) rounded to two decimals. A disabled tracker ignores every hook.

use crate::infra::InfoDict;
use serde::{Deserialize, Serialize};

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Counters for one player role across episodes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BehaviorTracker {
    enabled: bool,
    pub games_played: u64,
    pub games_won: u64,
    pub turns_played: u64,
    pub lands_played: u64,
    pub spells_cast: u64,
    pub attackers_declared: u64,
    pub blockers_declared: u64,
    pub damage_dealt: i64,
    pub damage_taken: i64,
}

impl BehaviorTracker {
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            ..Self::default()
        }
    }

    pub fn on_game_start(&mut self) {
        if self.enabled {
            self.games_played += 1;
        }
    }

    pub fn on_game_won(&mut self) {
        if self.enabled {
            self.games_won += 1;
        }
    }

    pub fn on_turn_start(&mut self) {
        if self.enabled {
            self.turns_played += 1;
        }
    }

    pub fn on_land_played(&mut self) {
        if self.enabled {
            self.lands_played += 1;
        }
    }

    pub fn on_spell_cast(&mut self) {
        if self.enabled {
            self.spells_cast += 1;
        }
    }

    pub fn on_attacker_declared(&mut self) {
        if self.enabled {
            self.attackers_declared += 1;
        }
    }

    pub fn on_blocker_declared(&mut self) {
        if self.enabled {
            self.blockers_declared += 1;
        }
    }

    pub fn on_damage_dealt(&mut self, amount: i32) {
        if self.enabled {
            self.damage_dealt += i64::from(amount);
        }
    }

    pub fn on_damage_taken(&mut self, amount: i32) {
        if self.enabled {
            self.damage_taken += i64::from(amount);
        }
    }

    /// Raw counters plus derived per-turn and per-game rates.
    #[must_use]
    pub fn stats(&self) -> InfoDict {
        let mut stats = InfoDict::new();
        stats.set_int("games_played", self.games_played as i64);
        stats.set_int("games_won", self.games_won as i64);
        stats.set_int("turns_played", self.turns_played as i64);
        stats.set_int("lands_played", self.lands_played as i64);
        stats.set_int("spells_cast", self.spells_cast as i64);
        stats.set_int("attackers_declared", self.attackers_declared as i64);
        stats.set_int("blockers_declared", self.blockers_declared as i64);
        stats.set_int("damage_dealt", self.damage_dealt);
        stats.set_int("damage_taken", self.damage_taken);

        let turns = self.turns_played.max(1) as f64;
        let games = self.games_played.max(1) as f64;
        stats.set_float("land_play_rate", round2(self.lands_played as f64 / turns));
        stats.set_float("spell_cast_rate", round2(self.spells_cast as f64 / turns));
        stats.set_float(
            "attack_rate",
            round2(self.attackers_declared as f64 / turns),
        );
        stats.set_float("block_rate", round2(self.blockers_declared as f64 / turns));
        stats.set_float("win_rate", round2(self.games_won as f64 / games));
        stats.set_float("avg_game_length", round2(self.turns_played as f64 / games));
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::InfoValue;

    #[test]
    fn test_disabled_ignores_hooks() {
        let mut tracker = BehaviorTracker::new(false);
        tracker.on_game_start();
        tracker.on_land_played();
        tracker.on_damage_dealt(5);
        assert_eq!(tracker.games_played, 0);
        assert_eq!(tracker.lands_played, 0);
        assert_eq!(tracker.damage_dealt, 0);
    }

    #[test]
    fn test_counters_accumulate() {
        let mut tracker = BehaviorTracker::new(true);
        tracker.on_game_start();
        for _ in 0..4 {
            tracker.on_turn_start();
        }
        tracker.on_land_played();
        tracker.on_land_played();
        tracker.on_spell_cast();
        tracker.on_attacker_declared();
        tracker.on_damage_dealt(2);
        tracker.on_damage_taken(3);
        tracker.on_game_won();

        let stats = tracker.stats();
        assert_eq!(stats.get("lands_played"), Some(&InfoValue::Int(2)));
        assert_eq!(stats.get("land_play_rate"), Some(&InfoValue::Float(0.5)));
        assert_eq!(stats.get("spell_cast_rate"), Some(&InfoValue::Float(0.25)));
        assert_eq!(stats.get("win_rate"), Some(&InfoValue::Float(1.0)));
        assert_eq!(stats.get("avg_game_length"), Some(&InfoValue::Float(4.0)));
        assert_eq!(stats.get("damage_dealt"), Some(&InfoValue::Int(2)));
        assert_eq!(stats.get("damage_taken"), Some(&InfoValue::Int(3)));
    }

    #[test]
    fn test_rates_round_to_two_decimals() {
        let mut tracker = BehaviorTracker::new(true);
        tracker.on_game_start();
        for _ in 0..3 {
            tracker.on_turn_start();
        }
        tracker.on_land_played();

        let stats = tracker.stats();
        assert_eq!(stats.get("land_play_rate"), Some(&InfoValue::Float(0.33)));
    }

    #[test]
    fn test_empty_tracker_avoids_division_by_zero() {
        let tracker = BehaviorTracker::new(true);
        let stats = tracker.stats();
        assert_eq!(stats.get("win_rate"), Some(&InfoValue::Float(0.0)));
        assert_eq!(stats.get("land_play_rate"), Some(&InfoValue::Float(0.0)));
    }
}
