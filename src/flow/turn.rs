//! Turn structure: phases, steps, and the per-turn cursor.
//!
//! A turn is a fixed sequence of twelve steps across five phases. Each
//! step runs the same lifecycle: turn-based actions, then a priority
//! window (if the step has one), then mana pools empty, then the step
//! completes. `TurnSystem` holds the cursor plus the lifecycle flags;
//! the orchestrator in `game` drives it.

use crate::core::{PlayerId, PlayerMap};
use crate::flow::{CombatState, PrioritySystem};
use serde::{Deserialize, Serialize};

/// The five phases of a turn, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseType {
    Beginning,
    PrecombatMain,
    Combat,
    PostcombatMain,
    Ending,
}

/// The twelve steps of a turn, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepType {
    Untap,
    Upkeep,
    Draw,
    PrecombatMain,
    BeginCombat,
    DeclareAttackers,
    DeclareBlockers,
    CombatDamage,
    EndCombat,
    PostcombatMain,
    End,
    Cleanup,
}

impl StepType {
    /// All steps in turn order.
    pub const ALL: [StepType; 12] = [
        StepType::Untap,
        StepType::Upkeep,
        StepType::Draw,
        StepType::PrecombatMain,
        StepType::BeginCombat,
        StepType::DeclareAttackers,
        StepType::DeclareBlockers,
        StepType::CombatDamage,
        StepType::EndCombat,
        StepType::PostcombatMain,
        StepType::End,
        StepType::Cleanup,
    ];

    /// The phase this step belongs to.
    #[must_use]
    pub const fn phase(self) -> PhaseType {
        match self {
            StepType::Untap | StepType::Upkeep | StepType::Draw => PhaseType::Beginning,
            StepType::PrecombatMain => PhaseType::PrecombatMain,
            StepType::BeginCombat
            | StepType::DeclareAttackers
            | StepType::DeclareBlockers
            | StepType::CombatDamage
            | StepType::EndCombat => PhaseType::Combat,
            StepType::PostcombatMain => PhaseType::PostcombatMain,
            StepType::End | StepType::Cleanup => PhaseType::Ending,
        }
    }

    /// The following step, or `None` at the end of the turn.
    #[must_use]
    pub const fn next(self) -> Option<StepType> {
        match self {
            StepType::Untap => Some(StepType::Upkeep),
            StepType::Upkeep => Some(StepType::Draw),
            StepType::Draw => Some(StepType::PrecombatMain),
            StepType::PrecombatMain => Some(StepType::BeginCombat),
            StepType::BeginCombat => Some(StepType::DeclareAttackers),
            StepType::DeclareAttackers => Some(StepType::DeclareBlockers),
            StepType::DeclareBlockers => Some(StepType::CombatDamage),
            StepType::CombatDamage => Some(StepType::EndCombat),
            StepType::EndCombat => Some(StepType::PostcombatMain),
            StepType::PostcombatMain => Some(StepType::End),
            StepType::End => Some(StepType::Cleanup),
            StepType::Cleanup => None,
        }
    }

    /// Whether players receive priority during this step.
    #[must_use]
    pub const fn has_priority_window(self) -> bool {
        !matches!(self, StepType::Untap | StepType::Cleanup)
    }

    /// Whether sorcery-speed casting (and land plays) are allowed.
    #[must_use]
    pub const fn is_main(self) -> bool {
        matches!(self, StepType::PrecombatMain | StepType::PostcombatMain)
    }
}

impl std::fmt::Display for StepType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// The turn cursor and per-step lifecycle flags.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TurnSystem {
    pub active_player: PlayerId,
    /// Global 1-based turn counter.
    pub turn_number: u64,
    pub turn_counts: PlayerMap<u64>,
    pub step: StepType,
    /// Lands played by the active player this turn.
    pub lands_played: u32,
    /// Whether the current step ran its `initialize` hook.
    pub step_initialized: bool,
    /// Whether the current step's turn-based actions finished.
    pub turn_based_done: bool,
    /// Whether mana pools were emptied at the end of the current step.
    pub mana_cleared: bool,
    pub priority: PrioritySystem,
    pub combat: CombatState,
}

impl TurnSystem {
    /// Start the first turn with the given starting player.
    #[must_use]
    pub fn new(starting_player: PlayerId, player_count: usize) -> Self {
        let mut turn_counts = PlayerMap::with_value(player_count, 0);
        turn_counts[starting_player] = 1;
        Self {
            active_player: starting_player,
            turn_number: 1,
            turn_counts,
            step: StepType::Untap,
            lands_played: 0,
            step_initialized: false,
            turn_based_done: false,
            mana_cleared: false,
            priority: PrioritySystem::default(),
            combat: CombatState::default(),
        }
    }

    /// The defending player (two-player games).
    #[must_use]
    pub fn non_active_player(&self) -> PlayerId {
        self.active_player.opponent()
    }

    /// The player holding priority at the current pass count.
    #[must_use]
    pub fn priority_player(&self, player_count: usize) -> PlayerId {
        let offset = self.priority.pass_count % player_count;
        PlayerId(((self.active_player.index() + offset) % player_count) as u8)
    }

    /// Finish the current step and move the cursor.
    pub fn finish_step(&mut self) {
        tracing::debug!(target: "rules", step = %self.step, "step complete");
        match self.step.next() {
            Some(next) => self.enter_step(next),
            None => self.start_next_turn(),
        }
    }

    fn enter_step(&mut self, step: StepType) {
        self.step = step;
        self.step_initialized = false;
        self.turn_based_done = false;
        self.mana_cleared = false;
        self.priority.reset();
    }

    fn start_next_turn(&mut self) {
        self.active_player = PlayerId(
            ((self.active_player.index() + 1) % self.turn_counts.player_count()) as u8,
        );
        self.turn_number += 1;
        self.turn_counts[self.active_player] += 1;
        self.lands_played = 0;
        self.combat = CombatState::default();
        self.enter_step(StepType::Untap);
        tracing::info!(
            target: "rules",
            turn = self.turn_number,
            active = %self.active_player,
            "turn begins"
        );
    }
}
