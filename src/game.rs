//! The game orchestrator.
//!
//! `Game` owns the state, the turn cursor, and the pending action space.
//! It advances autonomously (`tick`) until a player decision is required,
//! surfaces that decision as a generation-stamped `ActionSpace`, and
//! executes the chosen action (`step`) with full validation before any
//! mutation. With `skip_trivial` enabled, decision points with at most
//! one option are answered internally with index 0.

use crate::agent::{ActionKind, ActionSpace, ActionSpaceType, BehaviorTracker};
use crate::cards::CardRegistry;
use crate::core::{
    AgentError, ConfigError, EnvError, PlayerConfig, PlayerId, PlayerMap, RulesError,
};
use crate::flow::{self, StepType, TurnSystem};
use crate::infra::Profiler;
use crate::state::{GameState, ZoneType};

/// One episode of the game.
#[derive(Debug)]
pub struct Game {
    pub state: GameState,
    pub turn: TurnSystem,
    pub profiler: Profiler,
    pub trackers: PlayerMap<BehaviorTracker>,
    skip_trivial: bool,
    current_space: Option<ActionSpace>,
    generation: u64,
}

impl Game {
    /// Start an episode: validate configs, shuffle, draw opening hands,
    /// and advance to the first decision point.
    ///
    /// The profiler and trackers are passed in so they can accumulate
    /// across episodes; `Env` threads them through resets.
    pub fn new(
        configs: &[PlayerConfig],
        seed: u64,
        skip_trivial: bool,
        profiler: Profiler,
        trackers: PlayerMap<BehaviorTracker>,
    ) -> Result<Self, ConfigError> {
        let registry = CardRegistry::standard();
        let mut state = GameState::new(configs, &registry, seed)?;

        const STARTING_HAND_SIZE: usize = 7;
        for i in 0..state.players.len() {
            state.draw_cards(PlayerId(i as u8), STARTING_HAND_SIZE);
        }

        let player_count = state.players.len();
        let mut game = Self {
            state,
            turn: TurnSystem::new(PlayerId(0), player_count),
            profiler,
            trackers,
            skip_trivial,
            current_space: None,
            generation: 0,
        };

        for (_, tracker) in game.trackers.iter_mut() {
            tracker.on_game_start();
        }
        game.trackers[game.turn.active_player].on_turn_start();

        game.tick();
        game.skip_trivial_spaces();
        Ok(game)
    }

    /// Check configs against the standard registry without building a game.
    pub fn validate(configs: &[PlayerConfig]) -> Result<(), ConfigError> {
        GameState::validate_configs(configs, &CardRegistry::standard())
    }

    // --- reads ---

    /// The pending decision, if the engine is waiting on one.
    #[must_use]
    pub fn action_space(&self) -> Option<&ActionSpace> {
        self.current_space.as_ref()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        flow::is_game_over(&self.state)
    }

    /// The sole surviving player, or `None` while the game runs (or on a
    /// draw where both players died at once).
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        if !self.is_over() {
            return None;
        }
        self.state
            .players
            .iter()
            .find(|p| p.alive)
            .map(|p| p.index)
    }

    #[must_use]
    pub fn winner_name(&self) -> Option<&str> {
        self.winner().map(|id| self.state.player(id).name.as_str())
    }

    // --- writes ---

    /// Execute the action at `index` against the pending space.
    ///
    /// `generation` must match the pending space's stamp; a stale stamp is
    /// fatal. A bad index is a recoverable `AgentError` and leaves the
    /// state untouched. Returns whether the game is over afterwards.
    pub fn step(&mut self, generation: u64, index: i64) -> Result<bool, EnvError> {
        {
            let space = self
                .current_space
                .as_ref()
                .ok_or(RulesError::MissingActionSpace)?;
            if space.space_type == ActionSpaceType::GameOver {
                return Err(AgentError::GameOver.into());
            }
            if generation != space.generation {
                return Err(RulesError::StaleActionSpace {
                    actual: generation,
                    current: space.generation,
                }
                .into());
            }
            if index < 0 || index as usize >= space.len() {
                return Err(AgentError::ActionIndexOutOfBounds {
                    index,
                    len: space.len(),
                }
                .into());
            }
        }

        self.apply(index as usize);
        self.skip_trivial_spaces();
        Ok(self.is_over())
    }

    /// Execute a validated index: consume the space, run the action, and
    /// advance to the next decision point.
    fn apply(&mut self, index: usize) {
        let space = self.current_space.take().expect("validated above");
        let action = space.actions[index];
        tracing::debug!(target: "agent", %action, "executing");

        self.profiler.begin("execute");
        self.execute(action.player, action.kind);
        self.profiler.end();

        self.tick();
    }

    /// Answer trivial decision points internally with index 0.
    fn skip_trivial_spaces(&mut self) {
        while self.skip_trivial
            && !self.is_over()
            && self.current_space.as_ref().is_some_and(|s| {
                s.space_type != ActionSpaceType::GameOver && s.is_trivial() && !s.is_empty()
            })
        {
            self.apply(0);
        }
    }

    fn execute(&mut self, player: PlayerId, kind: ActionKind) {
        match kind {
            ActionKind::PlayLand { card } => {
                tracing::info!(target: "agent", %player, card = %self.state.card(card), "plays land");
                self.turn.lands_played += 1;
                self.state.move_card(card, ZoneType::Battlefield);
                self.trackers[player].on_land_played();
                self.reopen_priority();
            }
            ActionKind::CastSpell { card } => {
                tracing::info!(target: "agent", %player, card = %self.state.card(card), "casts");
                if let Some(cost) = self.state.card(card).definition.mana_cost.clone() {
                    self.state.tap_for_mana(player, &cost);
                    self.state.player_mut(player).mana_pool.pay(&cost);
                }
                self.state.move_card(card, ZoneType::Stack);
                self.trackers[player].on_spell_cast();
                self.reopen_priority();
            }
            ActionKind::PassPriority => {
                self.turn.priority.pass_count += 1;
            }
            ActionKind::DeclareAttacker { attacker, attack } => {
                if attack {
                    tracing::info!(target: "combat", card = %self.state.card(attacker), "attacks");
                    if let Some(permanent) = self.state.permanent_mut(attacker) {
                        permanent.attack();
                    }
                    self.turn.combat.declare_attacker(attacker);
                    self.trackers[player].on_attacker_declared();
                }
            }
            ActionKind::DeclareBlocker { blocker, attacker } => {
                if let Some(attacker) = attacker {
                    tracing::info!(
                        target: "combat",
                        blocker = %self.state.card(blocker),
                        attacker = %self.state.card(attacker),
                        "blocks"
                    );
                    self.turn.combat.declare_blocker(blocker, attacker);
                    self.trackers[player].on_blocker_declared();
                }
            }
        }
    }

    /// A non-pass priority action restarts the pass round and re-arms
    /// state-based actions.
    fn reopen_priority(&mut self) {
        self.turn.priority.reset();
    }

    /// Advance until a decision point is pending.
    fn tick(&mut self) {
        self.profiler.begin("tick");
        while self.current_space.is_none() {
            if self.is_over() {
                if let Some(winner) = self.winner() {
                    tracing::info!(target: "rules", %winner, "game over");
                    self.trackers[winner].on_game_won();
                } else {
                    tracing::info!(target: "rules", "game over (draw)");
                }
                self.install_space(ActionSpace::game_over());
                break;
            }
            if let Some(space) = self.advance_step() {
                self.install_space(space);
            }
        }
        self.profiler.end();
    }

    fn install_space(&mut self, mut space: ActionSpace) {
        self.generation += 1;
        space.generation = self.generation;
        self.current_space = Some(space);
    }

    /// One micro-transition of the step lifecycle: turn-based actions,
    /// then the priority window, then mana pools empty, then the cursor
    /// moves on.
    fn advance_step(&mut self) -> Option<ActionSpace> {
        if !self.turn.turn_based_done {
            return self.perform_turn_based_actions();
        }

        if self.turn.step.has_priority_window() && !flow::priority_complete(&self.turn) {
            self.profiler.begin("priority");
            let space = flow::priority_tick(&mut self.state, &mut self.turn, self.skip_trivial);
            self.profiler.end();
            return space;
        }

        if !self.turn.mana_cleared {
            for player in &mut self.state.players {
                player.mana_pool.clear();
            }
            self.turn.mana_cleared = true;
            return None;
        }

        let previous_turn = self.turn.turn_number;
        self.turn.finish_step();
        if self.turn.turn_number != previous_turn {
            self.trackers[self.turn.active_player].on_turn_start();
        }
        None
    }

    fn perform_turn_based_actions(&mut self) -> Option<ActionSpace> {
        match self.turn.step {
            StepType::Untap => {
                let active = self.turn.active_player;
                let battlefield: Vec<_> = self.state.battlefield(active).to_vec();
                for id in battlefield {
                    if let Some(permanent) = self.state.permanent_mut(id) {
                        permanent.summoning_sick = false;
                        permanent.untap();
                    }
                }
                self.turn.turn_based_done = true;
                None
            }
            StepType::Draw => {
                self.state.draw_card(self.turn.active_player);
                self.turn.turn_based_done = true;
                None
            }
            StepType::DeclareAttackers => {
                self.profiler.begin("combat");
                let space = flow::declare_attackers_tick(&self.state, &mut self.turn);
                self.profiler.end();
                if space.is_none() {
                    self.turn.turn_based_done = true;
                }
                space
            }
            StepType::DeclareBlockers => {
                self.profiler.begin("combat");
                let space = flow::declare_blockers_tick(&self.state, &mut self.turn);
                self.profiler.end();
                if space.is_none() {
                    self.turn.turn_based_done = true;
                }
                space
            }
            StepType::CombatDamage => {
                self.profiler.begin("combat");
                let dealt = flow::deal_combat_damage(&mut self.state, &self.turn);
                self.profiler.end();
                if dealt > 0 {
                    self.trackers[self.turn.active_player].on_damage_dealt(dealt);
                    self.trackers[self.turn.non_active_player()].on_damage_taken(dealt);
                }
                self.turn.turn_based_done = true;
                None
            }
            StepType::EndCombat => {
                for i in 0..self.state.players.len() {
                    let battlefield: Vec<_> =
                        self.state.battlefield(PlayerId(i as u8)).to_vec();
                    for id in battlefield {
                        if let Some(permanent) = self.state.permanent_mut(id) {
                            permanent.attacking = false;
                        }
                    }
                }
                self.turn.turn_based_done = true;
                None
            }
            StepType::Cleanup => {
                for i in 0..self.state.players.len() {
                    let battlefield: Vec<_> =
                        self.state.battlefield(PlayerId(i as u8)).to_vec();
                    for id in battlefield {
                        if let Some(permanent) = self.state.permanent_mut(id) {
                            permanent.clear_damage();
                        }
                    }
                }
                self.turn.turn_based_done = true;
                None
            }
            _ => {
                self.turn.turn_based_done = true;
                None
            }
        }
    }
}
