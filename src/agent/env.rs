//! The gym-style environment facade.
//!
//! `Env` owns at most one episode at a time. `reset` starts a fresh
//! episode from player configs (reseeding the RNG, so the same `Env`
//! replays identically); `step` answers the pending action space by
//! index. The profiler and behavior trackers survive across resets so
//! their statistics accumulate over a whole training run.

use crate::agent::{BehaviorTracker, Observation};
use crate::core::{AgentError, EnvError, PlayerConfig, PlayerId, PlayerMap, RulesError};
use crate::game::Game;
use crate::infra::{InfoDict, Profiler};
use crate::state::PLAYER_COUNT;

/// Result of one environment step.
#[derive(Clone, Debug)]
pub struct StepResult {
    pub observation: Observation,
    /// +1 when the agent wins, -1 when it loses, 0 otherwise.
    pub reward: f64,
    pub terminated: bool,
    /// Never set by the engine; step limits belong to the caller.
    pub truncated: bool,
    pub info: InfoDict,
}

/// Gym-style environment around the rules engine.
#[derive(Debug)]
pub struct Env {
    seed: u64,
    skip_trivial: bool,
    profile: bool,
    track_behavior: bool,
    game: Option<Game>,
}

impl Env {
    /// An environment with trivial-space skipping on and instrumentation off.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            skip_trivial: true,
            profile: false,
            track_behavior: false,
            game: None,
        }
    }

    /// Surface every decision point, including single-option ones.
    #[must_use]
    pub fn with_skip_trivial(mut self, skip_trivial: bool) -> Self {
        self.skip_trivial = skip_trivial;
        self
    }

    #[must_use]
    pub fn with_profiling(mut self, profile: bool) -> Self {
        self.profile = profile;
        self
    }

    #[must_use]
    pub fn with_behavior_tracking(mut self, track_behavior: bool) -> Self {
        self.track_behavior = track_behavior;
        self
    }

    /// Start a new episode, replacing any running one.
    pub fn reset(
        &mut self,
        configs: &[PlayerConfig],
    ) -> Result<(Observation, InfoDict), EnvError> {
        // Reject bad configs before touching the running episode; a failed
        // reset must leave the episode and its counters intact.
        Game::validate(configs)?;

        let (mut profiler, trackers) = match self.game.take() {
            Some(old) => (old.profiler, old.trackers),
            None => (
                Profiler::new(self.profile),
                PlayerMap::new(PLAYER_COUNT, |_| BehaviorTracker::new(self.track_behavior)),
            ),
        };

        profiler.begin("env_reset");
        let mut game = Game::new(configs, self.seed, self.skip_trivial, profiler, trackers)?;
        game.profiler.end();

        let observation = Observation::new(&game);
        let info = self.build_info(&game);
        self.game = Some(game);
        Ok((observation, info))
    }

    /// Answer the pending action space with `action_index`.
    pub fn step(&mut self, action_index: i64) -> Result<StepResult, EnvError> {
        let game = self.game.as_mut().ok_or(AgentError::NotReset)?;

        game.profiler.begin("env_step");
        let generation = match game.action_space() {
            Some(space) => space.generation,
            None => {
                game.profiler.end();
                return Err(RulesError::MissingActionSpace.into());
            }
        };

        let terminated = match game.step(generation, action_index) {
            Ok(terminated) => terminated,
            Err(err) => {
                game.profiler.end();
                return Err(err);
            }
        };

        game.profiler.begin("observation");
        let observation = Observation::new(game);
        game.profiler.end();
        game.profiler.end();

        let reward = if terminated {
            match game.winner() {
                Some(winner) if winner == Observation::AGENT => 1.0,
                Some(_) => -1.0,
                None => 0.0,
            }
        } else {
            0.0
        };

        let game = self.game.as_ref().expect("episode running");
        let mut info = self.build_info(game);
        if terminated {
            info.set_str("winner_name", game.winner_name().unwrap_or("draw"));
        }

        Ok(StepResult {
            observation,
            reward,
            terminated,
            truncated: false,
            info,
        })
    }

    /// Current instrumentation snapshot; empty before the first `reset`.
    #[must_use]
    pub fn info(&self) -> InfoDict {
        match &self.game {
            Some(game) => self.build_info(game),
            None => InfoDict::new(),
        }
    }

    /// Instrumentation snapshots, keyed by concern.
    fn build_info(&self, game: &Game) -> InfoDict {
        let mut info = InfoDict::new();
        if self.profile {
            let mut profiler = InfoDict::new();
            for (path, line) in game.profiler.stats() {
                profiler.set_str(path, line);
            }
            info.set_dict("profiler", profiler);
        }
        if self.track_behavior {
            let mut behavior = InfoDict::new();
            behavior.set_dict("hero", game.trackers[PlayerId(0)].stats());
            behavior.set_dict("villain", game.trackers[PlayerId(1)].stats());
            info.set_dict("behavior", behavior);
        }
        info
    }
}
