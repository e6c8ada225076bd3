//! # ccg-gym
//!
//! A trading card game rules engine wrapped in a gym-style environment
//! for RL training.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Same seed plus same action trace reproduces the
//!    exact same episode, down to every shuffle.
//!
//! 2. **Decision-Point Driven**: The engine advances autonomously until a
//!    player choice is required, then surfaces an ordered `ActionSpace`.
//!    Agents answer with an index; everything else is internal.
//!
//! 3. **Validate Before Mutate**: Caller mistakes (bad index, step before
//!    reset) are typed errors that leave the game state untouched.
//!
//! ## Modules
//!
//! - `core`: Object/player IDs, RNG, mana model, player configs, errors
//! - `cards`: Card definitions, registry, deck instantiation
//! - `state`: Players, permanents, zones, the aggregate `GameState`
//! - `flow`: Turn/phase/step machine, priority, combat
//! - `game`: The orchestrator tying state and flow together
//! - `agent`: Actions, action spaces, observations, the `Env` facade
//! - `infra`: Profiler and nested info dictionaries

pub mod agent;
pub mod cards;
pub mod core;
pub mod flow;
pub mod game;
pub mod infra;
pub mod state;

// Re-export commonly used types
pub use crate::core::{
    AgentError, Color, ConfigError, EnvError, GameRng, Mana, ManaCost, ObjectId,
    PlayerConfig, PlayerId, PlayerMap, RulesError,
};

pub use crate::cards::{Card, CardDefinition, CardRegistry, CardType, CardTypes};

pub use crate::state::{GameState, Permanent, Player, ZoneType, Zones};

pub use crate::flow::{CombatState, PhaseType, StepType, TurnSystem};

pub use crate::game::Game;

pub use crate::agent::{
    Action, ActionKind, ActionSpace, ActionSpaceType, ActionType, BehaviorTracker, Env,
    Observation, StepResult,
};

pub use crate::infra::{InfoDict, InfoValue, Profiler};
