//! Agent-facing surface: actions, action spaces, observations, behavior
//! statistics, and the `Env` facade.

mod action;
mod action_space;
mod behavior;
mod env;
mod observation;

pub use action::{Action, ActionKind, ActionType};
pub use action_space::{ActionSpace, ActionSpaceType};
pub use behavior::BehaviorTracker;
pub use env::{Env, StepResult};
pub use observation::{
    ActionOption, ActionSpaceData, CardData, Observation, PermanentData, PlayerData, TurnData,
};
