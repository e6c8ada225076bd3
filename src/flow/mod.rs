//! Turn flow: the step machine, priority windows, and combat.

mod combat;
mod priority;
mod turn;

pub use combat::CombatState;
pub use priority::PrioritySystem;
pub use turn::{PhaseType, StepType, TurnSystem};

pub(crate) use combat::{deal_combat_damage, declare_attackers_tick, declare_blockers_tick};
pub(crate) use priority::{is_game_over, priority_complete, priority_tick};
