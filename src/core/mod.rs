//! Core building blocks: identifiers, RNG, mana, configuration, errors.

mod config;
mod error;
mod ids;
mod mana;
mod rng;

pub use config::PlayerConfig;
pub use error::{AgentError, ConfigError, EnvError, RulesError};
pub use ids::{ObjectId, PlayerId, PlayerMap};
pub use mana::{Color, Mana, ManaCost};
pub use rng::GameRng;
