//! Mutable game state: players, permanents, zones, and the aggregate.

mod game_state;
mod permanent;
mod player;
mod zones;

pub use game_state::{GameState, PLAYER_COUNT};
pub use permanent::Permanent;
pub use player::Player;
pub use zones::{ZoneType, Zones};
