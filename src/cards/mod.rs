//! Card data: static definitions, the registry, and in-game instances.

mod definition;
mod instance;
mod registry;

pub use definition::{CardDefinition, CardType, CardTypes};
pub use instance::Card;
pub use registry::CardRegistry;
