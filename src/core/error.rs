//! Error types, split by who is at fault.
//!
//! `ConfigError` and `AgentError` report caller mistakes: bad player
//! configs, acting before `reset`, out-of-range action indices. The game
//! state is untouched when one is returned; the caller can retry.
//!
//! `RulesError` reports an internal invariant violation (a bug or a stale
//! action space). It is fatal to the episode: callers should discard the
//! environment and reset.

/// Invalid episode configuration passed to `reset`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("expected {expected} players, got {actual}")]
    PlayerCount { expected: usize, actual: usize },

    #[error("player '{player}' has an empty deck")]
    EmptyDeck { player: String },

    #[error("player '{player}' lists unknown card '{name}'")]
    UnknownCard { player: String, name: String },
}

/// Recoverable caller mistakes during an episode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AgentError {
    #[error("action index {index} out of range (valid: 0..{len})")]
    ActionIndexOutOfBounds { index: i64, len: usize },

    #[error("step called before reset")]
    NotReset,

    #[error("step called after the game ended")]
    GameOver,

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Fatal engine invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RulesError {
    #[error("action space generation {actual} is stale (current: {current})")]
    StaleActionSpace { actual: u64, current: u64 },

    #[error("no action space is pending")]
    MissingActionSpace,
}

/// Top-level error type returned by the `Env` facade.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvError {
    #[error(transparent)]
    Agent(#[from] AgentError),

    #[error(transparent)]
    Rules(#[from] RulesError),
}

impl From<ConfigError> for EnvError {
    fn from(err: ConfigError) -> Self {
        EnvError::Agent(AgentError::Config(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = AgentError::ActionIndexOutOfBounds { index: 7, len: 3 };
        assert_eq!(err.to_string(), "action index 7 out of range (valid: 0..3)");

        let err = ConfigError::PlayerCount {
            expected: 2,
            actual: 3,
        };
        assert_eq!(err.to_string(), "expected 2 players, got 3");
    }

    #[test]
    fn test_config_error_wraps_into_env_error() {
        let err: EnvError = ConfigError::EmptyDeck {
            player: "gaea".into(),
        }
        .into();
        assert!(matches!(
            err,
            EnvError::Agent(AgentError::Config(ConfigError::EmptyDeck { .. }))
        ));
    }

    #[test]
    fn test_stale_space_message() {
        let err = RulesError::StaleActionSpace {
            actual: 4,
            current: 6,
        };
        assert_eq!(
            err.to_string(),
            "action space generation 4 is stale (current: 6)"
        );
    }
}
