//! Error types for the engine.

use thiserror::Error;

/// Errors raised by the rule engine and the agents.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A move index outside `0..=5` reached the rule engine (a caller bug).
    #[error("invalid argument: move index must be between 0 and 5, got {move_index}")]
    InvalidArgument { move_index: usize },

    /// The move index is in range but its slot holds no pebbles.
    #[error("invalid move: slot {slot} (move {move_index}) is empty")]
    IllegalMove { move_index: usize, slot: usize },

    /// An agent was used outside its lifecycle, or the search produced no move.
    #[error("invariant violation: {0}")]
    InvariantViolation(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_move() {
        let err = Error::InvalidArgument { move_index: 7 };
        assert_eq!(
            err.to_string(),
            "invalid argument: move index must be between 0 and 5, got 7"
        );

        let err = Error::IllegalMove {
            move_index: 2,
            slot: 8,
        };
        assert!(err.to_string().starts_with("invalid move"));
        assert!(err.to_string().contains("slot 8"));
    }
}
