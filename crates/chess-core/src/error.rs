//! Errors raised at the rules boundary.

use thiserror::Error;

/// Errors produced when text or moves cannot be turned into legal game state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RulesError {
    /// The FEN string could not be parsed into a valid position.
    #[error("invalid FEN '{fen}': {reason}")]
    InvalidFen { fen: String, reason: String },

    /// The move text is not valid coordinate notation or SAN.
    #[error("invalid move notation: {0}")]
    InvalidMove(String),

    /// The move is well formed but not legal in the position.
    #[error("illegal move: {0}")]
    IllegalMove(String),

    /// More than one legal move matches the SAN text.
    #[error("ambiguous move: {0}")]
    AmbiguousMove(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = RulesError::InvalidFen {
            fen: "bogus".to_string(),
            reason: "too few fields".to_string(),
        };
        assert_eq!(err.to_string(), "invalid FEN 'bogus': too few fields");

        assert_eq!(
            RulesError::IllegalMove("e2e5".to_string()).to_string(),
            "illegal move: e2e5"
        );
        assert_eq!(
            RulesError::AmbiguousMove("Nd2".to_string()).to_string(),
            "ambiguous move: Nd2"
        );
    }
}
