//! Errors raised by support profile operations.

use thiserror::Error;

use crate::core::{PlayerId, Strategy};

/// Broad classification of a `SupportError`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The operation is not defined for the given operands (e.g. removing a
    /// strategy that is not in the support).
    UndefinedOperation,
    /// The operands are incompatible, or the result would be invalid.
    Value,
    /// Positional access out of range.
    Index,
}

/// Why a strategy could not be removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum RemoveFailure {
    #[error("it is not in the support")]
    NotInSupport,
    #[error("it is the last strategy of its player in the support")]
    LastStrategy,
}

/// Errors from constructing or combining support profiles.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SupportError {
    #[error("cannot remove {strategy}: {reason}")]
    UndefinedOperation {
        strategy: Strategy,
        reason: RemoveFailure,
    },
    #[error("support profiles are defined on different games")]
    IncompatibleProfiles,
    #[error("{player} would have no strategies in the support")]
    EmptySupport { player: PlayerId },
    #[error("index {index} out of range for a support of {len} strategies")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("{0} is not a strategy of this game")]
    ForeignStrategy(Strategy),
}

impl SupportError {
    /// Classify the error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            SupportError::UndefinedOperation { .. } => ErrorKind::UndefinedOperation,
            SupportError::IncompatibleProfiles
            | SupportError::EmptySupport { .. }
            | SupportError::ForeignStrategy(_) => ErrorKind::Value,
            SupportError::IndexOutOfRange { .. } => ErrorKind::Index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Game;

    #[test]
    fn test_kinds() {
        let game = Game::new_table(&[2]).unwrap();
        let s = game.strategy(PlayerId::new(0), 0).unwrap();

        let undefined = SupportError::UndefinedOperation {
            strategy: s,
            reason: RemoveFailure::LastStrategy,
        };
        assert_eq!(undefined.kind(), ErrorKind::UndefinedOperation);
        assert_eq!(SupportError::IncompatibleProfiles.kind(), ErrorKind::Value);
        assert_eq!(
            SupportError::EmptySupport { player: PlayerId::new(0) }.kind(),
            ErrorKind::Value
        );
        assert_eq!(SupportError::ForeignStrategy(s).kind(), ErrorKind::Value);
        assert_eq!(
            SupportError::IndexOutOfRange { index: 3, len: 2 }.kind(),
            ErrorKind::Index
        );
    }

    #[test]
    fn test_messages() {
        let err = SupportError::EmptySupport { player: PlayerId::new(1) };
        assert_eq!(err.to_string(), "Player 2 would have no strategies in the support");

        let err = SupportError::IndexOutOfRange { index: 5, len: 4 };
        assert_eq!(err.to_string(), "index 5 out of range for a support of 4 strategies");
    }
}
