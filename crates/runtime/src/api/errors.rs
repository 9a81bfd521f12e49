//! Unified error types surfaced by the runtime API.
//!
//! Configuration errors are fatal to starting a battle. Everything that happens
//! inside a running battle degrades to a logged no-op instead of an error.
use std::fmt;

use thiserror::Error;
use tracing::{debug, error, warn};

use game_core::{ConfigError, ErrorSeverity, GameError};

pub type Result<T> = std::result::Result<T, BattleError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum BattleError {
    #[error("battle engine requires a {kind} before building")]
    MissingCollaborator { kind: CollaboratorKind },

    #[error("a battle is already in progress")]
    BattleInProgress,

    #[error("no battle is in progress")]
    NoBattle,

    #[error("combatant provider could not spawn an enemy")]
    NoEnemy,

    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),
}

impl GameError for BattleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::MissingCollaborator { .. } => ErrorSeverity::Fatal,
            Self::BattleInProgress | Self::NoBattle => ErrorSeverity::Validation,
            Self::NoEnemy => ErrorSeverity::Internal,
            Self::InvalidConfig(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingCollaborator { .. } => "MISSING_COLLABORATOR",
            Self::BattleInProgress => "BATTLE_IN_PROGRESS",
            Self::NoBattle => "NO_BATTLE",
            Self::NoEnemy => "NO_ENEMY",
            Self::InvalidConfig(err) => err.error_code(),
        }
    }
}

/// Logs a rejected operation at the level its severity calls for.
///
/// Returns `false` when the running battle has to be aborted.
pub fn report<E: GameError + ?Sized>(err: &E, context: &str) -> bool {
    let severity = err.severity();
    let code = err.error_code();
    if severity.is_internal() {
        error!(code, severity = severity.as_str(), %err, "{}", context);
        return false;
    }
    if severity.is_recoverable() {
        debug!(code, severity = severity.as_str(), %err, "{}", context);
    } else {
        warn!(code, severity = severity.as_str(), %err, "{}", context);
    }
    true
}

/// Collaborators the engine cannot run without.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CollaboratorKind {
    Presenter,
    InputSource,
    CombatantProvider,
}

impl fmt::Display for CollaboratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CollaboratorKind::Presenter => "presenter",
            CollaboratorKind::InputSource => "input source",
            CollaboratorKind::CombatantProvider => "combatant provider",
        };
        write!(f, "{}", label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setup_errors_are_fatal() {
        let err = BattleError::MissingCollaborator {
            kind: CollaboratorKind::Presenter,
        };
        assert_eq!(err.severity(), ErrorSeverity::Fatal);
        assert_eq!(err.error_code(), "MISSING_COLLABORATOR");
        assert!(!report(&err, "build failed"));
    }

    #[test]
    fn rejected_requests_keep_the_battle_going() {
        assert!(report(&BattleError::BattleInProgress, "start rejected"));
        assert!(report(&BattleError::NoBattle, "abandon rejected"));
        assert!(!report(&BattleError::NoEnemy, "spawn failed"));
    }
}
