//! Error classification shared by every battle layer.
//!
//! Errors are declared next to the types they guard ([`InventoryError`],
//! [`CombatError`], [`ConfigError`]). Each reports an [`ErrorSeverity`] that
//! decides how a running battle reacts to it.
//!
//! [`InventoryError`]: crate::InventoryError
//! [`CombatError`]: crate::CombatError
//! [`ConfigError`]: crate::config::ConfigError

/// How a rejected operation affects the battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Expected steady state, e.g. adding to a full inventory.
    Recoverable,
    /// A request the current state cannot honour; the step is skipped.
    Validation,
    /// Battle state no longer adds up; the running battle is aborted.
    Internal,
    /// Nothing can run until the setup is fixed.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// True when the running battle must not go on.
    pub const fn is_internal(self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Implemented by every error a battle layer returns.
pub trait GameError: core::error::Error {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier used as the `code` log field.
    fn error_code(&self) -> &'static str;
}
