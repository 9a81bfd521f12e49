//! Combatant level.

use core::fmt;

/// Level of a combatant.
///
/// `Debug` replaces the old "level -1" sentinel: it grants maximal stats,
/// unlimited item uses and damage immunity, and never gains experience.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Level {
    /// Regular level, always >= 1.
    Rank(u32),
    Debug,
}

impl Level {
    pub const FIRST: Level = Level::Rank(1);

    /// Creates a regular level, clamping to 1.
    pub fn new(rank: u32) -> Self {
        Level::Rank(rank.max(1))
    }

    /// Interprets a raw integer level where `-1` means debug.
    pub fn from_raw(raw: i32) -> Self {
        if raw == -1 {
            Level::Debug
        } else {
            Level::new(raw.max(1) as u32)
        }
    }

    /// Raw integer form (`-1` for debug), as shown in the HUD.
    pub fn as_raw(self) -> i32 {
        match self {
            Level::Rank(rank) => rank as i32,
            Level::Debug => -1,
        }
    }

    pub fn rank(self) -> Option<u32> {
        match self {
            Level::Rank(rank) => Some(rank),
            Level::Debug => None,
        }
    }

    pub fn is_debug(self) -> bool {
        matches!(self, Level::Debug)
    }

    /// The following level. Debug stays debug.
    pub fn next(self) -> Self {
        match self {
            Level::Rank(rank) => Level::Rank(rank.saturating_add(1)),
            Level::Debug => Level::Debug,
        }
    }
}

impl Default for Level {
    fn default() -> Self {
        Level::FIRST
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Rank(rank) => write!(f, "{rank}"),
            Level::Debug => f.write_str("DEBUG"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_minus_one_is_debug() {
        assert_eq!(Level::from_raw(-1), Level::Debug);
        assert_eq!(Level::Debug.as_raw(), -1);
    }

    #[test]
    fn ranks_clamp_to_one() {
        assert_eq!(Level::from_raw(0), Level::FIRST);
        assert_eq!(Level::from_raw(-7), Level::FIRST);
        assert_eq!(Level::new(0), Level::FIRST);
    }

    #[test]
    fn next_advances_ranks_only() {
        assert_eq!(Level::new(3).next(), Level::Rank(4));
        assert_eq!(Level::Debug.next(), Level::Debug);
    }
}
