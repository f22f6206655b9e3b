//! Version stamps for change detection.
//!
//! Every observable change to a piece of state bumps its [`Version`]. Readers
//! that cached a rendering (or any other derived value) compare the version
//! they saw with the current one instead of diffing the state itself.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Monotonically increasing stamp of a state value.
///
/// # Examples
///
/// ```
/// use todolist_core::version::Version;
///
/// let v0 = Version::INITIAL;
/// let v1 = v0.next();
/// assert_eq!(v1, Version::new(1));
/// assert!(v1 > v0);
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Version(u64);

impl Version {
    /// The version of a freshly constructed state.
    pub const INITIAL: Self = Self(0);

    /// Create a new `Version` with the given value.
    ///
    /// # Examples
    ///
    /// ```
    /// use todolist_core::version::Version;
    ///
    /// let version = Version::new(42);
    /// assert_eq!(version.value(), 42);
    /// ```
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the version number.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Get the next version (current + 1).
    ///
    /// Saturates at `u64::MAX`; a session would need that many edits first.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Check if this is the initial version (0).
    #[must_use]
    pub const fn is_initial(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl From<u64> for Version {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<Version> for u64 {
    fn from(version: Version) -> Self {
        version.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn initial_is_zero() {
        assert!(Version::INITIAL.is_initial());
        assert_eq!(Version::default(), Version::INITIAL);
        assert!(!Version::INITIAL.next().is_initial());
    }

    #[test]
    fn display_is_prefixed() {
        assert_eq!(Version::new(7).to_string(), "v7");
    }

    #[test]
    fn next_saturates() {
        assert_eq!(Version::new(u64::MAX).next(), Version::new(u64::MAX));
    }

    proptest! {
        #[test]
        fn next_is_strictly_greater(n in 0..u64::MAX) {
            let v = Version::new(n);
            prop_assert!(v.next() > v);
            prop_assert_eq!(v.next().value(), n + 1);
        }
    }
}
