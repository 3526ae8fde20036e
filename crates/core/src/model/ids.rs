use serde::{Deserialize, Serialize};
use std::fmt;

/// Number identifying a lesson; also the key of its file on disk.
///
/// Zero is reserved for "no lesson" (e.g. nothing completed yet).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LessonNumber(u32);

impl LessonNumber {
    /// Creates a new `LessonNumber`
    #[must_use]
    pub fn new(number: u32) -> Self {
        Self(number)
    }

    /// Returns the underlying u32 value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }

    /// The lesson following this one.
    #[must_use]
    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }

    #[must_use]
    pub fn is_none(&self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for LessonNumber {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Debug for LessonNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LessonNumber({})", self.0)
    }
}

impl fmt::Display for LessonNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
