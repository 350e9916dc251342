use serde::{Deserialize, Serialize};
use std::fmt;

/// Checklist item weight clamped to [1, 10].
/// Represents how much an item contributes to the audit score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemWeight(u8);

impl ItemWeight {
    /// Minimum weight.
    pub const MIN: u8 = 1;
    /// Maximum weight.
    pub const MAX: u8 = 10;

    /// Create a new ItemWeight, clamping to [1, 10].
    pub fn new(value: u8) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    /// Get the raw value.
    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for ItemWeight {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl fmt::Display for ItemWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u8> for ItemWeight {
    fn from(value: u8) -> Self {
        Self::new(value)
    }
}

impl From<ItemWeight> for u8 {
    fn from(w: ItemWeight) -> Self {
        w.0
    }
}
