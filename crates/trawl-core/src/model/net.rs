use crate::model::depth::Depth;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Fish a single net holds before it must be emptied.
pub const NET_CAPACITY: u32 = 125;

/// Slots tracked when no explicit count is configured (port, starboard).
pub const DEFAULT_NET_SLOTS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetLevel {
    #[default]
    Raised,
    Shallow,
    Medium,
    Deep,
}

impl NetLevel {
    pub const fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(NetLevel::Raised),
            1 => Some(NetLevel::Shallow),
            2 => Some(NetLevel::Medium),
            3 => Some(NetLevel::Deep),
            _ => None,
        }
    }

    /// Shoal depth this level fishes at; a raised net fishes nowhere.
    pub const fn as_depth(self) -> Option<Depth> {
        match self {
            NetLevel::Raised => None,
            NetLevel::Shallow => Some(Depth::Shallow),
            NetLevel::Medium => Some(Depth::Medium),
            NetLevel::Deep => Some(Depth::Deep),
        }
    }
}

impl fmt::Display for NetLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NetLevel::Raised => "raised",
            NetLevel::Shallow => "shallow",
            NetLevel::Medium => "medium",
            NetLevel::Deep => "deep",
        };
        f.write_str(label)
    }
}

/// Depth state of one net slot, driven only by the polled numeric signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Net {
    slot: usize,
    level: NetLevel,
}

impl Net {
    pub const fn new(slot: usize) -> Self {
        Self {
            slot,
            level: NetLevel::Raised,
        }
    }

    pub const fn slot(&self) -> usize {
        self.slot
    }

    pub const fn level(&self) -> NetLevel {
        self.level
    }

    pub const fn capacity(&self) -> u32 {
        NET_CAPACITY
    }

    /// Applies a raw signal value. Values outside the lookup leave the level
    /// unchanged; returns whether the level was updated.
    pub fn set_level(&mut self, raw: i32) -> bool {
        match NetLevel::from_raw(raw) {
            Some(level) => {
                self.level = level;
                true
            }
            None => false,
        }
    }

    /// Whether a shoal at `depth` can be fished by this net right now.
    pub fn matches(&self, depth: Depth) -> bool {
        self.level.as_depth() == Some(depth)
    }
}
