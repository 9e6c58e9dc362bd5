//! Identity types for gazetteer records

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique Property Reference Number.
///
/// Assigned by the server and immutable once persisted. Negative values are
/// client-side placeholders for records that have not been saved yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Uprn(i64);

impl Uprn {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> i64 {
        self.0
    }

    /// True for client-side placeholder keys (not yet assigned by the server).
    pub const fn is_placeholder(self) -> bool {
        self.0 < 0
    }
}

impl fmt::Display for Uprn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Uprn {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Unique Street Reference Number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Usrn(i64);

impl Usrn {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> i64 {
        self.0
    }

    pub const fn is_placeholder(self) -> bool {
        self.0 < 0
    }
}

impl fmt::Display for Usrn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Usrn {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Issues synthetic primary keys and sequence numbers for draft sub-entities
/// (notes added client-side before a record is saved).
///
/// Keys descend from -10 so they can never collide with server-assigned
/// positive keys; sequence numbers ascend from 1. Seeding from an existing
/// sub-entity list continues below the current minimum key and above the
/// current maximum sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftKeyArena {
    next_key: i64,
    next_sequence: i32,
}

impl DraftKeyArena {
    /// First synthetic key handed out by a fresh arena.
    pub const FIRST_KEY: i64 = -10;

    pub fn new() -> Self {
        Self {
            next_key: Self::FIRST_KEY,
            next_sequence: 1,
        }
    }

    /// Build an arena that continues from the keys and sequence numbers
    /// already present in a sub-entity list.
    pub fn seeded<'a, K, S>(existing_keys: K, existing_sequences: S) -> Self
    where
        K: IntoIterator<Item = &'a i64>,
        S: IntoIterator<Item = &'a i32>,
    {
        let min_key = existing_keys.into_iter().copied().min();
        let max_sequence = existing_sequences.into_iter().copied().max();

        let next_key = match min_key {
            Some(min) if min < 0 => min - 1,
            _ => Self::FIRST_KEY,
        };
        let next_sequence = max_sequence.map_or(1, |max| max + 1);

        Self {
            next_key,
            next_sequence,
        }
    }

    /// Take the next synthetic primary key (descending).
    pub fn next_key(&mut self) -> i64 {
        let key = self.next_key;
        self.next_key -= 1;
        key
    }

    /// Take the next sequence number (ascending).
    pub fn next_sequence(&mut self) -> i32 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        sequence
    }
}

impl Default for DraftKeyArena {
    fn default() -> Self {
        Self::new()
    }
}
