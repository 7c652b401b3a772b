//! Mutable board state.
//!
//! ## State Values (i64 only)
//!
//! All values are `i64`. To store other types:
//! - Booleans: use 0/1
//! - Enums: use discriminant values
//! - Player references: use the `PlayerIndex` value
//!
//! Player-scoped values live under `"<key>.<index>"`; the `*_player`
//! accessors build that key.
//!
//! Backed by `im::HashMap` so snapshots are O(1), which the Python adapter
//! relies on when handing state across the FFI boundary.

use im::HashMap as ImHashMap;
use serde::{Deserialize, Serialize};

use crate::core::PlayerIndex;

/// Key/value game state carried by a board.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoardState {
    values: ImHashMap<String, i64>,
}

impl BoardState {
    /// Create an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Key under which a player-scoped value is stored.
    #[must_use]
    pub fn player_key(key: &str, player: PlayerIndex) -> String {
        format!("{}.{}", key, player.index())
    }

    /// Get a value with default.
    #[must_use]
    pub fn get(&self, key: &str, default: i64) -> i64 {
        self.values.get(key).copied().unwrap_or(default)
    }

    /// Set a value.
    pub fn set(&mut self, key: impl Into<String>, value: i64) {
        self.values.insert(key.into(), value);
    }

    /// Modify a value by delta, starting from 0 if unset.
    ///
    /// Saturates at `i64::MIN` / `i64::MAX`.
    pub fn modify(&mut self, key: &str, delta: i64) {
        let current = self.get(key, 0);
        self.values.insert(key.to_string(), current.saturating_add(delta));
    }

    /// Remove a value, returning it if it was set.
    pub fn remove(&mut self, key: &str) -> Option<i64> {
        self.values.remove(key)
    }

    /// Check whether a value is set.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    // === Player-scoped values ===

    /// Get a player-scoped value with default.
    #[must_use]
    pub fn get_player(&self, player: PlayerIndex, key: &str, default: i64) -> i64 {
        self.get(&Self::player_key(key, player), default)
    }

    /// Set a player-scoped value.
    pub fn set_player(&mut self, player: PlayerIndex, key: &str, value: i64) {
        self.set(Self::player_key(key, player), value);
    }

    /// Modify a player-scoped value by delta.
    pub fn modify_player(&mut self, player: PlayerIndex, key: &str, delta: i64) {
        self.modify(&Self::player_key(key, player), delta);
    }

    // === Inspection ===

    /// Number of set values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if no value is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over (key, value) pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, i64)> {
        self.values.iter().map(|(k, v)| (k, *v))
    }
}

impl FromIterator<(String, i64)> for BoardState {
    fn from_iter<I: IntoIterator<Item = (String, i64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
