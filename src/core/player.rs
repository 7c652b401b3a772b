//! Participant identification.
//!
//! ## UserId
//!
//! Opaque string supplied by the hosting service.
//!
//! ## PlayerIndex
//!
//! 0-based seat of a user, fixed by the order users were given in.
//!
//! ## Players
//!
//! The ordered user list plus its reverse index for O(1) lookups.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Opaque participant identifier.
pub type UserId = String;

/// Seat of a user within the session's player ordering.
///
/// Player indices are 0-based: the first user is `PlayerIndex(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerIndex(pub usize);

impl PlayerIndex {
    /// Create a new player index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the raw index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for PlayerIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Ordered participants of one session.
///
/// Immutable once built. If a user id appears more than once, the last
/// occurrence determines its index.
///
/// ## Example
///
/// ```
/// use instance_host::core::{PlayerIndex, Players};
///
/// let players = Players::new(vec!["alice".to_string(), "bob".to_string()]);
/// assert_eq!(players.index_of("bob"), Some(PlayerIndex::new(1)));
/// assert_eq!(players.index_of("carol"), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Players {
    user_ids: Vec<UserId>,
    indices: FxHashMap<UserId, PlayerIndex>,
}

impl Players {
    /// Build the reverse index for an ordered user list.
    pub fn new(user_ids: Vec<UserId>) -> Self {
        let mut indices = FxHashMap::default();
        for (i, user_id) in user_ids.iter().enumerate() {
            indices.insert(user_id.clone(), PlayerIndex(i));
        }

        let players = Self { user_ids, indices };
        if players.has_duplicates() {
            warn!(
                users = players.user_ids.len(),
                distinct = players.indices.len(),
                "duplicate user ids; later occurrences take the index"
            );
        }
        players
    }

    /// User ids in seat order, duplicates included.
    #[must_use]
    pub fn user_ids(&self) -> &[UserId] {
        &self.user_ids
    }

    /// Number of players, as used for the game descriptor.
    ///
    /// This is the number of distinct users.
    #[must_use]
    pub fn count(&self) -> usize {
        self.indices.len()
    }

    /// Look up a user's seat.
    #[must_use]
    pub fn index_of(&self, user_id: &str) -> Option<PlayerIndex> {
        self.indices.get(user_id).copied()
    }

    /// Whether the user takes part in the session.
    #[must_use]
    pub fn contains(&self, user_id: &str) -> bool {
        self.indices.contains_key(user_id)
    }

    /// Whether any user id was given more than once.
    #[must_use]
    pub fn has_duplicates(&self) -> bool {
        self.indices.len() != self.user_ids.len()
    }

    /// Iterate over (user id, seat) pairs in seat order.
    ///
    /// Duplicated ids are yielded once per occurrence, each with the index
    /// that lookups resolve to.
    pub fn iter(&self) -> impl Iterator<Item = (&UserId, PlayerIndex)> {
        self.user_ids.iter().map(|u| (u, self.indices[u]))
    }

    /// Iterate over distinct (user id, seat) pairs in seat order.
    ///
    /// A duplicated id appears once, at the seat lookups resolve to.
    pub fn seats(&self) -> impl Iterator<Item = (&UserId, PlayerIndex)> {
        self.user_ids.iter().enumerate().filter_map(|(i, u)| {
            let index = self.indices[u];
            (index.index() == i).then_some((u, index))
        })
    }
}
