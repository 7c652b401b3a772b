//! Game descriptor builder.
//!
//! Combines the configuration record, board capabilities and player count
//! into the immutable `GameDescriptor` consumed by the game framework:
//! - information class from the board's private information flag
//! - action space size from the board
//! - player bounds and move limit from the configuration
//! - zero-sum, terminal-reward utility in `[-1, player_count]`

pub mod build;
pub mod game_type;

pub use build::{GameDescriptor, NUM_PLAYERS_PARAM};
pub use game_type::{
    ChanceMode, Dynamics, GameInfo, GameParameter, GameParameters, GameType, Information,
    RewardModel, Utility,
};
