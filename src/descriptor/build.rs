//! Game descriptor derivation.

use serde::{Deserialize, Serialize};

use super::game_type::{
    ChanceMode, Dynamics, GameInfo, GameParameter, GameParameters, GameType, Information,
    RewardModel, Utility,
};
use crate::board::BoardProperties;
use crate::core::GameConfig;

/// Parameter carrying the player count.
pub const NUM_PLAYERS_PARAM: &str = "num_players";

/// Immutable game shape handed to the game framework.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameDescriptor {
    /// Type of the game.
    pub game_type: GameType,
    /// Sizes and bounds.
    pub game_info: GameInfo,
    /// Resolved parameters of this game.
    pub parameters: GameParameters,
}

impl GameDescriptor {
    /// Derive the descriptor of a session.
    ///
    /// Pure: the same inputs always yield an identical descriptor.
    ///
    /// ```
    /// use instance_host::board::BoardProperties;
    /// use instance_host::core::GameConfig;
    /// use instance_host::descriptor::{GameDescriptor, Information};
    ///
    /// let config = GameConfig {
    ///     game_class: "poker:Holdem".to_string(),
    ///     board: "table.json".to_string(),
    ///     min_players: 2,
    ///     max_players: 6,
    ///     move_limit: 200,
    /// };
    /// let board = BoardProperties { private_information: true, num_distinct_actions: 4 };
    ///
    /// let d = GameDescriptor::build("poker", &config, board, 3);
    /// assert_eq!(d.game_type.information, Information::Imperfect);
    /// assert_eq!(d.game_info.max_utility, 3.0);
    /// ```
    #[must_use]
    pub fn build(
        instance_type: &str,
        config: &GameConfig,
        board: BoardProperties,
        player_count: usize,
    ) -> Self {
        let information = if board.private_information {
            Information::Imperfect
        } else {
            Information::Perfect
        };

        let game_type = GameType {
            short_name: instance_type.to_string(),
            long_name: instance_type.to_string(),
            dynamics: Dynamics::Sequential,
            chance_mode: ChanceMode::Deterministic,
            information,
            utility: Utility::ZeroSum,
            reward_model: RewardModel::Terminal,
            max_num_players: config.max_players,
            min_num_players: config.min_players,
            provides_information_state_string: false,
            provides_information_state_tensor: false,
            provides_observation_string: true,
            provides_observation_tensor: true,
            parameter_specification: num_players(config.min_players),
        };

        let game_info = GameInfo {
            num_distinct_actions: board.num_distinct_actions,
            max_chance_outcomes: 0,
            num_players: player_count,
            min_utility: -1.0,
            max_utility: player_count as f64,
            utility_sum: 0.0,
            max_game_length: config.move_limit,
        };

        Self {
            game_type,
            game_info,
            parameters: num_players(player_count),
        }
    }

    /// Resolved player count.
    #[must_use]
    pub fn num_players(&self) -> usize {
        self.game_info.num_players
    }
}

fn num_players(count: usize) -> GameParameters {
    let mut params = GameParameters::new();
    params.insert(
        NUM_PLAYERS_PARAM.to_string(),
        GameParameter::Int(count as i64),
    );
    params
}
