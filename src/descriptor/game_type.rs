//! Game shape types in the form a sequential game framework expects.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// How players take turns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dynamics {
    /// One player acts at a time.
    Sequential,
    /// All players act at once.
    Simultaneous,
}

/// Whether the game contains chance events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChanceMode {
    /// No chance nodes.
    Deterministic,
    /// Chance outcomes with explicit probabilities.
    ExplicitStochastic,
    /// Chance outcomes drawn by sampling.
    SampledStochastic,
}

/// Information visibility class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Information {
    /// Single-player game.
    OneShot,
    /// Every player sees the whole state.
    Perfect,
    /// Some state is hidden from some players.
    Imperfect,
}

/// Relationship between player utilities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Utility {
    /// Utilities sum to zero.
    ZeroSum,
    /// Utilities sum to a constant.
    ConstantSum,
    /// Utilities are always equal.
    Identical,
    /// No constraint.
    GeneralSum,
}

/// When rewards are paid out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RewardModel {
    /// After every action.
    Rewards,
    /// Only at the end of the game.
    Terminal,
}

/// A game parameter value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameParameter {
    /// Integer parameter.
    Int(i64),
    /// Floating-point parameter.
    Double(f64),
    /// Boolean parameter.
    Bool(bool),
    /// String parameter.
    String(String),
}

/// Named game parameters, ordered by name.
pub type GameParameters = BTreeMap<String, GameParameter>;

/// Static description of a game's type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameType {
    /// Short name.
    pub short_name: String,
    /// Long name.
    pub long_name: String,
    /// Turn structure.
    pub dynamics: Dynamics,
    /// Chance events.
    pub chance_mode: ChanceMode,
    /// Information visibility.
    pub information: Information,
    /// Utility relationship.
    pub utility: Utility,
    /// Reward timing.
    pub reward_model: RewardModel,
    /// Most supported players.
    pub max_num_players: usize,
    /// Fewest supported players.
    pub min_num_players: usize,
    /// Whether a per-player information state string is available.
    pub provides_information_state_string: bool,
    /// Whether a per-player information state tensor is available.
    pub provides_information_state_tensor: bool,
    /// Whether a per-player observation string is available.
    pub provides_observation_string: bool,
    /// Whether a per-player observation tensor is available.
    pub provides_observation_tensor: bool,
    /// Accepted parameters and their defaults.
    pub parameter_specification: GameParameters,
}

/// Sizes and bounds of one concrete game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameInfo {
    /// Size of the action space.
    pub num_distinct_actions: usize,
    /// Most outcomes of any chance node.
    pub max_chance_outcomes: usize,
    /// Number of players in this game.
    pub num_players: usize,
    /// Lowest achievable utility.
    pub min_utility: f64,
    /// Highest achievable utility.
    pub max_utility: f64,
    /// Sum of utilities, for constant-sum games.
    pub utility_sum: f64,
    /// Maximum number of moves.
    pub max_game_length: usize,
}
