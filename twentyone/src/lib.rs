pub mod simulation;
pub mod statistics;
pub mod strategy;

use serde_enum_str::{Deserialize_enum_str, Serialize_enum_str};
use std::error::Error;
use std::fmt::Display;

/// An action a policy may take on the live betting box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Hit,
    Stand,
    DoubleDown,
    Split,
}

/// How one finished betting box compares against the dealer's finished hand.
/// Derived by the outcome resolver, never stored on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandResult {
    Win,
    Tie,
    Loss,
}

/// Names one of the built-in policies. Parsed from its string form in
/// driver config files.
#[derive(Debug, Clone, Copy, PartialEq, Serialize_enum_str, Deserialize_enum_str)]
pub enum PolicyChoice {
    AlwaysStand,
    AlwaysHit,
    AlwaysDoubleDown,
    HitUnderSeventeen,
    DoubleDownOnEleven,
    SplitWhenPossible,
    Random,
    Basic,
}

/// Everything that can go wrong while driving a round or reading statistics.
/// All three variants signal a driver or policy bug rather than a condition
/// worth retrying; a failed round aborts the batch it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    /// An action was applied to a box or table in a state that forbids it.
    StateViolation(String),
    /// The shoe ran out of cards mid-draw. There is no reshuffle-on-empty.
    DeckExhausted,
    /// A statistic was requested over zero recorded games.
    NoRecordedGames,
}

impl Display for SimulationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulationError::StateViolation(msg) => write!(f, "state violation: {}", msg),
            SimulationError::DeckExhausted => write!(f, "the shoe has no cards left"),
            SimulationError::NoRecordedGames => {
                write!(f, "statistics requested over zero recorded games")
            }
        }
    }
}

impl Error for SimulationError {}
