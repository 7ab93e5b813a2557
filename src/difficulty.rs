use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Timing parameters for one round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DifficultyProfile {
    pub round_duration_secs: u32,
    pub target_lifetime: Duration,
    pub spawn_interval: Duration,
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DifficultyError {
    #[error("unknown difficulty '{0}' (expected easy, medium or hard)")]
    Unknown(String),
    #[error("difficulty cannot change while a hunt is running")]
    SessionRunning,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn profile(self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile {
                round_duration_secs: 30,
                target_lifetime: Duration::from_millis(2500),
                spawn_interval: Duration::from_millis(1500),
            },
            Difficulty::Medium => DifficultyProfile {
                round_duration_secs: 20,
                target_lifetime: Duration::from_millis(1800),
                spawn_interval: Duration::from_millis(1200),
            },
            Difficulty::Hard => DifficultyProfile {
                round_duration_secs: 10,
                target_lifetime: Duration::from_millis(1200),
                spawn_interval: Duration::from_millis(800),
            },
        }
    }

    /// Lowercase preset name, as accepted by [`Difficulty::from_name`]
    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, DifficultyError> {
        let wanted = name.trim();
        Self::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DifficultyError::Unknown(wanted.to_string()))
    }

    /// Next preset, wrapping from hard back to easy
    pub fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = DifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}
