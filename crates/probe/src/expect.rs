//! Named behavior checks against a snapshot

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::snapshot::PlayerSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Expectation {
    /// Player started playing on its own
    AutoPlay,
    /// Playing with a non-zero volume
    Audible,
    /// Muted with zero volume
    Muted,
}

impl Expectation {
    pub fn name(&self) -> &'static str {
        match self {
            Expectation::AutoPlay => "auto-play",
            Expectation::Audible => "audible",
            Expectation::Muted => "muted",
        }
    }

    pub fn check(&self, snapshot: &PlayerSnapshot) -> ExpectationOutcome {
        let playing = observed(snapshot.is_playing);
        let muted = observed(snapshot.is_muted);
        let volume = observed(snapshot.volume);

        let (passed, detail) = match self {
            Expectation::AutoPlay => (
                snapshot.is_playing == Some(true),
                format!("isPlaying={playing}"),
            ),
            Expectation::Audible => (
                snapshot.volume.is_some_and(|v| v > 0.0),
                format!("volume={volume}"),
            ),
            Expectation::Muted => (
                snapshot.is_muted == Some(true) && snapshot.volume == Some(0.0),
                format!("isMuted={muted} volume={volume}"),
            ),
        };

        ExpectationOutcome {
            expectation: *self,
            passed,
            detail,
        }
    }
}

/// Renders a player-reported value, `null` when the player gave none.
fn observed<T: fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "null".to_string(), |v| v.to_string())
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpectationOutcome {
    pub expectation: Expectation,
    pub passed: bool,
    /// Observed values the verdict was based on
    pub detail: String,
}
