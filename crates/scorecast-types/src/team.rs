//! The [`Team`] entity and the immutable [`Snapshot`] value.
//!
//! A snapshot is a full value copy of every team at one instant. It is
//! what observers receive on every update: the service pushes the whole
//! board rather than deltas, so clients never reconcile partial state.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::TeamId;

/// One scored team on the leaderboard.
///
/// Identity and display name are fixed at seed time; only the score
/// changes, and only through the mutation gateway. The score is signed:
/// the administrator may subtract more points than a team has.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Team {
    /// Stable unique identity.
    pub id: TeamId,
    /// Display name shown on the board.
    pub name: String,
    /// Current score. May be negative.
    #[serde(rename = "points")]
    pub score: i64,
}

impl Team {
    /// Create a team record.
    pub const fn new(id: TeamId, name: String, score: i64) -> Self {
        Self { id, name, score }
    }
}

/// An immutable full copy of the board at one instant.
///
/// Teams appear in id order; the ordering carries no meaning. A held
/// snapshot is a value: later store mutations never affect it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Snapshot {
    /// Every team and its score at the capture instant.
    pub teams: Vec<Team>,
}

impl Snapshot {
    /// Look up one team's score by identity.
    pub fn score_of(&self, id: TeamId) -> Option<i64> {
        self.teams.iter().find(|t| t.id == id).map(|t| t.score)
    }

    /// Number of teams on the board.
    pub const fn len(&self) -> usize {
        self.teams.len()
    }

    /// Whether the board has no teams.
    pub const fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Teams sorted for display: highest score first, ties by id.
    pub fn ranked(&self) -> Vec<Team> {
        let mut ranked = self.teams.clone();
        ranked.sort_by(|a, b| b.score.cmp(&a.score).then(a.id.cmp(&b.id)));
        ranked
    }
}
