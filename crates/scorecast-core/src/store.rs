//! The authoritative team/score map.
//!
//! [`ScoreStore`] is pure data plus invariants: no I/O, no locking, no
//! knowledge of subscribers. Concurrency control lives in the gateway
//! that owns the store; keeping it out of here keeps the store trivially
//! testable.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use scorecast_types::{Snapshot, Team, TeamId};
use tracing::warn;

use crate::error::StoreError;

/// Canonical mapping of team identity to current state.
///
/// Teams are created once from seed data and never destroyed. The only
/// mutation is [`apply_delta`](Self::apply_delta); everything else is a
/// read. Snapshots returned from this store are full value copies and
/// are never retroactively affected by later mutations.
#[derive(Debug)]
pub struct ScoreStore {
    teams: BTreeMap<TeamId, Team>,
}

impl ScoreStore {
    /// Build a store from seed data.
    ///
    /// Team identities must be unique; a duplicate id in the seed keeps
    /// the first occurrence and logs a warning rather than silently
    /// overwriting it.
    pub fn from_seed(seed: Vec<Team>) -> Self {
        let mut teams = BTreeMap::new();
        for team in seed {
            match teams.entry(team.id) {
                Entry::Vacant(slot) => {
                    slot.insert(team);
                }
                Entry::Occupied(_) => {
                    warn!(team_id = %team.id, "duplicate team id in seed data, keeping first entry");
                }
            }
        }
        Self { teams }
    }

    /// Full copy of the current board. Never fails.
    pub fn get_all(&self) -> Snapshot {
        Snapshot {
            teams: self.teams.values().cloned().collect(),
        }
    }

    /// Add a signed delta to one team's score and return the resulting
    /// full snapshot.
    ///
    /// This is the store's only mutator. The addition saturates at the
    /// `i64` bounds. The store does not broadcast; the caller hands the
    /// returned snapshot to the dispatcher.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if no team has the given identity; the
    /// store is untouched.
    pub fn apply_delta(&mut self, team_id: TeamId, delta: i64) -> Result<Snapshot, StoreError> {
        let team = self
            .teams
            .get_mut(&team_id)
            .ok_or(StoreError::NotFound { team_id })?;
        team.score = team.score.saturating_add(delta);
        Ok(self.get_all())
    }

    /// Number of teams in the store.
    pub fn len(&self) -> usize {
        self.teams.len()
    }

    /// Whether the store has no teams.
    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed() -> Vec<Team> {
        vec![
            Team::new(TeamId::new(1), String::from("Team Alpha"), 100),
            Team::new(TeamId::new(2), String::from("Team Beta"), 85),
        ]
    }

    #[test]
    fn get_all_returns_seeded_teams_in_id_order() {
        let store = ScoreStore::from_seed(seed());
        let snapshot = store.get_all();
        let ids: Vec<u64> = snapshot.teams.iter().map(|t| t.id.into_inner()).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(snapshot.score_of(TeamId::new(1)), Some(100));
    }

    #[test]
    fn apply_delta_adds_points() {
        let mut store = ScoreStore::from_seed(seed());
        let snapshot = store.apply_delta(TeamId::new(1), 20).ok();
        assert_eq!(snapshot.and_then(|s| s.score_of(TeamId::new(1))), Some(120));
    }

    #[test]
    fn apply_delta_allows_negative_scores() {
        let mut store = ScoreStore::from_seed(seed());
        let snapshot = store.apply_delta(TeamId::new(2), -200).ok();
        assert_eq!(
            snapshot.and_then(|s| s.score_of(TeamId::new(2))),
            Some(-115)
        );
    }

    #[test]
    fn apply_delta_unknown_team_leaves_store_untouched() {
        let mut store = ScoreStore::from_seed(seed());
        let result = store.apply_delta(TeamId::new(99), 10);
        assert_eq!(
            result,
            Err(StoreError::NotFound {
                team_id: TeamId::new(99)
            })
        );
        assert_eq!(store.get_all().score_of(TeamId::new(1)), Some(100));
        assert_eq!(store.get_all().score_of(TeamId::new(2)), Some(85));
    }

    #[test]
    fn snapshot_is_a_value_copy() {
        let mut store = ScoreStore::from_seed(seed());
        let before = store.get_all();
        let _ = store.apply_delta(TeamId::new(1), 50);
        // The earlier snapshot is unaffected by the later mutation.
        assert_eq!(before.score_of(TeamId::new(1)), Some(100));
    }

    #[test]
    fn score_saturates_at_i64_bounds() {
        let mut store = ScoreStore::from_seed(vec![Team::new(
            TeamId::new(1),
            String::from("Team Alpha"),
            i64::MAX,
        )]);
        let snapshot = store.apply_delta(TeamId::new(1), 1).ok();
        assert_eq!(
            snapshot.and_then(|s| s.score_of(TeamId::new(1))),
            Some(i64::MAX)
        );
    }

    #[test]
    fn duplicate_seed_id_keeps_first_entry() {
        let store = ScoreStore::from_seed(vec![
            Team::new(TeamId::new(1), String::from("Team Alpha"), 100),
            Team::new(TeamId::new(1), String::from("Impostor"), 0),
        ]);
        assert_eq!(store.len(), 1);
        let snapshot = store.get_all();
        assert_eq!(
            snapshot.teams.first().map(|t| t.name.clone()),
            Some(String::from("Team Alpha"))
        );
    }
}
