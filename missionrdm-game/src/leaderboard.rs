//! In-memory leaderboard implementing the session-service contract.
//!
//! The production store lives behind the [`crate::Leaderboard`] trait; this
//! implementation encodes the server-side policy (keep only the longest
//! time per level per session, grow the running average by positive deltas
//! only) and doubles as the test collaborator.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

use crate::Leaderboard;
use crate::state::LevelId;

/// Opaque handle for one player's run, issued by the session service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LeaderboardError {
    #[error("unknown session {0}")]
    UnknownSession(SessionId),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
struct Aggregate {
    count: u64,
    total_ms: u64,
}

impl Aggregate {
    const fn average(self) -> Option<u64> {
        if self.count == 0 {
            None
        } else {
            Some(self.total_ms / self.count)
        }
    }
}

/// Reference session service keeping everything in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryLeaderboard {
    sessions: HashMap<SessionId, HashMap<u8, u64>>,
    aggregates: HashMap<u8, Aggregate>,
    next_session: u64,
}

impl MemoryLeaderboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded time for one session and level, if any.
    #[must_use]
    pub fn recorded_time(&self, session: &SessionId, level: LevelId) -> Option<u64> {
        self.sessions
            .get(session)
            .and_then(|levels| levels.get(&level.number()))
            .copied()
    }
}

impl Leaderboard for MemoryLeaderboard {
    type Error = LeaderboardError;

    fn create_session(&mut self, _player_name: &str) -> Result<SessionId, Self::Error> {
        self.next_session += 1;
        let id = SessionId(format!("session-{}", self.next_session));
        self.sessions.insert(id.clone(), HashMap::new());
        Ok(id)
    }

    fn save_level_time(
        &mut self,
        session: &SessionId,
        level: LevelId,
        time_spent_ms: u64,
    ) -> Result<(), Self::Error> {
        let levels = self
            .sessions
            .get_mut(session)
            .ok_or_else(|| LeaderboardError::UnknownSession(session.clone()))?;

        let aggregate = self.aggregates.entry(level.number()).or_default();
        match levels.get_mut(&level.number()) {
            Some(existing) if time_spent_ms > *existing => {
                // Slower resubmission: keep the longer time and add only the
                // positive delta to the running aggregate.
                let delta = time_spent_ms - *existing;
                *existing = time_spent_ms;
                aggregate.count += 1;
                aggregate.total_ms += delta;
            }
            Some(_) => {
                // Faster resubmission: the stored time and aggregate stand.
            }
            None => {
                levels.insert(level.number(), time_spent_ms);
                aggregate.count += 1;
                aggregate.total_ms += time_spent_ms;
            }
        }
        Ok(())
    }

    fn average_time(&self, level: LevelId) -> Result<Option<u64>, Self::Error> {
        Ok(self
            .aggregates
            .get(&level.number())
            .copied()
            .and_then(Aggregate::average))
    }
}
