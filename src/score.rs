use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use rocket::serde::{Deserialize, Serialize};

/// A submitted or stored score. The `highscores.score` column is a
/// Postgres `integer`, so a score is an i32 that is never negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(crate = "rocket::serde", try_from = "i64", into = "i32")]
pub struct Score(i32);

#[derive(Debug, thiserror::Error)]
#[error("score must be between 0 and {max}, got {value}", max = i32::MAX)]
pub struct InvalidScore {
    value: i64,
}

impl Score {
    pub fn new(value: i64) -> Result<Self, InvalidScore> {
        match i32::try_from(value) {
            Ok(score) if score >= 0 => Ok(Self(score)),
            _ => Err(InvalidScore { value }),
        }
    }

    pub fn value(self) -> i32 {
        self.0
    }
}

impl TryFrom<i64> for Score {
    type Error = InvalidScore;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Score> for i32 {
    fn from(score: Score) -> Self {
        score.0
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Body of a score submission. Anything besides `score` is ignored,
/// the timestamp is always assigned by the store.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct ScoreSubmission {
    pub score: Score,
}

/// A persisted row of the `highscores` table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct Highscore {
    pub score: Score,
    #[serde(rename = "created")]
    pub created_at: DateTime<Utc>,
}

impl Highscore {
    pub fn new(score: Score, created_at: DateTime<Utc>) -> Self {
        Self { score, created_at }
    }
}

/// Greater means ranked higher: a bigger score wins,
/// and among equal scores the one submitted first wins.
impl Ord for Highscore {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .cmp(&other.score)
            .then_with(|| other.created_at.cmp(&self.created_at))
    }
}

impl PartialOrd for Highscore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
