//! An in-process stand-in for Postgres that keeps the same contract:
//! the store stamps creation times, reads are ranked and bounded,
//! and every connection handed out is accounted for until it is released.

use std::num::NonZeroU32;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Duration, Utc};

use super::*;

#[derive(Clone, Default)]
pub struct MemoryDatabase {
    state: Arc<Mutex<MemoryState>>,
}

#[derive(Default)]
struct MemoryState {
    rows: Vec<Highscore>,
    last_created: Option<DateTime<Utc>>,
    open_connections: usize,
    connects: usize,
    inserts: usize,
    failure: Option<Failure>,
}

/// Which store operation should fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Failure {
    Connect,
    Fetch,
    Insert,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(failure: Failure) -> Self {
        let database = Self::new();
        database.state().failure = Some(failure);
        database
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Number of connections currently held by a store.
    pub fn open_connections(&self) -> usize {
        self.state().open_connections
    }

    pub fn connects(&self) -> usize {
        self.state().connects
    }

    /// Number of insert calls that reached the store.
    pub fn inserts(&self) -> usize {
        self.state().inserts
    }

    pub fn rows(&self) -> Vec<Highscore> {
        self.state().rows.clone()
    }
}

fn simulated(failure: Failure) -> sqlx::Error {
    sqlx::Error::Protocol(format!("simulated {:?} failure", failure).to_lowercase())
}

#[rocket::async_trait]
impl Database for MemoryDatabase {
    async fn connect(&self) -> StoreResult<Box<dyn ScoreStore>> {
        let mut state = self.state();
        state.connects += 1;
        if state.failure == Some(Failure::Connect) {
            return Err(StoreError::Connect(simulated(Failure::Connect)));
        }
        state.open_connections += 1;
        drop(state);

        Ok(Box::new(MemoryStore {
            database: self.clone(),
        }))
    }
}

struct MemoryStore {
    database: MemoryDatabase,
}

impl Drop for MemoryStore {
    fn drop(&mut self) {
        self.database.state().open_connections -= 1;
    }
}

#[rocket::async_trait]
impl ScoreStore for MemoryStore {
    async fn fetch_top(&mut self, limit: NonZeroU32) -> StoreResult<Leaderboard<Highscore>> {
        let state = self.database.state();
        if state.failure == Some(Failure::Fetch) {
            return Err(StoreError::Fetch(simulated(Failure::Fetch)));
        }
        Ok(Leaderboard::ranked(state.rows.iter().cloned(), limit))
    }

    async fn insert(&mut self, score: Score) -> StoreResult<()> {
        let mut state = self.database.state();
        state.inserts += 1;
        if state.failure == Some(Failure::Insert) {
            return Err(StoreError::Insert(simulated(Failure::Insert)));
        }

        // Keep creation times strictly increasing even within one clock tick.
        let now = Utc::now();
        let created = match state.last_created {
            Some(last) if last >= now => last + Duration::microseconds(1),
            _ => now,
        };
        state.last_created = Some(created);
        state.rows.push(Highscore::new(score, created));
        Ok(())
    }

    async fn close(self: Box<Self>) {}
}
