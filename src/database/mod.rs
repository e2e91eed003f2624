use std::num::NonZeroU32;

use crate::leaderboard::Leaderboard;
use crate::score::{Highscore, Score};

#[cfg(test)]
pub mod memory;
mod postgres;
mod request_error;
pub mod requests;
mod store_error;

pub use postgres::PostgresDatabase;
pub use request_error::*;
pub use store_error::*;

/// How many scores `GET /scores` returns.
pub const LEADERBOARD_LIMIT: NonZeroU32 = match NonZeroU32::new(10) {
    Some(limit) => limit,
    None => unreachable!(),
};

/// Hands out one store connection per request.
pub type DatabaseHandle = Box<dyn Database>;

#[rocket::async_trait]
pub trait Database: Send + Sync {
    /// Opens a connection that lives until the returned store is closed or dropped.
    async fn connect(&self) -> StoreResult<Box<dyn ScoreStore>>;
}

/// Operations on the `highscores` table over a single connection.
#[rocket::async_trait]
pub trait ScoreStore: Send {
    /// The best `limit` scores, highest first.
    async fn fetch_top(&mut self, limit: NonZeroU32) -> StoreResult<Leaderboard<Highscore>>;

    /// Stores `score`; the store stamps the creation time.
    async fn insert(&mut self, score: Score) -> StoreResult<()>;

    /// Gracefully ends the connection. Dropping the store releases it as well.
    async fn close(self: Box<Self>);
}
