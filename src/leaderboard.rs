use std::num::NonZeroU32;

use rocket::serde::{self, Serialize};

/// A ranked collection, best item first, never longer than the limit it was built with.
#[derive(Clone, Debug, PartialEq)]
pub struct Leaderboard<T: LeaderboardItem> {
    collection: Vec<T>,
}

impl<T: LeaderboardItem> Leaderboard<T> {
    /// Ranks `items` in descending order and keeps the best `limit` of them.
    pub fn ranked(items: impl IntoIterator<Item = T>, limit: NonZeroU32) -> Self {
        let mut collection: Vec<T> = items.into_iter().collect();
        collection.sort_by(|a, b| b.cmp(a));
        collection.truncate(limit.get() as usize);
        Self { collection }
    }

    pub fn len(&self) -> usize {
        self.collection.len()
    }
}

#[cfg(test)]
impl<T: LeaderboardItem> Leaderboard<T> {
    pub fn empty() -> Self {
        Self {
            collection: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.collection.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.collection.iter()
    }
}

impl<T: LeaderboardItem> Serialize for Leaderboard<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.collection.serialize(serializer)
    }
}

pub trait LeaderboardItem: Ord + Serialize {}

impl<T: Ord + Serialize> LeaderboardItem for T {}
