use std::num::NonZeroU32;

use chrono::{DateTime, Utc};
use sqlx::postgres::{PgConnectOptions, PgConnection, PgSslMode};
use sqlx::{Connection, Row};

use super::*;
use crate::config::{self, DatabaseConfig};

/// The production backend: one fresh Postgres connection per request.
pub struct PostgresDatabase {
    config: DatabaseConfig,
}

impl PostgresDatabase {
    pub fn new(config: DatabaseConfig) -> Self {
        Self { config }
    }

    /// Builds connect options, either from `DATABASE_URL`
    /// or from the individual fields with TLS required.
    pub fn connect_options(&self) -> StoreResult<PgConnectOptions> {
        let settings = &self.config;

        if let Some(url) = &settings.url {
            return url.parse().map_err(|err: sqlx::Error| StoreError::InvalidConfig {
                message: format!("invalid {}: {}", config::DATABASE_URL_VAR, err),
            });
        }

        fn required<'a>(value: &'a Option<String>, var: &'static str) -> StoreResult<&'a str> {
            value
                .as_deref()
                .ok_or(StoreError::MissingConfig { var })
        }

        let host = required(&settings.host, config::HOST_VAR)?;
        let port = required(&settings.port, config::PORT_VAR)?;
        let user = required(&settings.user, config::USER_VAR)?;
        let password = required(&settings.password, config::PASSWORD_VAR)?;
        let dbname = required(&settings.dbname, config::DBNAME_VAR)?;

        let port: u16 = port.parse().map_err(|_| StoreError::InvalidConfig {
            message: format!("invalid {}: {:?}", config::PORT_VAR, port),
        })?;

        tracing::info!(host, port, user, dbname, "connecting to database");

        Ok(PgConnectOptions::new()
            .host(host)
            .port(port)
            .username(user)
            .password(password)
            .database(dbname)
            .ssl_mode(PgSslMode::Require))
    }
}

#[rocket::async_trait]
impl Database for PostgresDatabase {
    async fn connect(&self) -> StoreResult<Box<dyn ScoreStore>> {
        let options = self.connect_options()?;
        let connection = PgConnection::connect_with(&options)
            .await
            .map_err(StoreError::Connect)?;

        tracing::debug!("connected to database");
        Ok(Box::new(PostgresStore { connection }))
    }
}

struct PostgresStore {
    connection: PgConnection,
}

#[rocket::async_trait]
impl ScoreStore for PostgresStore {
    async fn fetch_top(&mut self, limit: NonZeroU32) -> StoreResult<Leaderboard<Highscore>> {
        let rows = sqlx::query(
            "SELECT score, created FROM highscores ORDER BY score DESC, created ASC LIMIT $1",
        )
        .bind(i64::from(limit.get()))
        .fetch_all(&mut self.connection)
        .await
        .map_err(StoreError::Fetch)?;

        let highscores = rows
            .into_iter()
            .map(|row| {
                let score = row.try_get::<i32, _>("score")?;
                let created = row.try_get::<DateTime<Utc>, _>("created")?;
                let score = Score::new(score.into()).map_err(|err| sqlx::Error::ColumnDecode {
                    index: "score".to_owned(),
                    source: Box::new(err),
                })?;
                Ok(Highscore::new(score, created))
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()
            .map_err(StoreError::Fetch)?;

        tracing::debug!(count = highscores.len(), "retrieved highscores");
        Ok(Leaderboard::ranked(highscores, limit))
    }

    async fn insert(&mut self, score: Score) -> StoreResult<()> {
        sqlx::query("INSERT INTO highscores (score) VALUES ($1)")
            .bind(score.value())
            .execute(&mut self.connection)
            .await
            .map_err(StoreError::Insert)?;

        Ok(())
    }

    async fn close(self: Box<Self>) {
        let PostgresStore { connection } = *self;
        if let Err(err) = connection.close().await {
            tracing::warn!(%err, "failed to close database connection cleanly");
        }
    }
}
