use rocket::{
    catch,
    data::Capped,
    get, head,
    http::Status,
    post,
    request::{FromRequest, Outcome},
    serde::json::serde_json,
    Request, State,
};

use super::*;
use crate::api_key::ApiKey;
use crate::envelope::{Payload, Reply};
use crate::score::ScoreSubmission;

const SCORES_PATH: &str = "/scores";

/// Matches only the exact `/scores` path. Rocket would otherwise
/// route `/scores/` here too.
pub struct ScoresPath;

#[rocket::async_trait]
impl<'r> FromRequest<'r> for ScoresPath {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        if request.uri().path().as_str() == SCORES_PATH {
            Outcome::Success(ScoresPath)
        } else {
            Outcome::Forward(Status::NotFound)
        }
    }
}

/// Fetches the top scores from the `highscores` table, best first.
/// An empty table yields an empty list, not an error.
#[get("/scores")]
pub async fn list_scores(_path: ScoresPath, database: &State<DatabaseHandle>) -> RequestResult {
    let mut store = database.connect().await?;
    let result = store.fetch_top(LEADERBOARD_LIMIT).await;
    store.close().await;

    let leaderboard = result?;
    tracing::info!(count = leaderboard.len(), "listed highscores");
    Ok(Reply::ok(Payload::ScoreList(leaderboard)))
}

/// Shadows the `HEAD` route Rocket derives from `list_scores`.
#[head("/scores")]
pub fn head_scores() -> RequestError {
    RequestError::NotFound
}

/// Adds a score to the `highscores` table.
/// The api key is checked before the body is read,
/// and the store is only contacted once the body is valid.
#[post("/scores", data = "<body>")]
pub async fn add_score(
    _path: ScoresPath,
    _api_key: ApiKey,
    database: &State<DatabaseHandle>,
    body: Capped<String>,
) -> RequestResult {
    if !body.is_complete() {
        tracing::warn!(read = body.len(), "rejected oversized score submission");
        return Err(RequestError::PayloadTooLarge);
    }
    tracing::debug!(body = body.as_str(), "score submission");

    let submission: ScoreSubmission = serde_json::from_str(&body).map_err(|err| {
        tracing::warn!(%err, "rejected invalid score data");
        RequestError::BadRequest
    })?;

    let mut store = database.connect().await?;
    let result = store.insert(submission.score).await;
    store.close().await;
    result?;

    tracing::info!(score = %submission.score, "score added");
    Ok(Reply::ok(Payload::message("Score added successfully")))
}

// Catchers keep framework-level failures inside the same envelope.

#[catch(400)]
pub fn bad_request() -> Reply {
    RequestError::BadRequest.into()
}

#[catch(401)]
pub fn unauthorized() -> Reply {
    RequestError::Unauthorized.into()
}

#[catch(404)]
pub fn not_found(request: &Request<'_>) -> Reply {
    tracing::debug!(method = %request.method(), uri = %request.uri(), "no route");
    RequestError::NotFound.into()
}

#[catch(default)]
pub fn default_catcher(status: Status, _request: &Request<'_>) -> Reply {
    Reply::error(status, status.reason().unwrap_or("Unknown Error"))
}
