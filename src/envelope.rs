//! The JSON wrapper every response is sent in.
//!
//! Success bodies look like `{"scores": ...}` and failures like `{"error": "..."}`.

use std::io::Cursor;

use rocket::{
    http::{ContentType, Status},
    response::{self, Responder},
    serde::{json::serde_json, Serialize},
    Request, Response,
};

use crate::{leaderboard::Leaderboard, score::Highscore};

/// Sent when the envelope itself cannot be encoded.
pub const FALLBACK_BODY: &str = r#"{"error":"Error generating response"}"#;

/// What a successful request returns under the `scores` key.
#[derive(Debug, Serialize)]
#[serde(crate = "rocket::serde", untagged)]
pub enum Payload {
    ScoreList(Leaderboard<Highscore>),
    StatusMessage { message: String },
}

impl Payload {
    pub fn message(message: impl Into<String>) -> Self {
        Self::StatusMessage {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum Envelope<P = Payload> {
    Scores(P),
    Error(String),
}

/// An envelope paired with the status it is sent with.
#[derive(Debug)]
pub struct Reply<P = Payload> {
    status: Status,
    envelope: Envelope<P>,
}

impl<P: Serialize> Reply<P> {
    pub fn ok(payload: P) -> Self {
        Self {
            status: Status::Ok,
            envelope: Envelope::Scores(payload),
        }
    }

    pub fn error(status: Status, message: impl Into<String>) -> Self {
        Self {
            status,
            envelope: Envelope::Error(message.into()),
        }
    }

    /// Encodes the body, degrading to [`FALLBACK_BODY`] with a 500
    /// rather than failing the response.
    pub fn encode(&self) -> (Status, String) {
        match serde_json::to_string(&self.envelope) {
            Ok(body) => (self.status, body),
            Err(err) => {
                tracing::error!(%err, "failed to encode response envelope");
                (Status::InternalServerError, FALLBACK_BODY.to_owned())
            }
        }
    }
}

impl<'r, P: Serialize> Responder<'r, 'static> for Reply<P> {
    fn respond_to(self, _request: &'r Request<'_>) -> response::Result<'static> {
        let (status, body) = self.encode();
        Response::build()
            .status(status)
            .header(ContentType::JSON)
            .sized_body(body.len(), Cursor::new(body))
            .ok()
    }
}
