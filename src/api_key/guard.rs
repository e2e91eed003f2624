use rocket::{
    http::Status,
    request::{FromRequest, Outcome},
    Request,
};

use super::{ApiSecret, API_KEY_HEADER};

/// Proof that the request carried the configured shared secret.
pub struct ApiKey;

#[derive(Debug)]
pub enum ApiKeyError {
    Missing,
    Invalid,
}

impl std::fmt::Display for ApiKeyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiKeyError::Missing => write!(f, "the key is missing"),
            ApiKeyError::Invalid => write!(f, "the key is invalid"),
        }
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for ApiKey {
    type Error = ApiKeyError;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let Some(key) = request.headers().get_one(API_KEY_HEADER) else {
            tracing::warn!(uri = %request.uri(), "rejected write without an api key");
            return Outcome::Error((Status::Unauthorized, ApiKeyError::Missing));
        };

        // No managed secret behaves like an empty one.
        let authorized = request
            .rocket()
            .state::<ApiSecret>()
            .map_or(false, |secret| secret.authorizes(key));

        if authorized {
            Outcome::Success(ApiKey)
        } else {
            tracing::warn!(uri = %request.uri(), "rejected write with an invalid api key");
            Outcome::Error((Status::Unauthorized, ApiKeyError::Invalid))
        }
    }
}
