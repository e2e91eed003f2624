use rocket::{
    http::Status,
    response::{self, Responder},
    Request,
};

use super::StoreError;
use crate::envelope::{Payload, Reply};

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("Invalid score data")]
    BadRequest,
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Not Found")]
    NotFound,
    #[error("Payload Too Large")]
    PayloadTooLarge,
    #[error(transparent)]
    StoreUnavailable(#[from] StoreError),
}

impl RequestError {
    pub fn status(&self) -> Status {
        match self {
            Self::BadRequest => Status::BadRequest,
            Self::Unauthorized => Status::Unauthorized,
            Self::NotFound => Status::NotFound,
            Self::PayloadTooLarge => Status::PayloadTooLarge,
            Self::StoreUnavailable(_) => Status::InternalServerError,
        }
    }
}

impl From<RequestError> for Reply {
    fn from(error: RequestError) -> Self {
        Reply::<Payload>::error(error.status(), error.to_string())
    }
}

impl<'r> Responder<'r, 'static> for RequestError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        if let Self::StoreUnavailable(err) = &self {
            tracing::error!(%err, uri = %request.uri(), "store unavailable");
        }
        Reply::from(self).respond_to(request)
    }
}

pub type RequestResult<T = Reply> = std::result::Result<T, RequestError>;
