use rocket::http::Status;
use rocket::response::{self, Responder};
use rocket::serde::json::Json;
use rocket::serde::Serialize;
use rocket::Request;

/// Errors reported to API clients. The messages are fixed so nothing about
/// the underlying failure leaks into a response.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestError {
    #[error("{}", self.message())]
    InvalidData,
    #[error("{}", self.message())]
    SaveFailed,
    #[error("{}", self.message())]
    FetchFailed,
}

impl RequestError {
    pub fn status(&self) -> Status {
        match self {
            Self::InvalidData => Status::BadRequest,
            Self::SaveFailed | Self::FetchFailed => Status::InternalServerError,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::InvalidData => "Invalid data format",
            Self::SaveFailed => "Server error while saving score",
            Self::FetchFailed => "Server error while fetching scores",
        }
    }
}

/// `{"status": "error", "message": ...}`
#[derive(Serialize, Debug)]
#[serde(crate = "rocket::serde")]
pub struct ErrorBody {
    status: &'static str,
    message: &'static str,
}

impl ErrorBody {
    pub fn new(message: &'static str) -> Self {
        Self {
            status: "error",
            message,
        }
    }
}

/// `{"status": "success"}`
#[derive(Serialize, Debug)]
#[serde(crate = "rocket::serde")]
pub struct SuccessBody {
    status: &'static str,
}

impl Default for SuccessBody {
    fn default() -> Self {
        Self { status: "success" }
    }
}

impl<'r> Responder<'r, 'static> for RequestError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        (self.status(), Json(ErrorBody::new(self.message()))).respond_to(request)
    }
}

pub type RequestResult<T, E = RequestError> = std::result::Result<T, E>;
