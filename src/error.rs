use crate::storage::StorageError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use log::error;
use thiserror::Error;

/// Outcomes of a rejected vote or reset.
#[derive(Error, Debug)]
pub enum VoteError {
    #[error("Unknown option: {0}")]
    InvalidOption(String),

    #[error("Visitor has already voted")]
    DuplicateVote,

    #[error("Reset token rejected")]
    Unauthorized,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Failures that end a request with a server error.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Storage failure: {0}")]
    Storage(#[from] StorageError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("{}", self);

        let status = match self {
            AppError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, "The poll is temporarily unavailable.").into_response()
    }
}
