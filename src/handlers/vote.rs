use super::{AppState, has_voted};
use crate::error::{AppError, VoteError};
use crate::views::{self, Notice};
use crate::voting::results::summarize;
use axum::{
    Form,
    extract::State,
    http::{HeaderMap, header::SET_COOKIE},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

pub const VOTED_COOKIE: &str = "poll_voted";

/// Marks the browser as having voted for one year.
pub const VOTED_COOKIE_HEADER: &str =
    "poll_voted=1; Max-Age=31536000; Path=/; SameSite=Lax; HttpOnly";

#[derive(Deserialize)]
pub struct VoteForm {
    #[serde(default)]
    option: String,
}

#[derive(Deserialize)]
pub struct ResetForm {
    #[serde(default)]
    token: String,
}

fn redirect_with(notice: Notice) -> Response {
    Redirect::to(&format!("/?notice={}", notice.code())).into_response()
}

/// Redirect for a rejected request, or the server error for a storage fault.
fn rejection(err: VoteError) -> Result<Response, AppError> {
    let notice = match err {
        VoteError::DuplicateVote => Notice::AlreadyVoted,
        VoteError::InvalidOption(_) => Notice::InvalidOption,
        VoteError::Unauthorized => Notice::ResetDenied,
        VoteError::Storage(e) => return Err(e.into()),
    };
    Ok(redirect_with(notice))
}

pub async fn submit_vote(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<VoteForm>,
) -> Result<Response, AppError> {
    let service = &state.service;

    match service.submit_vote(&form.option, has_voted(&headers)).await {
        Ok(receipt) => {
            let poll = service.poll();
            let page = views::poll_results(
                poll,
                &summarize(poll, &receipt.tally),
                Some(receipt.option_id.as_str()),
                None,
            );
            Ok(([(SET_COOKIE, VOTED_COOKIE_HEADER)], Html(page)).into_response())
        }
        Err(e) => rejection(e),
    }
}

pub async fn reset(
    State(state): State<AppState>,
    Form(form): Form<ResetForm>,
) -> Result<Response, AppError> {
    match state.service.reset(&form.token).await {
        Ok(()) => Ok(redirect_with(Notice::ResetOk)),
        Err(e) => rejection(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageError;
    use axum::http::{StatusCode, header::LOCATION};

    fn redirect_target(err: VoteError) -> String {
        let response = rejection(err).unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        response.headers()[LOCATION].to_str().unwrap().to_string()
    }

    #[test]
    fn test_each_rejection_gets_its_own_notice() {
        assert_eq!(redirect_target(VoteError::DuplicateVote), "/?notice=already-voted");
        assert_eq!(
            redirect_target(VoteError::InvalidOption("z".to_string())),
            "/?notice=invalid-option"
        );
        assert_eq!(redirect_target(VoteError::Unauthorized), "/?notice=reset-denied");
    }

    #[test]
    fn test_storage_fault_is_not_a_notice() {
        let err = VoteError::Storage(StorageError::CountOverflow("a".to_string()));
        assert!(matches!(rejection(err), Err(AppError::Storage(_))));
    }
}
