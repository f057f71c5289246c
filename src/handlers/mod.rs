mod vote;

use crate::error::AppError;
use crate::views::{self, Notice};
use crate::voting::VoteService;
use crate::voting::results::summarize;
use axum::{
    Router,
    extract::{Query, State},
    http::{HeaderMap, header::COOKIE},
    response::Html,
    routing::{get, post},
};
use serde::Deserialize;
use std::sync::Arc;

use vote::VOTED_COOKIE;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<VoteService>,
}

impl AppState {
    pub fn new(service: Arc<VoteService>) -> Self {
        Self { service }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/vote", post(vote::submit_vote))
        .route("/results", get(results))
        .route("/about", get(about))
        .route("/restart", get(restart))
        .route("/reset", post(vote::reset))
        .with_state(state)
}

#[derive(Deserialize)]
pub struct NoticeQuery {
    notice: Option<String>,
}

impl NoticeQuery {
    fn notice(&self) -> Option<Notice> {
        self.notice.as_deref().and_then(Notice::from_code)
    }
}

/// Whether the request carries the voted marker cookie.
pub fn has_voted(headers: &HeaderMap) -> bool {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .any(|(name, value)| name == VOTED_COOKIE && value == "1")
}

async fn index(
    State(state): State<AppState>,
    Query(query): Query<NoticeQuery>,
    headers: HeaderMap,
) -> Result<Html<String>, AppError> {
    let poll = state.service.poll();

    if has_voted(&headers) {
        let tally = state.service.normalized_tally().await?;
        return Ok(Html(views::poll_results(poll, &summarize(poll, &tally), None, query.notice())));
    }

    Ok(Html(views::poll_form(poll, query.notice())))
}

async fn results(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let poll = state.service.poll();
    let tally = state.service.normalized_tally().await?;
    Ok(Html(views::results_page(poll, &summarize(poll, &tally))))
}

async fn about(State(state): State<AppState>) -> Html<String> {
    Html(views::about_page(state.service.poll()))
}

async fn restart() -> Html<String> {
    Html(views::restart_page())
}
