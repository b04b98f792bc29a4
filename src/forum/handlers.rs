use axum::{
    extract::{Path, Query, State},
    routing::{get, patch},
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    error::ApiError,
    forum::repo::{Post, VoteDirection},
    pagination::{Page, PageQuery, PageWindow},
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/forum", get(list_posts))
        .route("/latest/forum", get(latest_posts))
        .route("/posts/:post_id/upvote", patch(upvote_post))
        .route("/posts/:post_id/downvote", patch(downvote_post))
}

fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::InvalidArgument("malformed id".into()))
}

#[instrument(skip(state))]
async fn list_posts(
    State(state): State<AppState>,
    Query(q): Query<PageQuery>,
) -> Result<Json<Page<Post>>, ApiError> {
    let window = PageWindow::from_query(&q)?;
    let (posts, total) = Post::page(&state.db, window).await?;
    Ok(Json(Page::new(posts, window, total)))
}

#[instrument(skip(state))]
async fn latest_posts(State(state): State<AppState>) -> Result<Json<Vec<Post>>, ApiError> {
    let posts = Post::latest(&state.db, 6).await?;
    Ok(Json(posts))
}

async fn vote(state: &AppState, raw_id: &str, direction: VoteDirection) -> Result<Json<Post>, ApiError> {
    let id = parse_id(raw_id)?;
    match Post::vote(&state.db, id, direction).await? {
        Some(post) => Ok(Json(post)),
        None => Err(ApiError::NotFound("post not found".into())),
    }
}

#[instrument(skip(state))]
async fn upvote_post(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<Json<Post>, ApiError> {
    vote(&state, &post_id, VoteDirection::Up).await
}

#[instrument(skip(state))]
async fn downvote_post(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<Json<Post>, ApiError> {
    vote(&state, &post_id, VoteDirection::Down).await
}
