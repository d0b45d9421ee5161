use axum::extract::{Path, State};
use axum::routing::post;
use axum::Router;

use crate::db::models::LikeStatus;
use crate::error::AppResult;
use crate::extractors::AuthUser;
use crate::messages;
use crate::routes::{done, ok, NoData, Reply};
use crate::services::likes;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/like/{post_id}", post(like).get(status).delete(unlike))
}

async fn like(
    State(state): State<AppState>,
    user: AuthUser,
    Path(post_id): Path<i64>,
) -> AppResult<Reply<NoData>> {
    likes::like(&state.db, user.id, post_id)?;
    Ok(done(messages::like::CREATED))
}

async fn status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(post_id): Path<i64>,
) -> AppResult<Reply<LikeStatus>> {
    let status = likes::status(&state.db, user.id, post_id)?;
    Ok(ok(status, messages::like::CHECKED))
}

async fn unlike(
    State(state): State<AppState>,
    user: AuthUser,
    Path(post_id): Path<i64>,
) -> AppResult<Reply<NoData>> {
    likes::unlike(&state.db, user.id, post_id)?;
    Ok(done(messages::like::DELETED))
}
