use axum::extract::{Path, Query, State};
use axum::routing::{get, patch};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::db::models::CommentView;
use crate::error::{AppError, AppResult};
use crate::extractors::AuthUser;
use crate::messages;
use crate::pagination::{Cursor, Page};
use crate::routes::{done, ok, NoData, Reply};
use crate::services::comments::{self, NewComment};
use crate::state::AppState;

pub const MAX_CONTENT_CHARS: usize = 200;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub post_id: i64,
    #[serde(default)]
    pub content: String,
    pub parent_id: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCommentRequest {
    pub post_id: Option<i64>,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub post_id: i64,
    pub cursor: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CommentLists {
    comment_list_zero: Page<CommentView>,
    comment_list_other: Page<CommentView>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/comment", get(list).post(create))
        .route("/comment/", get(list).post(create))
        .route("/comment/{comment_id}", patch(update).delete(delete))
}

fn comment_content(content: &str) -> AppResult<&str> {
    let content = content.trim();
    if content.is_empty() {
        return Err(AppError::BadRequest(
            messages::comment::CONTENT_REQUIRED.to_string(),
        ));
    }
    if content.chars().count() > MAX_CONTENT_CHARS {
        return Err(AppError::BadRequest(
            messages::comment::CONTENT_TOO_LONG.to_string(),
        ));
    }
    Ok(content)
}

async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<CreateCommentRequest>,
) -> AppResult<Reply<NoData>> {
    let content = comment_content(&body.content)?;
    if body.parent_id < 0 {
        return Err(AppError::BadRequest(
            messages::comment::PARENT_INVALID.to_string(),
        ));
    }
    comments::create(
        &state.db,
        user.id,
        &NewComment {
            post_id: body.post_id,
            content,
            parent_id: body.parent_id,
        },
    )?;
    Ok(done(messages::comment::CREATED))
}

async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Reply<CommentLists>> {
    let cursor = Cursor::try_from(query.cursor)?;
    let thread = comments::list(&state.db, user.id, query.post_id, cursor)?;
    Ok(ok(
        CommentLists {
            comment_list_zero: thread.roots,
            comment_list_other: thread.replies,
        },
        messages::comment::LISTED,
    ))
}

async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(comment_id): Path<i64>,
    Json(body): Json<UpdateCommentRequest>,
) -> AppResult<Reply<NoData>> {
    let content = comment_content(&body.content)?;
    comments::update(&state.db, user.id, comment_id, body.post_id, content)?;
    Ok(done(messages::comment::UPDATED))
}

async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(comment_id): Path<i64>,
) -> AppResult<Reply<NoData>> {
    comments::delete(&state.db, user.id, comment_id)?;
    Ok(done(messages::comment::DELETED))
}
