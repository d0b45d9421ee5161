use axum::extract::{Multipart, Path, State};
use axum::routing::get;
use axum::Router;
use serde::Serialize;

use crate::db::models::{FeedPost, PostCount, PostThumb};
use crate::error::{AppError, AppResult, OrFail};
use crate::extractors::AuthUser;
use crate::messages;
use crate::pagination::{Cursor, Page};
use crate::routes::upload::{read_form, ImageForm};
use crate::routes::{done, ok, NoData, Reply};
use crate::services::posts;
use crate::state::AppState;

pub const MAX_CONTENT_CHARS: usize = 200;

#[derive(Serialize)]
struct FeedPage {
    posts: Page<FeedPost>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PostList {
    post_list: FeedPage,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CountBody {
    post_count: PostCount,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UserPostList {
    user_post_list: Vec<PostThumb>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UserLikePostList {
    user_like_post_list: Vec<PostThumb>,
}

#[derive(Serialize)]
struct PostBody {
    post: FeedPost,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/post", axum::routing::post(create))
        .route("/post/", axum::routing::post(create))
        .route("/post/list/{cursor}", get(feed))
        .route("/post/count", get(count))
        .route("/post/mypage/{user_id}", get(by_user))
        .route("/post/like/{user_id}", get(liked_by))
        .route(
            "/post/{post_id}",
            get(detail).patch(update).delete(delete),
        )
}

/// Post content: required, at most `MAX_CONTENT_CHARS` characters.
pub fn post_content(form: &ImageForm) -> AppResult<&str> {
    let content = form
        .text("content")
        .ok_or_else(|| AppError::BadRequest(messages::post::CONTENT_REQUIRED.to_string()))?;
    if content.chars().count() > MAX_CONTENT_CHARS {
        return Err(AppError::BadRequest(
            messages::post::CONTENT_TOO_LONG.to_string(),
        ));
    }
    Ok(content)
}

async fn feed(
    State(state): State<AppState>,
    user: AuthUser,
    Path(cursor): Path<i64>,
) -> AppResult<Reply<PostList>> {
    let cursor = Cursor::try_from(cursor)?;
    let posts = posts::feed(&state.db, user.id, cursor)?;
    Ok(ok(
        PostList {
            post_list: FeedPage { posts },
        },
        messages::post::FEED_LOADED,
    ))
}

async fn count(State(state): State<AppState>, user: AuthUser) -> AppResult<Reply<CountBody>> {
    let post_count = posts::today_count(&state.db, user.id)?;
    Ok(ok(CountBody { post_count }, messages::post::COUNTED))
}

async fn by_user(
    State(state): State<AppState>,
    user: AuthUser,
    Path(user_id): Path<i64>,
) -> AppResult<Reply<UserPostList>> {
    let user_post_list = posts::by_user(&state.db, user.id, user_id)?;
    Ok(ok(UserPostList { user_post_list }, messages::post::BY_USER_LOADED))
}

async fn liked_by(
    State(state): State<AppState>,
    user: AuthUser,
    Path(user_id): Path<i64>,
) -> AppResult<Reply<UserLikePostList>> {
    let user_like_post_list = posts::liked_by(&state.db, user.id, user_id)?;
    Ok(ok(
        UserLikePostList {
            user_like_post_list,
        },
        messages::post::LIKED_BY_LOADED,
    ))
}

async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    multipart: Multipart,
) -> AppResult<Reply<NoData>> {
    let form = read_form(multipart, state.config.storage.max_file_size).await?;
    let content = post_content(&form)?;
    let upload = form
        .file
        .as_ref()
        .ok_or_else(|| AppError::BadRequest(messages::request::FILE_REQUIRED.to_string()))?;

    let image_url = state
        .images
        .put(upload)
        .await
        .or_fail(messages::post::CREATE_FAILED)?;
    posts::create(&state.db, user.id, content, &image_url)?;
    Ok(done(messages::post::CREATED))
}

async fn detail(
    State(state): State<AppState>,
    user: AuthUser,
    Path(post_id): Path<i64>,
) -> AppResult<Reply<PostBody>> {
    let post = posts::detail(&state.db, user.id, post_id)?;
    Ok(ok(PostBody { post }, messages::post::DETAIL_LOADED))
}

async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(post_id): Path<i64>,
    multipart: Multipart,
) -> AppResult<Reply<NoData>> {
    let form = read_form(multipart, state.config.storage.max_file_size).await?;
    let content = post_content(&form)?;

    let image_url = match form.file {
        Some(ref upload) => Some(
            state
                .images
                .put(upload)
                .await
                .or_fail(messages::post::UPDATE_FAILED)?,
        ),
        None => None,
    };
    posts::update(&state.db, user.id, post_id, content, image_url.as_deref())?;
    Ok(done(messages::post::UPDATED))
}

async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(post_id): Path<i64>,
) -> AppResult<Reply<NoData>> {
    posts::delete(&state.db, user.id, post_id)?;
    Ok(done(messages::post::DELETED))
}
