use axum::extract::{Multipart, Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::db::models::{UserInfo, UserPoint, UserSummary};
use crate::error::{AppError, AppResult, OrFail};
use crate::extractors::AuthUser;
use crate::messages;
use crate::routes::upload::read_form;
use crate::routes::{done, ok, Data, NoData, Reply};
use crate::services::users::{self, LoggedIn, NewUser, ProfileChanges};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 10))]
    pub password: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub nickname: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub image_url: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Field checks in reporting order, each with the message shown for it.
const REGISTER_CHECKS: &[(&str, &str)] = &[
    ("email", messages::user::EMAIL_INVALID),
    ("password", messages::user::PASSWORD_TOO_SHORT),
    ("nickname", messages::user::NICKNAME_REQUIRED),
    ("image_url", messages::user::IMAGE_URL_REQUIRED),
    ("imageUrl", messages::user::IMAGE_URL_REQUIRED),
];

const LOGIN_CHECKS: &[(&str, &str)] = &[("email", messages::user::EMAIL_INVALID)];

/// Runs the derived validation and reports the first failing field by its message.
fn checked<T: Validate>(request: &T, checks: &[(&str, &str)]) -> AppResult<()> {
    let Err(errors) = request.validate() else {
        return Ok(());
    };
    let failed = errors.field_errors();
    let message = checks
        .iter()
        .find(|(field, _)| failed.contains_key(*field))
        .map_or(messages::request::MALFORMED, |(_, message)| *message);
    Err(invalid(message))
}

impl RegisterRequest {
    /// Surrounding whitespace is dropped from everything but the password.
    fn trimmed(self) -> Self {
        Self {
            email: self.email.trim().to_string(),
            password: self.password,
            nickname: self.nickname.trim().to_string(),
            image_url: self.image_url.trim().to_string(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UserCount {
    user_count: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PointBody {
    user_point: UserPoint,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProfileBody {
    user_info: UserInfo,
}

/// Echo of the profile fields that were changed.
#[derive(Serialize)]
struct UpdatedProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/user/register", post(register))
        .route("/user/login", post(login))
        .route("/user/isLogin", get(is_login))
        .route("/user/userCount", get(user_count))
        .route("/user/point", get(point))
        .route(
            "/user/{user_id}",
            get(profile).patch(update_profile).delete(delete_user),
        )
}

fn invalid(message: &str) -> AppError {
    AppError::BadRequest(message.to_string())
}

async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> AppResult<Reply<NoData>> {
    let body = body.trimmed();
    checked(&body, REGISTER_CHECKS)?;
    users::register(
        &state.db,
        &NewUser {
            email: &body.email,
            password: &body.password,
            nickname: &body.nickname,
            image_url: &body.image_url,
        },
        state.config.auth.bcrypt_cost,
    )?;
    Ok(done(messages::user::REGISTERED))
}

async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> AppResult<Reply<Data<LoggedIn>>> {
    let body = LoginRequest {
        email: body.email.trim().to_string(),
        password: body.password,
    };
    checked(&body, LOGIN_CHECKS)?;
    let logged_in = users::login(&state.db, &state.tokens, &body.email, &body.password)?;
    Ok(ok(Data { data: logged_in }, messages::user::LOGGED_IN))
}

async fn is_login(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Reply<Data<UserSummary>>> {
    let summary = users::current(&state.db, user.id)?;
    Ok(ok(Data { data: summary }, messages::user::LOGIN_VALID))
}

async fn user_count(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Reply<Data<UserCount>>> {
    let user_count = users::count(&state.db, user.id)?;
    Ok(ok(
        Data {
            data: UserCount { user_count },
        },
        messages::user::COUNTED,
    ))
}

async fn point(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Reply<Data<PointBody>>> {
    let user_point = users::point(&state.db, user.id)?;
    Ok(ok(
        Data {
            data: PointBody { user_point },
        },
        messages::user::POINT_LOADED,
    ))
}

async fn profile(
    State(state): State<AppState>,
    user: AuthUser,
    Path(user_id): Path<i64>,
) -> AppResult<Reply<Data<ProfileBody>>> {
    let user_info = users::profile(&state.db, user.id, user_id)?;
    Ok(ok(
        Data {
            data: ProfileBody { user_info },
        },
        messages::user::PROFILE_LOADED,
    ))
}

async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Path(user_id): Path<i64>,
    multipart: Multipart,
) -> AppResult<Reply<Data<UpdatedProfile>>> {
    if user.id != user_id {
        return Err(AppError::Unauthorized(messages::user::NOT_SELF));
    }

    let form = read_form(multipart, state.config.storage.max_file_size).await?;
    if form.fields.contains_key("description") && form.text("description").is_none() {
        return Err(invalid(messages::user::DESCRIPTION_EMPTY));
    }

    let image_url = match form.file {
        Some(ref upload) => Some(
            state
                .images
                .put(upload)
                .await
                .or_fail(messages::user::UPDATE_FAILED)?,
        ),
        None => None,
    };

    let changes = ProfileChanges {
        nickname: form.text("nickname").map(str::to_string),
        description: form.text("description").map(str::to_string),
        image_url,
    };
    users::update_profile(&state.db, user.id, user_id, &changes)?;

    Ok(ok(
        Data {
            data: UpdatedProfile {
                nickname: changes.nickname,
                description: changes.description,
            },
        },
        messages::user::UPDATED,
    ))
}

async fn delete_user(
    State(state): State<AppState>,
    user: AuthUser,
    Path(user_id): Path<i64>,
) -> AppResult<Reply<NoData>> {
    users::delete(&state.db, user.id, user_id)?;
    Ok(done(messages::user::DELETED))
}
