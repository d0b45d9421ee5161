pub mod comments;
pub mod likes;
pub mod posts;
pub mod ranks;
pub mod search;
pub mod upload;
pub mod users;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Room for the text fields and multipart framing around an uploaded file.
const FORM_OVERHEAD: usize = 64 * 1024;

/// Success body: the payload's fields flattened next to the status.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T: Serialize> {
    #[serde(flatten)]
    pub body: T,
    pub status_code: u16,
    pub status_msg: &'static str,
}

/// Payload nested under a `data` key, as the user endpoints answer.
#[derive(Debug, Serialize)]
pub struct Data<T: Serialize> {
    pub data: T,
}

#[derive(Debug, Serialize)]
pub struct NoData {}

pub type Reply<T> = Json<Envelope<T>>;

pub fn ok<T: Serialize>(body: T, status_msg: &'static str) -> Reply<T> {
    Json(Envelope {
        body,
        status_code: 200,
        status_msg,
    })
}

pub fn done(status_msg: &'static str) -> Reply<NoData> {
    ok(NoData {}, status_msg)
}

fn cors_layer(allow_origins: &str) -> CorsLayer {
    let origins: Vec<HeaderValue> = allow_origins
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);
    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(origins)
    }
}

/// The full HTTP application: feature routers, uploaded image files and middleware.
pub fn app(state: AppState) -> Router {
    let body_limit = state.config.storage.max_file_size + FORM_OVERHEAD;
    let uploads = ServeDir::new(state.config.uploads_path());
    let cors = cors_layer(&state.config.server.allow_origins);

    Router::new()
        .merge(users::router())
        .merge(posts::router())
        .merge(comments::router())
        .merge(likes::router())
        .merge(ranks::router())
        .merge(search::router())
        .nest_service("/uploads", uploads)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
