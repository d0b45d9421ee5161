use axum::extract::{Query, State};
use axum::routing::get;
use axum::Router;
use serde::{Deserialize, Serialize};

use crate::db::models::SearchHit;
use crate::error::{AppError, AppResult};
use crate::extractors::AuthUser;
use crate::messages;
use crate::pagination::{Cursor, Page};
use crate::routes::{ok, Reply};
use crate::services::search;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub keyword: String,
    pub cursor: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchResults {
    search_post: Page<SearchHit>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/search", get(find))
        .route("/search/", get(find))
}

async fn find(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<SearchQuery>,
) -> AppResult<Reply<SearchResults>> {
    let keyword = query.keyword.trim();
    if keyword.is_empty() {
        return Err(AppError::BadRequest(
            messages::search::KEYWORD_REQUIRED.to_string(),
        ));
    }
    let cursor = Cursor::try_from(query.cursor)?;
    let search_post = search::posts(&state.db, user.id, keyword, cursor)?;
    Ok(ok(SearchResults { search_post }, messages::search::FOUND))
}
