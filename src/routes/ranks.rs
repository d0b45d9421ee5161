use axum::extract::State;
use axum::routing::get;
use axum::Router;
use serde::Serialize;

use crate::db::models::RankEntry;
use crate::error::AppResult;
use crate::extractors::AuthUser;
use crate::messages;
use crate::routes::{ok, Reply};
use crate::services::ranks;
use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RankList {
    rank_list: Vec<RankEntry>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/rank/list", get(list))
}

async fn list(State(state): State<AppState>, user: AuthUser) -> AppResult<Reply<RankList>> {
    let rank_list = ranks::leaderboard(&state.db, user.id)?;
    Ok(ok(RankList { rank_list }, messages::rank::LISTED))
}
