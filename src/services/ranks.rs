use crate::db::guards::ensure_live_caller;
use crate::db::models::RankEntry;
use crate::error::{AppResult, OrFail};
use crate::messages;
use crate::services::{STORY_COUNT, TODAY_POST_COUNT};
use crate::state::DbPool;

pub const LEADERBOARD_SIZE: i64 = 10;

/// Top users by accumulated points, then live post count, then most recent signup.
pub fn leaderboard(pool: &DbPool, caller: i64) -> AppResult<Vec<RankEntry>> {
    let run = || -> AppResult<Vec<RankEntry>> {
        let conn = pool.get()?;
        ensure_live_caller(&conn, caller)?;

        let sql = format!(
            "SELECT u.id, u.nickname, ui.image_url, COALESCE(pt.accu_point, 0) AS accu,
                    {STORY_COUNT} AS story_count, {TODAY_POST_COUNT} AS today_count
             FROM live_users u
             LEFT JOIN user_images ui ON ui.user_id = u.id
             LEFT JOIN points pt ON pt.user_id = u.id
             ORDER BY accu DESC, story_count DESC, u.created_at DESC, u.id DESC
             LIMIT ?1"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map([LEADERBOARD_SIZE], |row| {
            Ok(RankEntry {
                user_id: row.get(0)?,
                nickname: row.get(1)?,
                user_image: row.get(2)?,
                accu_point: row.get(3)?,
                story_count: row.get(4)?,
                today_story_count: row.get(5)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    };
    run().or_fail(messages::rank::LIST_FAILED)
}
