use rusqlite::params;

use crate::db::guards::{ensure_live_caller, ensure_live_post, post_is_live};
use crate::db::models::LikeStatus;
use crate::error::{AppError, AppResult, OrFail};
use crate::messages;
use crate::state::DbPool;

/// Records the caller's like. The (post, user) unique constraint makes a
/// second like a no-op insert, reported as a conflict.
pub fn like(pool: &DbPool, caller: i64, post_id: i64) -> AppResult<()> {
    let run = || -> AppResult<()> {
        let conn = pool.get()?;
        ensure_live_caller(&conn, caller)?;

        let inserted = conn.execute(
            "INSERT INTO post_likes (post_id, user_id)
             SELECT ?1, ?2 WHERE EXISTS (SELECT 1 FROM live_posts WHERE id = ?1)
             ON CONFLICT (post_id, user_id) DO NOTHING",
            params![post_id, caller],
        )?;
        if inserted == 0 {
            ensure_live_post(&conn, post_id)?;
            return Err(AppError::Conflict(messages::like::ALREADY_LIKED));
        }
        Ok(())
    };
    run().or_fail(messages::like::CREATE_FAILED)
}

/// Like count of a live post (from live users) and whether the caller is among them.
pub fn status(pool: &DbPool, caller: i64, post_id: i64) -> AppResult<LikeStatus> {
    let run = || -> AppResult<LikeStatus> {
        let conn = pool.get()?;
        ensure_live_caller(&conn, caller)?;
        if !post_is_live(&conn, post_id)? {
            return Err(AppError::NotFound(messages::post::NOT_FOUND));
        }

        Ok(conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(l.user_id = ?2), 0) > 0
             FROM post_likes l
             JOIN live_users u ON u.id = l.user_id
             WHERE l.post_id = ?1",
            params![post_id, caller],
            |row| {
                Ok(LikeStatus {
                    like_count: row.get(0)?,
                    liked_by_caller: row.get(1)?,
                })
            },
        )?)
    };
    run().or_fail(messages::like::CHECK_FAILED)
}

pub fn unlike(pool: &DbPool, caller: i64, post_id: i64) -> AppResult<()> {
    let run = || -> AppResult<()> {
        let conn = pool.get()?;
        ensure_live_caller(&conn, caller)?;
        let removed = conn.execute(
            "DELETE FROM post_likes WHERE post_id = ?1 AND user_id = ?2",
            params![post_id, caller],
        )?;
        if removed == 0 {
            return Err(AppError::NotFound(messages::like::NOT_LIKED));
        }
        Ok(())
    };
    run().or_fail(messages::like::DELETE_FAILED)
}
