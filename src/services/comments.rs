use rusqlite::{params, Connection};

use crate::db::guards::{
    ensure_live_caller, ensure_live_post, explain_missed_write, post_is_live, Target,
};
use crate::db::models::CommentView;
use crate::error::{AppError, AppResult, OrFail};
use crate::messages;
use crate::pagination::{paginate, Cursor, Page, COMMENT_PAGE_SIZE};
use crate::state::DbPool;

/// `parent_id` of a comment that is not a reply.
pub const ROOT: i64 = 0;

pub struct NewComment<'a> {
    pub post_id: i64,
    pub content: &'a str,
    pub parent_id: i64,
}

/// One page of root comments plus every reply on the post.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentThread {
    pub roots: Page<CommentView>,
    pub replies: Page<CommentView>,
}

const COMMENT_QUERY: &str = "SELECT c.id, c.user_id, u.nickname, ui.image_url, c.content, c.parent_id, c.created_at
     FROM live_comments c
     JOIN live_users u ON u.id = c.user_id
     LEFT JOIN user_images ui ON ui.user_id = u.id
     WHERE c.post_id = ?1";

fn roots_before(conn: &Connection, post_id: i64, before: i64) -> rusqlite::Result<Vec<CommentView>> {
    let sql = format!(
        "{COMMENT_QUERY} AND c.parent_id = 0 AND c.id < ?2
         ORDER BY c.created_at DESC, c.id DESC LIMIT ?3"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![post_id, before, COMMENT_PAGE_SIZE], CommentView::from_row)?;
    rows.collect()
}

fn all_replies(conn: &Connection, post_id: i64) -> rusqlite::Result<Vec<CommentView>> {
    let sql = format!("{COMMENT_QUERY} AND c.parent_id != 0 ORDER BY c.created_at DESC, c.id DESC");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![post_id], CommentView::from_row)?;
    rows.collect()
}

/// Adds a comment, or a reply when `parent_id` names a live root comment on the same post.
pub fn create(pool: &DbPool, caller: i64, comment: &NewComment<'_>) -> AppResult<i64> {
    let run = || -> AppResult<i64> {
        let conn = pool.get()?;
        let inserted = conn.execute(
            "INSERT INTO comments (user_id, post_id, parent_id, content)
             SELECT ?1, ?2, ?3, ?4
             WHERE EXISTS (SELECT 1 FROM live_users WHERE id = ?1)
               AND EXISTS (SELECT 1 FROM live_posts WHERE id = ?2)
               AND (?3 = 0 OR EXISTS (
                    SELECT 1 FROM live_comments
                    WHERE id = ?3 AND post_id = ?2 AND parent_id = 0))",
            params![caller, comment.post_id, comment.parent_id, comment.content],
        )?;
        if inserted == 0 {
            ensure_live_caller(&conn, caller)?;
            ensure_live_post(&conn, comment.post_id)?;
            return Err(AppError::NotFound(messages::comment::PARENT_NOT_FOUND));
        }
        Ok(conn.last_insert_rowid())
    };
    run().or_fail(messages::comment::CREATE_FAILED)
}

pub fn list(pool: &DbPool, caller: i64, post_id: i64, cursor: Cursor) -> AppResult<CommentThread> {
    let run = || -> AppResult<CommentThread> {
        let conn = pool.get()?;
        ensure_live_caller(&conn, caller)?;
        if !post_is_live(&conn, post_id)? {
            return Err(AppError::NotFound(messages::post::NOT_FOUND));
        }

        let roots = paginate(cursor, messages::comment::LIST_END, |before| {
            Ok(roots_before(&conn, post_id, before)?)
        })?;
        let replies = paginate(cursor, messages::comment::LIST_END, |_| {
            Ok(all_replies(&conn, post_id)?)
        })?;
        Ok(CommentThread { roots, replies })
    };
    run().or_fail(messages::comment::LIST_FAILED)
}

/// Rewrites a comment the caller owns. A given `post_id` must match the comment's post.
pub fn update(
    pool: &DbPool,
    caller: i64,
    comment_id: i64,
    post_id: Option<i64>,
    content: &str,
) -> AppResult<()> {
    let run = || -> AppResult<()> {
        let conn = pool.get()?;
        let updated = conn.execute(
            "UPDATE comments
             SET content = ?4, updated_at = datetime('now')
             WHERE id = ?1 AND user_id = ?2 AND deleted_at IS NULL
               AND (?3 IS NULL OR post_id = ?3)
               AND EXISTS (SELECT 1 FROM live_users WHERE id = ?2)",
            params![comment_id, caller, post_id, content],
        )?;
        if updated == 0 {
            return Err(explain_missed_write(
                &conn,
                caller,
                Target::Comment(comment_id),
                messages::comment::NOT_OWNER_UPDATE,
            ));
        }
        Ok(())
    };
    run().or_fail(messages::comment::UPDATE_FAILED)
}

pub fn delete(pool: &DbPool, caller: i64, comment_id: i64) -> AppResult<()> {
    let run = || -> AppResult<()> {
        let conn = pool.get()?;
        let deleted = conn.execute(
            "UPDATE comments
             SET deleted_at = datetime('now')
             WHERE id = ?1 AND user_id = ?2 AND deleted_at IS NULL
               AND EXISTS (SELECT 1 FROM live_users WHERE id = ?2)",
            params![comment_id, caller],
        )?;
        if deleted == 0 {
            return Err(explain_missed_write(
                &conn,
                caller,
                Target::Comment(comment_id),
                messages::comment::NOT_OWNER_DELETE,
            ));
        }
        Ok(())
    };
    run().or_fail(messages::comment::DELETE_FAILED)
}
