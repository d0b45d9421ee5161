use rusqlite::{params, Connection, OptionalExtension};

use crate::db::guards::{ensure_live_caller, explain_missed_write, Target};
use crate::db::models::{FeedPost, PostCount, PostThumb};
use crate::error::{AppError, AppResult, OrFail};
use crate::messages;
use crate::pagination::{paginate, Cursor, Page, POST_PAGE_SIZE};
use crate::state::DbPool;

/// Points granted per rewarded post.
pub const POST_REWARD: i64 = 1000;

/// Posts per day (UTC) that still earn the reward.
pub const DAILY_REWARDED_POSTS: i64 = 3;

fn feed_query(filter: &str) -> String {
    format!(
        "SELECT {}
         FROM live_posts p
         JOIN live_users u ON u.id = p.user_id
         LEFT JOIN post_images pi ON pi.post_id = p.id
         LEFT JOIN user_images ui ON ui.user_id = u.id
         WHERE {}",
        FeedPost::COLUMNS,
        filter
    )
}

fn thumbs(conn: &Connection, filter: &str, user_id: i64) -> rusqlite::Result<Vec<PostThumb>> {
    let sql = format!(
        "SELECT p.id, pi.image_url
         FROM live_posts p
         LEFT JOIN post_images pi ON pi.post_id = p.id
         WHERE {filter}
         ORDER BY p.created_at DESC, p.id DESC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![user_id], |row| {
        Ok(PostThumb {
            post_id: row.get(0)?,
            image_url: row.get(1)?,
        })
    })?;
    rows.collect()
}

/// Newest-first feed, `POST_PAGE_SIZE` posts per page.
pub fn feed(pool: &DbPool, caller: i64, cursor: Cursor) -> AppResult<Page<FeedPost>> {
    let run = || -> AppResult<Page<FeedPost>> {
        let conn = pool.get()?;
        ensure_live_caller(&conn, caller)?;

        paginate(cursor, messages::post::FEED_END, |before| {
            let sql = format!(
                "{} ORDER BY p.created_at DESC, p.id DESC LIMIT ?2",
                feed_query("p.id < ?1")
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params![before, POST_PAGE_SIZE], FeedPost::from_row)?;
            Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
        })
    };
    run().or_fail(messages::post::FEED_FAILED)
}

/// Live posts written today and how many distinct users wrote them.
pub fn today_count(pool: &DbPool, caller: i64) -> AppResult<PostCount> {
    let run = || -> AppResult<PostCount> {
        let conn = pool.get()?;
        ensure_live_caller(&conn, caller)?;
        Ok(conn.query_row(
            "SELECT COUNT(*), COUNT(DISTINCT user_id)
             FROM live_posts
             WHERE date(created_at) = date('now')",
            [],
            |row| {
                Ok(PostCount {
                    post_count: row.get(0)?,
                    user_count: row.get(1)?,
                })
            },
        )?)
    };
    run().or_fail(messages::post::COUNT_FAILED)
}

pub fn by_user(pool: &DbPool, caller: i64, user_id: i64) -> AppResult<Vec<PostThumb>> {
    let run = || -> AppResult<Vec<PostThumb>> {
        let conn = pool.get()?;
        ensure_live_caller(&conn, caller)?;
        Ok(thumbs(&conn, "p.user_id = ?1", user_id)?)
    };
    run().or_fail(messages::post::BY_USER_FAILED)
}

pub fn liked_by(pool: &DbPool, caller: i64, user_id: i64) -> AppResult<Vec<PostThumb>> {
    let run = || -> AppResult<Vec<PostThumb>> {
        let conn = pool.get()?;
        ensure_live_caller(&conn, caller)?;
        Ok(thumbs(
            &conn,
            "p.id IN (SELECT post_id FROM post_likes WHERE user_id = ?1)",
            user_id,
        )?)
    };
    run().or_fail(messages::post::LIKED_BY_FAILED)
}

/// Inserts the post and its image, then grants the daily reward, all in one
/// transaction. Returns the new post id.
pub fn create(pool: &DbPool, caller: i64, content: &str, image_url: &str) -> AppResult<i64> {
    let run = || -> AppResult<i64> {
        let mut conn = pool.get()?;
        let tx = conn.transaction()?;
        ensure_live_caller(&tx, caller)?;

        tx.execute(
            "INSERT INTO posts (user_id, content) VALUES (?1, ?2)",
            params![caller, content],
        )?;
        let post_id = tx.last_insert_rowid();

        tx.execute(
            "INSERT INTO post_images (post_id, image_url) VALUES (?1, ?2)",
            params![post_id, image_url],
        )?;

        // Today's count already includes the post inserted above.
        let rewarded = tx.execute(
            "UPDATE points
             SET current_point = current_point + ?2,
                 accu_point = accu_point + ?2
             WHERE user_id = ?1
               AND (SELECT COUNT(*) FROM posts
                    WHERE user_id = ?1 AND date(created_at) = date('now')) <= ?3",
            params![caller, POST_REWARD, DAILY_REWARDED_POSTS],
        )?;

        tx.commit()?;
        tracing::info!(post_id, user_id = caller, rewarded = rewarded > 0, "Created post");
        Ok(post_id)
    };
    run().or_fail(messages::post::CREATE_FAILED)
}

pub fn detail(pool: &DbPool, caller: i64, post_id: i64) -> AppResult<FeedPost> {
    let run = || -> AppResult<FeedPost> {
        let conn = pool.get()?;
        ensure_live_caller(&conn, caller)?;
        conn.query_row(&feed_query("p.id = ?1"), params![post_id], FeedPost::from_row)
            .optional()?
            .ok_or(AppError::NotFound(messages::post::NOT_FOUND))
    };
    run().or_fail(messages::post::DETAIL_FAILED)
}

/// Replaces the content and, when given, the image of a post the caller owns.
pub fn update(
    pool: &DbPool,
    caller: i64,
    post_id: i64,
    content: &str,
    image_url: Option<&str>,
) -> AppResult<()> {
    let run = || -> AppResult<()> {
        let mut conn = pool.get()?;
        let tx = conn.transaction()?;

        let updated = tx.execute(
            "UPDATE posts
             SET content = ?3, updated_at = datetime('now')
             WHERE id = ?1 AND user_id = ?2 AND deleted_at IS NULL
               AND EXISTS (SELECT 1 FROM live_users WHERE id = ?2)",
            params![post_id, caller, content],
        )?;
        if updated == 0 {
            return Err(explain_missed_write(
                &tx,
                caller,
                Target::Post(post_id),
                messages::post::NOT_OWNER_UPDATE,
            ));
        }

        if let Some(image_url) = image_url {
            tx.execute(
                "INSERT INTO post_images (post_id, image_url) VALUES (?1, ?2)
                 ON CONFLICT(post_id) DO UPDATE SET image_url = excluded.image_url",
                params![post_id, image_url],
            )?;
        }

        tx.commit()?;
        Ok(())
    };
    run().or_fail(messages::post::UPDATE_FAILED)
}

pub fn delete(pool: &DbPool, caller: i64, post_id: i64) -> AppResult<()> {
    let run = || -> AppResult<()> {
        let conn = pool.get()?;
        let deleted = conn.execute(
            "UPDATE posts
             SET deleted_at = datetime('now')
             WHERE id = ?1 AND user_id = ?2 AND deleted_at IS NULL
               AND EXISTS (SELECT 1 FROM live_users WHERE id = ?2)",
            params![post_id, caller],
        )?;
        if deleted == 0 {
            return Err(explain_missed_write(
                &conn,
                caller,
                Target::Post(post_id),
                messages::post::NOT_OWNER_DELETE,
            ));
        }
        tracing::info!(post_id, user_id = caller, "Soft-deleted post");
        Ok(())
    };
    run().or_fail(messages::post::DELETE_FAILED)
}
