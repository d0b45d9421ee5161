//! Existence checks against the live (not soft-deleted) views, and the
//! classification of ownership-gated writes that touched no rows.

use rusqlite::{params, Connection};

use crate::error::{AppError, AppResult};
use crate::messages;

/// A row an ownership-gated write was aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Post(i64),
    Comment(i64),
}

impl Target {
    fn view(self) -> &'static str {
        match self {
            Target::Post(_) => "live_posts",
            Target::Comment(_) => "live_comments",
        }
    }

    fn id(self) -> i64 {
        match self {
            Target::Post(id) | Target::Comment(id) => id,
        }
    }

    fn not_found(self) -> &'static str {
        match self {
            Target::Post(_) => messages::post::NOT_FOUND,
            Target::Comment(_) => messages::comment::NOT_FOUND,
        }
    }
}

pub fn user_is_live(conn: &Connection, user_id: i64) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT EXISTS (SELECT 1 FROM live_users WHERE id = ?1)",
        params![user_id],
        |row| row.get(0),
    )
}

pub fn post_is_live(conn: &Connection, post_id: i64) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT EXISTS (SELECT 1 FROM live_posts WHERE id = ?1)",
        params![post_id],
        |row| row.get(0),
    )
}

/// The acting user must still exist; a missing caller is an auth failure.
pub fn ensure_live_caller(conn: &Connection, caller: i64) -> AppResult<()> {
    if user_is_live(conn, caller)? {
        Ok(())
    } else {
        Err(AppError::Unauthorized(messages::auth::INVALID_TOKEN))
    }
}

pub fn ensure_live_post(conn: &Connection, post_id: i64) -> AppResult<()> {
    if post_is_live(conn, post_id)? {
        Ok(())
    } else {
        Err(AppError::NotFound(messages::post::NOT_FOUND))
    }
}

/// Explains why a write filtered by caller, target and ownership matched
/// nothing: the caller is gone, the target is gone, or the caller is not the owner.
pub fn explain_missed_write(
    conn: &Connection,
    caller: i64,
    target: Target,
    not_owner: &'static str,
) -> AppError {
    let check = || -> AppResult<AppError> {
        ensure_live_caller(conn, caller)?;
        let sql = format!(
            "SELECT EXISTS (SELECT 1 FROM {} WHERE id = ?1)",
            target.view()
        );
        let exists: bool = conn.query_row(&sql, params![target.id()], |row| row.get(0))?;
        if exists {
            Ok(AppError::Unauthorized(not_owner))
        } else {
            Ok(AppError::NotFound(target.not_found()))
        }
    };
    match check() {
        Ok(err) | Err(err) => err,
    }
}
