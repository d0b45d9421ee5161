use rusqlite::{params, OptionalExtension};
use serde::Serialize;

use crate::auth::{password, TokenKeys, TokenSubject};
use crate::db::guards::ensure_live_caller;
use crate::db::models::{UserInfo, UserPoint, UserSummary};
use crate::error::{AppError, AppResult, OrFail};
use crate::messages;
use crate::services::{is_unique_violation, STORY_COUNT, TODAY_POST_COUNT};
use crate::state::DbPool;

pub struct NewUser<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub nickname: &'a str,
    pub image_url: &'a str,
}

/// Profile fields to change; `None` leaves the stored value alone.
#[derive(Debug, Default, Clone)]
pub struct ProfileChanges {
    pub nickname: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggedIn {
    pub user_id: i64,
    pub token: String,
}

/// Creates the user together with its avatar and an empty point balance.
pub fn register(pool: &DbPool, user: &NewUser<'_>, bcrypt_cost: u32) -> AppResult<i64> {
    let run = || -> AppResult<i64> {
        let password_hash = password::hash(user.password, bcrypt_cost)?;

        let mut conn = pool.get()?;
        let tx = conn.transaction()?;

        let taken: bool = tx.query_row(
            "SELECT EXISTS (SELECT 1 FROM live_users WHERE email = ?1)",
            params![user.email],
            |row| row.get(0),
        )?;
        if taken {
            return Err(AppError::Conflict(messages::user::EMAIL_TAKEN));
        }

        // The partial unique index still catches a concurrent registration.
        tx.execute(
            "INSERT INTO users (email, password_hash, nickname) VALUES (?1, ?2, ?3)",
            params![user.email, password_hash, user.nickname],
        )
        .map_err(|err| {
            if is_unique_violation(&err) {
                AppError::Conflict(messages::user::EMAIL_TAKEN)
            } else {
                err.into()
            }
        })?;
        let user_id = tx.last_insert_rowid();

        tx.execute(
            "INSERT INTO user_images (user_id, image_url) VALUES (?1, ?2)",
            params![user_id, user.image_url],
        )?;
        tx.execute(
            "INSERT INTO points (user_id, current_point, accu_point) VALUES (?1, 0, 0)",
            params![user_id],
        )?;

        tx.commit()?;
        tracing::info!(user_id, "Registered user");
        Ok(user_id)
    };
    run().or_collapse(AppError::BadRequest(
        messages::user::REGISTER_FAILED.to_string(),
    ))
}

pub fn login(pool: &DbPool, keys: &TokenKeys, email: &str, plaintext: &str) -> AppResult<LoggedIn> {
    let run = || -> AppResult<LoggedIn> {
        let conn = pool.get()?;
        let found = conn
            .query_row(
                "SELECT id, email, nickname, description, password_hash
                 FROM live_users WHERE email = ?1",
                params![email],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                    ))
                },
            )
            .optional()?;

        let Some((user_id, email, nickname, description, password_hash)) = found else {
            return Err(AppError::NotFound(messages::user::EMAIL_UNKNOWN));
        };
        if !password::verify(plaintext, &password_hash)? {
            return Err(AppError::Unauthorized(messages::user::PASSWORD_MISMATCH));
        }

        let token = keys.issue(&TokenSubject {
            user_id,
            email: &email,
            nickname: &nickname,
            description: &description,
        })?;
        Ok(LoggedIn { user_id, token })
    };
    run().or_collapse(AppError::Unauthorized(messages::user::LOGIN_FAILED))
}

/// Identity of the token holder, for the login check.
pub fn current(pool: &DbPool, caller: i64) -> AppResult<UserSummary> {
    let run = || -> AppResult<UserSummary> {
        let conn = pool.get()?;
        conn.query_row(
            "SELECT id, email, nickname FROM live_users WHERE id = ?1",
            params![caller],
            |row| {
                Ok(UserSummary {
                    user_id: row.get(0)?,
                    email: row.get(1)?,
                    nickname: row.get(2)?,
                })
            },
        )
        .optional()?
        .ok_or(AppError::NotFound(messages::user::NOT_FOUND))
    };
    run().or_fail(messages::user::CURRENT_FAILED)
}

pub fn count(pool: &DbPool, caller: i64) -> AppResult<i64> {
    let run = || -> AppResult<i64> {
        let conn = pool.get()?;
        ensure_live_caller(&conn, caller)?;
        Ok(conn.query_row("SELECT COUNT(*) FROM live_users", [], |row| row.get(0))?)
    };
    run().or_fail(messages::user::COUNT_FAILED)
}

pub fn point(pool: &DbPool, caller: i64) -> AppResult<UserPoint> {
    let run = || -> AppResult<UserPoint> {
        let conn = pool.get()?;
        let nickname: Option<String> = conn
            .query_row(
                "SELECT nickname FROM live_users WHERE id = ?1",
                params![caller],
                |row| row.get(0),
            )
            .optional()?;
        let nickname = nickname.ok_or(AppError::Unauthorized(messages::auth::INVALID_TOKEN))?;

        let image_url: String = conn
            .query_row(
                "SELECT image_url FROM user_images WHERE user_id = ?1",
                params![caller],
                |row| row.get(0),
            )
            .optional()?
            .ok_or(AppError::NotFound(messages::user::IMAGE_NOT_FOUND))?;

        let accu_point: i64 = conn
            .query_row(
                "SELECT accu_point FROM points WHERE user_id = ?1",
                params![caller],
                |row| row.get(0),
            )
            .optional()?
            .ok_or(AppError::NotFound(messages::user::POINT_NOT_FOUND))?;

        Ok(UserPoint {
            user_id: caller,
            nickname,
            image_url,
            accu_point,
        })
    };
    run().or_fail(messages::user::POINT_FAILED)
}

/// Public profile with the user's all-time and today leaderboard positions.
pub fn profile(pool: &DbPool, caller: i64, user_id: i64) -> AppResult<UserInfo> {
    let run = || -> AppResult<UserInfo> {
        let conn = pool.get()?;
        ensure_live_caller(&conn, caller)?;

        let sql = format!(
            "SELECT u.id, u.email, u.nickname, ui.image_url, u.description,
                    COALESCE(pt.accu_point, 0), {STORY_COUNT}, u.created_at
             FROM live_users u
             LEFT JOIN user_images ui ON ui.user_id = u.id
             LEFT JOIN points pt ON pt.user_id = u.id
             WHERE u.id = ?1"
        );
        let info = conn
            .query_row(&sql, params![user_id], |row| {
                Ok(UserInfo {
                    user_id: row.get(0)?,
                    email: row.get(1)?,
                    nickname: row.get(2)?,
                    user_image: row.get(3)?,
                    description: row.get(4)?,
                    accu_point: row.get(5)?,
                    story_count: row.get(6)?,
                    created_at: row.get(7)?,
                    accu_ranking: 0,
                    today_ranking: 0,
                })
            })
            .optional()?
            .ok_or(AppError::NotFound(messages::user::NOT_FOUND))?;

        let accu_ranking: i64 = conn.query_row(
            "SELECT ranking FROM (
                 SELECT u.id AS user_id,
                        ROW_NUMBER() OVER (ORDER BY COALESCE(pt.accu_point, 0) DESC, u.id ASC) AS ranking
                 FROM live_users u
                 LEFT JOIN points pt ON pt.user_id = u.id
             ) WHERE user_id = ?1",
            params![user_id],
            |row| row.get(0),
        )?;

        let today_sql = format!(
            "SELECT ranking FROM (
                 SELECT u.id AS user_id,
                        ROW_NUMBER() OVER (
                            ORDER BY {TODAY_POST_COUNT} DESC, COALESCE(pt.accu_point, 0) DESC, u.id ASC
                        ) AS ranking
                 FROM live_users u
                 LEFT JOIN points pt ON pt.user_id = u.id
             ) WHERE user_id = ?1"
        );
        let today_ranking: i64 = conn.query_row(&today_sql, params![user_id], |row| row.get(0))?;

        Ok(UserInfo {
            accu_ranking,
            today_ranking,
            ..info
        })
    };
    run().or_fail(messages::user::PROFILE_FAILED)
}

pub fn update_profile(
    pool: &DbPool,
    caller: i64,
    user_id: i64,
    changes: &ProfileChanges,
) -> AppResult<()> {
    let run = || -> AppResult<()> {
        if caller != user_id {
            return Err(AppError::Unauthorized(messages::user::NOT_SELF));
        }

        let mut conn = pool.get()?;
        let tx = conn.transaction()?;

        let updated = tx.execute(
            "UPDATE users
             SET nickname = COALESCE(?2, nickname),
                 description = COALESCE(?3, description),
                 updated_at = datetime('now')
             WHERE id = ?1 AND deleted_at IS NULL",
            params![user_id, changes.nickname, changes.description],
        )?;
        if updated == 0 {
            return Err(AppError::NotFound(messages::user::NOT_FOUND));
        }

        if let Some(ref image_url) = changes.image_url {
            tx.execute(
                "INSERT INTO user_images (user_id, image_url) VALUES (?1, ?2)
                 ON CONFLICT(user_id) DO UPDATE SET image_url = excluded.image_url",
                params![user_id, image_url],
            )?;
        }

        tx.commit()?;
        Ok(())
    };
    run().or_fail(messages::user::UPDATE_FAILED)
}

pub fn delete(pool: &DbPool, caller: i64, user_id: i64) -> AppResult<()> {
    let run = || -> AppResult<()> {
        if caller != user_id {
            return Err(AppError::Unauthorized(messages::user::NOT_SELF));
        }
        let conn = pool.get()?;
        let deleted = conn.execute(
            "UPDATE users SET deleted_at = datetime('now') WHERE id = ?1 AND deleted_at IS NULL",
            params![user_id],
        )?;
        if deleted == 0 {
            return Err(AppError::NotFound(messages::user::NOT_FOUND));
        }
        tracing::info!(user_id, "Soft-deleted user");
        Ok(())
    };
    run().or_fail(messages::user::DELETE_FAILED)
}
