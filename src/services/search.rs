use rusqlite::params;

use crate::db::guards::ensure_live_caller;
use crate::db::models::SearchHit;
use crate::error::{AppResult, OrFail};
use crate::messages;
use crate::pagination::{paginate, Cursor, Page, POST_PAGE_SIZE};
use crate::state::DbPool;

/// Escapes LIKE wildcards so the keyword matches literally.
fn like_pattern(keyword: &str) -> String {
    let mut escaped = String::with_capacity(keyword.len() + 2);
    escaped.push('%');
    for ch in keyword.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

/// Live posts whose content contains `keyword`, newest first.
pub fn posts(pool: &DbPool, caller: i64, keyword: &str, cursor: Cursor) -> AppResult<Page<SearchHit>> {
    let run = || -> AppResult<Page<SearchHit>> {
        let conn = pool.get()?;
        ensure_live_caller(&conn, caller)?;

        paginate(cursor, messages::search::END, |before| {
            let mut stmt = conn.prepare(
                "SELECT p.id, p.user_id, u.nickname, p.content, pi.image_url
                 FROM live_posts p
                 JOIN live_users u ON u.id = p.user_id
                 LEFT JOIN post_images pi ON pi.post_id = p.id
                 WHERE p.content LIKE ?1 ESCAPE '\\' AND p.id < ?2
                 ORDER BY p.created_at DESC, p.id DESC
                 LIMIT ?3",
            )?;
            let rows = stmt.query_map(
                params![like_pattern(keyword), before, POST_PAGE_SIZE],
                |row| {
                    Ok(SearchHit {
                        post_id: row.get(0)?,
                        user_id: row.get(1)?,
                        nickname: row.get(2)?,
                        content: row.get(3)?,
                        image_url: row.get(4)?,
                    })
                },
            )?;
            Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
        })
    };
    run().or_fail(messages::search::FAILED)
}
