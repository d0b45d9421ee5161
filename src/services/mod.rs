//! Feature services. Each public function checks the caller, runs its SQL
//! against the live views and collapses infrastructure failures into the
//! operation's localized message.

pub mod comments;
pub mod likes;
pub mod posts;
pub mod ranks;
pub mod search;
pub mod users;

use rusqlite::ErrorCode;

/// Live posts written by user `u`.
pub(crate) const STORY_COUNT: &str =
    "(SELECT COUNT(*) FROM live_posts sp WHERE sp.user_id = u.id)";

/// Posts user `u` created today (UTC). Soft-deleted posts still count, so
/// deleting and reposting cannot raise the daily reward.
pub(crate) const TODAY_POST_COUNT: &str =
    "(SELECT COUNT(*) FROM posts tp WHERE tp.user_id = u.id AND date(tp.created_at) = date('now'))";

pub(crate) fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation
    )
}
