//! Id-based cursor pagination shared by the feed, comment and search listings.
//!
//! A cursor of `0` asks for the newest page, `-1` is the end-of-list sentinel
//! and any positive value asks for rows whose id is strictly below it.

use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

use crate::error::{AppError, AppResult};
use crate::messages;

pub const POST_PAGE_SIZE: i64 = 5;
pub const COMMENT_PAGE_SIZE: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    First,
    Before(i64),
    End,
}

impl Cursor {
    /// Exclusive upper bound on row ids for this page, `None` at the sentinel.
    pub fn upper_bound(self) -> Option<i64> {
        match self {
            Cursor::First => Some(i64::MAX),
            Cursor::Before(id) => Some(id),
            Cursor::End => None,
        }
    }
}

impl TryFrom<i64> for Cursor {
    type Error = AppError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(Cursor::First),
            -1 => Ok(Cursor::End),
            id if id > 0 => Ok(Cursor::Before(id)),
            _ => Err(AppError::BadRequest(
                messages::request::CURSOR_INVALID.to_string(),
            )),
        }
    }
}

/// One page of a listing. `End` serializes as a one-element list holding the
/// listing's "finished" message so clients can tell it apart from an empty page.
#[derive(Debug, Clone, PartialEq)]
pub enum Page<T> {
    Items(Vec<T>),
    End(&'static str),
}

#[cfg(test)]
impl<T> Page<T> {
    pub(crate) fn items(&self) -> &[T] {
        match self {
            Page::Items(items) => items,
            Page::End(_) => &[],
        }
    }
}

impl<T: Serialize> Serialize for Page<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Page::Items(items) => items.serialize(serializer),
            Page::End(message) => {
                let mut seq = serializer.serialize_seq(Some(1))?;
                seq.serialize_element(message)?;
                seq.end()
            }
        }
    }
}

/// Runs `fetch` with the cursor's id bound unless the cursor is the sentinel.
pub fn paginate<T>(
    cursor: Cursor,
    end_message: &'static str,
    fetch: impl FnOnce(i64) -> AppResult<Vec<T>>,
) -> AppResult<Page<T>> {
    match cursor.upper_bound() {
        Some(bound) => Ok(Page::Items(fetch(bound)?)),
        None => Ok(Page::End(end_message)),
    }
}
