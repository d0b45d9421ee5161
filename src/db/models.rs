//! Row shapes returned by the services. Field names follow the public JSON API.

use rusqlite::Row;
use serde::{Deserialize, Serialize};

/// Identity fields of a live user, as carried in tokens and login checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub user_id: i64,
    pub email: String,
    pub nickname: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPoint {
    pub user_id: i64,
    pub nickname: String,
    pub image_url: String,
    pub accu_point: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub user_id: i64,
    pub email: String,
    pub nickname: String,
    pub user_image: Option<String>,
    pub description: String,
    pub accu_point: i64,
    pub story_count: i64,
    #[serde(rename = "createAt")]
    pub created_at: String,
    #[serde(rename = "AccuRanking")]
    pub accu_ranking: i64,
    #[serde(rename = "TodayRanking")]
    pub today_ranking: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPost {
    pub post_id: i64,
    pub user_id: i64,
    pub nickname: String,
    pub content: String,
    pub image_url: Option<String>,
    pub user_image: Option<String>,
    #[serde(rename = "createAt")]
    pub created_at: String,
}

impl FeedPost {
    pub(crate) const COLUMNS: &'static str = "p.id, p.user_id, u.nickname, p.content, pi.image_url, ui.image_url, p.created_at";

    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            post_id: row.get(0)?,
            user_id: row.get(1)?,
            nickname: row.get(2)?,
            content: row.get(3)?,
            image_url: row.get(4)?,
            user_image: row.get(5)?,
            created_at: row.get(6)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostThumb {
    pub post_id: i64,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostCount {
    pub post_count: i64,
    pub user_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub post_id: i64,
    pub user_id: i64,
    pub nickname: String,
    pub content: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub comment_id: i64,
    pub user_id: i64,
    pub nickname: String,
    pub image_url: Option<String>,
    pub content: String,
    pub parent_id: i64,
    #[serde(rename = "createAt")]
    pub created_at: String,
}

impl CommentView {
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            comment_id: row.get(0)?,
            user_id: row.get(1)?,
            nickname: row.get(2)?,
            image_url: row.get(3)?,
            content: row.get(4)?,
            parent_id: row.get(5)?,
            created_at: row.get(6)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeStatus {
    #[serde(rename = "likecount")]
    pub like_count: i64,
    #[serde(rename = "likeuser")]
    pub liked_by_caller: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankEntry {
    pub user_id: i64,
    pub nickname: String,
    pub user_image: Option<String>,
    pub accu_point: i64,
    pub story_count: i64,
    pub today_story_count: i64,
}
