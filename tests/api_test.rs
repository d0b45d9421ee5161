//! End-to-end tests driving the HTTP router in-process.
//!
//! Tests cover:
//! - Registration, login and bearer-token authentication
//! - Post creation through multipart uploads and the point reward
//! - Cursor pagination and the end-of-list sentinel
//! - Comments, likes, ranking and search envelopes
//! - Ownership and soft-delete failures

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use storyline::auth::TokenKeys;
use storyline::config::Config;
use storyline::db;
use storyline::messages;
use storyline::routes;
use storyline::state::AppState;
use storyline::storage::LocalImageStore;

const BOUNDARY: &str = "storyline-test-boundary";
const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

struct TestApp {
    _tmp: TempDir,
    app: Router,
}

fn setup() -> TestApp {
    let tmp = TempDir::new().unwrap();

    let mut config = Config::default();
    config.database.path = Some(tmp.path().join("test.db"));
    config.storage.path = Some(tmp.path().join("uploads"));
    config.auth.bcrypt_cost = 4;

    let pool = db::create_pool(&config.db_path()).expect("Failed to create test database");
    db::run_migrations(&pool).expect("Failed to run migrations");

    let state = AppState {
        db: pool,
        tokens: Arc::new(TokenKeys::from_config(&config.auth)),
        images: Arc::new(LocalImageStore::new(
            config.uploads_path(),
            "http://localhost:3000/uploads",
        )),
        config,
    };

    TestApp {
        _tmp: tmp,
        app: routes::app(state),
    }
}

impl TestApp {
    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    async fn json(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send(request).await
    }

    async fn multipart(
        &self,
        method: Method,
        uri: &str,
        token: &str,
        fields: &[(&str, &str)],
        file: Option<(&str, &str, &[u8])>,
    ) -> (StatusCode, Value) {
        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        if let Some((file_name, content_type, data)) = file {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    /// Registers and logs in, returning (user id, token).
    async fn sign_up(&self, nickname: &str) -> (i64, String) {
        let email = format!("{nickname}@example.com");
        let (status, _) = self
            .json(
                Method::POST,
                "/user/register",
                None,
                Some(json!({
                    "email": email,
                    "password": "0123456789",
                    "nickname": nickname,
                    "imageUrl": format!("http://img/{nickname}.png"),
                })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = self
            .json(
                Method::POST,
                "/user/login",
                None,
                Some(json!({ "email": email, "password": "0123456789" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        (
            body["data"]["userId"].as_i64().unwrap(),
            body["data"]["token"].as_str().unwrap().to_string(),
        )
    }

    async fn create_post(&self, token: &str, content: &str) {
        let (status, body) = self
            .multipart(
                Method::POST,
                "/post",
                token,
                &[("content", content)],
                Some(("photo.png", "image/png", PNG)),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "create post failed: {body}");
    }

    async fn feed_ids(&self, token: &str, cursor: i64) -> Vec<i64> {
        let (status, body) = self
            .json(Method::GET, &format!("/post/list/{cursor}"), Some(token), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        body["postList"]["posts"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["postId"].as_i64().unwrap())
            .collect()
    }
}

// ============================================================================
// USERS
// ============================================================================

#[tokio::test]
async fn test_register_login_and_is_login() {
    let app = setup();
    let (user_id, token) = app.sign_up("kim").await;

    let (status, body) = app
        .json(Method::GET, "/user/isLogin", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "data": { "userId": user_id, "email": "kim@example.com", "nickname": "kim" },
            "statusCode": 200,
            "statusMsg": messages::user::LOGIN_VALID,
        })
    );
}

#[tokio::test]
async fn test_duplicate_registration_is_conflict() {
    let app = setup();
    app.sign_up("kim").await;

    let (status, body) = app
        .json(
            Method::POST,
            "/user/register",
            None,
            Some(json!({
                "email": "kim@example.com",
                "password": "0123456789",
                "nickname": "kim2",
                "imageUrl": "http://img/x.png",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["statusMsg"], messages::user::EMAIL_TAKEN);
    assert_eq!(body["statusCode"], 409);
}

#[tokio::test]
async fn test_register_validates_input() {
    let app = setup();
    let (status, body) = app
        .json(
            Method::POST,
            "/user/register",
            None,
            Some(json!({
                "email": "kim@example.com",
                "password": "short",
                "nickname": "kim",
                "imageUrl": "http://img/x.png",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["statusMsg"], messages::user::PASSWORD_TOO_SHORT);
}

#[tokio::test]
async fn test_missing_or_bad_token_is_unauthorized() {
    let app = setup();

    let (status, body) = app.json(Method::GET, "/user/isLogin", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["statusMsg"], messages::auth::INVALID_TOKEN);

    let (status, _) = app
        .json(Method::GET, "/rank/list", Some("not-a-token"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let foreign = TokenKeys::new("some-other-secret", 1)
        .issue(&storyline::auth::TokenSubject {
            user_id: 1,
            email: "x@example.com",
            nickname: "x",
            description: "",
        })
        .unwrap();
    let (status, _) = app
        .json(Method::GET, "/user/isLogin", Some(&foreign), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_deleted_user_token_stops_working() {
    let app = setup();
    let (user_id, token) = app.sign_up("kim").await;

    let (status, _) = app
        .json(Method::DELETE, &format!("/user/{user_id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .json(Method::GET, "/user/isLogin", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_profile_update_is_self_only() {
    let app = setup();
    let (kim, kim_token) = app.sign_up("kim").await;
    let (_lee, lee_token) = app.sign_up("lee").await;

    let (status, body) = app
        .multipart(
            Method::PATCH,
            &format!("/user/{kim}"),
            &lee_token,
            &[("nickname", "hijack")],
            None,
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["statusMsg"], messages::user::NOT_SELF);

    let (status, body) = app
        .multipart(
            Method::PATCH,
            &format!("/user/{kim}"),
            &kim_token,
            &[("nickname", "kimmy"), ("description", "hello")],
            Some(("me.jpg", "image/jpeg", PNG)),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"], json!({ "nickname": "kimmy", "description": "hello" }));

    let (_, body) = app
        .json(Method::GET, &format!("/user/{kim}"), Some(&lee_token), None)
        .await;
    let info = &body["data"]["userInfo"];
    assert_eq!(info["nickname"], "kimmy");
    assert_eq!(info["description"], "hello");
    assert!(info["userImage"]
        .as_str()
        .unwrap()
        .starts_with("http://localhost:3000/uploads/image_"));
    assert!(info["AccuRanking"].is_i64());
    assert!(info["TodayRanking"].is_i64());
}

// ============================================================================
// POSTS
// ============================================================================

#[tokio::test]
async fn test_create_post_rewards_points_and_serves_image() {
    let app = setup();
    let (_, token) = app.sign_up("kim").await;

    for n in 0..4 {
        app.create_post(&token, &format!("story {n}")).await;
    }

    let (status, body) = app.json(Method::GET, "/user/point", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["userPoint"]["accuPoint"], 3000);

    let (_, body) = app.json(Method::GET, "/post/list/0", Some(&token), None).await;
    let newest = &body["postList"]["posts"][0];
    assert_eq!(newest["content"], "story 3");
    let image_url = newest["imageUrl"].as_str().unwrap();
    let path = image_url.trim_start_matches("http://localhost:3000");

    let response = app
        .app
        .clone()
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], PNG);
}

#[tokio::test]
async fn test_create_post_requires_an_image() {
    let app = setup();
    let (_, token) = app.sign_up("kim").await;

    let (status, body) = app
        .multipart(Method::POST, "/post", &token, &[("content", "no file")], None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["statusMsg"], messages::request::FILE_REQUIRED);

    let (status, body) = app
        .multipart(
            Method::POST,
            "/post",
            &token,
            &[("content", "wrong file")],
            Some(("notes.txt", "text/plain", b"hello")),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["statusMsg"], messages::request::FILE_NOT_IMAGE);
}

#[tokio::test]
async fn test_empty_file_part_means_no_new_image() {
    let app = setup();
    let (kim, token) = app.sign_up("kim").await;
    app.create_post(&token, "before").await;
    let post_id = app.feed_ids(&token, 0).await[0];
    let uri = format!("/post/{post_id}");

    let (_, body) = app.json(Method::GET, &uri, Some(&token), None).await;
    let image_before = body["post"]["imageUrl"].clone();

    let empty_part = Some(("", "application/octet-stream", &b""[..]));
    let (status, body) = app
        .multipart(Method::PATCH, &uri, &token, &[("content", "edited")], empty_part)
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    let (_, body) = app.json(Method::GET, &uri, Some(&token), None).await;
    assert_eq!(body["post"]["content"], "edited");
    assert_eq!(body["post"]["imageUrl"], image_before);

    let (status, body) = app
        .multipart(
            Method::PATCH,
            &format!("/user/{kim}"),
            &token,
            &[("description", "still me")],
            empty_part,
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    let (status, body) = app
        .multipart(Method::POST, "/post", &token, &[("content", "no image")], empty_part)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["statusMsg"], messages::request::FILE_REQUIRED);
}

#[tokio::test]
async fn test_register_rejects_malformed_email() {
    let app = setup();
    for email in ["a@b..c", "a@-x.com", "a\"@b.com"] {
        let (status, body) = app
            .json(
                Method::POST,
                "/user/register",
                None,
                Some(json!({
                    "email": email,
                    "password": "0123456789",
                    "nickname": "kim",
                    "imageUrl": "http://img/x.png",
                })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{email}");
        assert_eq!(body["statusMsg"], messages::user::EMAIL_INVALID);
    }
}

#[tokio::test]
async fn test_oversized_upload_is_rejected() {
    let app = setup();
    let (_, token) = app.sign_up("kim").await;
    let big = vec![0u8; 1024 * 1024 + 1];

    let (status, body) = app
        .multipart(
            Method::POST,
            "/post",
            &token,
            &[("content", "huge")],
            Some(("big.png", "image/png", &big)),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["statusMsg"], messages::request::FILE_TOO_LARGE);
}

#[tokio::test]
async fn test_feed_pagination_and_sentinel() {
    let app = setup();
    let (_, token) = app.sign_up("kim").await;
    for n in 0..7 {
        app.create_post(&token, &format!("p{n}")).await;
    }

    let first = app.feed_ids(&token, 0).await;
    assert_eq!(first.len(), 5);
    assert!(first.windows(2).all(|w| w[0] > w[1]));

    let second = app.feed_ids(&token, *first.last().unwrap()).await;
    assert_eq!(second.len(), 2);
    assert!(second.iter().all(|id| id < first.last().unwrap()));

    let (status, body) = app.json(Method::GET, "/post/list/-1", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["postList"]["posts"], json!([messages::post::FEED_END]));

    let (status, body) = app.json(Method::GET, "/post/list/-5", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["statusMsg"], messages::request::CURSOR_INVALID);
}

#[tokio::test]
async fn test_post_ownership_and_soft_delete() {
    let app = setup();
    let (_, kim_token) = app.sign_up("kim").await;
    let (_, lee_token) = app.sign_up("lee").await;
    app.create_post(&kim_token, "kim's story").await;
    let post_id = app.feed_ids(&kim_token, 0).await[0];
    let uri = format!("/post/{post_id}");

    let (status, body) = app.json(Method::DELETE, &uri, Some(&lee_token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["statusMsg"], messages::post::NOT_OWNER_DELETE);

    let (status, body) = app
        .multipart(Method::PATCH, &uri, &lee_token, &[("content", "edited")], None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["statusMsg"], messages::post::NOT_OWNER_UPDATE);

    let (status, body) = app.json(Method::GET, &uri, Some(&lee_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["post"]["content"], "kim's story");

    let (status, _) = app.json(Method::DELETE, &uri, Some(&kim_token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.json(Method::GET, &uri, Some(&kim_token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["statusMsg"], messages::post::NOT_FOUND);
}

// ============================================================================
// COMMENTS, LIKES, RANKS, SEARCH
// ============================================================================

#[tokio::test]
async fn test_comment_lists_and_sentinel() {
    let app = setup();
    let (_, token) = app.sign_up("kim").await;
    app.create_post(&token, "discuss").await;
    let post_id = app.feed_ids(&token, 0).await[0];

    for n in 0..12 {
        let (status, _) = app
            .json(
                Method::POST,
                "/comment",
                Some(&token),
                Some(json!({ "postId": post_id, "content": format!("root {n}"), "parentId": 0 })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let uri = format!("/comment?postId={post_id}&cursor=0");
    let (_, body) = app.json(Method::GET, &uri, Some(&token), None).await;
    let roots = body["commentListZero"].as_array().unwrap();
    assert_eq!(roots.len(), 10);
    let parent = roots[0]["commentId"].as_i64().unwrap();

    let (status, _) = app
        .json(
            Method::POST,
            "/comment",
            Some(&token),
            Some(json!({ "postId": post_id, "content": "a reply", "parentId": parent })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app.json(Method::GET, &uri, Some(&token), None).await;
    assert_eq!(body["commentListOther"].as_array().unwrap().len(), 1);
    assert_eq!(body["commentListOther"][0]["parentId"], parent);

    let uri = format!("/comment?postId={post_id}&cursor=-1");
    let (_, body) = app.json(Method::GET, &uri, Some(&token), None).await;
    assert_eq!(body["commentListZero"], json!([messages::comment::LIST_END]));
    assert_eq!(body["commentListOther"], json!([messages::comment::LIST_END]));
}

#[tokio::test]
async fn test_like_twice_is_conflict() {
    let app = setup();
    let (_, token) = app.sign_up("kim").await;
    app.create_post(&token, "like me").await;
    let post_id = app.feed_ids(&token, 0).await[0];
    let uri = format!("/like/{post_id}");

    let (status, _) = app.json(Method::POST, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = app.json(Method::POST, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["statusMsg"], messages::like::ALREADY_LIKED);

    let (_, body) = app.json(Method::GET, &uri, Some(&token), None).await;
    assert_eq!(body["likecount"], 1);
    assert_eq!(body["likeuser"], true);

    let (status, _) = app.json(Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = app.json(Method::GET, &uri, Some(&token), None).await;
    assert_eq!(body["likecount"], 0);
    assert_eq!(body["likeuser"], false);
}

#[tokio::test]
async fn test_rank_list_and_search() {
    let app = setup();
    let (kim, kim_token) = app.sign_up("kim").await;
    let (_, lee_token) = app.sign_up("lee").await;
    app.create_post(&kim_token, "sunny day at the beach").await;
    app.create_post(&kim_token, "rainy night").await;
    app.create_post(&lee_token, "sunny morning").await;

    let (status, body) = app.json(Method::GET, "/rank/list", Some(&lee_token), None).await;
    assert_eq!(status, StatusCode::OK);
    let top = &body["rankList"][0];
    assert_eq!(top["userId"], kim);
    assert_eq!(top["accuPoint"], 2000);
    assert_eq!(top["storyCount"], 2);
    assert_eq!(top["todayStoryCount"], 2);

    let (status, body) = app
        .json(Method::GET, "/search?keyword=sunny&cursor=0", Some(&kim_token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let hits = body["searchPost"].as_array().unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0]["content"], "sunny morning");

    let (_, body) = app
        .json(Method::GET, "/search?keyword=sunny&cursor=-1", Some(&kim_token), None)
        .await;
    assert_eq!(body["searchPost"], json!([messages::search::END]));
}
