//! Router tests against the in-memory backend.

use std::sync::Arc;

use askup::{AppState, create_app};
use askup_ledger::{VoteLedger, VoteMode};
use askup_repository::{InMemoryForum, ItemStore, ItemStoreError, UserRepository};
use askup_shared::types::{ItemId, ItemKind, NewUser, User, VotableItem, VoteEntry, VoteState};
use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

const USER_HEADER: &str = "x-askup-user";

async fn setup() -> (Router, User) {
    let forum = InMemoryForum::new();
    let user = forum
        .insert_user(NewUser {
            username: "ferris".to_string(),
            email: "ferris@example.com".to_string(),
            password_hash: String::new(),
        })
        .await
        .unwrap();
    (create_app(AppState::in_memory(forum, VoteMode::Baseline)), user)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str, user: Option<Uuid>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(user) = user {
        builder = builder.header(USER_HEADER, user.to_string());
    }
    builder.body(Body::empty()).unwrap()
}

fn post_json(uri: &str, user: Option<Uuid>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(user) = user {
        builder = builder.header(USER_HEADER, user.to_string());
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn ask(app: &Router, user: Uuid, title: &str, tags: &str) -> String {
    let (status, body) = send(
        app,
        post_json(
            "/ask",
            Some(user),
            json!({ "title": title, "content": "How?", "tags": tags }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_check() {
    let (app, _) = setup().await;
    let response = app.oneshot(get("/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_ask_requires_login() {
    let (app, _) = setup().await;
    let (status, body) = send(
        &app,
        post_json("/ask", None, json!({ "title": "t", "content": "c" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Login required");
}

#[tokio::test]
async fn test_ask_splits_tags() {
    let (app, user) = setup().await;
    let (status, body) = send(
        &app,
        post_json(
            "/ask",
            Some(user.id),
            json!({ "title": "Borrowck", "content": "Why?", "tags": " rust, ,borrowck " }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["tags"], json!(["rust", "borrowck"]));
    assert_eq!(body["votes"], 0);
    assert_eq!(body["voted_by"], json!([]));
}

#[tokio::test]
async fn test_vote_toggle_and_flip() {
    let (app, user) = setup().await;
    let question_id = ask(&app, user.id, "Votes", "").await;
    let up = format!("/vote/question/{question_id}/up");
    let down = format!("/vote/question/{question_id}/down");

    let (status, body) = send(&app, get(&up, Some(user.id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["votes"], 1);

    let (_, body) = send(&app, get(&down, Some(user.id))).await;
    assert_eq!(body["votes"], -1);

    let (_, body) = send(&app, get(&down, Some(user.id))).await;
    assert_eq!(body["votes"], 0);

    let (_, page) = send(&app, get(&format!("/question/{question_id}"), None)).await;
    assert_eq!(page["question"]["votes"], 0);
    assert_eq!(page["question"]["voted_by"], json!([]));
}

#[tokio::test]
async fn test_unknown_vote_type_counts_as_down() {
    let (app, user) = setup().await;
    let question_id = ask(&app, user.id, "Sideways", "").await;

    let (status, body) = send(
        &app,
        get(&format!("/vote/question/{question_id}/sideways"), Some(user.id)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["votes"], -1);
}

#[tokio::test]
async fn test_vote_requires_login() {
    let (app, user) = setup().await;
    let question_id = ask(&app, user.id, "Anon", "").await;

    let (status, _) = send(&app, get(&format!("/vote/question/{question_id}/up"), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_vote_on_missing_item() {
    let (app, user) = setup().await;
    let (status, body) = send(
        &app,
        get(&format!("/vote/answer/{}/up", Uuid::new_v4()), Some(user.id)),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Item not found");
}

#[tokio::test]
async fn test_unknown_item_type_targets_answers() {
    let (app, user) = setup().await;
    let question_id = ask(&app, user.id, "Kinds", "").await;

    // The id belongs to a question, so the answer store does not know it.
    let (status, _) = send(
        &app,
        get(&format!("/vote/comment/{question_id}/up"), Some(user.id)),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_vote_with_malformed_id() {
    let (app, user) = setup().await;
    let (status, body) = send(&app, get("/vote/question/not-an-id/up", Some(user.id))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Voting failed");
}

#[tokio::test]
async fn test_answers_sorted_by_votes() {
    let (app, user) = setup().await;
    let question_id = ask(&app, user.id, "Answers", "").await;

    let mut answer_ids = Vec::new();
    for content in ["first", "second"] {
        let (status, body) = send(
            &app,
            post_json(
                &format!("/answer/{question_id}"),
                Some(user.id),
                json!({ "content": content }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        answer_ids.push(body["id"].as_str().unwrap().to_string());
    }

    let (_, body) = send(
        &app,
        get(&format!("/vote/answer/{}/up", answer_ids[1]), Some(user.id)),
    )
    .await;
    assert_eq!(body["votes"], 1);

    let (status, page) = send(&app, get(&format!("/question/{question_id}"), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["question"]["username"], "ferris");
    assert_eq!(page["answers"][0]["id"], answer_ids[1].as_str());
    assert_eq!(page["answers"][0]["username"], "ferris");
    assert_eq!(page["answers"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_post_answer_rejects_malformed_question_id() {
    let (app, user) = setup().await;
    let (status, body) = send(
        &app,
        post_json("/answer/nope", Some(user.id), json!({ "content": "hi" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Error posting answer");
}

#[tokio::test]
async fn test_view_question_errors() {
    let (app, _) = setup().await;

    let (status, body) = send(&app, get("/question/not-a-uuid", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid question ID");

    let (status, body) = send(&app, get(&format!("/question/{}", Uuid::new_v4()), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Question not found");
}

#[tokio::test]
async fn test_unknown_author_is_anonymous() {
    let (app, _) = setup().await;
    let ghost = Uuid::new_v4();
    let question_id = ask(&app, ghost, "Ghost", "").await;

    let (_, page) = send(&app, get(&format!("/question/{question_id}"), None)).await;
    assert_eq!(page["question"]["username"], "Anonymous");
}

#[tokio::test]
async fn test_search() {
    let (app, user) = setup().await;
    ask(&app, user.id, "Pinning futures", "").await;
    ask(&app, user.id, "Traits", "async").await;

    let (status, body) = send(&app, get("/search?q=FUTURES", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["query"], "FUTURES");
    assert_eq!(body["questions"].as_array().unwrap().len(), 1);
    assert_eq!(body["questions"][0]["answer_count"], 0);

    let (_, body) = send(&app, get("/search?q=async", None)).await;
    assert_eq!(body["questions"][0]["title"], "Traits");

    let (status, body) = send(&app, get("/search", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["questions"], json!([]));

    let (status, body) = send(&app, get("/search?q=%28unclosed", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid search query");
}

#[tokio::test]
async fn test_index_respects_limit() {
    let forum = InMemoryForum::new();
    let app = create_app(AppState::in_memory(forum, VoteMode::Atomic).with_recent_questions_limit(2));
    let user = Uuid::new_v4();
    for title in ["a", "b", "c"] {
        ask(&app, user, title, "").await;
    }

    let (status, body) = send(&app, get("/", None)).await;
    assert_eq!(status, StatusCode::OK);
    let questions = body["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 2);
    assert_eq!(questions[0]["username"], "Anonymous");
}

#[tokio::test]
async fn test_profile() {
    let (app, user) = setup().await;
    let question_id = ask(&app, user.id, "Mine", "").await;
    send(
        &app,
        post_json(
            &format!("/answer/{question_id}"),
            Some(user.id),
            json!({ "content": "self-answer" }),
        ),
    )
    .await;
    send(
        &app,
        post_json(
            &format!("/answer/{}", Uuid::new_v4()),
            Some(user.id),
            json!({ "content": "orphan" }),
        ),
    )
    .await;

    let (status, body) = send(&app, get("/profile/ferris", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["username"], "ferris");
    assert!(body["user"].get("email").is_none());
    assert_eq!(body["questions"].as_array().unwrap().len(), 1);

    let titles: Vec<&str> = body["answers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["question_title"].as_str().unwrap())
        .collect();
    assert_eq!(titles.len(), 2);
    assert!(titles.contains(&"Mine"));
    assert!(titles.contains(&"Unknown Question"));

    let (status, body) = send(&app, get("/profile/nobody", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User not found");
}

#[tokio::test]
async fn test_register_then_login() {
    let (app, _) = setup().await;
    let (status, body) = send(
        &app,
        post_json(
            "/register",
            None,
            json!({ "username": "crab", "email": "crab@example.com", "password": "s3cret" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["username"], "crab");
    let user_id = body["user_id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        post_json("/login", None, json!({ "username": "crab", "password": "s3cret" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], user_id.as_str());

    // The returned id works as the acting user and names the author.
    let user_id = Uuid::parse_str(&user_id).unwrap();
    let question_id = ask(&app, user_id, "Registered", "").await;
    let (_, page) = send(&app, get(&format!("/question/{question_id}"), None)).await;
    assert_eq!(page["question"]["username"], "crab");

    let (status, body) = send(&app, get("/profile/crab", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_rejects_taken_username_or_email() {
    let (app, _) = setup().await;

    for payload in [
        json!({ "username": "ferris", "email": "new@example.com", "password": "pw" }),
        json!({ "username": "newcomer", "email": "ferris@example.com", "password": "pw" }),
    ] {
        let (status, body) = send(&app, post_json("/register", None, payload)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "Username or email already exists");
    }

    let (status, _) = send(&app, get("/profile/newcomer", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_register_requires_all_fields() {
    let (app, _) = setup().await;
    let (status, body) = send(
        &app,
        post_json(
            "/register",
            None,
            json!({ "username": " ", "email": "a@example.com", "password": "pw" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Username, email and password are required");
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let (app, _) = setup().await;
    send(
        &app,
        post_json(
            "/register",
            None,
            json!({ "username": "crab", "email": "crab@example.com", "password": "right" }),
        ),
    )
    .await;

    for payload in [
        json!({ "username": "crab", "password": "wrong" }),
        json!({ "username": "nobody", "password": "right" }),
        // Seeded without a usable hash.
        json!({ "username": "ferris", "password": "" }),
    ] {
        let (status, body) = send(&app, post_json("/login", None, payload)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Invalid username or password");
    }
}

/// Item store whose items always exist but whose writes never land.
struct BrokenItemStore {
    conflict: bool,
}

#[async_trait]
impl ItemStore for BrokenItemStore {
    async fn find_by_id(&self, id: ItemId) -> Result<Option<VotableItem>, ItemStoreError> {
        Ok(Some(VotableItem::new(id, ItemKind::Question, 0, Vec::new())))
    }

    async fn update_vote_fields(
        &self,
        _id: ItemId,
        _votes: i64,
        _voted_by: &[VoteEntry],
    ) -> Result<(), ItemStoreError> {
        Err(ItemStoreError::unavailable("connection reset"))
    }

    async fn update_vote_fields_if_unchanged(
        &self,
        _id: ItemId,
        _expected: &VoteState,
        _votes: i64,
        _voted_by: &[VoteEntry],
    ) -> Result<bool, ItemStoreError> {
        if self.conflict {
            Ok(false)
        } else {
            Err(ItemStoreError::unavailable("connection reset"))
        }
    }
}

async fn app_with_question_store(store: BrokenItemStore, mode: VoteMode) -> (Router, User) {
    let forum = InMemoryForum::new();
    let user = forum
        .insert_user(NewUser {
            username: "ferris".to_string(),
            email: "ferris@example.com".to_string(),
            password_hash: String::new(),
        })
        .await
        .unwrap();
    let mut state = AppState::in_memory(forum, mode);
    state.question_votes = Arc::new(VoteLedger::with_mode(Arc::new(store), mode));
    (create_app(state), user)
}

#[tokio::test]
async fn test_vote_store_failure_is_generic() {
    let (app, user) =
        app_with_question_store(BrokenItemStore { conflict: false }, VoteMode::Baseline).await;

    let (status, body) = send(
        &app,
        get(&format!("/vote/question/{}/up", Uuid::new_v4()), Some(user.id)),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Voting failed" }));
}

#[tokio::test]
async fn test_vote_conflict_is_generic() {
    let (app, user) =
        app_with_question_store(BrokenItemStore { conflict: true }, VoteMode::Atomic).await;

    let (status, body) = send(
        &app,
        get(&format!("/vote/question/{}/down", Uuid::new_v4()), Some(user.id)),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Voting failed" }));
}
