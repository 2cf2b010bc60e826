//! Integration tests for the Staffdesk HTTP API.
//!
//! Each test builds its own state over a fresh temporary data directory and
//! public directory, then drives the router with `oneshot`.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use staffdesk_api::create_router;
use staffdesk_api::handlers::{ChatResponse, HealthResponse, LoginResponse};
use staffdesk_api::state::AppState;
use staffdesk_core::StaffdeskConfig;

// =============================================================================
// Helpers
// =============================================================================

struct TestEnv {
    _dir: tempfile::TempDir,
    state: AppState,
}

impl TestEnv {
    fn app(&self) -> axum::Router {
        create_router(self.state.clone())
    }
}

/// Fresh state with seeded content and a tiny public site.
fn make_env_with(configure: impl FnOnce(&mut StaffdeskConfig)) -> TestEnv {
    let dir = tempfile::tempdir().unwrap();
    let public = dir.path().join("public");
    std::fs::create_dir_all(public.join("assets")).unwrap();
    std::fs::write(public.join("index.html"), "<h1>Staffdesk home</h1>").unwrap();
    std::fs::write(public.join("admin.html"), "<h1>Staffdesk admin</h1>").unwrap();
    std::fs::write(public.join("assets").join("site.css"), "body { color: teal; }").unwrap();

    let mut config = StaffdeskConfig::default();
    config.storage.data_dir = dir.path().join("data").to_string_lossy().to_string();
    config.storage.public_dir = public.to_string_lossy().to_string();
    configure(&mut config);

    let state = AppState::new(config);
    state
        .content
        .write(&json!({
            "hero": {"title": "Nurses when you need them", "showBadge": true},
            "jobs": [{"id": "rn-1", "title": "ICU RN"}],
            "chat": {"offlineEmail": "desk@clinic.org"}
        }))
        .unwrap();

    TestEnv { _dir: dir, state }
}

fn make_env() -> TestEnv {
    make_env_with(|_| {})
}

fn post_json(uri: &str, json: &str) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(json.to_string()))
        .unwrap()
}

fn authed_get(uri: &str, token: &str) -> Request<Body> {
    Request::get(uri)
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

fn authed_put_json(uri: &str, token: &str, json: &str) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .header("authorization", format!("Bearer {}", token))
        .header("content-type", "application/json")
        .body(Body::from(json.to_string()))
        .unwrap()
}

async fn body_bytes(resp: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .unwrap()
        .to_vec()
}

async fn body_json(resp: axum::response::Response) -> Value {
    serde_json::from_slice(&body_bytes(resp).await).unwrap()
}

async fn send_chat(env: &TestEnv, session_id: &str, message: &str) -> ChatResponse {
    let body = json!({"message": message, "sessionId": session_id}).to_string();
    let resp = env.app().oneshot(post_json("/api/chat", &body)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    serde_json::from_slice(&body_bytes(resp).await).unwrap()
}

async fn login(env: &TestEnv) -> String {
    let resp = env
        .app()
        .oneshot(post_json("/api/admin/login", r#"{"password": "admin1234"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let login: LoginResponse = serde_json::from_slice(&body_bytes(resp).await).unwrap();
    login.token
}

// =============================================================================
// Public endpoints
// =============================================================================

#[tokio::test]
async fn test_health_reports_active_sessions() {
    let env = make_env();
    send_chat(&env, "a", "looking for a nursing job").await;
    send_chat(&env, "b", "hello").await;

    let resp = env
        .app()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let health: HealthResponse = serde_json::from_slice(&body_bytes(resp).await).unwrap();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.active_sessions, 1);
}

#[tokio::test]
async fn test_get_content() {
    let env = make_env();
    let resp = env
        .app()
        .oneshot(Request::get("/api/content").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let content = body_json(resp).await;
    assert_eq!(content["hero"]["title"], "Nurses when you need them");
    assert_eq!(content["jobs"][0]["id"], "rn-1");
}

// =============================================================================
// Chat intake
// =============================================================================

#[tokio::test]
async fn test_full_candidate_conversation_journals_lead() {
    let env = make_env();
    let sid = "chat_abc123";

    let first = send_chat(&env, sid, "I need a nurse job asap").await;
    assert!(!first.done);
    assert!(first.reply.ends_with("May I have your full name?"));

    let prompts = [
        ("Jane Doe", "Please share your email so our team can follow up."),
        ("jane@x.com", "What role are you hiring/applying for?"),
        ("ICU RN", "Which state or city is this for?"),
        ("Texas", "How urgent is this need? (e.g. immediate, this week, this month)"),
    ];
    for (answer, next_prompt) in prompts {
        let turn = send_chat(&env, sid, answer).await;
        assert!(!turn.done);
        assert_eq!(turn.reply, next_prompt);
    }

    let last = send_chat(&env, sid, "immediate").await;
    assert!(last.done);
    assert!(last.reply.contains("jane@x.com"));
    assert!(!env.state.engine.store().contains(sid).unwrap());

    let entries = env.state.chat_log.entries().unwrap();
    assert_eq!(entries.len(), 6);
    for entry in &entries[..5] {
        assert_eq!(entry["lead"], Value::Null);
        assert_eq!(entry["sessionId"], sid);
    }
    assert_eq!(
        entries[5]["lead"],
        json!({
            "intent": "candidate",
            "initialMessage": "I need a nurse job asap",
            "name": "Jane Doe",
            "email": "jane@x.com",
            "role": "ICU RN",
            "location": "Texas",
            "urgency": "immediate"
        })
    );
    assert_eq!(entries[5]["reply"], Value::String(last.reply));
}

#[tokio::test]
async fn test_blank_answer_is_rejected_without_advancing_flow() {
    let env = make_env();
    send_chat(&env, "emp", "We need coverage this weekend").await;
    send_chat(&env, "emp", "Sam Lee").await;

    let body = json!({"message": " ", "sessionId": "emp"}).to_string();
    let resp = env.app().oneshot(post_json("/api/chat", &body)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["message"], "Message is required");

    let session = env.state.engine.store().get("emp").unwrap().unwrap();
    assert_eq!(session.step, 1);

    for answer in ["sam@clinic.org", "LPN", "Ohio"] {
        send_chat(&env, "emp", answer).await;
    }
    let last = send_chat(&env, "emp", "this week").await;
    assert!(last.done);
    assert_eq!(
        last.reply,
        "Thank you. Our staffing desk will contact you shortly at sam@clinic.org."
    );
    // The rejected turn is not journaled.
    let entries = env.state.chat_log.entries().unwrap();
    assert_eq!(entries.len(), 6);
    assert_eq!(entries[5]["lead"]["email"], "sam@clinic.org");
    assert_eq!(entries[5]["lead"]["intent"], "employer");
}

#[tokio::test]
async fn test_credentialing_is_single_turn() {
    let env = make_env();
    let turn = send_chat(&env, "cred", "Do you handle compliance tracking?").await;
    assert!(turn.done);
    assert!(turn.reply.starts_with("Our workforce technology team"));
    assert!(env.state.engine.store().is_empty().unwrap());
    assert_eq!(env.state.chat_log.entries().unwrap().len(), 1);
}

#[tokio::test]
async fn test_interleaved_sessions_over_http() {
    let env = make_env();
    send_chat(&env, "one", "career advice please").await;
    send_chat(&env, "two", "we want to hire").await;
    let one = send_chat(&env, "one", "Alice").await;
    let two = send_chat(&env, "two", "Bob").await;
    assert_eq!(one.reply, "Please share your email so our team can follow up.");
    assert_eq!(two.reply, "Please share your email so our team can follow up.");

    let a = env.state.engine.store().get("one").unwrap().unwrap();
    let b = env.state.engine.store().get("two").unwrap().unwrap();
    assert_eq!(a.step, 1);
    assert_eq!(b.step, 1);
    assert_ne!(a.intent, b.intent);
}

#[tokio::test]
async fn test_chat_journal_failure_still_replies() {
    let env = make_env();
    // A directory where the journal file should be makes every write fail.
    std::fs::create_dir_all(env.state.chat_log.path()).unwrap();

    let turn = send_chat(&env, "s", "hello").await;
    assert!(turn.done);
}

#[tokio::test]
async fn test_chat_rejects_invalid_body() {
    let env = make_env();
    let resp = env
        .app()
        .oneshot(post_json("/api/chat", "{not json"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["error"], "bad_request");
    assert_eq!(body["message"], "Message is required");
}

// =============================================================================
// Forms
// =============================================================================

#[tokio::test]
async fn test_request_talent_success() {
    let env = make_env();
    let resp = env
        .app()
        .oneshot(post_json(
            "/api/request-talent",
            r#"{"facility": "Mercy General", "contactName": "Sam", "email": "s@mercy.org", "shifts": 12}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body, json!({"success": true, "message": "Staffing request submitted."}));

    let entries = env.state.staff_requests.entries().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["facility"], "Mercy General");
    assert_eq!(entries[0]["shifts"], 12);
}

#[tokio::test]
async fn test_apply_rejects_non_object_body() {
    let env = make_env();
    let resp = env
        .app()
        .oneshot(post_json("/api/apply", r#"["Jane", "j@x.com", "rn-1"]"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_apply_journal_failure_is_internal_error() {
    let env = make_env();
    std::fs::create_dir_all(env.state.applications.path()).unwrap();
    let resp = env
        .app()
        .oneshot(post_json(
            "/api/apply",
            r#"{"name": "Jane", "email": "j@x.com", "jobId": "rn-1"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(resp).await["message"], "An internal error occurred");
}

// =============================================================================
// Admin
// =============================================================================

#[tokio::test]
async fn test_admin_routes_require_token() {
    let env = make_env();
    let requests = [
        authed_put_json("/api/admin/content", "bogus", "{}"),
        authed_get("/api/admin/content/fields", "bogus"),
        Request::builder()
            .method("PUT")
            .uri("/api/admin/content")
            .body(Body::from("{}"))
            .unwrap(),
    ];
    for req in requests {
        let resp = env.app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(resp).await["message"], "Unauthorized");
    }
    assert_eq!(
        env.state.content.read().unwrap()["hero"]["title"],
        "Nurses when you need them"
    );
}

#[tokio::test]
async fn test_admin_replaces_content() {
    let env = make_env();
    let token = login(&env).await;

    let resp = env
        .app()
        .oneshot(authed_put_json(
            "/api/admin/content",
            &token,
            r#"{"hero": {"title": "New title"}, "chat": {"offlineEmail": "new@clinic.org"}}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!({"success": true}));

    // Chat picks up the new contact address immediately.
    let turn = send_chat(&env, "s", "hello").await;
    assert!(turn.reply.contains("new@clinic.org"));
}

#[tokio::test]
async fn test_admin_rejects_non_object_content() {
    let env = make_env();
    let token = login(&env).await;
    for payload in ["[1, 2, 3]", "\"text\"", "null", "{broken"] {
        let resp = env
            .app()
            .oneshot(authed_put_json("/api/admin/content", &token, payload))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{payload}");
        assert_eq!(body_json(resp).await["message"], "Invalid payload");
    }
}

#[tokio::test]
async fn test_admin_field_editor_round_trip() {
    let env = make_env();
    let token = login(&env).await;

    let resp = env
        .app()
        .oneshot(authed_get("/api/admin/content/fields", &token))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let mut fields = body_json(resp).await;
    assert_eq!(fields["jobs.0.title"], "ICU RN");
    assert_eq!(fields["hero.showBadge"], true);

    // The editor sends every value back as text.
    fields["hero.showBadge"] = json!("false");
    fields["jobs.1.title"] = json!("Travel LPN");
    let resp = env
        .app()
        .oneshot(authed_put_json(
            "/api/admin/content/fields",
            &token,
            &fields.to_string(),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let content = env.state.content.read().unwrap();
    assert_eq!(content["hero"]["showBadge"], false);
    assert_eq!(content["jobs"][1]["title"], "Travel LPN");
    assert_eq!(content["jobs"][0]["id"], "rn-1");
}

#[tokio::test]
async fn test_admin_fields_reject_oversized_array_index() {
    let env = make_env();
    let token = login(&env).await;

    let resp = env
        .app()
        .oneshot(authed_put_json(
            "/api/admin/content/fields",
            &token,
            r#"{"jobs.18446744073709551614.title": "ICU RN"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["message"], "Invalid payload");

    let content = env.state.content.read().unwrap();
    assert_eq!(content["jobs"][0]["title"], "ICU RN");
    assert_eq!(content["chat"]["offlineEmail"], "desk@clinic.org");
}

// =============================================================================
// Static site
// =============================================================================

#[tokio::test]
async fn test_static_file_is_served() {
    let env = make_env();
    let resp = env
        .app()
        .oneshot(Request::get("/assets/site.css").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_bytes(resp).await, b"body { color: teal; }");
}

#[tokio::test]
async fn test_unknown_path_falls_back_to_index() {
    let env = make_env();
    let resp = env
        .app()
        .oneshot(Request::get("/jobs/rn-1").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_bytes(resp).await, b"<h1>Staffdesk home</h1>");
}

#[tokio::test]
async fn test_admin_page() {
    let env = make_env();
    let resp = env
        .app()
        .oneshot(Request::get("/admin").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_bytes(resp).await, b"<h1>Staffdesk admin</h1>");
}

// =============================================================================
// Middleware
// =============================================================================

#[tokio::test]
async fn test_cors_preflight() {
    let env = make_env();
    let resp = env
        .app()
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/chat")
                .header("origin", "https://careers.example.org")
                .header("access-control-request-method", "POST")
                .header("access-control-request-headers", "content-type")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

#[tokio::test]
async fn test_rate_limit_on_submissions() {
    let env = make_env_with(|c| c.server.rate_limit_per_sec = 2);
    let app = env.app();

    let mut statuses = Vec::new();
    for _ in 0..5 {
        let resp = app
            .clone()
            .oneshot(post_json("/api/chat", r#"{"message": "hello"}"#))
            .await
            .unwrap();
        statuses.push(resp.status());
    }
    assert!(statuses.contains(&StatusCode::TOO_MANY_REQUESTS));

    // Reads are never limited.
    let resp = app
        .oneshot(Request::get("/api/content").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_body_limit() {
    let env = make_env_with(|c| c.server.body_limit_bytes = 64);
    let big = json!({"message": "x".repeat(200)}).to_string();
    let resp = env.app().oneshot(post_json("/api/chat", &big)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
}
