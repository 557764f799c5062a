use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use serde::Deserialize;
use serde_json::{json, Value};

use pawfeed::api::user::RegisterForm;
use pawfeed::client::device::{RemoteDevice, UnionDevice};
use pawfeed::client::fetch::{AuthFetch, Transport};
use pawfeed::client::{FeederClient, RequestError};
use pawfeed::poller::{PollState, StatusPoller};
use pawfeed::schedule::{ScheduleEditor, ScheduleField};
use pawfeed::session::SessionStore;
use pawfeed::storage::{MemoryStorage, UnionStorage};

const PASSWORD: &str = "whiskers123";

#[derive(Deserialize)]
struct LoginForm {
    username: String,
    password: String,
}

async fn login(form: web::Form<LoginForm>) -> HttpResponse {
    if form.username == "broken" {
        return HttpResponse::InternalServerError().json(json!({"detail": "Database unavailable"}));
    }
    if form.password != PASSWORD {
        return HttpResponse::Unauthorized().json(json!({"detail": "Invalid credentials."}));
    }
    HttpResponse::Ok().json(json!({
        "access_token": format!("token-{}", form.username),
        "token_type": "bearer",
    }))
}

async fn register(body: web::Json<Value>) -> HttpResponse {
    match body["username"].as_str() {
        Some("taken") => HttpResponse::Conflict().json(json!({
            "detail": format!("User with email '{}' already exists.", body["email"].as_str().unwrap_or_default()),
        })),
        Some("broken") => HttpResponse::InternalServerError().finish(),
        _ => HttpResponse::Created().json(json!({"id": "6f1c", "username": body["username"]})),
    }
}

fn bearer(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

fn authorized(req: &HttpRequest) -> bool {
    bearer(req)
        .map(|token| token.starts_with("token-"))
        .unwrap_or(false)
}

async fn device_status(req: HttpRequest) -> HttpResponse {
    if !authorized(&req) {
        return HttpResponse::Unauthorized().json(json!({"detail": "Not authenticated"}));
    }
    // A misbehaving feeder reports more than a full hopper
    let level = if bearer(&req) == Some("token-overfull") { 250 } else { 42 };
    HttpResponse::Ok().json(json!({
        "level": level,
        "lastFeed": "2024-05-01T08:00:00Z",
        "feedsRemaining": 7,
    }))
}

async fn submit_schedule(req: HttpRequest, body: web::Json<Value>) -> HttpResponse {
    if !authorized(&req) {
        return HttpResponse::Unauthorized().json(json!({"detail": "Not authenticated"}));
    }
    let slots = body["slots"].as_array().cloned().unwrap_or_default();
    if slots.is_empty() {
        return HttpResponse::UnprocessableEntity().json(json!({
            "detail": [{"loc": ["body", "slots"], "msg": "List should have at least 1 item"}],
        }));
    }
    HttpResponse::Ok().json(json!({"success": true}))
}

fn start_server() -> SocketAddr {
    let server = HttpServer::new(|| {
        App::new()
            .route("/auth/login", web::post().to(login))
            .route("/auth/register", web::post().to(register))
            .route("/device/status", web::get().to(device_status))
            .route("/schedule", web::post().to(submit_schedule))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .unwrap();
    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());
    addr
}

fn build_client(addr: SocketAddr) -> FeederClient {
    let storage = Arc::new(UnionStorage::Memory(MemoryStorage::new()));
    let transport = Transport::new(&format!("http://{addr}")).unwrap();
    let fetch = AuthFetch::new(transport, SessionStore::new(storage));
    FeederClient::new(fetch.clone(), UnionDevice::Remote(RemoteDevice::new(fetch)))
}

#[actix_web::test]
async fn test_login_saves_session() {
    let client = build_client(start_server());

    for username in ["alice", "bob"] {
        let token = client.login(username, PASSWORD).await.unwrap();
        assert_eq!(token, format!("token-{username}"));

        let session = client.session().load().unwrap();
        assert_eq!(session.username, username);
        assert_eq!(session.token, token);
    }

    let err = client.login("alice", "wrong").await.unwrap_err();
    assert!(matches!(err, RequestError::InvalidCredentials), "{err}");
    // A failed login leaves the previous session alone
    assert_eq!(client.session().load().unwrap().username, "bob");

    // Only 401 means bad credentials, other failures keep their status
    let err = client.login("broken", PASSWORD).await.unwrap_err();
    match err {
        RequestError::Server { code, message } => {
            assert_eq!(code, 500);
            assert_eq!(message.as_deref(), Some("Database unavailable"));
        }
        err => panic!("unexpected error {err}"),
    }
    assert_eq!(client.session().load().unwrap().username, "bob");

    client.logout().unwrap();
    assert!(client.session().load().unwrap().is_empty());
}

#[actix_web::test]
async fn test_register() {
    let client = build_client(start_server());
    let form = |username: &str| RegisterForm {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password: String::from(PASSWORD),
        confirm_password: String::from(PASSWORD),
    };

    client.register(form("alice")).await.unwrap();

    let err = client.register(form("taken")).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "User with email 'taken@example.com' already exists."
    );

    let err = client.register(form("broken")).await.unwrap_err();
    assert_eq!(err.to_string(), "Registration failed");
}

#[actix_web::test]
async fn test_authenticated_device_calls() {
    let client = build_client(start_server());

    let err = client.get_food_status().await.unwrap_err();
    assert!(matches!(err, RequestError::AuthRequired), "{err}");

    client.login("alice", PASSWORD).await.unwrap();
    let status = client.get_food_status().await.unwrap();
    assert_eq!(status.level.percent(), 42);
    assert_eq!(status.feeds_remaining, 7);

    // The server rejects an empty list, the client passes the reason through
    let err = client.submit_schedule(&[]).await.unwrap_err();
    match err {
        RequestError::Server { code, message } => {
            assert_eq!(code, 422);
            assert_eq!(message.as_deref(), Some("List should have at least 1 item"));
        }
        err => panic!("unexpected error {err}"),
    }

    let mut editor = ScheduleEditor::new();
    let id = editor.add().unwrap();
    editor
        .update(id, ScheduleField::parse("feedTime", "19:30").unwrap())
        .unwrap();
    let ack = editor.submit(&client).await.unwrap();
    assert!(ack.success);

    client.login("overfull", PASSWORD).await.unwrap();
    let err = client.get_food_status().await.unwrap_err();
    assert!(matches!(err, RequestError::InvalidResponse(_)), "{err}");
}

#[actix_web::test]
async fn test_poll_remote_status() {
    let client = build_client(start_server());
    client.login("alice", PASSWORD).await.unwrap();

    let poller = StatusPoller::start(Arc::new(client), Duration::from_millis(50));
    let mut rx = poller.subscribe();
    rx.changed().await.unwrap();
    match rx.borrow_and_update().clone() {
        PollState::Ready(status) => assert_eq!(status.level.percent(), 42),
        state => panic!("unexpected state {state:?}"),
    }
    poller.stop().await;
}
