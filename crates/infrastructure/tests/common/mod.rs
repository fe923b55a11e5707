//! In-process Story API stub for end-to-end tests.

#![allow(dead_code, clippy::expect_used)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::{Path, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, serve};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use url::Url;
use uuid::Uuid;

pub const USERNAME: &str = "stub-user";
pub const PASSWORD: &str = "stub-pass";
const TOKEN: &str = "stub-jwt-token";

#[derive(Clone, Default)]
struct StubState {
    stories: Arc<Mutex<HashMap<String, Value>>>,
    requests: Arc<Mutex<Vec<String>>>,
    fail_creates: bool,
}

impl StubState {
    fn log(&self, line: String) {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(line);
        }
    }
}

/// Running stub server; aborted on drop.
pub struct StoryApiStub {
    base_url: Url,
    state: StubState,
    handle: JoinHandle<()>,
}

impl StoryApiStub {
    /// Starts a well-behaved stub.
    pub async fn spawn() -> Self {
        Self::spawn_with(false).await
    }

    /// Starts a stub that answers 500 to every valid create.
    pub async fn spawn_failing_creates() -> Self {
        Self::spawn_with(true).await
    }

    async fn spawn_with(fail_creates: bool) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("stub bind failed");
        let addr = listener.local_addr().expect("stub local addr failed");
        let state = StubState {
            fail_creates,
            ..StubState::default()
        };

        let app = Router::new()
            .route("/api/User/Authentication", post(login))
            .route("/api/Story/Create", post(create_story))
            .route("/api/Story/Edit/{id}", put(edit_story))
            .route("/api/Story/All", get(list_stories))
            .route("/api/Story/Delete/{id}", delete(delete_story))
            .with_state(state.clone());

        let handle = tokio::spawn(async move {
            let _ = serve(listener, app).await;
        });

        Self {
            base_url: Url::parse(&format!("http://{addr}")).expect("stub url"),
            state,
            handle,
        }
    }

    pub fn base_url(&self) -> Url {
        self.base_url.clone()
    }

    /// Requests received so far, as `METHOD path` lines.
    pub fn requests(&self) -> Vec<String> {
        self.state
            .requests
            .lock()
            .map_or_else(|_| Vec::new(), |entries| entries.clone())
    }

    /// Number of stories currently stored.
    pub fn story_count(&self) -> usize {
        self.state.stories.lock().map_or(0, |stories| stories.len())
    }
}

impl Drop for StoryApiStub {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == format!("Bearer {TOKEN}"))
}

fn reply(status: StatusCode, body: Value) -> Response {
    (status, Json(body)).into_response()
}

fn unauthorized() -> Response {
    StatusCode::UNAUTHORIZED.into_response()
}

fn is_blank(body: &Value, field: &str) -> bool {
    body.get(field)
        .and_then(Value::as_str)
        .is_none_or(|value| value.trim().is_empty())
}

async fn login(State(state): State<StubState>, Json(body): Json<Value>) -> Response {
    state.log("POST /api/User/Authentication".to_string());
    let valid = body.get("username").and_then(Value::as_str) == Some(USERNAME)
        && body.get("password").and_then(Value::as_str) == Some(PASSWORD);

    if valid {
        reply(StatusCode::OK, json!({ "username": USERNAME, "accessToken": TOKEN }))
    } else {
        reply(
            StatusCode::UNAUTHORIZED,
            json!({ "msg": "Invalid username or password" }),
        )
    }
}

async fn create_story(
    State(state): State<StubState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.log("POST /api/Story/Create".to_string());
    if !authorized(&headers) {
        return unauthorized();
    }
    if is_blank(&body, "title") || is_blank(&body, "description") {
        return reply(
            StatusCode::BAD_REQUEST,
            json!({ "errors": { "Title": ["The Title field is required."] } }),
        );
    }
    if state.fail_creates {
        return reply(
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "msg": "Database unavailable" }),
        );
    }

    let story_id = Uuid::now_v7().to_string();
    if let Ok(mut stories) = state.stories.lock() {
        stories.insert(
            story_id.clone(),
            json!({
                "id": story_id,
                "title": body["title"],
                "description": body["description"],
            }),
        );
    }
    reply(
        StatusCode::CREATED,
        json!({ "msg": "Successfully created!", "storyId": story_id }),
    )
}

async fn edit_story(
    State(state): State<StubState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    state.log(format!("PUT /api/Story/Edit/{id}"));
    if !authorized(&headers) {
        return unauthorized();
    }

    let Ok(mut stories) = state.stories.lock() else {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };
    let Some(story) = stories.get_mut(&id) else {
        return reply(StatusCode::NOT_FOUND, json!({ "msg": "No spoilers..." }));
    };
    story["title"] = body["title"].clone();
    story["description"] = body["description"].clone();
    reply(StatusCode::OK, json!({ "msg": "Successfully edited" }))
}

async fn list_stories(State(state): State<StubState>, headers: HeaderMap) -> Response {
    state.log("GET /api/Story/All".to_string());
    if !authorized(&headers) {
        return unauthorized();
    }

    let stories: Vec<Value> = state
        .stories
        .lock()
        .map_or_else(|_| Vec::new(), |stories| stories.values().cloned().collect());
    reply(StatusCode::OK, Value::Array(stories))
}

async fn delete_story(
    State(state): State<StubState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    state.log(format!("DELETE /api/Story/Delete/{id}"));
    if !authorized(&headers) {
        return unauthorized();
    }

    let removed = state
        .stories
        .lock()
        .ok()
        .and_then(|mut stories| stories.remove(&id));
    match removed {
        Some(_) => reply(StatusCode::OK, json!({ "msg": "Deleted successfully!" })),
        None => reply(
            StatusCode::BAD_REQUEST,
            json!({ "msg": "Unable to delete this story spoiler!" }),
        ),
    }
}
