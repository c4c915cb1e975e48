//! Integration tests running the token lifecycle against a real HTTP
//! token endpoint (axum, ephemeral port).

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Form, Json, Router};
use noughts_auth::{AuthError, AuthState, AuthView, OAuthConfig, TokenLifecycle};
use noughts_store::{CredentialSet, TokenStore};
use url::Url;

// ---------- Test doubles ----------

/// Records every view callback the lifecycle makes.
#[derive(Default)]
struct RecordingView {
    authenticated: AtomicUsize,
    anonymous: AtomicUsize,
    navigations: Mutex<Vec<String>>,
}

impl AuthView for RecordingView {
    fn render_authenticated(&self) {
        self.authenticated.fetch_add(1, Ordering::SeqCst);
    }

    fn render_anonymous(&self) {
        self.anonymous.fetch_add(1, Ordering::SeqCst);
    }

    fn navigate(&self, url: &str) {
        self.navigations.lock().unwrap().push(url.to_string());
    }
}

impl RecordingView {
    fn navigations(&self) -> Vec<String> {
        self.navigations.lock().unwrap().clone()
    }
}

type FormLog = Arc<Mutex<Vec<HashMap<String, String>>>>;

/// Token endpoint that answers both grants successfully.
///
/// The refresh response deliberately carries no `refresh_token` field:
/// the provider does not rotate refresh tokens.
async fn token_ok(
    State(log): State<FormLog>,
    Form(params): Form<HashMap<String, String>>,
) -> Json<serde_json::Value> {
    let grant = params.get("grant_type").cloned().unwrap_or_default();
    log.lock().unwrap().push(params);

    let body = match grant.as_str() {
        "authorization_code" => serde_json::json!({
            "access_token": "access-initial",
            "refresh_token": "refresh-initial",
            "id_token": "id-initial",
            "expires_in": 3600,
        }),
        _ => serde_json::json!({
            "access_token": "access-refreshed",
            "id_token": "id-refreshed",
            "expires_in": 3600,
        }),
    };
    Json(body)
}

async fn token_rejects(
    State(log): State<FormLog>,
    Form(params): Form<HashMap<String, String>>,
) -> (StatusCode, &'static str) {
    log.lock().unwrap().push(params);
    (StatusCode::BAD_REQUEST, "invalid_grant")
}

async fn spawn_server(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server run");
    });
    addr
}

async fn spawn_ok_server() -> (SocketAddr, FormLog) {
    let log: FormLog = Arc::default();
    let app = Router::new()
        .route("/oauth2/token", post(token_ok))
        .with_state(Arc::clone(&log));
    (spawn_server(app).await, log)
}

async fn spawn_rejecting_server() -> (SocketAddr, FormLog) {
    let log: FormLog = Arc::default();
    let app = Router::new()
        .route("/oauth2/token", post(token_rejects))
        .with_state(Arc::clone(&log));
    (spawn_server(app).await, log)
}

fn config_for(addr: SocketAddr) -> OAuthConfig {
    let token_url: Url = format!("http://{addr}/oauth2/token").parse().unwrap();
    OAuthConfig::new(
        "test-client",
        token_url,
        "https://idp.example.com/logout".parse().unwrap(),
        "https://game.example.com/app/game.html".parse().unwrap(),
        "https://game.example.com/app".parse().unwrap(),
    )
}

struct Harness {
    lifecycle: Arc<TokenLifecycle<RecordingView>>,
    view: Arc<RecordingView>,
    store: TokenStore,
    _dir: tempfile::TempDir,
}

fn harness(addr: SocketAddr) -> Harness {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = TokenStore::new(dir.path().join("tokens.json"));
    let view = Arc::new(RecordingView::default());
    let lifecycle = TokenLifecycle::new(config_for(addr), store.clone(), Arc::clone(&view));
    Harness {
        lifecycle,
        view,
        store,
        _dir: dir,
    }
}

fn stored(access: &str, refresh: &str, expires_in: u64) -> CredentialSet {
    CredentialSet {
        access_token: access.into(),
        refresh_token: refresh.into(),
        id_token: "id-stored".into(),
        expires_in,
    }
}

/// Polls until `check` passes or the deadline expires.
async fn wait_for(what: &str, mut check: impl FnMut() -> bool) {
    for _ in 0..100 {
        if check() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    panic!("timed out waiting for {what}");
}

// ---------- Authorization-code exchange ----------

#[tokio::test]
async fn test_exchange_code_persists_credentials_and_arms_refresh() {
    let (addr, log) = spawn_ok_server().await;
    let h = harness(addr);

    let credentials = h.lifecycle.exchange_code("auth-code-1").await.unwrap();

    assert_eq!(credentials.access_token, "access-initial");
    assert_eq!(credentials.refresh_token, "refresh-initial");
    assert_eq!(credentials.id_token, "id-initial");
    assert_eq!(credentials.expires_in, 3600);

    let persisted = h.store.load().unwrap().expect("credentials stored");
    assert_eq!(persisted, credentials);

    assert_eq!(h.lifecycle.state().await, AuthState::Authenticated);
    assert!(h.lifecycle.refresh_scheduled().await);

    let requests = log.lock().unwrap().clone();
    assert_eq!(requests.len(), 1);
    let params = &requests[0];
    assert_eq!(params["grant_type"], "authorization_code");
    assert_eq!(params["client_id"], "test-client");
    assert_eq!(params["code"], "auth-code-1");
    assert_eq!(params["redirect_uri"], "https://game.example.com/app/game.html");
}

#[tokio::test]
async fn test_exchange_code_rejection_stores_nothing() {
    let (addr, _log) = spawn_rejecting_server().await;
    let h = harness(addr);

    let result = h.lifecycle.exchange_code("bad-code").await;

    assert!(matches!(result, Err(AuthError::Exchange(_))));
    assert!(h.store.load().unwrap().is_none());
    assert_eq!(h.lifecycle.state().await, AuthState::Unauthenticated);
    assert!(!h.lifecycle.refresh_scheduled().await);
    // The exchange path never navigates away; recovery is the caller's
    // job (it falls back to a refresh attempt).
    assert!(h.view.navigations().is_empty());
}

// ---------- Silent refresh ----------

#[tokio::test]
async fn test_refresh_preserves_refresh_token() {
    let (addr, log) = spawn_ok_server().await;
    let h = harness(addr);
    h.store.save(&stored("access-old", "refresh-keep", 3600)).unwrap();

    let credentials = h.lifecycle.refresh().await.unwrap();

    // New access and identity tokens, same refresh token: the endpoint's
    // refresh response carries none and the stored one survives.
    assert_eq!(credentials.access_token, "access-refreshed");
    assert_eq!(credentials.id_token, "id-refreshed");
    assert_eq!(credentials.refresh_token, "refresh-keep");

    let persisted = h.store.load().unwrap().unwrap();
    assert_eq!(persisted.refresh_token, "refresh-keep");
    assert_eq!(persisted.access_token, "access-refreshed");

    let requests = log.lock().unwrap().clone();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0]["grant_type"], "refresh_token");
    assert_eq!(requests[0]["refresh_token"], "refresh-keep");
}

#[tokio::test]
async fn test_refresh_failure_forces_logout() {
    let (addr, _log) = spawn_rejecting_server().await;
    let h = harness(addr);
    h.store.save(&stored("access-old", "refresh-dead", 3600)).unwrap();

    let result = h.lifecycle.refresh().await;

    assert!(matches!(result, Err(AuthError::Refresh(_))));
    assert!(h.store.load().unwrap().is_none());
    assert_eq!(h.lifecycle.state().await, AuthState::LoggedOut);

    let navigations = h.view.navigations();
    assert_eq!(navigations.len(), 1);
    assert_eq!(
        navigations[0],
        "https://idp.example.com/logout?client_id=test-client&logout_uri=https%3A%2F%2Fgame.example.com%2Fapp"
    );
}

#[tokio::test]
async fn test_refresh_with_empty_store_sends_empty_token_and_logs_out() {
    // Cold start with nothing persisted still attempts the refresh and
    // lets the endpoint reject it; the rejection drives the logout
    // navigation.
    let (addr, log) = spawn_rejecting_server().await;
    let h = harness(addr);

    let result = h.lifecycle.refresh().await;

    assert!(matches!(result, Err(AuthError::Refresh(_))));
    let requests = log.lock().unwrap().clone();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0]["refresh_token"], "");
    assert_eq!(h.view.navigations().len(), 1);
}

// ---------- Proactive refresh scheduling ----------

#[tokio::test]
async fn test_schedule_refresh_without_credentials_is_a_no_op() {
    let (addr, _log) = spawn_ok_server().await;
    let h = harness(addr);

    h.lifecycle.schedule_refresh().await;

    assert!(!h.lifecycle.refresh_scheduled().await);
}

#[tokio::test]
async fn test_scheduled_refresh_fires_at_margin() {
    let (addr, _log) = spawn_ok_server().await;
    let h = harness(addr);
    // Lifetime equal to the margin means a zero delay: the task fires as
    // soon as it is scheduled.
    h.store.save(&stored("access-old", "refresh-keep", 300)).unwrap();

    h.lifecycle.schedule_refresh().await;

    let store = h.store.clone();
    wait_for("scheduled refresh to land", move || {
        matches!(
            store.load(),
            Ok(Some(c)) if c.access_token == "access-refreshed"
        )
    })
    .await;

    let persisted = h.store.load().unwrap().unwrap();
    assert_eq!(persisted.refresh_token, "refresh-keep");
    assert_eq!(h.lifecycle.state().await, AuthState::Authenticated);
}

#[tokio::test]
async fn test_scheduled_refresh_waits_out_the_delay() {
    let (addr, log) = spawn_ok_server().await;
    let h = harness(addr);
    // 3600s lifetime arms the task 3300s out; nothing should fire
    // within the test window.
    h.store.save(&stored("access-old", "refresh-keep", 3600)).unwrap();

    h.lifecycle.schedule_refresh().await;
    tokio::time::sleep(Duration::from_millis(300)).await;

    assert!(log.lock().unwrap().is_empty());
    assert_eq!(h.store.load().unwrap().unwrap().access_token, "access-old");
}

#[tokio::test]
async fn test_failed_scheduled_refresh_forces_logout() {
    let (addr, _log) = spawn_rejecting_server().await;
    let h = harness(addr);
    h.store.save(&stored("access-old", "refresh-dead", 300)).unwrap();

    h.lifecycle.schedule_refresh().await;

    let view = Arc::clone(&h.view);
    wait_for("logout navigation", move || !view.navigations().is_empty()).await;

    assert!(h.store.load().unwrap().is_none());
    assert_eq!(h.lifecycle.state().await, AuthState::LoggedOut);
}

// ---------- Logout ----------

#[tokio::test]
async fn test_logout_cancels_pending_refresh() {
    let (addr, log) = spawn_ok_server().await;
    let h = harness(addr);
    h.store.save(&stored("access-old", "refresh-keep", 3600)).unwrap();
    h.lifecycle.schedule_refresh().await;
    assert!(h.lifecycle.refresh_scheduled().await);

    h.lifecycle.logout().await;

    assert!(!h.lifecycle.refresh_scheduled().await);
    assert!(h.store.load().unwrap().is_none());
    assert_eq!(h.lifecycle.state().await, AuthState::LoggedOut);
    assert_eq!(h.view.navigations().len(), 1);
    // The aborted task never reached the endpoint.
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_logout_with_no_credentials_still_navigates() {
    let (addr, _log) = spawn_ok_server().await;
    let h = harness(addr);

    h.lifecycle.logout().await;

    assert_eq!(h.view.navigations().len(), 1);
    assert_eq!(h.lifecycle.state().await, AuthState::LoggedOut);
}

// ---------- View rendering ----------

#[tokio::test]
async fn test_render_view_reflects_stored_credentials() {
    let (addr, _log) = spawn_ok_server().await;
    let h = harness(addr);

    h.lifecycle.render_view();
    assert_eq!(h.view.anonymous.load(Ordering::SeqCst), 1);
    assert_eq!(h.view.authenticated.load(Ordering::SeqCst), 0);

    h.store.save(&stored("access", "refresh", 3600)).unwrap();
    h.lifecycle.render_view();
    assert_eq!(h.view.authenticated.load(Ordering::SeqCst), 1);
}
