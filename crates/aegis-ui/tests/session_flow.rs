//! End-to-end session flows against a mock API server.

use aegis_ui::core::error::ApiError;
use aegis_ui::core::guard::GuardDecision;
use aegis_ui::core::routes::console_routes;
use aegis_ui::core::session::{InvalidationState, Navigator, Notifier, Scheduler};
use aegis_ui::core::storage::MemoryStore;
use aegis_ui::native::{ReqwestBackend, TokioScheduler};
use aegis_ui::{ClientConfig, Platform, SessionCtx};
use anyhow::Result;
use futures_util::future::join_all;
use httpmock::MockServer;
use httpmock::prelude::*;
use serde_json::{Value, json};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

struct FakeNavigator {
    path: RefCell<String>,
}

impl FakeNavigator {
    fn at(path: &str) -> Rc<Self> {
        Rc::new(Self {
            path: RefCell::new(path.to_string()),
        })
    }

    fn path(&self) -> String {
        self.path.borrow().clone()
    }
}

impl Navigator for FakeNavigator {
    fn current_path(&self) -> String {
        self.path()
    }

    fn redirect_to(&self, path: &str) {
        *self.path.borrow_mut() = path.to_string();
    }
}

#[derive(Default)]
struct Notices(RefCell<Vec<String>>);

impl Notifier for Notices {
    fn show(&self, message: &str) {
        self.0.borrow_mut().push(message.to_string());
    }
}

type Pending = (Duration, Box<dyn FnOnce()>);

#[derive(Default)]
struct ManualScheduler(RefCell<Vec<Pending>>);

impl ManualScheduler {
    fn delays(&self) -> Vec<Duration> {
        self.0.borrow().iter().map(|(delay, _)| *delay).collect()
    }

    fn fire_all(&self) {
        let pending: Vec<Pending> = self.0.borrow_mut().drain(..).collect();
        for (_, task) in pending {
            task();
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        self.0.borrow_mut().push((delay, task));
    }
}

struct Harness {
    ctx: SessionCtx,
    navigator: Rc<FakeNavigator>,
    notices: Rc<Notices>,
    scheduler: Rc<ManualScheduler>,
}

fn harness(server: &MockServer, path: &str) -> Harness {
    let navigator = FakeNavigator::at(path);
    let notices = Rc::new(Notices::default());
    let scheduler = Rc::new(ManualScheduler::default());
    let config = ClientConfig::default().with_api_base(server.url("/api/v1"));
    let ctx = SessionCtx::new(
        config,
        console_routes(),
        Platform {
            storage: Rc::new(MemoryStore::default()),
            backend: Rc::new(ReqwestBackend::default()),
            navigator: navigator.clone(),
            notifier: notices.clone(),
            scheduler: scheduler.clone(),
        },
    );
    Harness {
        ctx,
        navigator,
        notices,
        scheduler,
    }
}

fn token_body(token: &str, role: &str) -> Value {
    json!({
        "access_token": token,
        "token_type": "bearer",
        "user": { "username": "analyst", "role": role }
    })
}

#[tokio::test]
async fn login_then_protected_request_carries_bearer_token() -> Result<()> {
    let server = MockServer::start_async().await;
    let login = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/v1/auth/login")
                .json_body(json!({ "username": "analyst", "password": "pw" }));
            then.status(200).json_body(token_body("tok-1", "operator"));
        })
        .await;
    let status = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/defense/status")
                .header("authorization", "Bearer tok-1");
            then.status(200)
                .json_body(json!({ "code": 0, "message": "ok", "data": { "level": "green" } }));
        })
        .await;

    let h = harness(&server, "/login");
    let user = h.ctx.auth.login("analyst", "pw").await?;
    assert_eq!(user.role, "operator");
    assert_eq!(h.ctx.check_navigation("/scan"), GuardDecision::Allow);
    assert_eq!(
        h.ctx.check_navigation("/system"),
        GuardDecision::Redirect("/forbidden".to_string())
    );

    let data: Value = h.ctx.transport.get("/defense/status").await?;
    assert_eq!(data, json!({ "level": "green" }));

    login.assert_async().await;
    status.assert_async().await;
    assert!(h.notices.0.borrow().is_empty());
    Ok(())
}

#[tokio::test]
async fn domain_failure_surfaces_server_message() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/v1/scan");
            then.status(200)
                .json_body(json!({ "code": 4001, "message": "Target not allowed", "data": null }));
        })
        .await;

    let h = harness(&server, "/scan");
    let err = h
        .ctx
        .transport
        .post::<Value, _>("/scan", &json!({ "target": "10.0.0.1" }))
        .await
        .err();
    assert!(matches!(err, Some(ApiError::Domain { code: 4001, .. })));
    assert_eq!(err.as_ref().map(ApiError::display_message), Some("Target not allowed"));
    assert_eq!(h.ctx.coordinator.state(), InvalidationState::Idle);
    Ok(())
}

#[tokio::test]
async fn expired_token_invalidates_session_once() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/v1/auth/login");
            then.status(200).json_body(token_body("tok-1", "admin"));
        })
        .await;
    let expired = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/reports");
            then.status(401).json_body(json!({ "detail": "Token expired" }));
        })
        .await;

    let h = harness(&server, "/reports?page=2");
    h.ctx.auth.login("analyst", "pw").await?;

    let err = h.ctx.transport.get::<Value>("/reports").await.err();
    assert!(err.as_ref().is_some_and(ApiError::is_unauthorized));
    assert!(!h.ctx.credentials.is_authenticated());
    assert_eq!(
        h.ctx.check_navigation("/reports"),
        GuardDecision::Redirect("/login?redirect=%2Freports".to_string())
    );
    assert_eq!(
        *h.notices.0.borrow(),
        vec!["Session expired, please log in again".to_string()]
    );
    assert_eq!(h.scheduler.delays(), vec![Duration::from_millis(1200)]);
    assert_eq!(h.navigator.path(), "/reports?page=2");

    h.scheduler.fire_all();
    assert_eq!(h.navigator.path(), "/login?redirect=%2Freports%3Fpage%3D2");
    assert_eq!(h.ctx.coordinator.state(), InvalidationState::Idle);
    expired.assert_async().await;
    Ok(())
}

async fn burst_of_unauthorized(count: usize) -> Result<()> {
    let server = MockServer::start_async().await;
    let rejected = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/ai/findings");
            then.status(401).json_body(json!({ "message": "invalid token" }));
        })
        .await;

    let h = harness(&server, "/ai");
    let results = join_all((0..count).map(|_| h.ctx.transport.get::<Value>("/ai/findings"))).await;

    assert_eq!(results.len(), count);
    assert!(
        results
            .iter()
            .all(|result| result.as_ref().err().is_some_and(ApiError::is_unauthorized))
    );
    assert_eq!(h.notices.0.borrow().len(), 1);
    assert_eq!(h.scheduler.delays().len(), 1);
    assert_eq!(h.ctx.coordinator.cycles_started(), 1);
    rejected.assert_calls_async(count).await;

    h.scheduler.fire_all();
    assert_eq!(h.navigator.path(), "/login?redirect=%2Fai");
    Ok(())
}

#[tokio::test]
async fn single_unauthorized_response_shows_one_notice() -> Result<()> {
    burst_of_unauthorized(1).await
}

#[tokio::test]
async fn five_concurrent_unauthorized_responses_show_one_notice() -> Result<()> {
    burst_of_unauthorized(5).await
}

#[tokio::test]
async fn fifty_concurrent_unauthorized_responses_show_one_notice() -> Result<()> {
    burst_of_unauthorized(50).await
}

#[tokio::test]
async fn unauthorized_on_login_view_only_clears_credentials() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/auth/profile");
            then.status(401);
        })
        .await;

    let h = harness(&server, "/login?redirect=%2Fscan");
    let err = h.ctx.auth.profile().await.err();
    assert_eq!(
        err.as_ref().map(ApiError::display_message),
        Some("Session expired, please log in again")
    );
    assert!(h.notices.0.borrow().is_empty());
    assert!(h.scheduler.delays().is_empty());
    assert_eq!(h.navigator.path(), "/login?redirect=%2Fscan");
    Ok(())
}

#[tokio::test]
async fn new_cycle_starts_after_redirect_window() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/system/users");
            then.status(401);
        })
        .await;

    let h = harness(&server, "/system");
    let _ = h.ctx.transport.get::<Value>("/system/users").await;
    h.scheduler.fire_all();
    assert_eq!(h.navigator.path(), "/login?redirect=%2Fsystem");

    // The user navigates away without logging in and hits another 401.
    h.navigator.redirect_to("/defense");
    let _ = h.ctx.transport.get::<Value>("/system/users").await;
    assert_eq!(h.notices.0.borrow().len(), 2);
    assert_eq!(h.ctx.coordinator.cycles_started(), 2);
    Ok(())
}

#[tokio::test]
async fn tokio_scheduler_redirects_after_window() -> Result<()> {
    let local = tokio::task::LocalSet::new();
    local
        .run_until(async {
            let server = MockServer::start_async().await;
            server
                .mock_async(|when, then| {
                    when.method(GET).path("/api/v1/defense/events");
                    then.status(401);
                })
                .await;

            let navigator = FakeNavigator::at("/defense");
            let notices = Rc::new(Notices::default());
            let config = ClientConfig::default()
                .with_api_base(server.url("/api/v1"))
                .with_invalidation_window(Duration::from_millis(50));
            let ctx = SessionCtx::new(
                config,
                console_routes(),
                Platform {
                    storage: Rc::new(MemoryStore::default()),
                    backend: Rc::new(ReqwestBackend::default()),
                    navigator: navigator.clone(),
                    notifier: notices.clone(),
                    scheduler: Rc::new(TokioScheduler),
                },
            );

            let _ = ctx.transport.get::<Value>("/defense/events").await;
            assert_eq!(ctx.coordinator.state(), InvalidationState::Handling);
            assert_eq!(navigator.path(), "/defense");

            tokio::time::sleep(Duration::from_millis(200)).await;
            assert_eq!(ctx.coordinator.state(), InvalidationState::Idle);
            assert_eq!(navigator.path(), "/login?redirect=%2Fdefense");
            assert_eq!(notices.0.borrow().len(), 1);
            Ok(())
        })
        .await
}
