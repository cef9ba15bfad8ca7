//! Reusable test helpers for HTTP integration tests.
//!
//! Provides `TestApp` for building and sending requests through the full
//! axum router. The database pool is created lazily, so tests that never
//! reach the database (signature rejection, ignored events, health checks)
//! run without a live `PostgreSQL` instance.
#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tower::ServiceExt;

use sr_server::config::Config;
use sr_server::line::{signature, LineClient};
use sr_server::webhook::{create_router, AppState};

/// A test application wrapping the full axum router.
pub struct TestApp {
    pub router: Router,
    pub pool: PgPool,
    pub config: Config,
}

impl TestApp {
    /// Create a new test app with a lazily-connected pool and a reply client
    /// pointing at an unroutable endpoint (dispatch failures are logged, not
    /// surfaced, so tests never depend on a reachable LINE API).
    pub fn new() -> Self {
        let config = Config::default_for_test();

        let pool = PgPoolOptions::new()
            .max_connections(2)
            .connect_lazy(&config.database_url)
            .expect("Failed to parse test database URL");

        let line = LineClient::with_endpoint("test-access-token", "http://127.0.0.1:9/reply")
            .expect("Failed to build test LINE client");

        let state = AppState::new(pool.clone(), config.clone(), line);
        let router = create_router(state);

        Self {
            router,
            pool,
            config,
        }
    }

    /// Build a request with the given method and path.
    pub fn request(method: Method, path: &str) -> axum::http::request::Builder {
        Request::builder().method(method).uri(path)
    }

    /// Send a request through the router.
    pub async fn oneshot(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed")
    }

    /// Build a signed `POST /callback` request for the given body.
    pub fn signed_callback(&self, body: &str) -> Request<Body> {
        let sig = signature::sign_payload(&self.config.channel_secret, body.as_bytes());
        Self::request(Method::POST, "/callback")
            .header("Content-Type", "application/json")
            .header("X-Line-Signature", sig)
            .body(Body::from(body.to_string()))
            .unwrap()
    }
}
