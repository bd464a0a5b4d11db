//! In-memory transport for tests
//!
//! Replies are registered per method and path; POST routes may additionally
//! require that the request body contains a given JSON object. The first
//! matching route wins. Every request is recorded.

use crate::error::{ApiError, ApiResult};
use crate::transport::{Method, Request, Transport};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

struct Route {
    method: Method,
    path: String,
    body_contains: Option<Value>,
    reply: ApiResult<Value>,
}

/// Transport that serves canned replies
#[derive(Default)]
pub struct FakeTransport {
    routes: Vec<Route>,
    requests: Mutex<Vec<Request>>,
    yield_first: AtomicBool,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply to `GET path`
    pub fn on_get(mut self, path: &str, reply: Value) -> Self {
        self.routes.push(Route {
            method: Method::Get,
            path: path.to_string(),
            body_contains: None,
            reply: Ok(reply),
        });
        self
    }

    /// Reply to any `POST path`
    pub fn on_post(mut self, path: &str, reply: Value) -> Self {
        self.routes.push(Route {
            method: Method::Post,
            path: path.to_string(),
            body_contains: None,
            reply: Ok(reply),
        });
        self
    }

    /// Reply to `POST path` whose body contains every field of `body`
    pub fn on_post_matching(mut self, path: &str, body: Value, reply: Value) -> Self {
        self.routes.push(Route {
            method: Method::Post,
            path: path.to_string(),
            body_contains: Some(body),
            reply: Ok(reply),
        });
        self
    }

    /// Fail every request to `path`
    pub fn on_error(mut self, method: Method, path: &str, error: ApiError) -> Self {
        self.routes.push(Route {
            method,
            path: path.to_string(),
            body_contains: None,
            reply: Err(error),
        });
        self
    }

    /// Yield to the executor once before answering, so concurrent callers
    /// overlap
    pub fn yielding(self) -> Self {
        self.yield_first.store(true, Ordering::Relaxed);
        self
    }

    /// Every request received so far
    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Number of requests received for `method path`
    pub fn count(&self, method: Method, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    fn find(&self, request: &Request) -> Option<&Route> {
        self.routes.iter().find(|route| {
            route.method == request.method
                && route.path == request.path
                && match (&route.body_contains, &request.body) {
                    (None, _) => true,
                    (Some(expected), Some(actual)) => contains(actual, expected),
                    (Some(_), None) => false,
                }
        })
    }
}

fn contains(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Object(actual), Value::Object(expected)) => expected
            .iter()
            .all(|(k, v)| actual.get(k).is_some_and(|a| contains(a, v))),
        _ => actual == expected,
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(&self, request: &Request) -> ApiResult<Arc<Value>> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        if self.yield_first.load(Ordering::Relaxed) {
            YieldOnce(false).await;
        }

        match self.find(request) {
            Some(route) => route.reply.clone().map(Arc::new),
            None => Err(ApiError::Status {
                url: request.path.clone(),
                status: 404,
                body: format!("no fake route for {}", request.signature()),
            }),
        }
    }

    fn transport_type(&self) -> &'static str {
        "fake"
    }
}

struct YieldOnce(bool);

impl std::future::Future for YieldOnce {
    type Output = ();

    fn poll(
        mut self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<()> {
        if self.0 {
            std::task::Poll::Ready(())
        } else {
            self.0 = true;
            cx.waker().wake_by_ref();
            std::task::Poll::Pending
        }
    }
}
