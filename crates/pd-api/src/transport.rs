//! Transport trait definition

use crate::error::ApiResult;
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// HTTP method of a data API request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => f.write_str("GET"),
            Method::Post => f.write_str("POST"),
        }
    }
}

/// One data API request, relative to the configured base URL
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

impl Request {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            body: Some(body),
        }
    }

    /// Identity of the request for deduplication: method, path and body.
    ///
    /// `serde_json` objects are key-ordered, so equal bodies render equally.
    pub fn signature(&self) -> String {
        match &self.body {
            Some(body) => format!("{} {} {}", self.method, self.path, body),
            None => format!("{} {}", self.method, self.path),
        }
    }
}

/// Sends data API requests and returns decoded JSON replies
///
/// Implementations must be Send + Sync; the pipeline issues requests from
/// many concurrent futures.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request and return the JSON body of a successful reply
    async fn send(&self, request: &Request) -> ApiResult<Arc<Value>>;

    /// Transport identifier for logging
    fn transport_type(&self) -> &'static str;
}
