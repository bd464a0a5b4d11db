//! Per-invocation request memoization
//!
//! Independent parts of the pipeline ask for the same catalog or slice more
//! than once. `MemoTransport` collapses identical requests (same signature)
//! into a single round trip whose reply, or error, is shared by every caller.
//! A memo lives as long as one pipeline call; nothing is retained between
//! calls.

use crate::error::{ApiError, ApiResult};
use crate::transport::{Request, Transport};
use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt, Shared};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

type SharedReply = Shared<BoxFuture<'static, ApiResult<Arc<Value>>>>;

/// Transport wrapper that deduplicates requests by signature
pub struct MemoTransport {
    inner: Arc<dyn Transport>,
    replies: Mutex<HashMap<String, SharedReply>>,
    hits: AtomicUsize,
}

impl MemoTransport {
    pub fn new(inner: Arc<dyn Transport>) -> Self {
        Self {
            inner,
            replies: Mutex::new(HashMap::new()),
            hits: AtomicUsize::new(0),
        }
    }

    /// Number of requests answered from an existing entry
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    /// Number of distinct request signatures seen
    pub fn distinct_requests(&self) -> usize {
        self.replies.lock().map(|r| r.len()).unwrap_or(0)
    }
}

#[async_trait]
impl Transport for MemoTransport {
    async fn send(&self, request: &Request) -> ApiResult<Arc<Value>> {
        let signature = request.signature();

        let reply = {
            let mut replies = self
                .replies
                .lock()
                .map_err(|e| ApiError::Internal(format!("request memo poisoned: {}", e)))?;

            match replies.get(&signature) {
                Some(existing) => {
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    log::debug!("memo hit: {}", signature);
                    existing.clone()
                }
                None => {
                    let inner = Arc::clone(&self.inner);
                    let owned = request.clone();
                    let reply = async move { inner.send(&owned).await }.boxed().shared();
                    replies.insert(signature, reply.clone());
                    reply
                }
            }
        };

        reply.await
    }

    fn transport_type(&self) -> &'static str {
        self.inner.transport_type()
    }
}

#[cfg(test)]
#[path = "memo_test.rs"]
mod tests;
