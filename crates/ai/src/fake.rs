//! Fake lookup service for tests and offline runs.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};
use signal_core::{AssetLookupService, Error as CoreError, LookupRequest, Result as CoreResult};

/// A fake lookup service that returns a fixed answer.
pub struct FakeLookupService {
    /// Fixed answer, or `None` to fail with `fail_with`.
    pub response: Option<Value>,
    /// Transport fault message used when `response` is `None`.
    pub fail_with: String,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl FakeLookupService {
    /// Create a fake that always answers with `response`.
    pub fn with_response(response: Value) -> Self {
        Self {
            response: Some(response),
            fail_with: String::new(),
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    /// Create a fake that never finds anything.
    pub fn empty() -> Self {
        Self::with_response(json!({}))
    }

    /// Create a fake whose every call is a transport fault.
    pub fn failing(message: &str) -> Self {
        Self {
            response: None,
            fail_with: message.to_string(),
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    /// Number of invocations so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().ok().and_then(|prompt| prompt.clone())
    }
}

#[async_trait]
impl AssetLookupService for FakeLookupService {
    fn id(&self) -> &'static str {
        "FAKE_LOOKUP"
    }

    async fn invoke(&self, request: &LookupRequest) -> CoreResult<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_prompt.lock() {
            *last = Some(request.prompt.clone());
        }

        match &self.response {
            Some(value) => Ok(value.clone()),
            None => Err(CoreError::Lookup(self.fail_with.clone())),
        }
    }
}
