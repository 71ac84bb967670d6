//! In-memory doubles for unit tests
//!
//! Available to other crates with the `test-util` feature.

use crate::client::Transport;
use crate::error::Result;
use crate::observer::{ApiEvent, ApiObserver};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub endpoint: String,
    pub payload: Option<Value>,
}

/// Transport that replays canned responses in order and records every request
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Value>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedTransport {
    pub fn new(responses: Vec<Value>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn next(&self, method: &'static str, endpoint: &str, payload: Option<Value>) -> Value {
        self.requests.lock().unwrap().push(RecordedRequest {
            method,
            endpoint: endpoint.to_string(),
            payload,
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted response left for {method} {endpoint}"))
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, endpoint: &str) -> Result<Value> {
        Ok(self.next("GET", endpoint, None))
    }

    async fn post(&self, endpoint: &str, payload: &Value) -> Result<Value> {
        Ok(self.next("POST", endpoint, Some(payload.clone())))
    }
}

#[derive(Debug, Clone)]
pub struct RecordedResponse {
    pub endpoint: String,
    pub status: u16,
    pub body: String,
}

/// Observer that keeps owned copies of what it saw
#[derive(Default)]
pub struct RecordingObserver {
    responses: Mutex<Vec<RecordedResponse>>,
    actions: Mutex<Vec<&'static str>>,
    warnings: Mutex<Vec<String>>,
}

impl RecordingObserver {
    pub fn responses(&self) -> Vec<RecordedResponse> {
        self.responses.lock().unwrap().clone()
    }

    pub fn actions(&self) -> Vec<&'static str> {
        self.actions.lock().unwrap().clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.warnings.lock().unwrap().clone()
    }
}

impl ApiObserver for RecordingObserver {
    fn observe(&self, event: &ApiEvent<'_>) {
        match event {
            ApiEvent::Response {
                endpoint,
                status,
                body,
                ..
            } => self.responses.lock().unwrap().push(RecordedResponse {
                endpoint: endpoint.to_string(),
                status: *status,
                body: String::from_utf8_lossy(body).into_owned(),
            }),
            ApiEvent::Action { action, .. } => self.actions.lock().unwrap().push(*action),
            ApiEvent::Warning { message } => self.warnings.lock().unwrap().push(message.clone()),
        }
    }
}
