//! Test doubles for the completion endpoint and the record sink.

use std::collections::VecDeque;
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::Value;

use crate::applications::store::ApplicationStore;
use crate::llm_client::{CompletionBackend, CompletionRequest, LlmError};
use crate::persistence::{RecordSink, RecordTable};

/// Replays queued responses in order and records every request it receives.
#[derive(Default)]
pub struct ScriptedBackend {
    responses: Mutex<VecDeque<Result<String, LlmError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replying(content: &str) -> Self {
        Self::new().then_reply(content)
    }

    pub fn failing(status: u16, message: &str) -> Self {
        Self::new().then_fail(status, message)
    }

    pub fn then_reply(self, content: &str) -> Self {
        self.push(Ok(content.to_string()));
        self
    }

    pub fn then_fail(self, status: u16, message: &str) -> Self {
        self.push(Err(LlmError::Api {
            status,
            message: message.to_string(),
        }));
        self
    }

    pub fn then_empty(self) -> Self {
        self.push(Err(LlmError::EmptyContent));
        self
    }

    fn push(&self, response: Result<String, LlmError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionBackend for ScriptedBackend {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(LlmError::EmptyContent))
    }
}

/// Keeps inserted records in memory; `failing()` rejects every insert and read.
/// Application reads return insertion order, unsorted.
#[derive(Default)]
pub struct MemorySink {
    records: Mutex<Vec<(RecordTable, Value)>>,
    attempts: Mutex<usize>,
    fail: bool,
}

impl MemorySink {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn records(&self) -> Vec<(RecordTable, Value)> {
        self.records.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

#[async_trait]
impl RecordSink for MemorySink {
    async fn insert(&self, table: RecordTable, record: Value) -> Result<()> {
        *self.attempts.lock().unwrap() += 1;
        if self.fail {
            return Err(anyhow!("sink unavailable"));
        }
        self.records.lock().unwrap().push((table, record));
        Ok(())
    }
}

#[async_trait]
impl ApplicationStore for MemorySink {
    async fn fetch_applications(&self) -> Result<Vec<Value>> {
        if self.fail {
            return Err(anyhow!("sink unavailable"));
        }
        Ok(self
            .records()
            .into_iter()
            .filter(|(table, _)| *table == RecordTable::Applications)
            .map(|(_, payload)| payload)
            .collect())
    }
}
