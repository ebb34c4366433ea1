//! Insert-only record sink for stage results.
//!
//! Stages hand their output to `emit`, which never fails the caller: a sink
//! error is logged and dropped.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use tracing::{debug, warn};
use uuid::Uuid;

/// Logical tables the pipeline writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordTable {
    ParsedResumes,
    JobListings,
    CoverLetters,
    Applications,
}

impl RecordTable {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordTable::ParsedResumes => "parsed_resumes",
            RecordTable::JobListings => "job_listings",
            RecordTable::CoverLetters => "cover_letters",
            RecordTable::Applications => "applications",
        }
    }
}

/// Carried in `AppState` as `Arc<dyn RecordSink>`; tests swap in an in-memory sink.
#[async_trait]
pub trait RecordSink: Send + Sync {
    async fn insert(&self, table: RecordTable, record: Value) -> Result<()>;
}

/// Postgres sink: one JSONB row per record.
#[derive(Clone)]
pub struct PgRecordSink {
    pool: PgPool,
}

impl PgRecordSink {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordSink for PgRecordSink {
    async fn insert(&self, table: RecordTable, record: Value) -> Result<()> {
        // Table names come from the closed RecordTable set, never from input.
        let sql = format!(
            "INSERT INTO {} (id, payload) VALUES ($1, $2)",
            table.as_str()
        );
        sqlx::query(&sql)
            .bind(Uuid::new_v4())
            .bind(&record)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

/// Hands a record to the sink, logging and swallowing any failure.
pub async fn emit(sink: &dyn RecordSink, table: RecordTable, record: Value) {
    match sink.insert(table, record).await {
        Ok(()) => debug!("Persisted record to {}", table.as_str()),
        Err(e) => warn!("Failed to persist record to {}: {e:#}", table.as_str()),
    }
}
