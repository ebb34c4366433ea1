//! Read side of the `applications` table.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;

#[async_trait]
pub trait ApplicationStore: Send + Sync {
    /// Raw application payloads, newest `applied_date` first.
    async fn fetch_applications(&self) -> Result<Vec<Value>>;
}

#[derive(Clone)]
pub struct PgApplicationStore {
    pool: PgPool,
}

impl PgApplicationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApplicationStore for PgApplicationStore {
    async fn fetch_applications(&self) -> Result<Vec<Value>> {
        // Served by applications_applied_date_idx.
        let payloads = sqlx::query_scalar::<_, Value>(
            "SELECT payload FROM applications ORDER BY (payload ->> 'applied_date') DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(payloads)
    }
}
