use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::applications::store::ApplicationStore;
use crate::errors::AppError;
use crate::models::job::JobListing;
use crate::persistence::{emit, RecordSink, RecordTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Applied,
    CoverLetterGenerated,
    CompanyViewed,
    Interviewed,
    Rejected,
    Accepted,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub id: Uuid,
    pub job_title: String,
    pub company: String,
    pub applied_date: DateTime<Utc>,
    pub status: ApplicationStatus,
    pub job_url: String,
}

impl ApplicationRecord {
    pub fn applied(job: &JobListing, applied_date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            job_title: job.title.clone(),
            company: job.company.clone(),
            applied_date,
            status: ApplicationStatus::Applied,
            job_url: job.url.clone(),
        }
    }
}

/// Records that the user applied to `job`. Persistence is fire-and-forget.
pub async fn record_application(sink: &dyn RecordSink, job: &JobListing) -> ApplicationRecord {
    let record = ApplicationRecord::applied(job, Utc::now());
    info!("Recorded application to '{}' at {}", record.job_title, record.company);

    match serde_json::to_value(&record) {
        Ok(payload) => emit(sink, RecordTable::Applications, payload).await,
        Err(e) => warn!("Could not serialize application record: {e}"),
    }
    record
}

/// Every recorded application, newest first. Rows that no longer match the
/// record shape are skipped.
pub async fn list_applications(
    store: &dyn ApplicationStore,
) -> Result<Vec<ApplicationRecord>, AppError> {
    let mut records: Vec<ApplicationRecord> = store
        .fetch_applications()
        .await?
        .into_iter()
        .filter_map(|payload| match serde_json::from_value(payload) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skipping unreadable application record: {e}");
                None
            }
        })
        .collect();
    records.sort_by(|a, b| b.applied_date.cmp(&a.applied_date));
    Ok(records)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;
    use crate::testing::MemorySink;

    fn job() -> JobListing {
        JobListing {
            id: "b".to_string(),
            title: "Go Backend Engineer".to_string(),
            company: "Gopher Inc".to_string(),
            location: "Austin, TX".to_string(),
            description: "Build Go services".to_string(),
            salary: None,
            url: "https://example.com/b".to_string(),
            relevance_score: 90,
            posted_date: "2025-01-03".to_string(),
            requirements: vec![],
            benefits: vec![],
        }
    }

    #[test]
    fn test_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_value(ApplicationStatus::CoverLetterGenerated).unwrap(),
            serde_json::json!("cover_letter_generated")
        );
    }

    #[tokio::test]
    async fn test_record_application_persists_applied_record() {
        let sink = MemorySink::default();

        let record = record_application(&sink, &job()).await;

        assert_eq!(record.status, ApplicationStatus::Applied);
        assert_eq!(record.job_title, "Go Backend Engineer");
        assert_eq!(record.job_url, "https://example.com/b");

        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].0, RecordTable::Applications);
        assert_eq!(records[0].1["status"], "applied");
        assert_eq!(records[0].1["company"], "Gopher Inc");
        assert_eq!(records[0].1["id"], record.id.to_string());
    }

    #[tokio::test]
    async fn test_sink_failure_still_returns_record() {
        let sink = MemorySink::failing();
        let record = record_application(&sink, &job()).await;
        assert_eq!(record.company, "Gopher Inc");
        assert_eq!(sink.attempts(), 1);
    }

    fn stored(title: &str, day: u32, status: &str) -> serde_json::Value {
        json!({
            "id": Uuid::new_v4(),
            "job_title": title,
            "company": "Acme",
            "applied_date": Utc.with_ymd_and_hms(2025, 3, day, 9, 0, 0).unwrap(),
            "status": status,
            "job_url": "https://example.com/job",
        })
    }

    #[tokio::test]
    async fn test_list_applications_newest_first() {
        let sink = MemorySink::default();
        for payload in [
            stored("middle", 5, "interviewed"),
            stored("oldest", 1, "applied"),
            stored("newest", 9, "cover_letter_generated"),
        ] {
            sink.insert(RecordTable::Applications, payload).await.unwrap();
        }

        let records = list_applications(&sink).await.unwrap();

        let titles: Vec<&str> = records.iter().map(|r| r.job_title.as_str()).collect();
        assert_eq!(titles, vec!["newest", "middle", "oldest"]);
        assert_eq!(records[0].status, ApplicationStatus::CoverLetterGenerated);
        assert_eq!(records[1].status, ApplicationStatus::Interviewed);
    }

    #[tokio::test]
    async fn test_list_applications_reads_back_recorded() {
        let sink = MemorySink::default();
        let recorded = record_application(&sink, &job()).await;

        let records = list_applications(&sink).await.unwrap();

        assert_eq!(records, vec![recorded]);
    }

    #[tokio::test]
    async fn test_list_applications_skips_unreadable_rows() {
        let sink = MemorySink::default();
        sink.insert(RecordTable::Applications, json!({"job_title": "no date"}))
            .await
            .unwrap();
        sink.insert(RecordTable::Applications, stored("ok", 2, "rejected"))
            .await
            .unwrap();
        sink.insert(RecordTable::CoverLetters, json!({"cover_letter": "x"}))
            .await
            .unwrap();

        let records = list_applications(&sink).await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].status, ApplicationStatus::Rejected);
    }

    #[tokio::test]
    async fn test_list_applications_store_failure_is_internal_error() {
        let sink = MemorySink::failing();
        let result = list_applications(&sink).await;
        assert!(matches!(result, Err(AppError::Internal(_))));
    }
}
