use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A ranked job listing. `relevance_score` is always populated and within 0–100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListing {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    pub url: String,
    pub relevance_score: u8,
    pub posted_date: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
}

/// A listing as the completion endpoint produced it. Nothing is trusted:
/// ids may be numbers, scores may be missing, strings or out of range.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawJobListing {
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub company: String,
    #[serde(deserialize_with = "lenient_string")]
    pub location: String,
    #[serde(deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(deserialize_with = "lenient_optional_string")]
    pub salary: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub url: String,
    pub relevance_score: Option<Value>,
    #[serde(deserialize_with = "lenient_string")]
    pub posted_date: String,
    #[serde(deserialize_with = "lenient_string_list")]
    pub requirements: Vec<String>,
    #[serde(deserialize_with = "lenient_string_list")]
    pub benefits: Vec<String>,
}

impl RawJobListing {
    /// The model-supplied score, or `None` when absent or falsy (missing, null,
    /// zero, empty or unparseable string).
    pub fn supplied_score(&self) -> Option<f64> {
        let score = match self.relevance_score.as_ref()? {
            Value::Number(n) => n.as_f64()?,
            Value::String(s) => s.trim().trim_end_matches('%').parse::<f64>().ok()?,
            _ => return None,
        };
        (score != 0.0 && score.is_finite()).then_some(score)
    }

    /// Finalizes the listing with the given score.
    pub fn into_listing(self, relevance_score: u8) -> JobListing {
        JobListing {
            id: self.id,
            title: self.title,
            company: self.company,
            location: self.location,
            description: self.description,
            salary: self.salary,
            url: self.url,
            relevance_score,
            posted_date: self.posted_date,
            requirements: self.requirements,
            benefits: self.benefits,
        }
    }
}

fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_to_string(value).unwrap_or_default())
}

fn lenient_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_to_string(value).filter(|s| !s.trim().is_empty()))
}

fn lenient_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items.into_iter().filter_map(scalar_to_string).collect(),
        _ => Vec::new(),
    })
}
