use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Structured resume data extracted once per upload. Immutable after parsing.
///
/// Every sequence field is always present; absent or malformed input becomes empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeRecord {
    pub skills: Vec<String>,
    pub work_experience: Vec<WorkExperience>,
    pub education: Vec<Education>,
    pub roles_of_interest: Vec<String>,
    pub summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkExperience {
    pub company: String,
    pub position: String,
    pub duration: String,
    pub responsibilities: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    pub year: String,
}

impl ResumeRecord {
    /// Builds a record from an untrusted JSON object, coercing every field that is
    /// missing or of the wrong shape to its empty value.
    pub fn from_untrusted(value: &Value) -> Self {
        Self {
            skills: string_list(value.get("skills")),
            work_experience: object_list(value.get("workExperience"))
                .map(|item| WorkExperience {
                    company: text_field(item, "company"),
                    position: text_field(item, "position"),
                    duration: text_field(item, "duration"),
                    responsibilities: string_list(item.get("responsibilities")),
                })
                .collect(),
            education: object_list(value.get("education"))
                .map(|item| Education {
                    degree: text_field(item, "degree"),
                    institution: text_field(item, "institution"),
                    year: text_field(item, "year"),
                })
                .collect(),
            roles_of_interest: string_list(value.get("rolesOfInterest")),
            summary: value
                .get("summary")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        }
    }
}

/// Strings kept as-is, numbers stringified, anything else dropped.
fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(scalar_text).collect())
        .unwrap_or_default()
}

fn object_list(value: Option<&Value>) -> impl Iterator<Item = &Value> {
    value
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter(|item| item.is_object())
}

fn text_field(item: &Value, key: &str) -> String {
    item.get(key).and_then(scalar_text).unwrap_or_default()
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_payload_round_trips_fields() {
        let value = json!({
            "skills": ["Rust", "SQL"],
            "workExperience": [{
                "company": "Acme",
                "position": "Engineer",
                "duration": "2019-2023",
                "responsibilities": ["Built APIs"]
            }],
            "education": [{"degree": "BSc", "institution": "MIT", "year": 2018}],
            "rolesOfInterest": ["Backend Engineer"],
            "summary": "Backend engineer."
        });
        let record = ResumeRecord::from_untrusted(&value);
        assert_eq!(record.skills, vec!["Rust", "SQL"]);
        assert_eq!(record.work_experience[0].company, "Acme");
        assert_eq!(record.work_experience[0].responsibilities, vec!["Built APIs"]);
        assert_eq!(record.education[0].year, "2018");
        assert_eq!(record.roles_of_interest, vec!["Backend Engineer"]);
        assert_eq!(record.summary, "Backend engineer.");
    }

    #[test]
    fn test_missing_education_becomes_empty() {
        let value = json!({"skills": ["Go"], "summary": "x"});
        let record = ResumeRecord::from_untrusted(&value);
        assert_eq!(record.education, Vec::<Education>::new());
        assert!(record.work_experience.is_empty());
        assert!(record.roles_of_interest.is_empty());
    }

    #[test]
    fn test_wrong_shapes_are_coerced() {
        let value = json!({
            "skills": "Rust, Go",
            "workExperience": {"company": "Acme"},
            "education": [null, "BSc", {"degree": "MSc"}],
            "rolesOfInterest": null,
            "summary": 42
        });
        let record = ResumeRecord::from_untrusted(&value);
        assert!(record.skills.is_empty());
        assert!(record.work_experience.is_empty());
        assert_eq!(record.education.len(), 1);
        assert_eq!(record.education[0].degree, "MSc");
        assert_eq!(record.education[0].institution, "");
        assert!(record.roles_of_interest.is_empty());
        assert_eq!(record.summary, "");
    }

    #[test]
    fn test_serializes_camel_case() {
        let value = serde_json::to_value(ResumeRecord::default()).unwrap();
        assert!(value.get("workExperience").is_some());
        assert!(value.get("rolesOfInterest").is_some());
        assert_eq!(value["education"], json!([]));
    }

    #[test]
    fn test_deserialize_defaults_missing_fields() {
        let record: ResumeRecord = serde_json::from_str(r#"{"skills": ["Rust"]}"#).unwrap();
        assert_eq!(record.skills, vec!["Rust"]);
        assert!(record.education.is_empty());
        assert_eq!(record.summary, "");
    }
}
