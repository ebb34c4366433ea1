use chrono::{Duration, NaiveDate};

use crate::models::job::JobListing;

pub const FALLBACK_JOB_COUNT: usize = 8;

const COMPANIES: [&str; 6] = [
    "TechCorp",
    "InnovateLabs",
    "DataSystems",
    "CloudWorks",
    "DevStudio",
    "AI Solutions",
];

/// Cycled after the requested location (or "Remote") in slot 0.
const OTHER_LOCATIONS: [&str; 4] = [
    "San Francisco, CA",
    "New York, NY",
    "Austin, TX",
    "Seattle, WA",
];

const SENIORITY: [&str; 3] = ["Senior", "Mid-Level", "Junior"];

const BENEFITS: [&str; 4] = ["Health Insurance", "Remote Work", "401k", "Flexible Hours"];

/// Synthetic, schema-valid listings used when the completion output cannot be parsed.
/// Deterministic for a given `today`.
pub fn generate_fallback_jobs(
    query: &str,
    location: Option<&str>,
    skills: &[String],
    today: NaiveDate,
) -> Vec<JobListing> {
    let first_location = location
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or("Remote");
    let locations: Vec<&str> = std::iter::once(first_location)
        .chain(OTHER_LOCATIONS)
        .collect();
    let highlighted = skills.iter().take(3).cloned().collect::<Vec<_>>().join(", ");

    (0..FALLBACK_JOB_COUNT)
        .map(|i| {
            let step = i as u32;
            JobListing {
                id: format!("fallback-{i}"),
                title: format!("{query} - {}", SENIORITY[i % SENIORITY.len()]),
                company: COMPANIES[i % COMPANIES.len()].to_string(),
                location: locations[i % locations.len()].to_string(),
                description: format!(
                    "We are seeking a talented {query} to join our dynamic team. This role involves \
                    working with cutting-edge technologies and collaborating with cross-functional \
                    teams to deliver innovative solutions. The ideal candidate will have experience \
                    with {highlighted} and a passion for continuous learning."
                ),
                salary: Some(format!(
                    "${} - ${}",
                    60_000 + step * 10_000,
                    80_000 + step * 15_000
                )),
                url: format!("https://example.com/job/{i}"),
                relevance_score: 95u8.saturating_sub(8 * i as u8).max(50),
                posted_date: (today - Duration::days(i as i64))
                    .format("%Y-%m-%d")
                    .to_string(),
                requirements: skills.iter().take(4).cloned().collect(),
                benefits: BENEFITS.iter().map(|b| b.to_string()).collect(),
            }
        })
        .collect()
}
