use serde_json::{Map, Number, Value};
use uuid::Uuid;

use crate::{
    error::FetchError,
    model::{
        Job, DEFAULT_COMPANY_NAME, DEFAULT_DESCRIPTION, DEFAULT_ICON, DEFAULT_JOB_TYPE,
        DEFAULT_LOCATION, DEFAULT_MAIN_CATEGORY, DEFAULT_SALARY, DEFAULT_TITLE,
    },
};

pub const JOBS_FIELD: &str = "jobs";

/// Turns a raw `{ "jobs": [...] }` response body into normalized jobs.
pub fn normalize_response(body: &Value) -> Result<Vec<Job>, FetchError> {
    let object = body
        .as_object()
        .ok_or_else(|| FetchError::MalformedResponse("response is not a JSON object".into()))?;

    let raw_jobs = object
        .get(JOBS_FIELD)
        .and_then(Value::as_array)
        .ok_or_else(|| {
            FetchError::MalformedResponse(format!("`{JOBS_FIELD}` is missing or not an array"))
        })?;

    let jobs = raw_jobs
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            raw.as_object().map(normalize_job).ok_or_else(|| {
                FetchError::MalformedResponse(format!("job at index {index} is not an object"))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(count = jobs.len(), "normalized job feed");
    Ok(jobs)
}

pub fn normalize_body(body: &str) -> Result<Vec<Job>, FetchError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|error| FetchError::MalformedResponse(format!("invalid JSON: {error}")))?;
    normalize_response(&value)
}

pub fn normalize_job(raw: &Map<String, Value>) -> Job {
    Job {
        id: text_field(raw, "id").unwrap_or_else(|| Uuid::new_v4().to_string()),
        title: text_or(raw, "title", DEFAULT_TITLE),
        main_category: text_or(raw, "mainCategory", DEFAULT_MAIN_CATEGORY),
        company_name: text_or(raw, "companyName", DEFAULT_COMPANY_NAME),
        job_type: text_or(raw, "jobType", DEFAULT_JOB_TYPE),
        location: text_or(raw, "location", DEFAULT_LOCATION),
        min_salary: text_or(raw, "minSalary", DEFAULT_SALARY),
        max_salary: text_or(raw, "maxSalary", DEFAULT_SALARY),
        description: text_or(raw, "description", DEFAULT_DESCRIPTION),
        icon: text_or(raw, "companyLogo", DEFAULT_ICON),
    }
}

fn text_or(raw: &Map<String, Value>, key: &str, fallback: &str) -> String {
    text_field(raw, key).unwrap_or_else(|| fallback.to_string())
}

// null, "", 0 and false all count as absent.
fn text_field(raw: &Map<String, Value>, key: &str) -> Option<String> {
    match raw.get(key)? {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) if number.as_f64() != Some(0.0) => Some(number_text(number)),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

// Whole floats print without a fraction, so `4211.0` reads as "4211".
fn number_text(number: &Number) -> String {
    match number.as_f64() {
        Some(value) if number.is_f64() && value.fract() == 0.0 && value.abs() < 1e15 => {
            format!("{}", value as i64)
        }
        _ => number.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn fills_defaults_for_sparse_job() {
        let jobs = normalize_response(&json!({ "jobs": [{ "title": "Engineer" }] })).unwrap();
        assert_eq!(jobs.len(), 1);
        let job = &jobs[0];
        assert_eq!(job.title, "Engineer");
        assert_eq!(job.company_name, "Unknown");
        assert_eq!(job.location, "Remote");
        assert_eq!(job.min_salary, "Not provided");
        assert_eq!(job.max_salary, "Not provided");
        assert_eq!(job.job_type, "Not specified");
        assert_eq!(job.icon, DEFAULT_ICON);
        assert!(!job.id.is_empty());
    }

    #[test]
    fn every_field_is_populated() {
        let body = json!({ "jobs": [{}, { "title": null, "location": "" }, { "id": 0 }] });
        for job in normalize_response(&body).unwrap() {
            for value in [
                &job.id,
                &job.title,
                &job.main_category,
                &job.company_name,
                &job.job_type,
                &job.location,
                &job.min_salary,
                &job.max_salary,
                &job.description,
                &job.icon,
            ] {
                assert!(!value.is_empty());
            }
        }
    }

    #[test]
    fn keeps_source_values_and_stringifies_ids() {
        let body = json!({ "jobs": [{
            "id": 4211,
            "title": "Rust Developer",
            "companyName": "Ferris Inc",
            "minSalary": 90000,
            "companyLogo": "https://cdn.example.com/ferris.png"
        }]});
        let job = normalize_response(&body).unwrap().remove(0);
        assert_eq!(job.id, "4211");
        assert_eq!(job.company_name, "Ferris Inc");
        assert_eq!(job.min_salary, "90000");
        assert_eq!(job.icon, "https://cdn.example.com/ferris.png");
    }

    #[test]
    fn whole_float_values_drop_the_fraction() {
        let body = json!({ "jobs": [{ "id": 4211.0, "minSalary": 52500.5, "maxSalary": -3.0 }] });
        let job = normalize_response(&body).unwrap().remove(0);
        assert_eq!(job.id, "4211");
        assert_eq!(job.min_salary, "52500.5");
        assert_eq!(job.max_salary, "-3");
    }

    #[test]
    fn generated_ids_are_distinct() {
        let jobs = normalize_response(&json!({ "jobs": [{}, {}] })).unwrap();
        assert_ne!(jobs[0].id, jobs[1].id);
    }

    #[test]
    fn rejects_malformed_shapes() {
        let bodies = [
            json!(null),
            json!([]),
            json!({}),
            json!({ "jobs": {} }),
            json!({ "jobs": [1] }),
        ];
        for body in bodies {
            assert!(matches!(
                normalize_response(&body),
                Err(FetchError::MalformedResponse(_))
            ));
        }
        assert!(matches!(
            normalize_body("<html>"),
            Err(FetchError::MalformedResponse(_))
        ));
    }

    #[test]
    fn empty_job_array_is_valid() {
        assert!(normalize_body(r#"{"jobs": []}"#).unwrap().is_empty());
    }
}
