use serde::{Deserialize, Serialize};

pub const DEFAULT_TITLE: &str = "N/A";
pub const DEFAULT_MAIN_CATEGORY: &str = "Unknown";
pub const DEFAULT_COMPANY_NAME: &str = "Unknown";
pub const DEFAULT_JOB_TYPE: &str = "Not specified";
pub const DEFAULT_LOCATION: &str = "Remote";
pub const DEFAULT_SALARY: &str = "Not provided";
pub const DEFAULT_DESCRIPTION: &str = "No description available";
pub const DEFAULT_ICON: &str = "https://via.placeholder.com/50";

/// One job posting, as shown in the job list and stored in the saved list.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub main_category: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub job_type: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub min_salary: String,
    #[serde(default)]
    pub max_salary: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

impl Job {
    pub fn salary_label(&self) -> String {
        format!(
            "{} - {}",
            or_not_available(&self.min_salary),
            or_not_available(&self.max_salary)
        )
    }
}

fn or_not_available(value: &str) -> &str {
    if value.is_empty() {
        "N/A"
    } else {
        value
    }
}

/// A remote job paired with whether it is already in the saved list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct JobListing {
    #[serde(flatten)]
    pub job: Job,
    pub saved: bool,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub justification: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationReceipt {
    pub id: String,
    pub job_id: String,
    pub job_title: String,
    pub company_name: String,
    pub submitted_at: String,
    pub job_saved: bool,
    pub message: String,
}

impl ApplicationReceipt {
    pub fn confirmation_message(job: &Job) -> String {
        format!(
            "Your application for \"{}\" at {} has been submitted successfully.",
            job.title, job.company_name
        )
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum SaveOutcome {
    Saved,
    AlreadySaved,
}

impl SaveOutcome {
    pub fn message(self) -> &'static str {
        match self {
            Self::Saved => "Job saved successfully!",
            Self::AlreadySaved => "This job is already in your saved jobs.",
        }
    }
}
