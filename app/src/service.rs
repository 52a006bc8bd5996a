use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, Mutex,
};

use chrono::{SecondsFormat, Utc};
use job_core::{
    validation, ApplicationForm, ApplicationReceipt, FetchError, Job, JobListing, SaveOutcome,
    SavedJobs, StorageError, ThemeMode, ValidationError,
};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    remote::JobSource,
    storage::{KeyValueStore, SavedJobStore},
};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ServiceError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Fetch(_) => "fetch_failed",
            Self::Storage(_) => "storage_failed",
            Self::Validation(_) => "validation_failed",
        }
    }

    /// Text for the host's error dialog.
    pub fn user_message(&self) -> String {
        match self {
            Self::Fetch(error) => error.user_message().to_string(),
            Self::Storage(_) => "Could not update saved jobs.".to_string(),
            Self::Validation(error) => error.to_string(),
        }
    }
}

/// View state and actions behind the job finder, saved jobs and
/// application form screens.
pub struct JobFinderService {
    source: Arc<dyn JobSource>,
    saved: Mutex<SavedJobStore>,
    jobs: Mutex<Vec<Job>>,
    theme: Mutex<ThemeMode>,
    fetch_generation: AtomicU64,
}

impl JobFinderService {
    pub fn new(source: Arc<dyn JobSource>, kv: Arc<dyn KeyValueStore>, theme: ThemeMode) -> Self {
        Self {
            source,
            saved: Mutex::new(SavedJobStore::new(kv)),
            jobs: Mutex::new(Vec::new()),
            theme: Mutex::new(theme),
            fetch_generation: AtomicU64::new(0),
        }
    }

    /// Called when a view mounts or regains focus.
    pub fn load_saved_jobs(&self) -> Vec<Job> {
        let mut saved = self.saved.lock().expect("saved jobs mutex poisoned");
        saved.load().as_slice().to_vec()
    }

    pub fn saved_jobs(&self) -> Vec<Job> {
        let saved = self.saved.lock().expect("saved jobs mutex poisoned");
        saved.current().as_slice().to_vec()
    }

    /// Fetches and replaces the job list.
    ///
    /// If another fetch started while this one was in flight, this result is
    /// dropped and the listings from the newer fetch are returned.
    pub async fn fetch_jobs(&self) -> Result<Vec<JobListing>, ServiceError> {
        let ticket = self.fetch_generation.fetch_add(1, Ordering::SeqCst) + 1;

        let fetched = self.source.fetch_jobs().await.map_err(|error| {
            tracing::warn!(%error, "job fetch failed");
            error
        })?;

        {
            // Compare under the lock so a newer result cannot land in between.
            let mut jobs = self.jobs.lock().expect("jobs mutex poisoned");
            if self.fetch_generation.load(Ordering::SeqCst) == ticket {
                *jobs = fetched;
            } else {
                tracing::debug!(ticket, "discarding superseded job fetch");
            }
        }

        Ok(self.list_jobs())
    }

    pub async fn refresh_jobs(&self) -> Result<Vec<JobListing>, ServiceError> {
        tracing::info!("refreshing job feed");
        self.fetch_jobs().await
    }

    pub fn list_jobs(&self) -> Vec<JobListing> {
        let jobs = self.jobs.lock().expect("jobs mutex poisoned").clone();
        let saved = self.saved.lock().expect("saved jobs mutex poisoned");
        saved.current().annotate(&jobs)
    }

    pub fn save_job(&self, job: Job) -> Result<SaveOutcome, ServiceError> {
        let mut saved = self.saved.lock().expect("saved jobs mutex poisoned");
        if saved.append_if_absent(job)? {
            Ok(SaveOutcome::Saved)
        } else {
            Ok(SaveOutcome::AlreadySaved)
        }
    }

    pub fn remove_saved_job(&self, id: &str) -> Result<Vec<Job>, ServiceError> {
        let mut saved = self.saved.lock().expect("saved jobs mutex poisoned");
        saved.remove(id)?;
        Ok(saved.current().as_slice().to_vec())
    }

    pub fn replace_saved_jobs(&self, jobs: Vec<Job>) -> Result<(), ServiceError> {
        let mut saved = self.saved.lock().expect("saved jobs mutex poisoned");
        saved.save(SavedJobs::from_records(jobs))?;
        Ok(())
    }

    pub fn validate_application(&self, form: &ApplicationForm) -> Result<(), ServiceError> {
        validation::validate_form(form)?;
        Ok(())
    }

    /// Validates the form, then keeps the job in the saved list. A failed
    /// save is logged and does not fail the submission.
    pub fn submit_application(
        &self,
        job: Job,
        form: &ApplicationForm,
    ) -> Result<ApplicationReceipt, ServiceError> {
        validation::validate_form(form).map_err(|error| {
            tracing::debug!(field = error.field(), "application rejected");
            error
        })?;

        let message = ApplicationReceipt::confirmation_message(&job);
        let job_id = job.id.clone();
        let job_title = job.title.clone();
        let company_name = job.company_name.clone();

        let job_saved = {
            let mut saved = self.saved.lock().expect("saved jobs mutex poisoned");
            match saved.append_if_absent(job) {
                Ok(inserted) => inserted,
                Err(error) => {
                    tracing::warn!(
                        job_id = %job_id,
                        %error,
                        "could not save job after application"
                    );
                    false
                }
            }
        };

        tracing::info!(job_id = %job_id, job_saved, "application submitted");

        Ok(ApplicationReceipt {
            id: Uuid::new_v4().to_string(),
            job_id,
            job_title,
            company_name,
            submitted_at: now_iso(),
            job_saved,
            message,
        })
    }

    pub fn theme(&self) -> ThemeMode {
        *self.theme.lock().expect("theme mutex poisoned")
    }

    pub fn set_theme(&self, mode: ThemeMode) -> ThemeMode {
        let mut theme = self.theme.lock().expect("theme mutex poisoned");
        *theme = mode;
        mode
    }

    pub fn toggle_theme(&self) -> ThemeMode {
        let mut theme = self.theme.lock().expect("theme mutex poisoned");
        *theme = theme.toggled();
        *theme
    }
}

fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
