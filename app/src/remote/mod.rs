use std::{future::Future, pin::Pin, sync::Arc};

use job_core::{FetchError, Job};

pub mod http_client;

pub type FetchFuture<'a> = Pin<Box<dyn Future<Output = Result<Vec<Job>, FetchError>> + Send + 'a>>;

/// Where the job list comes from. One call is one request; there is no retry.
pub trait JobSource: Send + Sync {
    fn fetch_jobs(&self) -> FetchFuture<'_>;
}

/// Serves a fixed job list. Used by hosts running offline and by tests.
#[derive(Clone, Default)]
pub struct StaticJobSource {
    jobs: Arc<Vec<Job>>,
}

impl StaticJobSource {
    pub fn new(jobs: Vec<Job>) -> Self {
        Self {
            jobs: Arc::new(jobs),
        }
    }
}

impl JobSource for StaticJobSource {
    fn fetch_jobs(&self) -> FetchFuture<'_> {
        let jobs = self.jobs.as_ref().clone();
        Box::pin(async move { Ok(jobs) })
    }
}
