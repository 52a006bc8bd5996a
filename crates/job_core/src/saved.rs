use serde::{Deserialize, Serialize};

use crate::model::{Job, JobListing};

/// Ordered saved-job list. Ids are unique within it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct SavedJobs(Vec<Job>);

impl SavedJobs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list from stored records, keeping the first record per id.
    pub fn from_records(records: Vec<Job>) -> Self {
        let mut list = Self::new();
        for job in records {
            if !list.contains(&job.id) {
                list.0.push(job);
            }
        }
        list
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.iter().any(|job| job.id == id)
    }

    /// Returns the list with `job` appended, or `None` if its id is present.
    pub fn with_appended(&self, job: Job) -> Option<Self> {
        if self.contains(&job.id) {
            return None;
        }
        let mut next = self.0.clone();
        next.push(job);
        Some(Self(next))
    }

    pub fn without(&self, id: &str) -> Self {
        Self(self.0.iter().filter(|job| job.id != id).cloned().collect())
    }

    pub fn annotate(&self, jobs: &[Job]) -> Vec<JobListing> {
        jobs.iter()
            .map(|job| JobListing {
                job: job.clone(),
                saved: self.contains(&job.id),
            })
            .collect()
    }

    pub fn as_slice(&self) -> &[Job] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(id: &str) -> Job {
        Job {
            id: id.to_string(),
            title: format!("Job {id}"),
            ..Job::default()
        }
    }

    #[test]
    fn append_rejects_duplicate_ids() {
        let list = SavedJobs::new().with_appended(job("a")).unwrap();
        assert!(list.with_appended(job("a")).is_none());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn duplicate_check_ignores_other_fields() {
        let list = SavedJobs::new().with_appended(job("a")).unwrap();
        let mut changed = job("a");
        changed.title = "Renamed".to_string();
        assert!(list.with_appended(changed).is_none());
    }

    #[test]
    fn remove_keeps_order_and_ignores_unknown_ids() {
        let list = SavedJobs::from_records(vec![job("a"), job("b"), job("c")]);
        let ids: Vec<_> = list
            .without("b")
            .as_slice()
            .iter()
            .map(|job| job.id.clone())
            .collect();
        assert_eq!(ids, ["a", "c"]);
        assert_eq!(list.without("zzz"), list);
    }

    #[test]
    fn from_records_drops_repeated_ids() {
        let list = SavedJobs::from_records(vec![job("a"), job("a"), job("b")]);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn annotate_marks_saved_jobs() {
        let list = SavedJobs::from_records(vec![job("b")]);
        let listings = list.annotate(&[job("a"), job("b")]);
        assert!(!listings[0].saved);
        assert!(listings[1].saved);
    }

    #[test]
    fn serializes_as_plain_array() {
        let list = SavedJobs::from_records(vec![job("a")]);
        let value = serde_json::to_value(&list).unwrap();
        assert!(value.is_array());
    }
}
