//! Domain logic for the job finder: job records, response normalization,
//! the saved-job list and application form validation.

pub mod error;
pub mod invoke;
pub mod model;
pub mod normalize;
pub mod saved;
pub mod validation;

pub use error::{FetchError, StorageError, ValidationError};
pub use invoke::{InvokeError, InvokeRequest, InvokeResponse};
pub use model::{
    ApplicationForm, ApplicationReceipt, Job, JobListing, SaveOutcome, ThemeMode,
};
pub use saved::SavedJobs;
