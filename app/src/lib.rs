//! Job finder application core.
//!
//! A host UI drives everything through [`Runtime::invoke_json`]: fetching the
//! remote job feed, keeping the saved-job list and submitting applications.

pub mod config;
pub mod remote;
pub mod runtime;
pub mod service;
pub mod storage;
pub mod telemetry;

pub use config::RuntimeConfig;
pub use runtime::Runtime;
pub use service::{JobFinderService, ServiceError};
