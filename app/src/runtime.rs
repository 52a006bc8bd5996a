use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use job_core::{
    ApplicationForm, InvokeError, InvokeRequest, InvokeResponse, Job, JobListing, SaveOutcome,
    ThemeMode,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    config::RuntimeConfig,
    remote::{http_client::HttpJobSource, JobSource},
    service::{JobFinderService, ServiceError},
    storage::{JsonFileStore, KeyValueStore},
    telemetry,
};

pub const EVENT_JOBS_UPDATED: &str = "jobs://updated";
pub const EVENT_SAVED_JOBS_CHANGED: &str = "saved-jobs://changed";
pub const EVENT_THEME_CHANGED: &str = "theme://changed";

type SharedCallback = Arc<dyn Fn(&str, &Value) + Send + Sync>;

/// JSON command surface for a native host.
///
/// Requests look like `{"command": "...", "payload": {...}}` and every reply
/// is an `{ok, data?, error?}` envelope.
pub struct Runtime {
    config: RuntimeConfig,
    service: JobFinderService,
    executor: tokio::runtime::Runtime,
    callback: Mutex<Option<SharedCallback>>,
}

impl Runtime {
    pub fn new(config_json: &str) -> Result<Self> {
        let config = RuntimeConfig::from_json(config_json)?;
        telemetry::init_tracing(config.log_filter.as_deref());

        let data_dir = config.resolve_data_dir();
        let http_client = HttpJobSource::build_client(config.request_timeout())
            .context("failed to build HTTP client")?;
        let source = HttpJobSource::new(http_client, config.api_url.clone());

        tracing::info!(
            data_dir = %data_dir.display(),
            endpoint = %source.endpoint(),
            platform = %config.platform(),
            "job finder runtime starting"
        );

        Self::with_parts(config, Arc::new(source), Arc::new(JsonFileStore::new(data_dir)))
    }

    /// Builds a runtime around caller-provided job source and storage.
    pub fn with_parts(
        config: RuntimeConfig,
        source: Arc<dyn JobSource>,
        kv: Arc<dyn KeyValueStore>,
    ) -> Result<Self> {
        let executor = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("failed to start async executor")?;
        let service = JobFinderService::new(source, kv, config.theme_mode);
        service.load_saved_jobs();

        Ok(Self {
            config,
            service,
            executor,
            callback: Mutex::new(None),
        })
    }

    pub fn set_event_callback<F>(&self, callback: F)
    where
        F: Fn(&str, &Value) + Send + Sync + 'static,
    {
        let mut guard = self.callback.lock().expect("callback mutex poisoned");
        *guard = Some(Arc::new(callback));
    }

    pub fn clear_event_callback(&self) {
        let mut guard = self.callback.lock().expect("callback mutex poisoned");
        *guard = None;
    }

    pub fn invoke_json(&self, request_json: &str) -> String {
        let response = match serde_json::from_str::<InvokeRequest>(request_json) {
            Ok(request) => self.dispatch(request),
            Err(error) => Err(InvokeError::new(
                "invalid_request",
                format!("invalid request JSON: {error}"),
            )),
        };

        InvokeResponse::from_result(response).to_json()
    }

    fn dispatch(&self, request: InvokeRequest) -> Result<Value, InvokeError> {
        tracing::debug!(command = %request.command, "dispatching command");

        match request.command.as_str() {
            "get_bootstrap_state" => self.get_bootstrap_state(),
            "load_saved_jobs" => {
                let saved = self.service.load_saved_jobs();
                to_value(&saved)
            }
            "list_saved_jobs" => to_value(&self.service.saved_jobs()),
            "fetch_jobs" => {
                let jobs = self
                    .executor
                    .block_on(self.service.fetch_jobs())
                    .map_err(service_error)?;
                let data = to_value(&jobs)?;
                self.emit_event(EVENT_JOBS_UPDATED, &data);
                Ok(data)
            }
            "refresh_jobs" => {
                let jobs = self
                    .executor
                    .block_on(self.service.refresh_jobs())
                    .map_err(service_error)?;
                let data = to_value(&jobs)?;
                self.emit_event(EVENT_JOBS_UPDATED, &data);
                Ok(data)
            }
            "list_jobs" => to_value(&self.service.list_jobs()),
            "save_job" => self.save_job(request.payload),
            "remove_saved_job" => self.remove_saved_job(request.payload),
            "validate_application" => {
                let form = serde_json::from_value::<ApplicationForm>(request.payload)
                    .map_err(invalid_payload)?;
                self.service
                    .validate_application(&form)
                    .map_err(service_error)?;
                Ok(json!({ "valid": true }))
            }
            "submit_application" => self.submit_application(request.payload),
            "get_theme" => Ok(json!({ "themeMode": self.service.theme() })),
            "set_theme" => {
                #[derive(Deserialize)]
                #[serde(rename_all = "camelCase")]
                struct Input {
                    theme_mode: ThemeMode,
                }

                let input =
                    serde_json::from_value::<Input>(request.payload).map_err(invalid_payload)?;
                let mode = self.service.set_theme(input.theme_mode);
                self.theme_changed(mode)
            }
            "toggle_theme" => {
                let mode = self.service.toggle_theme();
                self.theme_changed(mode)
            }
            _ => Err(InvokeError::new(
                "unknown_command",
                format!("unsupported command: {}", request.command),
            )),
        }
    }

    fn get_bootstrap_state(&self) -> Result<Value, InvokeError> {
        let state = BootstrapState {
            platform: self.config.platform(),
            theme_mode: self.service.theme(),
            api_url: self.config.api_url.clone(),
            jobs: self.service.list_jobs(),
            saved_jobs: self.service.saved_jobs(),
        };
        to_value(&state)
    }

    fn save_job(&self, payload: Value) -> Result<Value, InvokeError> {
        #[derive(Deserialize)]
        struct Input {
            job: Job,
        }

        let input = serde_json::from_value::<Input>(payload).map_err(invalid_payload)?;
        let outcome = self.service.save_job(input.job).map_err(service_error)?;
        let saved_jobs = self.service.saved_jobs();
        if outcome == SaveOutcome::Saved {
            self.emit_event(EVENT_SAVED_JOBS_CHANGED, &to_value(&saved_jobs)?);
        }

        Ok(json!({
            "outcome": outcome,
            "message": outcome.message(),
            "savedJobs": saved_jobs,
        }))
    }

    fn remove_saved_job(&self, payload: Value) -> Result<Value, InvokeError> {
        #[derive(Deserialize)]
        struct Input {
            id: String,
        }

        let input = serde_json::from_value::<Input>(payload).map_err(invalid_payload)?;
        let saved_jobs = self
            .service
            .remove_saved_job(&input.id)
            .map_err(service_error)?;
        let data = to_value(&saved_jobs)?;
        self.emit_event(EVENT_SAVED_JOBS_CHANGED, &data);
        Ok(json!({ "removed": input.id, "savedJobs": data }))
    }

    fn submit_application(&self, payload: Value) -> Result<Value, InvokeError> {
        #[derive(Deserialize)]
        struct Input {
            job: Job,
            form: ApplicationForm,
        }

        let input = serde_json::from_value::<Input>(payload).map_err(invalid_payload)?;
        let receipt = self
            .service
            .submit_application(input.job, &input.form)
            .map_err(service_error)?;
        if receipt.job_saved {
            self.emit_event(
                EVENT_SAVED_JOBS_CHANGED,
                &to_value(&self.service.saved_jobs())?,
            );
        }
        to_value(&receipt)
    }

    fn theme_changed(&self, mode: ThemeMode) -> Result<Value, InvokeError> {
        let data = json!({ "themeMode": mode });
        self.emit_event(EVENT_THEME_CHANGED, &data);
        Ok(data)
    }

    fn emit_event(&self, event: &str, payload: &Value) {
        let callback = {
            let guard = self.callback.lock().expect("callback mutex poisoned");
            guard.clone()
        };
        if let Some(callback) = callback {
            tracing::trace!(event, "emitting host event");
            callback(event, payload);
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct BootstrapState {
    platform: String,
    theme_mode: ThemeMode,
    api_url: String,
    jobs: Vec<JobListing>,
    saved_jobs: Vec<Job>,
}

fn to_value<T: Serialize>(value: &T) -> Result<Value, InvokeError> {
    serde_json::to_value(value)
        .map_err(|error| InvokeError::new("serialization_failure", error.to_string()))
}

fn invalid_payload(error: serde_json::Error) -> InvokeError {
    InvokeError::new("invalid_payload", error.to_string())
}

fn service_error(error: ServiceError) -> InvokeError {
    InvokeError::new(error.code(), error.user_message())
}
