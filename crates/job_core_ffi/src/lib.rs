//! C ABI for iOS/Android hosts.
//!
//! Requests, replies and failures are UTF-8 JSON in the same `{ok, data?,
//! error?}` envelope the runtime uses. Every string handed out here must be
//! released with `jf_free_c_string`.

use std::{
    ffi::{c_char, c_void, CStr, CString},
    ptr,
};

use job_core::{InvokeError, InvokeResponse};
use job_finder_lib::Runtime;

/// Receives an event name such as `theme://changed` and its JSON payload.
/// Both strings are only valid for the duration of the call.
pub type JfEventCallback = unsafe extern "C" fn(
    event: *const c_char,
    payload_json: *const c_char,
    user_data: *mut c_void,
);

/// Opaque handle owned by the host between `jf_runtime_new` and
/// `jf_runtime_free`.
pub struct JfRuntime {
    runtime: Runtime,
}

/// Creates a runtime from `config_json` (null means defaults).
///
/// On failure returns null and, when `error_out` is non-null, stores an
/// `{"ok":false,"error":{...}}` envelope there for the host to show and free.
///
/// # Safety
///
/// `config_json` must be null or point to a NUL-terminated string.
/// `error_out` must be null or valid for one pointer write.
#[no_mangle]
pub unsafe extern "C" fn jf_runtime_new(
    config_json: *const c_char,
    error_out: *mut *mut c_char,
) -> *mut JfRuntime {
    if !error_out.is_null() {
        *error_out = ptr::null_mut();
    }

    let created = read_str(config_json, "config_json")
        .map(Option::unwrap_or_default)
        .and_then(|config| {
            Runtime::new(config).map_err(|error| {
                InvokeError::new("runtime_init_failed", format!("{error:#}"))
            })
        });

    match created {
        Ok(runtime) => {
            tracing::debug!("ffi runtime handle created");
            Box::into_raw(Box::new(JfRuntime { runtime }))
        }
        Err(error) => {
            tracing::error!(code = %error.code, message = %error.message, "runtime not created");
            if !error_out.is_null() {
                *error_out = envelope(Err(error));
            }
            ptr::null_mut()
        }
    }
}

/// # Safety
///
/// `handle` must be null or a pointer returned by `jf_runtime_new` that has
/// not been freed yet.
#[no_mangle]
pub unsafe extern "C" fn jf_runtime_free(handle: *mut JfRuntime) {
    if handle.is_null() {
        tracing::warn!("jf_runtime_free called with null handle");
        return;
    }
    let handle = Box::from_raw(handle);
    handle.runtime.clear_event_callback();
    tracing::debug!("ffi runtime handle released");
}

/// Registers `callback` for runtime events, or clears it when null.
///
/// # Safety
///
/// `handle` must be null or a live handle. `user_data` is passed back to
/// `callback` untouched and must stay valid while the callback is set.
#[no_mangle]
pub unsafe extern "C" fn jf_set_event_callback(
    handle: *mut JfRuntime,
    callback: Option<JfEventCallback>,
    user_data: *mut c_void,
) {
    let Some(handle) = handle.as_ref() else {
        tracing::warn!("jf_set_event_callback called with null handle");
        return;
    };

    let Some(callback) = callback else {
        handle.runtime.clear_event_callback();
        return;
    };

    // Raw pointers are not Send; the host vouches for user_data's lifetime.
    let user_data = user_data as usize;
    handle.runtime.set_event_callback(move |event, payload| {
        let (Ok(event), Ok(payload)) = (CString::new(event), CString::new(payload.to_string()))
        else {
            tracing::warn!(event, "event not forwarded: interior NUL");
            return;
        };
        callback(event.as_ptr(), payload.as_ptr(), user_data as *mut c_void);
    });
}

/// Runs one JSON command and returns the reply envelope.
///
/// # Safety
///
/// `handle` must be null or a live handle; `request_json` must be null or a
/// NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn jf_invoke_json(
    handle: *mut JfRuntime,
    request_json: *const c_char,
) -> *mut c_char {
    let Some(handle) = handle.as_ref() else {
        tracing::warn!("jf_invoke_json called with null handle");
        return envelope(Err(InvokeError::new(
            "invalid_handle",
            "runtime handle is null",
        )));
    };

    match read_str(request_json, "request_json") {
        Ok(Some(request)) => into_c_string(handle.runtime.invoke_json(request)),
        Ok(None) => envelope(Err(InvokeError::new(
            "invalid_request",
            "request_json is null",
        ))),
        Err(error) => envelope(Err(error)),
    }
}

/// # Safety
///
/// `ptr` must be null or a string returned by this library.
#[no_mangle]
pub unsafe extern "C" fn jf_free_c_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

unsafe fn read_str<'a>(raw: *const c_char, name: &str) -> Result<Option<&'a str>, InvokeError> {
    if raw.is_null() {
        return Ok(None);
    }
    CStr::from_ptr(raw).to_str().map(Some).map_err(|error| {
        InvokeError::new("invalid_request", format!("{name} must be UTF-8: {error}"))
    })
}

fn envelope(result: Result<serde_json::Value, InvokeError>) -> *mut c_char {
    into_c_string(InvokeResponse::from_result(result).to_json())
}

// serde_json escapes NUL inside strings, so envelopes never hit the error arm.
fn into_c_string(json: String) -> *mut c_char {
    match CString::new(json) {
        Ok(text) => text.into_raw(),
        Err(error) => {
            tracing::error!(%error, "reply dropped: interior NUL");
            ptr::null_mut()
        }
    }
}
