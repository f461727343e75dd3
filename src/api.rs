//! Remote scheduling service seam.
//!
//! The HTTP client lives outside this crate. The core sees it only through
//! [`ScheduleApi`], whose `list` returns the raw JSON body of a collection
//! endpoint. [`decode_records`] turns that body into typed records and is
//! the only place that checks payload shape. A body that is not a sequence
//! becomes an empty collection; records that fail to decode are dropped one
//! by one. Either way the caller gets a
//! [`ScheduleError::MalformedResponse`] warning.
//!
//! [`LocalApi`] is an in-memory implementation for tests and demos.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use thiserror::Error;
use tracing::warn;

use crate::error::ScheduleError;
use crate::models::ConflictPair;
use crate::store::{Domain, Records};

/// Result type for service calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Transport-level failure of a service call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// The service answered with an error status.
    #[error("server error {status}: {message}")]
    Server { status: u16, message: String },
}

/// Body of the conflict check endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConflictResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Vec<ConflictPair>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of an action endpoint (auto-schedule).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// The remote scheduling service, as the core consumes it.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` so the controller can be driven
/// from any async runtime.
#[async_trait]
pub trait ScheduleApi: Send + Sync {
    /// Lists every record of a domain. Returns the raw body.
    async fn list(&self, domain: Domain) -> ApiResult<Value>;

    /// Asks the service for the current conflict report.
    async fn check_conflicts(&self) -> ApiResult<ConflictResponse>;

    /// Asks the service to generate a schedule.
    async fn auto_schedule(&self) -> ApiResult<ActionResponse>;
}

/// Typed records plus the shape problem found while decoding, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub records: Records,
    pub warning: Option<ScheduleError>,
}

/// Decodes a `list` body for `domain`.
///
/// `null` is an empty collection. A body that is not an array is an empty
/// collection with a `MalformedResponse` warning. Inside an array every
/// record is decoded on its own: a record that does not decode is skipped
/// and the rest are kept, with one warning for the whole body.
pub fn decode_records(domain: Domain, body: Value) -> Decoded {
    let (records, warning) = match domain {
        Domain::Teachers => {
            let (items, warning) = decode_vec(domain, body);
            (Records::Teachers(items), warning)
        }
        Domain::Classrooms => {
            let (items, warning) = decode_vec(domain, body);
            (Records::Classrooms(items), warning)
        }
        Domain::Courses => {
            let (items, warning) = decode_vec(domain, body);
            (Records::Courses(items), warning)
        }
        Domain::Schedule => {
            let (items, warning) = decode_vec(domain, body);
            (Records::Schedule(items), warning)
        }
    };

    if let Some(err) = &warning {
        warn!(%domain, kept = records.len(), error = %err, "malformed response");
    }
    Decoded { records, warning }
}

fn decode_vec<T: DeserializeOwned>(domain: Domain, body: Value) -> (Vec<T>, Option<ScheduleError>) {
    let items = match body {
        Value::Null => return (Vec::new(), None),
        Value::Array(items) => items,
        other => {
            let err = ScheduleError::MalformedResponse {
                domain,
                message: format!("expected a sequence, got {}", json_kind(&other)),
            };
            return (Vec::new(), Some(err));
        }
    };

    let total = items.len();
    let mut records = Vec::with_capacity(total);
    let mut first_error = None;
    let mut skipped = 0usize;
    for (i, item) in items.into_iter().enumerate() {
        match serde_json::from_value(item) {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!(%domain, index = i, error = %e, "skipping undecodable record");
                skipped += 1;
                first_error.get_or_insert_with(|| format!("record {i}: {e}"));
            }
        }
    }

    let warning = first_error.map(|first| ScheduleError::MalformedResponse {
        domain,
        message: format!("skipped {skipped} of {total} records; {first}"),
    });
    (records, warning)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Canned responses held in memory.
///
/// Every call returns whatever is currently stored for it; setters swap the
/// stored value so a test can change what the "server" returns between
/// calls. Call counters let tests assert that an action did not fetch.
#[derive(Debug, Default)]
pub struct LocalApi {
    inner: Mutex<LocalState>,
}

#[derive(Debug, Default)]
struct LocalState {
    lists: HashMap<Domain, ApiResult<Value>>,
    conflicts: Option<ApiResult<ConflictResponse>>,
    auto_schedule: Option<ApiResult<ActionResponse>>,
    // Entries served after a successful auto-schedule.
    generated: Option<Value>,
    list_calls: HashMap<Domain, usize>,
    conflict_calls: usize,
}

impl LocalApi {
    /// Creates a service with every domain empty and no conflicts.
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> std::sync::MutexGuard<'_, LocalState> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Sets the body served for a domain.
    pub fn with_list(self, domain: Domain, body: Value) -> Self {
        self.set_list(domain, Ok(body));
        self
    }

    /// Sets the conflict report.
    pub fn with_conflicts(self, conflicts: Vec<ConflictPair>) -> Self {
        self.set_conflicts(Ok(ConflictResponse {
            success: true,
            data: conflicts,
            message: None,
        }));
        self
    }

    /// Replaces the response for a domain.
    pub fn set_list(&self, domain: Domain, response: ApiResult<Value>) {
        self.state().lists.insert(domain, response);
    }

    /// Replaces the conflict check response.
    pub fn set_conflicts(&self, response: ApiResult<ConflictResponse>) {
        self.state().conflicts = Some(response);
    }

    /// Replaces the auto-schedule response; on success the schedule domain
    /// starts serving `generated`.
    pub fn set_auto_schedule(&self, response: ApiResult<ActionResponse>, generated: Option<Value>) {
        let mut state = self.state();
        state.auto_schedule = Some(response);
        state.generated = generated;
    }

    /// How many times `list(domain)` was called.
    pub fn list_calls(&self, domain: Domain) -> usize {
        self.state().list_calls.get(&domain).copied().unwrap_or(0)
    }

    /// How many times `check_conflicts` was called.
    pub fn conflict_calls(&self) -> usize {
        self.state().conflict_calls
    }
}

#[async_trait]
impl ScheduleApi for LocalApi {
    async fn list(&self, domain: Domain) -> ApiResult<Value> {
        let mut state = self.state();
        *state.list_calls.entry(domain).or_insert(0) += 1;
        state
            .lists
            .get(&domain)
            .cloned()
            .unwrap_or_else(|| Ok(Value::Array(Vec::new())))
    }

    async fn check_conflicts(&self) -> ApiResult<ConflictResponse> {
        let mut state = self.state();
        state.conflict_calls += 1;
        state.conflicts.clone().unwrap_or_else(|| {
            Ok(ConflictResponse {
                success: true,
                ..Default::default()
            })
        })
    }

    async fn auto_schedule(&self) -> ApiResult<ActionResponse> {
        let mut state = self.state();
        let response = state.auto_schedule.clone().unwrap_or_else(|| {
            Ok(ActionResponse {
                success: true,
                message: None,
            })
        });
        if matches!(response, Ok(ActionResponse { success: true, .. })) {
            if let Some(generated) = state.generated.take() {
                state.lists.insert(Domain::Schedule, Ok(generated));
            }
        }
        response
    }
}
