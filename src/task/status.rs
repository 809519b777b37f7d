//! Task status model normalized from raw API payloads.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Lifecycle state of a remote task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskState {
    /// Accepted but not yet scheduled.
    NotStart,
    /// Submitted to the backend.
    Submitted,
    /// Waiting in the backend queue.
    Queued,
    /// Currently generating.
    InProgress,
    /// Finished successfully; outputs are available.
    Success,
    /// Finished with an error.
    Failure,
    /// Missing or unrecognized status.
    #[default]
    Unknown,
}

impl TaskState {
    /// Parses a wire status, ignoring case. Unrecognized values map to `Unknown`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "NOT_START" => Self::NotStart,
            "SUBMITTED" => Self::Submitted,
            "QUEUED" => Self::Queued,
            "IN_PROGRESS" => Self::InProgress,
            "SUCCESS" => Self::Success,
            "FAILURE" => Self::Failure,
            _ => Self::Unknown,
        }
    }

    /// Returns the wire name of this state.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStart => "NOT_START",
            Self::Submitted => "SUBMITTED",
            Self::Queued => "QUEUED",
            Self::InProgress => "IN_PROGRESS",
            Self::Success => "SUCCESS",
            Self::Failure => "FAILURE",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// True for the states the backend reports before a task finishes.
    pub fn is_processing(&self) -> bool {
        matches!(
            self,
            Self::NotStart | Self::Submitted | Self::Queued | Self::InProgress
        )
    }

    /// True for `Success` and `Failure`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success | Self::Failure)
    }
}

impl std::fmt::Display for TaskState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of a remote task, built from one status response.
///
/// Construction never fails: missing or mistyped fields fall back to
/// defaults, and the untouched payload is kept in `raw_response`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub struct TaskStatus {
    /// Envelope status code (`"unknown"` when absent).
    pub code: String,
    /// Envelope message.
    pub message: String,
    /// Task identifier.
    pub task_id: String,
    /// Action the task performs, as reported by the API.
    pub action: String,
    /// Normalized lifecycle state.
    pub status: TaskState,
    /// Output URLs or payloads; the first one is the primary result.
    pub outputs: Vec<String>,
    /// Failure description, set when the task failed.
    pub fail_reason: Option<String>,
    /// Progress as reported, e.g. `"42%"`.
    pub progress: Option<String>,
    /// When the task was submitted.
    pub submit_time: Option<i64>,
    /// When processing started.
    pub start_time: Option<i64>,
    /// When processing finished.
    pub finish_time: Option<i64>,
    /// The unmodified response payload.
    pub raw_response: Value,
}

impl TaskStatus {
    /// Normalizes a raw status response.
    pub fn from_response(raw: Value) -> Self {
        let empty = Map::new();
        let envelope = raw.as_object().unwrap_or(&empty);
        let data = envelope
            .get("data")
            .and_then(Value::as_object)
            .unwrap_or(&empty);

        let outputs = data
            .get("outputs")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_owned))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            code: string_or_number(envelope, "code").unwrap_or_else(|| "unknown".into()),
            message: non_empty_str(envelope, "message").unwrap_or_default(),
            task_id: string_or_number(data, "task_id").unwrap_or_default(),
            action: non_empty_str(data, "action").unwrap_or_default(),
            status: data
                .get("status")
                .and_then(Value::as_str)
                .map(TaskState::parse)
                .unwrap_or_default(),
            outputs,
            fail_reason: non_empty_str(data, "fail_reason"),
            progress: non_empty_str(data, "progress"),
            submit_time: timestamp(data, "submit_time"),
            start_time: timestamp(data, "start_time"),
            finish_time: timestamp(data, "finish_time"),
            raw_response: raw,
        }
    }

    /// The primary output, if the task produced any.
    pub fn result(&self) -> Option<&str> {
        self.outputs.first().map(String::as_str)
    }

    /// Progress as an integer percentage. `None` if absent or unparseable.
    ///
    /// Only whole integers are accepted: `"42.5%"` yields `None`.
    pub fn progress_percent(&self) -> Option<i32> {
        let progress = self.progress.as_deref()?.trim();
        let digits = progress.strip_suffix('%').unwrap_or(progress);
        digits.trim().parse().ok()
    }

    /// True once the task finished successfully.
    pub fn is_completed(&self) -> bool {
        self.status == TaskState::Success
    }

    /// True once the task finished with an error.
    pub fn is_failed(&self) -> bool {
        self.status == TaskState::Failure
    }

    /// True while the backend is still working on the task.
    pub fn is_processing(&self) -> bool {
        self.status.is_processing()
    }

    /// True for completed or failed tasks.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

impl From<Value> for TaskStatus {
    fn from(raw: Value) -> Self {
        Self::from_response(raw)
    }
}

/// Result of a submission call.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub struct GenerationResponse {
    /// Identifier of the created task (`task_id`, falling back to `id`).
    pub task_id: String,
    /// The unmodified response payload.
    pub raw_response: Value,
}

impl GenerationResponse {
    /// Extracts the task identifier from a raw submission response.
    pub fn from_response(raw: Value) -> Self {
        let empty = Map::new();
        let obj = raw.as_object().unwrap_or(&empty);
        let task_id = string_or_number(obj, "task_id")
            .or_else(|| string_or_number(obj, "id"))
            .unwrap_or_default();

        Self {
            task_id,
            raw_response: raw,
        }
    }
}

impl From<Value> for GenerationResponse {
    fn from(raw: Value) -> Self {
        Self::from_response(raw)
    }
}

fn non_empty_str(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

// Identifiers and codes may arrive as numbers; those are stringified.
fn string_or_number(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

// Timestamps are numbers on the wire; fractional values are truncated.
fn timestamp(obj: &Map<String, Value>, key: &str) -> Option<i64> {
    let value = obj.get(key)?;
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f as i64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const VOCABULARY: [&str; 7] = [
        "NOT_START",
        "SUBMITTED",
        "QUEUED",
        "IN_PROGRESS",
        "SUCCESS",
        "FAILURE",
        "UNKNOWN",
    ];

    fn status_with(data: Value) -> TaskStatus {
        TaskStatus::from_response(json!({"code": "success", "message": "ok", "data": data}))
    }

    #[test]
    fn test_missing_data_defaults() {
        let status = TaskStatus::from_response(json!({"code": "success"}));
        assert_eq!(status.status, TaskState::Unknown);
        assert!(status.outputs.is_empty());
        assert!(status.fail_reason.is_none());
        assert!(status.progress.is_none());
        assert!(status.submit_time.is_none());
        assert!(status.start_time.is_none());
        assert!(status.finish_time.is_none());
        assert!(status.result().is_none());
        assert!(status.progress_percent().is_none());
    }

    #[test]
    fn test_envelope_defaults() {
        let status = TaskStatus::from_response(json!({}));
        assert_eq!(status.code, "unknown");
        assert_eq!(status.message, "");
        assert_eq!(status.task_id, "");
        assert_eq!(status.action, "");
    }

    #[test]
    fn test_non_object_payload() {
        for raw in [json!(null), json!("oops"), json!([1, 2, 3]), json!(42)] {
            let status = TaskStatus::from_response(raw.clone());
            assert_eq!(status.status, TaskState::Unknown);
            assert!(status.outputs.is_empty());
            assert_eq!(status.code, "unknown");
            assert_eq!(status.raw_response, raw);
        }
    }

    #[test]
    fn test_non_object_data() {
        let status = TaskStatus::from_response(json!({"code": "success", "data": "nope"}));
        assert_eq!(status.code, "success");
        assert_eq!(status.status, TaskState::Unknown);
    }

    #[test]
    fn test_full_payload() {
        let raw = json!({
            "code": "success",
            "message": "",
            "data": {
                "task_id": "task-123",
                "action": "image_generation",
                "status": "SUCCESS",
                "outputs": ["https://cdn.siray.ai/a.png", "https://cdn.siray.ai/b.png"],
                "progress": "100%",
                "submit_time": 1_700_000_000,
                "start_time": 1_700_000_005,
                "finish_time": 1_700_000_042
            }
        });
        let status = TaskStatus::from_response(raw.clone());

        assert_eq!(status.task_id, "task-123");
        assert_eq!(status.action, "image_generation");
        assert!(status.is_completed());
        assert_eq!(status.result(), Some("https://cdn.siray.ai/a.png"));
        assert_eq!(status.progress_percent(), Some(100));
        assert_eq!(status.submit_time, Some(1_700_000_000));
        assert_eq!(status.start_time, Some(1_700_000_005));
        assert_eq!(status.finish_time, Some(1_700_000_042));
        assert_eq!(status.raw_response, raw);
    }

    #[test]
    fn test_failure_payload() {
        let status = status_with(json!({
            "status": "FAILURE",
            "fail_reason": "content policy violation"
        }));
        assert!(status.is_failed());
        assert!(status.is_terminal());
        assert_eq!(status.fail_reason.as_deref(), Some("content policy violation"));
        assert!(status.result().is_none());
    }

    #[test]
    fn test_case_insensitive_status() {
        for raw in ["success", "Success", "SUCCESS"] {
            assert!(status_with(json!({"status": raw})).is_completed(), "{raw}");
        }
        assert!(status_with(json!({"status": "failure"})).is_failed());
        assert!(status_with(json!({"status": "in_progress"})).is_processing());
    }

    #[test]
    fn test_predicates_mutually_exclusive() {
        for name in VOCABULARY {
            for variant in [name.to_string(), name.to_lowercase()] {
                let status = status_with(json!({"status": &variant}));
                let hits = [
                    status.is_completed(),
                    status.is_failed(),
                    status.is_processing(),
                ]
                .iter()
                .filter(|b| **b)
                .count();
                let expected = if name == "UNKNOWN" { 0 } else { 1 };
                assert_eq!(hits, expected, "{variant}");
            }
        }
    }

    #[test]
    fn test_unrecognized_status_is_unknown() {
        for raw in [json!("DONE"), json!(""), json!(7), json!(null)] {
            let status = status_with(json!({"status": raw}));
            assert_eq!(status.status, TaskState::Unknown);
            assert!(!status.is_completed() && !status.is_failed() && !status.is_processing());
        }
    }

    #[test]
    fn test_progress_percent() {
        assert_eq!(status_with(json!({"progress": "42%"})).progress_percent(), Some(42));
        assert_eq!(status_with(json!({"progress": "7"})).progress_percent(), Some(7));
        assert_eq!(status_with(json!({})).progress_percent(), None);
        assert_eq!(status_with(json!({"progress": "abc"})).progress_percent(), None);
        assert_eq!(status_with(json!({"progress": "%"})).progress_percent(), None);
    }

    #[test]
    fn test_progress_percent_whole_integers_only() {
        assert_eq!(status_with(json!({"progress": "-5%"})).progress_percent(), Some(-5));
        assert_eq!(status_with(json!({"progress": "42.5%"})).progress_percent(), None);
        assert_eq!(status_with(json!({"progress": "42%abc"})).progress_percent(), None);
    }

    #[test]
    fn test_numeric_code_and_task_id_stringified() {
        let status = TaskStatus::from_response(json!({
            "code": 200,
            "data": {"task_id": 12345, "status": "SUCCESS"}
        }));
        assert_eq!(status.code, "200");
        assert_eq!(status.task_id, "12345");

        let submitted = GenerationResponse::from_response(json!({"task_id": 12345}));
        assert_eq!(submitted.task_id, status.task_id);
    }

    #[test]
    fn test_non_scalar_task_id_ignored() {
        let status = status_with(json!({"task_id": {"nested": 1}}));
        assert_eq!(status.task_id, "");
    }

    #[test]
    fn test_outputs_skip_non_strings() {
        let status = status_with(json!({"outputs": [1, "https://x/y.mp4", null]}));
        assert_eq!(status.outputs, vec!["https://x/y.mp4".to_string()]);
        assert_eq!(status.result(), Some("https://x/y.mp4"));

        let status = status_with(json!({"outputs": "not-a-list"}));
        assert!(status.outputs.is_empty());
    }

    #[test]
    fn test_fractional_timestamp_truncated() {
        let status = status_with(json!({"submit_time": 1700000000.75}));
        assert_eq!(status.submit_time, Some(1_700_000_000));
    }

    #[test]
    fn test_deserialize_via_serde() {
        let status: TaskStatus =
            serde_json::from_str(r#"{"code":"success","data":{"status":"queued"}}"#).unwrap();
        assert_eq!(status.status, TaskState::Queued);
        assert_eq!(status.code, "success");
    }

    #[test]
    fn test_task_state_round_trip_names() {
        for name in VOCABULARY {
            assert_eq!(TaskState::parse(name).as_str(), name);
        }
        assert_eq!(TaskState::InProgress.to_string(), "IN_PROGRESS");
    }

    #[test]
    fn test_generation_response_task_id() {
        let resp = GenerationResponse::from_response(json!({"task_id": "abc"}));
        assert_eq!(resp.task_id, "abc");
    }

    #[test]
    fn test_generation_response_id_fallback() {
        let resp = GenerationResponse::from_response(json!({"id": "xyz", "object": "task"}));
        assert_eq!(resp.task_id, "xyz");

        let resp = GenerationResponse::from_response(json!({"task_id": "", "id": 991}));
        assert_eq!(resp.task_id, "991");
    }

    #[test]
    fn test_generation_response_missing_id() {
        let raw = json!({"status": "ok"});
        let resp = GenerationResponse::from_response(raw.clone());
        assert_eq!(resp.task_id, "");
        assert_eq!(resp.raw_response, raw);
    }
}
