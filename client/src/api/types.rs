use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{LeaveType, RequestStatus};

pub const CODE_VALIDATION: &str = "VALIDATION_ERROR";
pub const CODE_UNAUTHORIZED: &str = "UNAUTHORIZED";
pub const CODE_REQUEST_FAILED: &str = "REQUEST_FAILED";
pub const CODE_UNKNOWN: &str = "UNKNOWN";

/// Error surface shared by local validation and the backend's error bodies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, thiserror::Error)]
#[error("{error}")]
pub struct ApiError {
    pub error: String,
    #[serde(default)]
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ApiError {
    fn with_code(msg: impl Into<String>, code: &str) -> Self {
        Self {
            error: msg.into(),
            code: code.to_string(),
            details: None,
        }
    }

    /// User-correctable problem caught before any network call.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_code(msg, CODE_VALIDATION)
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::with_code(msg, CODE_UNAUTHORIZED)
    }

    /// Transport-level failure (connection refused, timeout, non-JSON body).
    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self::with_code(msg, CODE_REQUEST_FAILED)
    }

    pub fn unknown(msg: impl Into<String>) -> Self {
        Self::with_code(msg, CODE_UNKNOWN)
    }

    pub fn is_validation(&self) -> bool {
        self.code == CODE_VALIDATION
    }

    pub fn is_unauthorized(&self) -> bool {
        self.code == CODE_UNAUTHORIZED
    }
}

/// Body for `POST /requests`. The workday count is a client-side preview;
/// the server recomputes the authoritative value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeaveRequest {
    #[serde(rename = "type")]
    pub leave_type: LeaveType,
    pub start_date: String,
    pub end_date: String,
    pub workdays_count: u32,
    pub comment: Option<String>,
}

/// Approver/admin verdict sent in `PATCH /{approver|admin}/request/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    Approved,
    Rejected,
}

impl Decision {
    pub fn status(self) -> RequestStatus {
        match self {
            Decision::Approved => RequestStatus::Approved,
            Decision::Rejected => RequestStatus::Rejected,
        }
    }
}

/// Partial update for `PATCH /admin/users/{id}`; absent fields are untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<crate::model::Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_leave_days: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_leave_days: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_since: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_ids: Option<Vec<String>>,
}
