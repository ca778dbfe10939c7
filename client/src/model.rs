use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Leave categories offered by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaveType {
    #[default]
    AnnualPaidLeave,
    AnnualUnpaidLeave,
    SickLeave,
    MaternityLeave,
    PaternityLeave,
    AdditionalPaidLeave,
}

impl LeaveType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveType::AnnualPaidLeave => "ANNUAL_PAID_LEAVE",
            LeaveType::AnnualUnpaidLeave => "ANNUAL_UNPAID_LEAVE",
            LeaveType::SickLeave => "SICK_LEAVE",
            LeaveType::MaternityLeave => "MATERNITY_LEAVE",
            LeaveType::PaternityLeave => "PATERNITY_LEAVE",
            LeaveType::AdditionalPaidLeave => "ADDITIONAL_PAID_LEAVE",
        }
    }
}

impl fmt::Display for LeaveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request lifecycle state. `Submitted` is the only non-terminal status.
///
/// Backend variants disagree on spelling (`PENDING`, `CANCELED`, `DECLINED`
/// all appear in the wild), so the aliases normalize them on the way in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    #[serde(alias = "PENDING", alias = "submitted", alias = "pending")]
    Submitted,
    #[serde(alias = "approved")]
    Approved,
    #[serde(alias = "DECLINED", alias = "rejected", alias = "declined")]
    Rejected,
    #[serde(alias = "CANCELED", alias = "cancelled", alias = "canceled")]
    Cancelled,
}

impl RequestStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, RequestStatus::Submitted)
    }

    /// Rejected and cancelled requests never block a new submission.
    pub fn blocks_overlap(self) -> bool {
        matches!(self, RequestStatus::Submitted | RequestStatus::Approved)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Submitted => "SUBMITTED",
            RequestStatus::Approved => "APPROVED",
            RequestStatus::Rejected => "REJECTED",
            RequestStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical leave-request record.
///
/// The REST responses are not consistent about field naming
/// (`startDate`/`start_date`/`from`), so the aliases map every observed
/// variant onto this one shape at the deserialization boundary. Dates stay
/// ISO `YYYY-MM-DD` strings here; the date utilities parse them fail-soft
/// wherever calendar math is needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    pub id: String,
    #[serde(default, alias = "user_id", alias = "userEmail")]
    pub user_id: String,
    #[serde(alias = "start_date", alias = "start", alias = "fromDate", alias = "from")]
    pub start_date: String,
    #[serde(alias = "end_date", alias = "end", alias = "toDate", alias = "to")]
    pub end_date: String,
    #[serde(default, alias = "workdays_count")]
    pub workdays_count: u32,
    #[serde(rename = "type", default, alias = "leaveType", alias = "leave_type")]
    pub leave_type: LeaveType,
    pub status: RequestStatus,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default, alias = "decision_seen")]
    pub decision_seen: bool,
    #[serde(default, alias = "created_at")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "decided_at", alias = "approvedAt")]
    pub decided_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "decided_by_user_id", alias = "approvedByUserId")]
    pub decided_by_user_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[default]
    #[serde(alias = "user")]
    User,
    #[serde(alias = "approver")]
    Approver,
    #[serde(alias = "admin")]
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Approver => "APPROVER",
            Role::Admin => "ADMIN",
        }
    }

    /// Whether this role is allowed to decide on requests at all.
    pub fn can_decide(self) -> bool {
        matches!(self, Role::Approver | Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    #[serde(default, alias = "full_name")]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default, alias = "available_leave_days")]
    pub available_leave_days: i32,
    #[serde(default, alias = "contract_leave_days")]
    pub contract_leave_days: i32,
    #[serde(default, alias = "working_since")]
    pub working_since: Option<String>,
    #[serde(default, alias = "assignee_ids", alias = "assignees")]
    pub assignee_ids: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn leave_request_deserializes_camel_case() {
        let request: LeaveRequest = serde_json::from_value(json!({
            "id": "req-1",
            "userId": "u-1",
            "startDate": "2024-03-01",
            "endDate": "2024-03-05",
            "workdaysCount": 3,
            "type": "SICK_LEAVE",
            "status": "SUBMITTED",
            "comment": "flu",
            "decisionSeen": false,
            "createdAt": "2024-02-20T08:00:00Z"
        }))
        .unwrap();
        assert_eq!(request.user_id, "u-1");
        assert_eq!(request.leave_type, LeaveType::SickLeave);
        assert_eq!(request.status, RequestStatus::Submitted);
        assert!(!request.decision_seen);
    }

    #[test]
    fn leave_request_accepts_snake_case_variants() {
        let request: LeaveRequest = serde_json::from_value(json!({
            "id": "req-2",
            "user_id": "u-2",
            "start_date": "2024-04-01",
            "end_date": "2024-04-02",
            "status": "PENDING",
            "decision_seen": true
        }))
        .unwrap();
        assert_eq!(request.start_date, "2024-04-01");
        assert_eq!(request.status, RequestStatus::Submitted);
        assert!(request.decision_seen);
        assert_eq!(request.leave_type, LeaveType::AnnualPaidLeave);
    }

    #[test]
    fn status_normalizes_alternate_spellings() {
        let cancelled: RequestStatus = serde_json::from_value(json!("CANCELED")).unwrap();
        assert_eq!(cancelled, RequestStatus::Cancelled);
        let rejected: RequestStatus = serde_json::from_value(json!("DECLINED")).unwrap();
        assert_eq!(rejected, RequestStatus::Rejected);
    }

    #[test]
    fn terminal_and_blocking_statuses() {
        assert!(!RequestStatus::Submitted.is_terminal());
        assert!(RequestStatus::Approved.is_terminal());
        assert!(RequestStatus::Submitted.blocks_overlap());
        assert!(RequestStatus::Approved.blocks_overlap());
        assert!(!RequestStatus::Rejected.blocks_overlap());
        assert!(!RequestStatus::Cancelled.blocks_overlap());
    }

    #[test]
    fn user_defaults_missing_fields() {
        let user: User = serde_json::from_value(json!({
            "id": "u-1",
            "fullName": "Ana Petrova",
            "email": "ana@example.com",
            "role": "APPROVER",
            "availableLeaveDays": 18,
            "assigneeIds": ["u-2", "u-3"]
        }))
        .unwrap();
        assert_eq!(user.role, Role::Approver);
        assert!(user.role.can_decide());
        assert_eq!(user.assignee_ids.len(), 2);
        assert_eq!(user.contract_leave_days, 0);
        assert!(user.working_since.is_none());
    }
}
