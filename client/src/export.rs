//! Projection of requests and users into flat export rows, plus CSV
//! rendering.
//!
//! Rows carry `Option<String>` cells so "no value" survives projection and
//! sorts below every present value; the CSV writer renders it as an empty
//! cell.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::NaiveDate;

use crate::model::{LeaveRequest, User};
use crate::utils::overlap::overlaps_window;

pub const REQUEST_FIELDS_DEFAULT: &[&str] = &[
    "assigneeName",
    "startDate",
    "endDate",
    "workdaysCount",
    "status",
    "type",
];

pub const REQUEST_FIELDS_ALL: &[&str] = &[
    "requestId",
    "assigneeId",
    "assigneeName",
    "assigneeEmail",
    "startDate",
    "endDate",
    "workdaysCount",
    "status",
    "type",
    "comment",
    "decidedBy",
    "decidedAt",
];

pub const USER_FIELDS_DEFAULT: &[&str] = &["fullName", "email", "role", "availableLeaveDays"];

pub const USER_FIELDS_ALL: &[&str] = &[
    "userId",
    "fullName",
    "email",
    "role",
    "availableLeaveDays",
    "contractLeaveDays",
    "workingSince",
    "assigneeIds",
];

/// Human-readable column header for a field key. Unknown keys fall back to
/// the raw key so a new field never exports headerless.
pub fn header_label(field: &str) -> &str {
    match field {
        "requestId" => "Request ID",
        "assigneeId" => "Assignee ID",
        "assigneeName" => "Assignee",
        "assigneeEmail" => "Email",
        "startDate" => "Start date",
        "endDate" => "End date",
        "workdaysCount" => "Workdays",
        "status" => "Status",
        "type" => "Leave type",
        "comment" => "Comment",
        "decidedBy" => "Decided by",
        "decidedAt" => "Decided at",
        "userId" => "User ID",
        "fullName" => "Full name",
        "email" => "Email",
        "role" => "Role",
        "availableLeaveDays" => "Available days",
        "contractLeaveDays" => "Contract days",
        "workingSince" => "Working since",
        "assigneeIds" => "Assignees",
        other => other,
    }
}

/// One flat export row, keyed by field name.
#[derive(Debug, Clone, Default)]
pub struct ExportRow {
    values: HashMap<String, Option<String>>,
}

impl ExportRow {
    fn set(&mut self, field: &str, value: Option<String>) {
        self.values.insert(field.to_string(), value);
    }

    pub fn value(&self, field: &str) -> Option<&str> {
        self.values.get(field).and_then(|v| v.as_deref())
    }
}

/// Inclusive date window restricting which requests are exported. Open
/// bounds select everything on that side.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportWindow {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Optional ordering of export rows by one field.
#[derive(Debug, Clone)]
pub struct ExportSort {
    pub field: String,
    pub direction: SortDirection,
}

/// Flattens requests into export rows, joining assignee and decider details
/// from the user list, filtered to the window and sorted when requested.
pub fn project_request_rows(
    requests: &[LeaveRequest],
    users: &[User],
    window: ExportWindow,
    sort: Option<&ExportSort>,
) -> Vec<ExportRow> {
    let by_id: HashMap<&str, &User> = users.iter().map(|user| (user.id.as_str(), user)).collect();

    let mut rows: Vec<ExportRow> = requests
        .iter()
        .filter(|request| {
            overlaps_window(
                &request.start_date,
                &request.end_date,
                window.from,
                window.to,
            )
        })
        .map(|request| {
            let assignee = by_id.get(request.user_id.as_str()).copied();
            let mut row = ExportRow::default();
            row.set("requestId", Some(request.id.clone()));
            row.set("assigneeId", Some(request.user_id.clone()));
            row.set(
                "assigneeName",
                Some(
                    assignee
                        .map(|user| user.full_name.clone())
                        .filter(|name| !name.is_empty())
                        .unwrap_or_else(|| request.user_id.clone()),
                ),
            );
            row.set("assigneeEmail", assignee.map(|user| user.email.clone()));
            row.set("startDate", Some(request.start_date.clone()));
            row.set("endDate", Some(request.end_date.clone()));
            row.set("workdaysCount", Some(request.workdays_count.to_string()));
            row.set("status", Some(request.status.to_string()));
            row.set("type", Some(request.leave_type.to_string()));
            row.set("comment", request.comment.clone());
            row.set(
                "decidedBy",
                request.decided_by_user_id.as_ref().map(|decider_id| {
                    by_id
                        .get(decider_id.as_str())
                        .map(|user| user.full_name.clone())
                        .filter(|name| !name.is_empty())
                        .unwrap_or_else(|| decider_id.clone())
                }),
            );
            row.set(
                "decidedAt",
                request.decided_at.map(|at| at.to_rfc3339()),
            );
            row
        })
        .collect();

    if let Some(sort) = sort {
        sort_rows(&mut rows, sort);
    }
    rows
}

/// Flattens users into export rows, ordered by full name.
pub fn project_user_rows(users: &[User]) -> Vec<ExportRow> {
    let mut users: Vec<&User> = users.iter().collect();
    users.sort_by(|a, b| a.full_name.cmp(&b.full_name));

    users
        .into_iter()
        .map(|user| {
            let mut row = ExportRow::default();
            row.set("userId", Some(user.id.clone()));
            row.set("fullName", Some(user.full_name.clone()));
            row.set("email", Some(user.email.clone()));
            row.set("role", Some(user.role.to_string()));
            row.set(
                "availableLeaveDays",
                Some(user.available_leave_days.to_string()),
            );
            row.set(
                "contractLeaveDays",
                Some(user.contract_leave_days.to_string()),
            );
            row.set("workingSince", user.working_since.clone());
            row.set(
                "assigneeIds",
                if user.assignee_ids.is_empty() {
                    None
                } else {
                    Some(user.assignee_ids.join("; "))
                },
            );
            row
        })
        .collect()
}

/// Stable sort on one field. Absent values compare below every present
/// value in both directions; two absent values are equal.
fn sort_rows(rows: &mut [ExportRow], sort: &ExportSort) {
    rows.sort_by(|a, b| {
        let ordering = match (a.value(&sort.field), b.value(&sort.field)) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(a), Some(b)) => a.cmp(b),
        };
        match sort.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

/// Renders rows into CSV bytes with a UTF-8 BOM so spreadsheet tools detect
/// the encoding. Absent cells render empty.
pub fn render_csv(rows: &[ExportRow], fields: &[&str]) -> anyhow::Result<Vec<u8>> {
    let mut buffer = Vec::new();
    buffer.extend_from_slice(b"\xef\xbb\xbf");
    {
        let mut writer = csv::Writer::from_writer(&mut buffer);
        writer.write_record(fields.iter().map(|field| header_label(field)))?;
        for row in rows {
            writer.write_record(fields.iter().map(|field| row.value(field).unwrap_or("")))?;
        }
        writer.flush()?;
    }
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LeaveType, RequestStatus, Role};
    use crate::utils::time::parse_iso_date;
    use chrono::{TimeZone, Utc};

    fn user(id: &str, name: &str) -> User {
        User {
            id: id.to_string(),
            full_name: name.to_string(),
            email: format!("{}@example.com", id),
            role: Role::User,
            available_leave_days: 20,
            contract_leave_days: 20,
            working_since: None,
            assignee_ids: Vec::new(),
        }
    }

    fn request(id: &str, user_id: &str, start: &str, end: &str) -> LeaveRequest {
        LeaveRequest {
            id: id.to_string(),
            user_id: user_id.to_string(),
            start_date: start.to_string(),
            end_date: end.to_string(),
            workdays_count: 3,
            leave_type: LeaveType::AnnualPaidLeave,
            status: RequestStatus::Approved,
            comment: None,
            decision_seen: true,
            created_at: None,
            decided_at: None,
            decided_by_user_id: None,
        }
    }

    #[test]
    fn window_filters_rows() {
        let requests = vec![
            request("in", "u-1", "2024-01-10", "2024-01-20"),
            request("out", "u-1", "2024-03-01", "2024-03-05"),
        ];
        let window = ExportWindow {
            from: parse_iso_date("2024-01-15"),
            to: parse_iso_date("2024-01-16"),
        };
        let rows = project_request_rows(&requests, &[user("u-1", "Ana")], window, None);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].value("requestId"), Some("in"));
    }

    #[test]
    fn assignee_and_decider_are_resolved_with_fallbacks() {
        let mut req = request("r", "u-1", "2024-01-10", "2024-01-12");
        req.decided_by_user_id = Some("u-ghost".to_string());
        req.decided_at = Utc.with_ymd_and_hms(2024, 1, 9, 10, 0, 0).single();
        let orphan = request("o", "u-unknown", "2024-01-10", "2024-01-12");

        let rows = project_request_rows(
            &[req, orphan],
            &[user("u-1", "Ana Petrova")],
            ExportWindow::default(),
            None,
        );
        assert_eq!(rows[0].value("assigneeName"), Some("Ana Petrova"));
        assert_eq!(rows[0].value("assigneeEmail"), Some("u-1@example.com"));
        // decider not in the user list keeps the raw id
        assert_eq!(rows[0].value("decidedBy"), Some("u-ghost"));
        assert!(rows[0].value("decidedAt").is_some());
        // unknown assignee falls back to the id, email stays absent
        assert_eq!(rows[1].value("assigneeName"), Some("u-unknown"));
        assert!(rows[1].value("assigneeEmail").is_none());
        assert!(rows[1].value("decidedBy").is_none());
    }

    #[test]
    fn absent_values_sort_below_present_in_both_directions() {
        let mut with_comment = request("a", "u-1", "2024-01-10", "2024-01-12");
        with_comment.comment = Some("trip".to_string());
        let without_comment = request("b", "u-1", "2024-01-10", "2024-01-12");

        let sort = |direction| {
            project_request_rows(
                &[with_comment.clone(), without_comment.clone()],
                &[],
                ExportWindow::default(),
                Some(&ExportSort {
                    field: "comment".to_string(),
                    direction,
                }),
            )
        };

        let asc = sort(SortDirection::Ascending);
        assert_eq!(asc[0].value("requestId"), Some("b"));
        let desc = sort(SortDirection::Descending);
        assert_eq!(desc[0].value("requestId"), Some("a"));
    }

    #[test]
    fn user_rows_sort_by_name_and_join_assignees() {
        let mut approver = user("u-2", "Boris");
        approver.role = Role::Approver;
        approver.assignee_ids = vec!["u-1".to_string(), "u-3".to_string()];
        let rows = project_user_rows(&[approver, user("u-1", "Ana")]);
        assert_eq!(rows[0].value("fullName"), Some("Ana"));
        assert_eq!(rows[1].value("assigneeIds"), Some("u-1; u-3"));
        assert!(rows[0].value("assigneeIds").is_none());
    }

    #[test]
    fn header_labels_fall_back_to_raw_key() {
        assert_eq!(header_label("workdaysCount"), "Workdays");
        assert_eq!(header_label("somethingNew"), "somethingNew");
    }

    #[test]
    fn csv_output_has_bom_and_quotes_special_cells() {
        let mut req = request("r", "u-1", "2024-01-10", "2024-01-12");
        req.comment = Some("Hello, \"World\"".to_string());
        let rows = project_request_rows(&[req], &[], ExportWindow::default(), None);

        let bytes = render_csv(&rows, &["requestId", "comment"]).unwrap();
        assert_eq!(&bytes[..3], b"\xef\xbb\xbf");

        let mut reader = csv::Reader::from_reader(&bytes[3..]);
        let headers = reader.headers().unwrap().clone();
        assert_eq!(&headers[0], "Request ID");
        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(&record[1], "Hello, \"World\"");
    }
}
