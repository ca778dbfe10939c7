//! Orchestration between the backend API, the holiday resolver, and the
//! local [`RequestStore`].

use crate::api::{ApiClient, ApiError, CreateLeaveRequest, Decision};
use crate::holidays::HolidayResolver;
use crate::model::{LeaveRequest, LeaveType, Role};
use crate::utils::overlap::has_overlap_with_requests;
use crate::utils::time::{count_workdays, parse_iso_date};

use super::store::RequestStore;

/// User input for a new leave request, before validation.
#[derive(Debug, Clone, Default)]
pub struct LeaveDraft {
    pub leave_type: LeaveType,
    pub start_date: String,
    pub end_date: String,
    pub comment: Option<String>,
}

/// Owns the request list and applies every mutation to it.
///
/// Mutations follow a confirm-then-merge flow: the store only changes after
/// the backend accepts the call, except for the deliberately optimistic
/// [`mark_seen`](RequestsService::mark_seen).
pub struct RequestsService {
    client: ApiClient,
    holidays: HolidayResolver,
    store: RequestStore,
}

impl RequestsService {
    pub fn new(client: ApiClient, holidays: HolidayResolver) -> Self {
        Self {
            client,
            holidays,
            store: RequestStore::new(),
        }
    }

    pub fn store(&self) -> &RequestStore {
        &self.store
    }

    /// Refetches the signed-in user's requests and replaces the store. On
    /// failure the previous snapshot stays visible.
    pub async fn refresh(&mut self) -> Result<(), ApiError> {
        let items = self.client.get_my_requests().await?;
        self.store.replace_all(items);
        Ok(())
    }

    /// Validates a draft and returns its workday count.
    ///
    /// Checks run in order: both dates present, both parse, range not
    /// inverted, at least one workday once weekends and public holidays are
    /// excluded, and no overlap with an existing submitted or approved
    /// request.
    pub async fn validate_draft(&self, draft: &LeaveDraft) -> Result<u32, ApiError> {
        if draft.start_date.trim().is_empty() || draft.end_date.trim().is_empty() {
            return Err(ApiError::validation("Select both start and end dates."));
        }
        let (Some(start), Some(end)) = (
            parse_iso_date(&draft.start_date),
            parse_iso_date(&draft.end_date),
        ) else {
            return Err(ApiError::validation("Dates must be in YYYY-MM-DD format."));
        };
        if start > end {
            return Err(ApiError::validation("Start date cannot be after end date."));
        }

        let holidays = self
            .holidays
            .resolve(&draft.start_date, &draft.end_date)
            .await;
        let workdays = count_workdays(&draft.start_date, &draft.end_date, &holidays);
        if workdays == 0 {
            return Err(ApiError::validation(
                "Selected range contains no workdays (Mon-Fri).",
            ));
        }

        if has_overlap_with_requests(&draft.start_date, &draft.end_date, self.store.items()) {
            return Err(ApiError::validation(
                "This request overlaps with an existing leave request.",
            ));
        }
        Ok(workdays)
    }

    /// Validates and submits a draft, then adds the created record to the
    /// store. Nothing is stored when either step fails.
    pub async fn submit(&mut self, draft: &LeaveDraft) -> Result<LeaveRequest, ApiError> {
        let workdays_count = self.validate_draft(draft).await?;
        let payload = CreateLeaveRequest {
            leave_type: draft.leave_type,
            start_date: draft.start_date.clone(),
            end_date: draft.end_date.clone(),
            workdays_count,
            comment: draft.comment.clone(),
        };
        let created = self.client.create_request(&payload).await?;
        self.store.upsert(created.clone());
        Ok(created)
    }

    /// Cancels a request. Returns whether the store changed.
    pub async fn cancel(&mut self, id: &str) -> bool {
        match self.client.cancel_request(id).await {
            Ok(Some(updated)) => self.store.merge_server_update(updated),
            Ok(None) => self.store.synthesize(id, |req| {
                req.status = crate::model::RequestStatus::Cancelled;
            }),
            Err(err) => {
                log::error!("cancel of {} failed: {}", id, err);
                false
            }
        }
    }

    /// Approves or rejects a request on behalf of `actor`. A freshly decided
    /// request is unseen again, so the owner's list surfaces it.
    pub async fn decide(&mut self, id: &str, decision: Decision, actor: Role) -> bool {
        match self.client.decide_request(id, decision, actor).await {
            Ok(Some(updated)) => self.store.merge_server_update(updated),
            Ok(None) => self.store.synthesize(id, |req| {
                req.status = decision.status();
                req.decision_seen = false;
            }),
            Err(err) => {
                log::error!("decision on {} failed: {}", id, err);
                false
            }
        }
    }

    /// Acknowledges a decision. The flag flips locally before the call so
    /// the highlight clears immediately; if the backend later rejects the
    /// acknowledgement the optimistic flag is kept and the next refresh
    /// reconciles.
    pub async fn mark_seen(&mut self, id: &str) -> bool {
        let applied = self.store.apply_optimistic_seen(id);
        match self.client.mark_decision_seen(id).await {
            Ok(Some(updated)) => {
                self.store.merge_server_update(updated);
            }
            Ok(None) => {
                self.store.synthesize(id, |req| req.decision_seen = true);
            }
            Err(err) => {
                log::error!("decision-seen acknowledgement for {} failed: {}", id, err);
            }
        }
        applied
    }
}
