use serde_json::json;

use crate::model::{LeaveRequest, Role, User};

use super::{
    client::ApiClient,
    types::{ApiError, CreateLeaveRequest, Decision},
};

fn decide_segment(actor: Role) -> &'static str {
    match actor {
        Role::Admin => "admin",
        _ => "approver",
    }
}

impl ApiClient {
    /// `GET /requests` — the signed-in user's own requests.
    pub async fn get_my_requests(&self) -> Result<Vec<LeaveRequest>, ApiError> {
        let headers = self.auth_headers()?;
        let response = self
            .http_client()
            .get(format!("{}/requests", self.base_url()))
            .headers(headers)
            .send()
            .await
            .map_err(Self::request_error)?;
        self.map_json_response(response).await
    }

    /// `POST /requests` — submit a new leave request.
    pub async fn create_request(
        &self,
        payload: &CreateLeaveRequest,
    ) -> Result<LeaveRequest, ApiError> {
        let headers = self.auth_headers()?;
        let response = self
            .http_client()
            .post(format!("{}/requests", self.base_url()))
            .headers(headers)
            .json(payload)
            .send()
            .await
            .map_err(Self::request_error)?;
        self.map_json_response(response).await
    }

    /// `PATCH /requests/{id}/cancel` — owner cancels a pending request.
    pub async fn cancel_request(&self, id: &str) -> Result<Option<LeaveRequest>, ApiError> {
        let headers = self.auth_headers()?;
        let response = self
            .http_client()
            .patch(format!("{}/requests/{}/cancel", self.base_url(), id))
            .headers(headers)
            .send()
            .await
            .map_err(Self::request_error)?;
        self.map_optional_json_response(response).await
    }

    /// `PATCH /requests/{id}/decision-seen` — owner acknowledges a decision.
    pub async fn mark_decision_seen(&self, id: &str) -> Result<Option<LeaveRequest>, ApiError> {
        let headers = self.auth_headers()?;
        let response = self
            .http_client()
            .patch(format!("{}/requests/{}/decision-seen", self.base_url(), id))
            .headers(headers)
            .send()
            .await
            .map_err(Self::request_error)?;
        self.map_optional_json_response(response).await
    }

    /// `PATCH /{approver|admin}/request/{id}` — approve or reject.
    pub async fn decide_request(
        &self,
        id: &str,
        decision: Decision,
        actor: Role,
    ) -> Result<Option<LeaveRequest>, ApiError> {
        let headers = self.auth_headers()?;
        let response = self
            .http_client()
            .patch(format!(
                "{}/{}/request/{}",
                self.base_url(),
                decide_segment(actor),
                id
            ))
            .headers(headers)
            .json(&json!({ "status": decision }))
            .send()
            .await
            .map_err(Self::request_error)?;
        self.map_optional_json_response(response).await
    }

    /// `GET /approver/assignees` — users this approver may decide for.
    pub async fn approver_assignees(&self) -> Result<Vec<User>, ApiError> {
        let headers = self.auth_headers()?;
        let response = self
            .http_client()
            .get(format!("{}/approver/assignees", self.base_url()))
            .headers(headers)
            .send()
            .await
            .map_err(Self::request_error)?;
        self.map_json_response(response).await
    }

    /// `GET /approver/requests` — all requests across the approver's assignees.
    pub async fn approver_requests(&self) -> Result<Vec<LeaveRequest>, ApiError> {
        let headers = self.auth_headers()?;
        let response = self
            .http_client()
            .get(format!("{}/approver/requests", self.base_url()))
            .headers(headers)
            .send()
            .await
            .map_err(Self::request_error)?;
        self.map_json_response(response).await
    }

    /// `GET /approver/assignee/{id}/requests` — one assignee's requests.
    pub async fn assignee_requests(&self, user_id: &str) -> Result<Vec<LeaveRequest>, ApiError> {
        let headers = self.auth_headers()?;
        let response = self
            .http_client()
            .get(format!(
                "{}/approver/assignee/{}/requests",
                self.base_url(),
                user_id
            ))
            .headers(headers)
            .send()
            .await
            .map_err(Self::request_error)?;
        self.map_json_response(response).await
    }
}
