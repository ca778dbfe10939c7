use crate::model::User;

use super::{
    client::ApiClient,
    types::{ApiError, UserPatch},
};

impl ApiClient {
    /// `GET /admin/users` — every user record, admin only.
    pub async fn admin_users(&self) -> Result<Vec<User>, ApiError> {
        let headers = self.auth_headers()?;
        let response = self
            .http_client()
            .get(format!("{}/admin/users", self.base_url()))
            .headers(headers)
            .send()
            .await
            .map_err(Self::request_error)?;
        self.map_json_response(response).await
    }

    /// `PATCH /admin/users/{id}` — partial update of a user record.
    pub async fn admin_update_user(&self, id: &str, patch: &UserPatch) -> Result<User, ApiError> {
        let headers = self.auth_headers()?;
        let response = self
            .http_client()
            .patch(format!("{}/admin/users/{}", self.base_url(), id))
            .headers(headers)
            .json(patch)
            .send()
            .await
            .map_err(Self::request_error)?;
        self.map_json_response(response).await
    }

    /// `DELETE /admin/users/{id}`.
    pub async fn admin_delete_user(&self, id: &str) -> Result<(), ApiError> {
        let headers = self.auth_headers()?;
        let response = self
            .http_client()
            .delete(format!("{}/admin/users/{}", self.base_url(), id))
            .headers(headers)
            .send()
            .await
            .map_err(Self::request_error)?;
        self.map_empty_response(response).await
    }
}
