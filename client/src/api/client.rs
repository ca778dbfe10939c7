use reqwest::{header, Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::auth::TokenStore;
use crate::model::User;

use super::types::ApiError;

/// Thin wrapper over `reqwest` for the leave-management backend.
///
/// Every authenticated call attaches the bearer token from the injected
/// [`TokenStore`]; a 401 response clears the store so the UI drops into its
/// "sign in required" state on the next render.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    credentials: TokenStore,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, credentials: TokenStore) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            credentials,
        }
    }

    pub fn credentials(&self) -> &TokenStore {
        &self.credentials
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn http_client(&self) -> &Client {
        &self.client
    }

    pub(crate) fn auth_headers(&self) -> Result<header::HeaderMap, ApiError> {
        let bearer = self
            .credentials
            .bearer()
            .ok_or_else(|| ApiError::unauthorized("Not signed in."))?;
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            bearer
                .parse()
                .map_err(|_| ApiError::unauthorized("Invalid token format."))?,
        );
        Ok(headers)
    }

    pub(crate) fn request_error(err: reqwest::Error) -> ApiError {
        ApiError::request_failed(format!("Request failed: {}", err))
    }

    fn handle_unauthorized_status(&self, status: StatusCode) -> Result<(), ApiError> {
        if status == StatusCode::UNAUTHORIZED {
            self.credentials.clear();
            return Err(ApiError::unauthorized("Session expired. Sign in again."));
        }
        Ok(())
    }

    async fn error_from_response(response: reqwest::Response) -> ApiError {
        let status = response.status();
        match response.json::<ApiError>().await {
            Ok(err) if !err.error.is_empty() => err,
            _ => ApiError::request_failed(format!("Request failed (HTTP {})", status)),
        }
    }

    pub(crate) async fn map_json_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        self.handle_unauthorized_status(status)?;
        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| ApiError::unknown(format!("Failed to parse response: {}", e)))
        } else {
            Err(Self::error_from_response(response).await)
        }
    }

    /// Like [`map_json_response`], but tolerates mutating endpoints that
    /// confirm with an empty or non-record body; the caller synthesizes the
    /// merged state in that case.
    pub(crate) async fn map_optional_json_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<Option<T>, ApiError> {
        let status = response.status();
        self.handle_unauthorized_status(status)?;
        if status.is_success() {
            let bytes = response
                .bytes()
                .await
                .map_err(|e| ApiError::unknown(format!("Failed to read response: {}", e)))?;
            Ok(serde_json::from_slice(&bytes).ok())
        } else {
            Err(Self::error_from_response(response).await)
        }
    }

    pub(crate) async fn map_empty_response(
        &self,
        response: reqwest::Response,
    ) -> Result<(), ApiError> {
        let status = response.status();
        self.handle_unauthorized_status(status)?;
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::error_from_response(response).await)
        }
    }

    /// `GET /account` — the signed-in user's own record.
    pub async fn get_account(&self) -> Result<User, ApiError> {
        let headers = self.auth_headers()?;
        let response = self
            .client
            .get(format!("{}/account", self.base_url))
            .headers(headers)
            .send()
            .await
            .map_err(Self::request_error)?;
        self.map_json_response(response).await
    }
}
