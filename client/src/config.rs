use anyhow::{bail, Result};

use crate::holidays::DEFAULT_HOLIDAY_API_BASE;

/// Runtime configuration, read from the environment (and `.env` when
/// present).
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the leave-management backend.
    pub api_base_url: String,
    /// Base URL of the public-holiday API.
    pub holiday_api_base_url: String,
    /// ISO 3166-1 alpha-2 country code for holiday lookups.
    pub holiday_country_code: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_base_url = std::env::var("LEAVEDESK_API_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:8080".to_string());
        let holiday_api_base_url = std::env::var("LEAVEDESK_HOLIDAY_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_HOLIDAY_API_BASE.to_string());
        let holiday_country_code =
            std::env::var("LEAVEDESK_HOLIDAY_COUNTRY").unwrap_or_else(|_| "BG".to_string());
        if holiday_country_code.trim().is_empty() {
            bail!("LEAVEDESK_HOLIDAY_COUNTRY must not be empty");
        }

        Ok(Self {
            api_base_url,
            holiday_api_base_url,
            holiday_country_code,
        })
    }
}
