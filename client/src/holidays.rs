//! Public holiday lookup backed by the Nager.Date API.
//!
//! Holidays are fetched per calendar year and cached for the lifetime of the
//! resolver. Lookups are fail-soft: a year whose fetch fails contributes no
//! holidays for this call and is retried on the next one, so workday counts
//! degrade to weekend-only filtering instead of blocking the user.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use chrono::{Datelike, NaiveDate};
use futures::future::join_all;
use reqwest::Client;
use serde::Deserialize;

use crate::utils::time::parse_iso_date;

pub const DEFAULT_HOLIDAY_API_BASE: &str = "https://date.nager.at/api/v3";

/// One holiday as returned by `GET /PublicHolidays/{year}/{country}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidayEntry {
    pub date: String,
    #[serde(default)]
    pub local_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub types: Option<Vec<String>>,
}

impl HolidayEntry {
    /// Entries without a `types` array are treated as public, matching the
    /// API's behavior for older endpoint versions.
    pub fn is_public(&self) -> bool {
        match &self.types {
            Some(types) => types.iter().any(|t| t == "Public"),
            None => true,
        }
    }
}

/// Raw HTTP access to the holiday API.
#[derive(Clone)]
pub struct HolidayClient {
    client: Client,
    base_url: String,
    country: String,
}

impl HolidayClient {
    pub fn new(base_url: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            country: country.into(),
        }
    }

    /// Fetches the public holidays of one calendar year. Returns `None` on
    /// any transport or decode failure.
    pub async fn fetch_year(&self, year: i32) -> Option<Vec<HolidayEntry>> {
        let url = format!("{}/PublicHolidays/{}/{}", self.base_url, year, self.country);
        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(err) => {
                log::warn!("holiday fetch for {} failed: {}", year, err);
                return None;
            }
        };
        if !response.status().is_success() {
            log::warn!(
                "holiday fetch for {} returned HTTP {}",
                year,
                response.status()
            );
            return None;
        }
        match response.json::<Vec<HolidayEntry>>().await {
            Ok(entries) => Some(entries),
            Err(err) => {
                log::warn!("holiday payload for {} did not parse: {}", year, err);
                None
            }
        }
    }
}

/// Year-keyed holiday cache over a [`HolidayClient`].
pub struct HolidayResolver {
    client: HolidayClient,
    cache: Mutex<HashMap<i32, HashSet<NaiveDate>>>,
}

impl HolidayResolver {
    pub fn new(client: HolidayClient) -> Self {
        Self {
            client,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Public holiday dates covering the inclusive range `start..=end`,
    /// given as ISO `YYYY-MM-DD` strings. Malformed or inverted ranges
    /// resolve to an empty set.
    pub async fn resolve(&self, start: &str, end: &str) -> HashSet<NaiveDate> {
        let (Some(start), Some(end)) = (parse_iso_date(start), parse_iso_date(end)) else {
            return HashSet::new();
        };
        if start > end {
            return HashSet::new();
        }
        self.resolve_years(start.year(), end.year()).await
    }

    /// Union of the public holidays of every year in `first..=last`.
    pub async fn resolve_years(&self, first: i32, last: i32) -> HashSet<NaiveDate> {
        let mut result = HashSet::new();
        let mut missing = Vec::new();
        {
            let cache = match self.cache.lock() {
                Ok(cache) => cache,
                Err(poisoned) => poisoned.into_inner(),
            };
            for year in first..=last {
                match cache.get(&year) {
                    Some(dates) => result.extend(dates.iter().copied()),
                    None => missing.push(year),
                }
            }
        }

        if missing.is_empty() {
            return result;
        }

        let fetched = join_all(missing.iter().map(|&year| self.client.fetch_year(year))).await;

        let mut cache = match self.cache.lock() {
            Ok(cache) => cache,
            Err(poisoned) => poisoned.into_inner(),
        };
        for (year, entries) in missing.into_iter().zip(fetched) {
            // Failed years stay uncached so a later call can retry.
            let Some(entries) = entries else { continue };
            let dates: HashSet<NaiveDate> = entries
                .iter()
                .filter(|entry| entry.is_public())
                .filter_map(|entry| parse_iso_date(&entry.date))
                .collect();
            result.extend(dates.iter().copied());
            cache.insert(year, dates);
        }
        result
    }
}
