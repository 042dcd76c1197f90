//! HTTP client for the public contributions API
//!
//! `GET {base_url}/v4/{account}?y={year}` returns
//! `{"contributions": [{"date": "YYYY-MM-DD", "count": n, ...}, ...]}`.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use serde::Deserialize;
use tokio::task::JoinSet;

use crate::config::SourceConfig;
use crate::error::{Error, Result};
use crate::types::{DailyContributionTable, SourceSeries};

/// Response body of the contributions endpoint
#[derive(Debug, Deserialize)]
pub(crate) struct ContributionsResponse {
    /// One entry per day; absent when the account has no history
    #[serde(default)]
    pub contributions: Vec<ContributionDay>,
}

/// A single day in [`ContributionsResponse`]
#[derive(Debug, Deserialize)]
pub(crate) struct ContributionDay {
    pub date: String,
    pub count: u64,
}

impl ContributionsResponse {
    pub(crate) fn into_table(self) -> DailyContributionTable {
        DailyContributionTable::from_entries(
            self.contributions
                .into_iter()
                .map(|day| (day.date, day.count)),
        )
    }
}

/// Client for the contributions API
#[derive(Debug, Clone)]
pub struct ContributionsClient {
    http_client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl ContributionsClient {
    /// Create a new client from configuration
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: &SourceConfig) -> Result<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|e| Error::Config(format!("invalid user_agent: {}", e)))?,
        );

        let timeout = Duration::from_secs(config.timeout_secs);
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Fetch one account's daily counts, optionally limited to `year`.
    ///
    /// The `contribstreak` binary always passes `None` and fetches full
    /// history, so that streaks crossing January 1 are not cut off; `year`
    /// is for callers that only need one year's heatmap.
    pub async fn fetch_account(
        &self,
        account: &str,
        year: Option<i32>,
    ) -> Result<DailyContributionTable> {
        let url = format!("{}/v4/{}", self.base_url, urlencoding::encode(account));

        let mut request = self.http_client.get(&url);
        if let Some(year) = year {
            request = request.query(&[("y", year)]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::fetch(account, format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown".to_string());
            return Err(Error::fetch(
                account,
                format!("API error ({}): {}", status, error_text),
            ));
        }

        let body: ContributionsResponse = response
            .json()
            .await
            .map_err(|e| Error::fetch(account, format!("failed to parse response: {}", e)))?;

        let table = body.into_table();
        tracing::debug!(account, days = table.len(), total = table.total(), "Fetched contributions");
        Ok(table)
    }

    /// Fetch every account concurrently.
    ///
    /// Each account is bounded by the configured timeout. A failed or timed
    /// out account becomes an empty, degraded series so the others still
    /// aggregate. Output order matches `accounts`.
    pub async fn fetch_all(&self, accounts: &[String], year: Option<i32>) -> Vec<SourceSeries> {
        let mut tasks = JoinSet::new();

        for (index, account) in accounts.iter().enumerate() {
            let client = self.clone();
            let account = account.clone();
            tasks.spawn(async move {
                let outcome =
                    tokio::time::timeout(client.timeout, client.fetch_account(&account, year))
                        .await;
                (index, account, outcome)
            });
        }

        let mut slots: Vec<Option<SourceSeries>> = vec![None; accounts.len()];

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, account, Ok(Ok(table)))) => {
                    slots[index] = Some(SourceSeries::new(account, table));
                }
                Ok((index, account, Ok(Err(e)))) => {
                    tracing::warn!(account = %account, error = %e, "Fetch failed, using empty series");
                    slots[index] = Some(SourceSeries::degraded(account));
                }
                Ok((index, account, Err(_))) => {
                    tracing::warn!(
                        account = %account,
                        timeout_secs = self.timeout.as_secs(),
                        "Fetch timed out, using empty series"
                    );
                    slots[index] = Some(SourceSeries::degraded(account));
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Fetch task aborted");
                }
            }
        }

        slots
            .into_iter()
            .zip(accounts)
            .map(|(slot, account)| slot.unwrap_or_else(|| SourceSeries::degraded(account.as_str())))
            .collect()
    }
}
