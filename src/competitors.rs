//! Best-effort competitor lookup against the OpenCorporates registry
//!
//! This endpoint is explicitly non-critical: every failure mode resolves
//! to an empty list so the pipeline never aborts on a cosmetic lookup.

use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{info, warn};

const SEARCH_URL: &str = "https://api.opencorporates.com/v0.4/companies/search";
const REQUEST_TIMEOUT_SECS: u64 = 10;
const MAX_RESULTS: usize = 10;

/// Reusable registry search client (connection-pooled)
pub struct RegistryClient {
    client: Client,
    search_url: String,
}

impl RegistryClient {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            search_url: SEARCH_URL.to_string(),
        }
    }

    /// Up to 10 distinct company names matching the keywords. Network
    /// failures, bad statuses, and malformed bodies all degrade to `[]`.
    pub async fn find_competitors(&self, keywords: &str) -> Vec<String> {
        let keywords = keywords.trim();
        if keywords.is_empty() {
            return Vec::new();
        }

        let response = match self
            .client
            .get(&self.search_url)
            .query(&[("q", keywords)])
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!("Competitor search request failed: {}", e);
                return Vec::new();
            }
        };

        if !response.status().is_success() {
            warn!(
                status = %response.status(),
                "Competitor search returned a bad status"
            );
            return Vec::new();
        }

        let body: Value = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                warn!("Competitor search returned malformed JSON: {}", e);
                return Vec::new();
            }
        };

        let names = extract_company_names(&body);
        info!(count = names.len(), "Competitor search complete");
        names
    }
}

impl Default for RegistryClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl RegistryClient {
    fn with_search_url(search_url: &str) -> Self {
        Self {
            search_url: search_url.to_string(),
            ..Self::new()
        }
    }
}

/// Pull company names out of the registry response shape
/// `{results: {companies: [{company: {name, ...}}]}}`, skipping entries
/// without a non-empty name and stopping after the result cap.
fn extract_company_names(body: &Value) -> Vec<String> {
    let companies = body
        .get("results")
        .and_then(|r| r.get("companies"))
        .and_then(Value::as_array);

    let Some(companies) = companies else {
        return Vec::new();
    };

    let mut names = Vec::new();
    for item in companies {
        let name = item
            .get("company")
            .and_then(|c| c.get("name"))
            .and_then(Value::as_str)
            .map(str::trim);
        if let Some(name) = name {
            if !name.is_empty() {
                names.push(name.to_string());
            }
        }
        if names.len() >= MAX_RESULTS {
            break;
        }
    }

    names
}
