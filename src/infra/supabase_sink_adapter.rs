use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use std::time::Duration;
use tracing::debug;

use crate::app::ports::InvestigationSinkPort;
use crate::config::Credentials;
use crate::domain::Investigation;
use crate::error::{ImportError, Result};

const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Inserts rows through the Supabase REST (PostgREST) endpoint.
///
/// Each call is a single `POST {url}/rest/v1/{table}` carrying the whole
/// batch as a JSON array, authenticated with the service role key.
pub struct SupabaseSink {
    client: reqwest::Client,
    base_url: String,
}

impl SupabaseSink {
    pub fn new(credentials: Credentials) -> Result<Self> {
        let client = reqwest::Client::builder()
            .default_headers(auth_headers(&credentials.service_key)?)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: credentials.url.trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }
}

fn auth_headers(service_key: &str) -> Result<HeaderMap> {
    let invalid = |_| {
        ImportError::Config("service key contains characters not allowed in a header".to_string())
    };

    let mut headers = HeaderMap::new();
    let mut key = HeaderValue::from_str(service_key).map_err(invalid)?;
    key.set_sensitive(true);
    let mut bearer = HeaderValue::from_str(&format!("Bearer {}", service_key)).map_err(invalid)?;
    bearer.set_sensitive(true);

    headers.insert("apikey", key);
    headers.insert(AUTHORIZATION, bearer);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert("Prefer", HeaderValue::from_static("return=minimal"));
    Ok(headers)
}

#[async_trait]
impl InvestigationSinkPort for SupabaseSink {
    async fn insert(&self, table: &str, rows: &[Investigation]) -> Result<()> {
        let endpoint = self.endpoint(table);
        debug!("POST {} ({} rows)", endpoint, rows.len());

        let resp = self.client.post(&endpoint).json(rows).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ImportError::Sink {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}
