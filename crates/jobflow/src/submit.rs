//! The two submitter implementations the CLI ships: a dry-run counter and a
//! JSON-over-HTTP client for a real import endpoint.

use async_trait::async_trait;
use tracing::info;

use jobflow_core::{BatchReport, BatchSubmitter, SubmitError, SubmitSettings};
use jobflow_mapper::CanonicalJobRecord;

/// Accepts every record without persisting anything. Used when no import
/// endpoint is configured.
pub struct DryRunSubmitter;

#[async_trait]
impl BatchSubmitter for DryRunSubmitter {
    async fn submit(
        &self,
        records: &[CanonicalJobRecord],
        _settings: &SubmitSettings,
    ) -> Result<BatchReport, SubmitError> {
        info!(records = records.len(), "dry run: batch accepted");
        Ok(BatchReport {
            imported: records.len(),
            ..BatchReport::default()
        })
    }
}

/// POSTs each batch as JSON and decodes the endpoint's `BatchReport`
/// response.
pub struct HttpSubmitter {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSubmitter {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }
}

#[async_trait]
impl BatchSubmitter for HttpSubmitter {
    async fn submit(
        &self,
        records: &[CanonicalJobRecord],
        settings: &SubmitSettings,
    ) -> Result<BatchReport, SubmitError> {
        let payload = serde_json::json!({
            "records": records,
            "settings": settings,
        });

        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|err| SubmitError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SubmitError::Rejected(format!("{status}: {body}")));
        }

        response
            .json::<BatchReport>()
            .await
            .map_err(|err| SubmitError::Transport(err.to_string()))
    }
}
