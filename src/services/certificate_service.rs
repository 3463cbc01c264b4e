use reqwest::Client;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

/// Client for the learning platform's certificate endpoint. One POST per
/// passed exam, no retries; failures are reported back as strings for the
/// caller to surface.
#[derive(Clone)]
pub struct CertificateService {
    client: Client,
    base_url: String,
    internal_secret: String,
}

impl CertificateService {
    pub fn new(base_url: String, internal_secret: String) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client for certificate service");

        Self {
            client,
            base_url,
            internal_secret,
        }
    }

    pub async fn issue(&self, enrollment_id: Uuid) -> std::result::Result<(), String> {
        let url = format!("{}/api/cert/issue", self.base_url.trim_end_matches('/'));

        let payload = json!({ "enrollment_id": enrollment_id });

        info!(
            "Requesting certificate issue for enrollment {}",
            enrollment_id
        );

        let response = self
            .client
            .post(&url)
            .header("X-Internal-Secret", &self.internal_secret)
            .json(&payload)
            .send()
            .await
            .map_err(|e| format!("HTTP request failed: {}", e))?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Certificate issue failed with status {}: {}", status, body);
            return Err(format!("HTTP error {}: {}", status, body));
        }

        info!(
            "Certificate issue accepted for enrollment {}",
            enrollment_id
        );
        Ok(())
    }
}
