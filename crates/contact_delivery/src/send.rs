use std::time::Duration;

use form_logging::{form_debug, form_info, form_warn, redact_email};
use serde::Serialize;
use url::Url;

use crate::{DeliveryError, FailureKind, SubmissionId, TemplateParams};

/// EmailJS REST endpoint used by the browser SDK.
pub const DEFAULT_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

/// [`DEFAULT_ENDPOINT`] as a parsed URL.
pub fn default_endpoint() -> Url {
    Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid url")
}

#[derive(Debug, Clone)]
pub struct DeliverySettings {
    pub endpoint: Url,
    pub service_id: String,
    pub template_id: String,
    /// EmailJS public key, sent as `user_id`.
    pub public_key: String,
    /// Private key for accounts that require it.
    pub access_token: Option<String>,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for DeliverySettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            service_id: String::new(),
            template_id: String::new(),
            public_key: String::new(),
            access_token: None,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[async_trait::async_trait]
pub trait Mailer: Send + Sync {
    async fn send(
        &self,
        submission_id: SubmissionId,
        params: &TemplateParams,
    ) -> Result<(), DeliveryError>;
}

#[derive(Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a TemplateParams,
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none")]
    access_token: Option<&'a str>,
}

#[derive(Debug, Clone)]
pub struct EmailJsMailer {
    settings: DeliverySettings,
}

impl EmailJsMailer {
    pub fn new(settings: DeliverySettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, DeliveryError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(map_reqwest_error)
    }
}

#[async_trait::async_trait]
impl Mailer for EmailJsMailer {
    async fn send(
        &self,
        submission_id: SubmissionId,
        params: &TemplateParams,
    ) -> Result<(), DeliveryError> {
        let client = self.build_client()?;

        let request = SendRequest {
            service_id: &self.settings.service_id,
            template_id: &self.settings.template_id,
            user_id: &self.settings.public_key,
            template_params: params,
            access_token: self.settings.access_token.as_deref(),
        };

        form_info!(
            "Sending submission {} from {} ({} chars)",
            submission_id,
            redact_email(&params.email),
            params.message.chars().count()
        );

        let response = client
            .post(self.settings.endpoint.clone())
            .json(&request)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if status.is_success() {
            form_debug!("Submission {} accepted with {}", submission_id, status);
            return Ok(());
        }

        // EmailJS explains rejections in a plain-text body.
        let body = response.text().await.unwrap_or_default();
        let body = body.trim();
        let message = if body.is_empty() {
            status.canonical_reason().unwrap_or("request rejected").to_string()
        } else {
            body.to_string()
        };
        form_warn!(
            "Submission {} rejected with {}: {}",
            submission_id,
            status,
            message
        );
        Err(DeliveryError::new(
            FailureKind::HttpStatus(status.as_u16()),
            message,
        ))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> DeliveryError {
    if err.is_timeout() {
        return DeliveryError::new(
            FailureKind::Timeout,
            "no response from the email service",
        );
    }
    DeliveryError::new(FailureKind::Network, err.without_url().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_endpoint_parses() {
        let endpoint = default_endpoint();
        assert_eq!(endpoint.as_str(), DEFAULT_ENDPOINT);
        assert_eq!(DeliverySettings::default().endpoint, endpoint);
    }
}
