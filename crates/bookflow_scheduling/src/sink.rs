// --- File: crates/bookflow_scheduling/src/sink.rs ---
//! Submission sinks for finalized demo bookings.

use bookflow_common::models::{BookingRequest, SubmissionReceipt};
use bookflow_common::services::{BoxFuture, SubmissionError, SubmissionSink};
use bookflow_config::{SinkKind, SubmissionConfig};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// Logs the booking and accepts it after a fixed delay.
///
/// Stands in for a real backend during development and demos.
#[derive(Debug, Clone)]
pub struct LoggingSink {
    delay: Duration,
}

impl LoggingSink {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl SubmissionSink for LoggingSink {
    fn submit(&self, booking: BookingRequest) -> BoxFuture<'_, SubmissionReceipt, SubmissionError> {
        let delay = self.delay;
        Box::pin(async move {
            match serde_json::to_string(&booking) {
                Ok(payload) => info!("Demo booking received: {}", payload),
                Err(err) => info!("Demo booking {} received (unserializable: {})", booking.reference, err),
            }
            tokio::time::sleep(delay).await;
            Ok(SubmissionReceipt {
                reference: booking.reference,
                accepted_at: Utc::now(),
            })
        })
    }
}

/// POSTs the booking as JSON to a webhook.
///
/// Any 2xx response counts as accepted; everything else is reported with
/// the status and body so the wizard can show it.
#[derive(Debug, Clone)]
pub struct WebhookSink {
    client: reqwest::Client,
    url: String,
    auth_token: Option<String>,
}

impl WebhookSink {
    pub fn new(
        url: impl Into<String>,
        timeout: Duration,
        auth_token: Option<String>,
    ) -> Result<Self, SubmissionError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| SubmissionError::Misconfigured(err.to_string()))?;
        Ok(Self {
            client,
            url: url.into(),
            auth_token,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl SubmissionSink for WebhookSink {
    fn submit(&self, booking: BookingRequest) -> BoxFuture<'_, SubmissionReceipt, SubmissionError> {
        Box::pin(async move {
            let mut request = self.client.post(&self.url).json(&booking);
            if let Some(token) = &self.auth_token {
                request = request.bearer_auth(token);
            }

            let response = request.send().await.map_err(|err| {
                error!("Webhook delivery of {} failed: {}", booking.reference, err);
                if err.is_timeout() {
                    SubmissionError::Timeout(err.to_string())
                } else {
                    SubmissionError::Transport(err.to_string())
                }
            })?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                error!(
                    "Webhook rejected {} with {}: {}",
                    booking.reference, status, body
                );
                return Err(SubmissionError::Rejected(format!("{}: {}", status, body)));
            }

            info!("Webhook accepted {} with {}", booking.reference, status);
            Ok(SubmissionReceipt {
                reference: booking.reference,
                accepted_at: Utc::now(),
            })
        })
    }
}

/// Builds the sink described by the `submission` config section.
pub fn sink_from_config(
    config: &SubmissionConfig,
) -> Result<Arc<dyn SubmissionSink>, SubmissionError> {
    match config.kind {
        SinkKind::Logging => Ok(Arc::new(LoggingSink::new(Duration::from_millis(
            config.delay_ms,
        )))),
        SinkKind::Webhook => {
            let url = config.webhook_url.as_ref().ok_or_else(|| {
                SubmissionError::Misconfigured("submission.webhook_url is missing".to_string())
            })?;
            let sink = WebhookSink::new(
                url.clone(),
                Duration::from_secs(config.timeout_secs),
                config.auth_token.clone(),
            )?;
            info!(
                "Submitting bookings to webhook {} (timeout {}s)",
                sink.url(),
                config.timeout_secs
            );
            Ok(Arc::new(sink))
        }
    }
}
