use crate::config::AlertSettings;
use crate::error::AppError;
use crate::models::{AlertPriority, FraudAlert};
use reqwest::Client;
use serde_json::json;
use std::time::Duration;
use tracing::{info, warn};

const ALERT_TITLE: &str = "Potential fraud detected";
const FOOTER: &str = "Fraud Risk Monitor";

/// Forwards newly created fraud alerts to chat webhooks.
pub struct AlertNotifier {
    client: Client,
    slack_webhook_url: Option<String>,
    discord_webhook_url: Option<String>,
}

impl AlertNotifier {
    pub fn new(settings: &AlertSettings) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            slack_webhook_url: settings.slack_webhook_url.clone(),
            discord_webhook_url: settings.discord_webhook_url.clone(),
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.slack_webhook_url.is_some() || self.discord_webhook_url.is_some()
    }

    /// Send `alert` to every configured channel. Succeeds if at least one
    /// channel accepted it, or if none is configured.
    pub async fn notify(&self, alert: &FraudAlert) -> Result<(), AppError> {
        if !self.is_enabled() {
            return Ok(());
        }

        info!("Forwarding fraud alert {} for transaction {}", alert.id, alert.transaction_id);

        let mut results = Vec::new();

        if let Some(ref slack_url) = self.slack_webhook_url {
            results.push(self.send_slack_alert(alert, slack_url).await);
        }

        if let Some(ref discord_url) = self.discord_webhook_url {
            results.push(self.send_discord_alert(alert, discord_url).await);
        }

        for err in results.iter().filter_map(|r| r.as_ref().err()) {
            warn!("Fraud alert {} notification failed: {}", alert.id, err);
        }

        let success_count = results.iter().filter(|r| r.is_ok()).count();
        if success_count == 0 {
            return Err(AppError::AlertError("Failed to send alert to any channel".to_string()));
        }

        info!("Fraud alert sent to {}/{} channels", success_count, results.len());
        Ok(())
    }

    async fn send_slack_alert(&self, alert: &FraudAlert, webhook_url: &str) -> Result<(), AppError> {
        let color = match AlertPriority::from_score(alert.risk_score) {
            AlertPriority::High => "#FF0000",
            AlertPriority::Medium => "#FF8C00",
        };

        let payload = json!({
            "attachments": [{
                "color": color,
                "title": ALERT_TITLE,
                "text": reason_text(alert),
                "fields": [
                    {
                        "title": "Risk Score",
                        "value": format!("{:.2}", alert.risk_score),
                        "short": true
                    },
                    {
                        "title": "Transaction ID",
                        "value": alert.transaction_id.to_string(),
                        "short": true
                    },
                    {
                        "title": "Alert ID",
                        "value": alert.id.to_string(),
                        "short": false
                    }
                ],
                "footer": FOOTER,
                "ts": alert.created_at.timestamp()
            }]
        });

        let response = self.client
            .post(webhook_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::AlertError(format!("Failed to send Slack alert: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::AlertError(format!(
                "Slack webhook returned status: {}",
                response.status()
            )));
        }

        Ok(())
    }

    async fn send_discord_alert(&self, alert: &FraudAlert, webhook_url: &str) -> Result<(), AppError> {
        let color = match AlertPriority::from_score(alert.risk_score) {
            AlertPriority::High => 16711680,  // Red
            AlertPriority::Medium => 16753920, // Orange
        };

        let payload = json!({
            "embeds": [{
                "title": ALERT_TITLE,
                "description": reason_text(alert),
                "color": color,
                "fields": [
                    {
                        "name": "Risk Score",
                        "value": format!("{:.2}", alert.risk_score),
                        "inline": true
                    },
                    {
                        "name": "Transaction ID",
                        "value": alert.transaction_id.to_string(),
                        "inline": true
                    }
                ],
                "footer": {
                    "text": FOOTER
                },
                "timestamp": alert.created_at.to_rfc3339()
            }]
        });

        let response = self.client
            .post(webhook_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::AlertError(format!("Failed to send Discord alert: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::AlertError(format!(
                "Discord webhook returned status: {}",
                response.status()
            )));
        }

        Ok(())
    }
}

fn reason_text(alert: &FraudAlert) -> String {
    alert
        .reason
        .clone()
        .filter(|r| !r.is_empty())
        .unwrap_or_else(|| "No risk factors recorded".to_string())
}
