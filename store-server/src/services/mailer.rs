//! Best-effort outbound email
//!
//! Delivery goes through a webhook (`MAIL_WEBHOOK_URL`) as a JSON POST.
//! Sends are fire-and-forget: the triggering request never waits for the
//! webhook, and failures are logged, never propagated. With no webhook
//! configured the mailer is a no-op.

use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct MailPayload {
    to: String,
    subject: String,
    body: String,
}

/// Fire-and-forget mail sender
#[derive(Clone)]
pub struct Mailer {
    client: reqwest::Client,
    webhook_url: Option<String>,
    admin_email: String,
}

impl Mailer {
    pub fn new(webhook_url: Option<String>, admin_email: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();
        if webhook_url.is_none() {
            tracing::warn!("MAIL_WEBHOOK_URL not set, outbound email disabled");
        }
        Self {
            client,
            webhook_url,
            admin_email,
        }
    }

    /// Notify the site admin (new orders, new reviews)
    pub fn send_to_admin(&self, subject: impl Into<String>, body: impl Into<String>) {
        let to = self.admin_email.clone();
        self.send(to, subject.into(), body.into());
    }

    /// Send to an arbitrary recipient (password reset links)
    pub fn send(&self, to: String, subject: String, body: String) {
        let Some(url) = self.webhook_url.clone() else {
            tracing::debug!(to = %to, subject = %subject, "Mail skipped (no webhook configured)");
            return;
        };
        let client = self.client.clone();
        let payload = MailPayload { to, subject, body };

        // Detached: mail failure must never surface to the HTTP caller
        tokio::spawn(async move {
            match client.post(&url).json(&payload).send().await {
                Ok(resp) if resp.status().is_success() => {
                    tracing::debug!(to = %payload.to, "Mail delivered");
                }
                Ok(resp) => {
                    tracing::warn!(
                        to = %payload.to,
                        status = %resp.status(),
                        "Mail webhook returned an error"
                    );
                }
                Err(e) => {
                    tracing::warn!(to = %payload.to, error = %e, "Mail delivery failed");
                }
            }
        });
    }
}
