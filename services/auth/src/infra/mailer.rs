//! Outbound mail adapters.
//!
//! `HttpMailer` posts to a Brevo-style transactional mail API; `LogMailer` is
//! the local-dev sender that logs delivery intent (never template data — OTP
//! codes travel in there) and reports success.

use anyhow::Context as _;
use serde::Serialize;

use crate::domain::repository::Mailer;
use crate::domain::types::MailMessage;
use crate::error::AuthServiceError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiEmailAddress {
    email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiAttachment {
    name: String,
    content_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiSendMailBody {
    sender: ApiEmailAddress,
    to: Vec<ApiEmailAddress>,
    template: String,
    params: serde_json::Value,
    attachments: Vec<ApiAttachment>,
}

/// Transactional mail API client.
#[derive(Clone)]
pub struct HttpMailer {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    from_email: String,
    from_name: Option<String>,
}

impl HttpMailer {
    pub fn new(
        api_url: String,
        api_key: String,
        from_email: String,
        from_name: Option<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            api_key,
            from_email,
            from_name,
        }
    }
}

impl Mailer for HttpMailer {
    async fn send(&self, message: &MailMessage) -> Result<bool, AuthServiceError> {
        let body = ApiSendMailBody {
            sender: ApiEmailAddress {
                email: self.from_email.clone(),
                name: self.from_name.clone(),
            },
            to: vec![ApiEmailAddress {
                email: message.to.clone(),
                name: None,
            }],
            template: message.template.clone(),
            params: message.data.clone(),
            attachments: message
                .attachments
                .iter()
                .map(|a| ApiAttachment {
                    name: a.filename.clone(),
                    content_id: a.content_id.clone(),
                })
                .collect(),
        };

        // Transport failures are errors; a reachable provider that refuses
        // the message is a non-delivery report.
        let response = self
            .client
            .post(&self.api_url)
            .header("api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .context("send mail request")?;

        let status = response.status();
        if status.is_success() {
            Ok(true)
        } else {
            tracing::warn!(
                status = %status,
                to = %message.to,
                template = %message.template,
                "mail provider rejected message"
            );
            Ok(false)
        }
    }
}

/// Local dev sender that logs the envelope instead of sending real mail.
#[derive(Clone, Debug)]
pub struct LogMailer;

impl Mailer for LogMailer {
    async fn send(&self, message: &MailMessage) -> Result<bool, AuthServiceError> {
        tracing::info!(
            to = %message.to,
            template = %message.template,
            "mail send stub"
        );
        Ok(true)
    }
}

/// Concrete dispatch over the configured sender, so handlers can hold a
/// single type while use cases stay generic over the port.
#[derive(Clone)]
pub enum MailerImpl {
    Http(HttpMailer),
    Log(LogMailer),
}

impl Mailer for MailerImpl {
    async fn send(&self, message: &MailMessage) -> Result<bool, AuthServiceError> {
        match self {
            Self::Http(mailer) => mailer.send(message).await,
            Self::Log(mailer) => mailer.send(message).await,
        }
    }
}
