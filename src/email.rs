//! Welcome-email dispatch.
//!
//! Strictly best-effort: the caller fires a send after a successful create,
//! logs the outcome and discards it. A send failure never reaches the HTTP
//! response, and when SMTP is not configured the mailer is a no-op.

use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;

#[derive(Debug, Error)]
pub enum EmailError {
    #[error("invalid email address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("smtp transport error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// Payload of the welcome notification sent after client creation
#[derive(Debug, Clone)]
pub struct WelcomeEmail {
    pub to: String,
    pub client_name: String,
    pub business_name: String,
}

struct SmtpSettings {
    transport: SmtpTransport,
    from: Mailbox,
    app_url: Option<String>,
}

/// SMTP mailer for welcome emails. Disabled (every send a successful
/// no-op) when the relay settings are not fully configured.
pub struct Mailer {
    smtp: Option<SmtpSettings>,
}

impl Mailer {
    /// Build the mailer from config. Missing SMTP settings produce a
    /// disabled mailer rather than an error.
    pub fn from_config(config: &Config) -> Result<Self, EmailError> {
        let settings = match (
            &config.smtp_server,
            &config.smtp_username,
            &config.smtp_password,
            &config.email_from,
        ) {
            (Some(server), Some(username), Some(password), Some(from)) => {
                let creds = Credentials::new(username.clone(), password.clone());
                let transport = SmtpTransport::relay(server)?.credentials(creds).build();
                Some(SmtpSettings {
                    transport,
                    from: from.parse()?,
                    app_url: config.app_url.clone(),
                })
            }
            _ => {
                warn!("SMTP not fully configured, welcome emails disabled");
                None
            }
        };

        Ok(Self { smtp: settings })
    }

    pub fn disabled() -> Self {
        Self { smtp: None }
    }

    /// Send the welcome email, returning the SMTP reply code as an opaque
    /// message id, or `None` when the mailer is disabled.
    ///
    /// Blocking: run on a blocking task from async contexts.
    pub fn send_welcome(&self, email: &WelcomeEmail) -> Result<Option<String>, EmailError> {
        let Some(smtp) = &self.smtp else {
            debug!(recipient = %email.to, "mailer disabled, skipping welcome email");
            return Ok(None);
        };

        let message = Message::builder()
            .from(smtp.from.clone())
            .to(email.to.parse()?)
            .subject(format!(
                "Welcome to our Accountancy Firm, {}!",
                email.client_name
            ))
            .header(ContentType::TEXT_HTML)
            .body(welcome_html(email, smtp.app_url.as_deref()))?;

        let response = smtp.transport.send(&message)?;
        Ok(Some(response.code().to_string()))
    }
}

fn welcome_html(email: &WelcomeEmail, app_url: Option<&str>) -> String {
    let portal_link = app_url
        .map(|url| format!(r#"<p><a href="{url}">Visit Client Portal</a></p>"#))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html>
  <body>
    <h1>Welcome, {name}!</h1>
    <p>We're excited to have {business} as our client.</p>
    <p>We've successfully received your information and set up your account in our client portal.</p>
    <p><strong>What's next?</strong></p>
    <ul>
      <li>Our team will review your business details</li>
      <li>You'll receive a follow-up call within 1-2 business days</li>
      <li>We'll schedule an initial consultation to discuss your accounting needs</li>
    </ul>
    {portal_link}
    <p>Best regards,<br>Your Accountancy Team</p>
  </body>
</html>"#,
        name = email.client_name,
        business = email.business_name,
        portal_link = portal_link,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_mailer_skips_send() {
        let mailer = Mailer::disabled();
        let result = mailer.send_welcome(&WelcomeEmail {
            to: "jane@ex.com".to_string(),
            client_name: "Jane".to_string(),
            business_name: "Acme".to_string(),
        });
        assert!(matches!(result, Ok(None)));
    }

    #[test]
    fn welcome_body_mentions_client_and_business() {
        let email = WelcomeEmail {
            to: "jane@ex.com".to_string(),
            client_name: "Jane".to_string(),
            business_name: "Acme".to_string(),
        };
        let html = welcome_html(&email, Some("https://portal.example.com"));
        assert!(html.contains("Welcome, Jane!"));
        assert!(html.contains("Acme"));
        assert!(html.contains("https://portal.example.com"));

        let without_link = welcome_html(&email, None);
        assert!(!without_link.contains("Visit Client Portal"));
    }
}
