use anyhow::Context;
use lettre::{
    Message, SmtpTransport, Transport,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};

use crate::config::EmailConfig;

/// Sends password reset links over SMTP.
pub struct SmtpNotifier {
    mailer: SmtpTransport,
    from: Mailbox,
    reset_url: String,
}

impl SmtpNotifier {
    pub fn new(config: &EmailConfig) -> anyhow::Result<Self> {
        let from: Mailbox = format!("{} <{}>", config.from_name, config.from_email)
            .parse()
            .context("Failed to parse from email")?;

        // Local relays (MailDev, MailHog) take unauthenticated plain connections.
        let mailer = if config.smtp_username.is_empty() && config.smtp_password.is_empty() {
            SmtpTransport::builder_dangerous(&config.smtp_host)
                .port(config.smtp_port)
                .build()
        } else {
            let credentials =
                Credentials::new(config.smtp_username.clone(), config.smtp_password.clone());

            SmtpTransport::relay(&config.smtp_host)
                .context("Failed to create SMTP transport")?
                .port(config.smtp_port)
                .credentials(credentials)
                .build()
        };

        Ok(Self {
            mailer,
            from,
            reset_url: config.reset_url.clone(),
        })
    }

    pub fn reset_link(&self, reset_token: &str) -> String {
        let separator = if self.reset_url.contains('?') { '&' } else { '?' };
        format!("{}{separator}token={reset_token}", self.reset_url)
    }

    fn message(&self, address: &str, reset_token: &str) -> anyhow::Result<Message> {
        let to: Mailbox = address.parse().context("Failed to parse to email")?;
        let body = format!(
            "We received a request to reset your yummio password.\n\n\
             Follow this link to choose a new one:\n{}\n\n\
             If you did not ask for this, you can ignore this email.\n",
            self.reset_link(reset_token)
        );

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject("Reset your yummio password")
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .context("Failed to build email message")
    }
}

#[async_trait::async_trait]
impl yummio_user::Notifier for SmtpNotifier {
    async fn send(&self, address: &str, reset_token: &str) -> anyhow::Result<()> {
        let message = self.message(address, reset_token)?;
        let mailer = self.mailer.clone();

        tokio::task::spawn_blocking(move || mailer.send(&message))
            .await
            .context("email task panicked")?
            .context("Failed to send password reset email")?;

        tracing::info!(to = address, "password reset email sent");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_reset_message() {
        let notifier = SmtpNotifier::new(&EmailConfig::default()).unwrap();

        assert_eq!(
            notifier.reset_link("abc"),
            "http://localhost:3000/reset-password?token=abc"
        );

        let message = notifier.message("cook@example.com", "abc").unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();

        assert!(raw.contains("To: cook@example.com"));
        assert!(raw.contains("reset-password?token=abc"));
        assert!(notifier.message("not an address", "abc").is_err());
    }
}
