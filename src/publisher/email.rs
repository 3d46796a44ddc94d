use std::fs;

use anyhow::{Context, Result, anyhow};
use lettre::message::header::ContentType;
use lettre::message::{Attachment, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::info;

use crate::config::Config;
use crate::models::RenderedReport;
use crate::publisher::Publisher;

/// Sends the report as an email attachment over authenticated SMTP with
/// STARTTLS. Transport failures propagate to the caller; there is no retry.
#[derive(Debug)]
pub struct EmailPublisher {
    host: String,
    port: u16,
    username: String,
    password: String,
    from: String,
    to: String,
    subject: String,
}

impl EmailPublisher {
    pub fn from_config(config: &Config) -> Result<Self> {
        let username = config
            .smtp_username
            .clone()
            .ok_or_else(|| anyhow!("SMTP username is required for the email publisher"))?;
        let from = config
            .mail_from
            .clone()
            .ok_or_else(|| anyhow!("Sender address is required for the email publisher"))?;
        let to = config
            .mail_to
            .clone()
            .ok_or_else(|| anyhow!("Recipient address is required for the email publisher"))?;

        Ok(Self {
            host: config.smtp_host.clone(),
            port: config.smtp_port,
            username,
            password: config.smtp_password.clone(),
            from,
            to,
            subject: config.mail_subject.clone(),
        })
    }

    fn build_message(&self, report: &RenderedReport, content: Vec<u8>) -> Result<Message> {
        let body = format!(
            "Usage report generated {}.\nSee the attached document: {}",
            report.generated_at.format("%d/%m/%Y %H:%M"),
            report.file_name
        );

        let attachment = Attachment::new(report.file_name.clone()).body(
            content,
            ContentType::parse("application/rtf").context("Invalid attachment content type")?,
        );

        Message::builder()
            .from(self
                .from
                .parse()
                .with_context(|| format!("Invalid sender address: {}", self.from))?)
            .to(self
                .to
                .parse()
                .with_context(|| format!("Invalid recipient address: {}", self.to))?)
            .subject(self.subject.clone())
            .multipart(
                MultiPart::mixed()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(body),
                    )
                    .singlepart(attachment),
            )
            .context("Failed to build email message")
    }
}

impl Publisher for EmailPublisher {
    fn publish(&self, report: &RenderedReport) -> Result<()> {
        let content = fs::read(&report.path)
            .with_context(|| format!("Failed to read report file {}", report.path.display()))?;
        let message = self.build_message(report, content)?;

        let transport = SmtpTransport::starttls_relay(&self.host)
            .context("Failed to configure SMTP transport")?
            .port(self.port)
            .credentials(Credentials::new(
                self.username.clone(),
                self.password.clone(),
            ))
            .build();

        info!(host = %self.host, port = self.port, to = %self.to, "Sending report email");
        transport
            .send(&message)
            .context("Failed to send report email")?;
        info!("Report email sent");

        Ok(())
    }

    fn name(&self) -> &str {
        "email"
    }
}
