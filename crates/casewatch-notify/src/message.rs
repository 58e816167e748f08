//! Report e-mail composition.

use casewatch_common::{CaseWatchError, Result};
use casewatch_config::EmailConfig;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::Message;

use crate::attachment::image_subtype;

/// Subject line carrying the current total.
pub fn subject_line(prefix: &str, total: u64) -> String {
    format!("{prefix}{total}")
}

/// HTML body: the badge image as a link to the dashboard.
pub fn html_body(dashboard_url: &str, badge_url: &str) -> String {
    format!(
        "<html>\n    <body>\n    <a href=\"{dashboard_url}\"><img src=\"{badge_url}\"></a>\n    </body>\n</html>\n"
    )
}

fn mailbox(address: &str, field: &str) -> Result<Mailbox> {
    address.parse().map_err(|e| {
        CaseWatchError::mail_with_source(format!("Invalid {field} address '{address}'"), e)
    })
}

/// Everything needed to build the outgoing message.
#[derive(Debug, Clone)]
pub struct ReportMessage {
    pub subject: String,
    pub html: String,
    pub attachment_name: String,
    pub image: Vec<u8>,
}

impl ReportMessage {
    /// Report for `total` with the rendered chart bytes.
    pub fn new(config: &EmailConfig, total: u64, attachment_name: impl Into<String>, image: Vec<u8>) -> Self {
        Self {
            subject: subject_line(&config.subject_prefix, total),
            html: html_body(&config.dashboard_url, &config.badge_url),
            attachment_name: attachment_name.into(),
            image,
        }
    }

    /// Builds the MIME message: HTML part followed by the image attachment.
    ///
    /// Recipients go on the envelope only (Bcc), so they do not see each other.
    pub fn build(&self, config: &EmailConfig) -> Result<Message> {
        if config.recipients.is_empty() {
            return Err(CaseWatchError::validation_field(
                "No recipients configured",
                "recipients",
            ));
        }

        let subtype = image_subtype(&self.image)?;
        let content_type = ContentType::parse(&format!("image/{subtype}"))
            .map_err(|e| CaseWatchError::mail_with_source("Invalid attachment content type", e))?;

        let mut builder = Message::builder()
            .from(mailbox(&config.from, "sender")?)
            .subject(self.subject.clone());
        for recipient in &config.recipients {
            builder = builder.bcc(mailbox(recipient, "recipient")?);
        }

        let body = MultiPart::mixed()
            .singlepart(SinglePart::html(self.html.clone()))
            .singlepart(Attachment::new(self.attachment_name.clone()).body(self.image.clone(), content_type));

        builder
            .multipart(body)
            .map_err(|e| CaseWatchError::mail_with_source("Failed to build message", e))
    }
}
