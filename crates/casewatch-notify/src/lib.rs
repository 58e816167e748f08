//! # casewatch notify
//!
//! Builds the report e-mail (HTML body plus chart attachment) and submits it
//! over authenticated SMTP.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod attachment;
pub mod mailer;
pub mod message;

pub use attachment::image_subtype;
pub use mailer::{DryRunMailer, Mailer, SmtpMailer};
pub use lettre::Message;
pub use message::{html_body, subject_line, ReportMessage};
