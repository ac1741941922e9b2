//! # Notification Services
//!
//! This crate provides the email notifications sent when park availability changes.
//! It includes the SMTP transport, a logging mock for dry runs, and the send configuration.

/// Email service trait and its SMTP and mock implementations.
pub mod service;
/// Configuration and error types used by the notification services.
pub mod types;

pub use service::{EmailService, MockEmailService, SmtpEmailService};
pub use types::{EMAIL_SUBJECT, NotificationError, Recipients, SendConfig};
