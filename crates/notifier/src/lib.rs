//! Alert delivery for the vault monitor.
//!
//! [`AlertMessage`] renders flagged positions as a plain-text email and
//! [`SmtpNotifier`] delivers it over an authenticated SMTPS relay.

pub mod message;
pub mod smtp;

pub use message::AlertMessage;
pub use smtp::SmtpNotifier;
