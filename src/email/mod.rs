//! src/email/mod.rs
pub mod brevo;
pub use brevo::{ContactOutcome, ContactsClient, CreateContact};
