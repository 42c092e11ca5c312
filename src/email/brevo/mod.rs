//! src/email/brevo/mod.rs
mod contact;
pub use contact::{ContactOutcome, ContactsClient, CreateContact, CreateContactBuilder};
