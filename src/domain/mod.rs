//! src/domain/mod.rs
mod subscriber_email;
pub use subscriber_email::SubscriberEmail;

use serde::Serialize;

/// What the sign-up form gets back. Failure detail stays in the logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubscriptionResult {
    pub success: bool,
}

impl From<bool> for SubscriptionResult {
    fn from(success: bool) -> Self {
        Self { success }
    }
}
