//! src/newsletter.rs
use crate::configuration::BrevoSettings;
use crate::domain::SubscriberEmail;
use crate::email::{ContactOutcome, ContactsClient, CreateContact};
use secrecy::ExposeSecret;
use std::time::Duration;

/// Registers sign-up addresses on the Brevo mailing list.
///
/// The mode is fixed at construction: with an API key every call creates a
/// contact, without one the call only waits out a fake network round trip.
/// Callers get a plain `bool`, failure detail goes to the logs.
#[derive(Debug)]
pub struct NewsletterSubscriber {
    mode: Mode,
}

#[derive(Debug)]
enum Mode {
    Simulated {
        latency: Duration,
    },
    Live {
        client: ContactsClient,
        list_id: Option<u64>,
    },
}

impl From<BrevoSettings> for NewsletterSubscriber {
    fn from(settings: BrevoSettings) -> Self {
        let latency = settings.simulated_latency();
        let api_key = settings
            .api_key
            .filter(|api_key| !api_key.expose_secret().trim().is_empty());

        let mode = match api_key {
            Some(api_key) => Mode::Live {
                client: ContactsClient::new(settings.api_url, api_key),
                list_id: settings.list_id,
            },
            None => Mode::Simulated { latency },
        };

        Self { mode }
    }
}

impl NewsletterSubscriber {
    pub fn is_simulated(&self) -> bool {
        matches!(self.mode, Mode::Simulated { .. })
    }

    #[tracing::instrument(
        name = "Subscribing to the newsletter",
        skip(self, email),
        fields(subscriber_email = %email)
    )]
    pub async fn subscribe(&self, email: &SubscriberEmail) -> bool {
        let (client, list_id) = match &self.mode {
            Mode::Simulated { latency } => {
                tracing::warn!("No Brevo API key configured, simulating the subscription");
                tokio::time::sleep(*latency).await;
                return true;
            }
            Mode::Live { client, list_id } => (client, *list_id),
        };

        let mut contact = CreateContact::builder(email.as_ref());
        if let Some(list_id) = list_id {
            contact = contact.list(list_id);
        }
        let contact = contact.build();

        match client.create_contact(&contact).await {
            ContactOutcome::Added => true,
            ContactOutcome::DuplicateContact => {
                tracing::info!("Contact is already on the mailing list");
                true
            }
            ContactOutcome::Rejected {
                status,
                code,
                message,
                body,
            } => {
                tracing::error!(
                    %status,
                    error_code = %code,
                    error_message = %message,
                    %body,
                    "Brevo rejected the contact"
                );
                false
            }
            ContactOutcome::MalformedResponse {
                status,
                body,
                source,
            } => {
                tracing::error!(
                    %status,
                    %body,
                    error.cause_chain = ?source,
                    "Failed to parse the Brevo error payload"
                );
                false
            }
            ContactOutcome::TransportError(e) => {
                tracing::error!(error.cause_chain = ?e, "Failed to reach Brevo");
                false
            }
        }
    }
}
