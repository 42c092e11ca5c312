//! src/email/brevo/contact.rs
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

/// Brevo's error code for an address that is already a contact.
const DUPLICATE_CONTACT_CODE: &str = "duplicate_parameter";

#[derive(Debug, Serialize)]
pub struct CreateContact<'a> {
    pub email: &'a str,
    #[serde(rename = "listIds")]
    pub list_ids: Vec<u64>,
}

impl<'a> CreateContact<'a> {
    pub fn builder(email: &'a str) -> CreateContactBuilder<'a> {
        CreateContactBuilder::new(email)
    }
}

pub struct CreateContactBuilder<'a> {
    email: &'a str,
    list_ids: Vec<u64>,
}

impl<'a> CreateContactBuilder<'a> {
    pub fn new(email: &'a str) -> Self {
        Self {
            email,
            list_ids: vec![],
        }
    }

    pub fn list(mut self, list_id: u64) -> Self {
        self.list_ids.push(list_id);
        self
    }

    pub fn build(self) -> CreateContact<'a> {
        CreateContact {
            email: self.email,
            list_ids: self.list_ids,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

/// Every way a create-contact call can end.
#[derive(Debug)]
pub enum ContactOutcome {
    /// Any 2xx. Brevo answers 201 for a new contact and 204 for an update.
    Added,
    /// The address is already a contact.
    DuplicateContact,
    Rejected {
        status: StatusCode,
        code: String,
        message: String,
        body: String,
    },
    /// Non-2xx with a body that is not Brevo's JSON error payload.
    MalformedResponse {
        status: StatusCode,
        body: String,
        source: serde_json::Error,
    },
    TransportError(reqwest::Error),
}

#[derive(Debug)]
pub struct ContactsClient {
    pub http_client: Client,
    pub url: String,
    pub api_key: Secret<String>,
}

impl ContactsClient {
    pub fn new(url: String, api_key: Secret<String>) -> Self {
        Self {
            http_client: Client::new(),
            url,
            api_key,
        }
    }

    #[tracing::instrument(
        name = "Creating a Brevo contact",
        skip(self, contact),
        fields(list_ids = ?contact.list_ids)
    )]
    pub async fn create_contact(&self, contact: &CreateContact<'_>) -> ContactOutcome {
        let response = match self
            .http_client
            .post(&self.url)
            .header("api-key", self.api_key.expose_secret())
            .header("accept", "application/json")
            .header("content-type", "application/json")
            .json(contact)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return ContactOutcome::TransportError(e),
        };

        let status = response.status();
        if status.is_success() {
            return ContactOutcome::Added;
        }

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => return ContactOutcome::TransportError(e),
        };

        match serde_json::from_slice::<ErrorPayload>(&body) {
            Ok(payload) if payload.code == DUPLICATE_CONTACT_CODE => {
                ContactOutcome::DuplicateContact
            }
            Ok(payload) => ContactOutcome::Rejected {
                status,
                code: payload.code,
                message: payload.message,
                body: String::from_utf8_lossy(&body).into_owned(),
            },
            Err(source) => ContactOutcome::MalformedResponse {
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
                source,
            },
        }
    }
}
