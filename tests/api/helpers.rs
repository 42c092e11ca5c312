//! tests/api/helpers.rs

use folio::configuration::{get_configuration, BrevoSettings};
use folio::startup::build;
use folio::telemetry::{get_subscriber, init_subscriber};
use once_cell::sync::Lazy;
use secrecy::Secret;
use wiremock::MockServer;

pub const LIST_ID: u64 = 5;

static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    // Set TEST_LOG=true to see logs during tests
    // Use bunyan to format the logs nicely:
    // $ TEST_LOG=true cargo test| bunyan
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    };
});

pub struct Test {
    pub address: String,
    pub brevo_server: MockServer,
}

impl Test {
    pub async fn get(&self, path: &str) -> reqwest::Response {
        reqwest::get(&format!("{}{}", self.address, path))
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_newsletter(&self, body: String) -> reqwest::Response {
        reqwest::Client::new()
            .post(&format!("{}/newsletter", self.address))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn received_contact(&self) -> serde_json::Value {
        let requests = self.brevo_server.received_requests().await.unwrap();
        let request = if requests.len() == 1 {
            &requests[0]
        } else {
            panic!(
                "Expected 1 contact to be created but instead {} requests were sent.",
                requests.len()
            );
        };

        serde_json::from_slice(&request.body).expect("Failed to parse contact")
    }
}

/// App wired to a mock Brevo with an API key and `LIST_ID`.
pub async fn setup() -> Test {
    spawn(|brevo_server| BrevoSettings {
        api_key: Some(Secret::new("xkeysib-test".to_string())),
        api_url: format!("{}/v3/contacts", brevo_server.uri()),
        list_id: Some(LIST_ID),
        simulated_latency_milliseconds: 1500,
    })
    .await
}

/// App without an API key. The mock Brevo is still started so tests can
/// assert it was never called.
pub async fn setup_simulated() -> Test {
    spawn(|brevo_server| BrevoSettings {
        api_key: None,
        api_url: format!("{}/v3/contacts", brevo_server.uri()),
        list_id: Some(LIST_ID),
        simulated_latency_milliseconds: 10,
    })
    .await
}

async fn spawn(brevo: impl FnOnce(&MockServer) -> BrevoSettings) -> Test {
    Lazy::force(&TRACING);

    let brevo_server = MockServer::start().await;

    let mut config = get_configuration().expect("Failed to read configuration.");
    config.application.port = 0;
    config.brevo = brevo(&brevo_server);

    let app = build(config.clone()).expect("Failed to build server.");
    let address = format!("http://127.0.0.1:{}", app.port());
    config.application.port = app.port();

    tracing::info!("Test running with the following Settings:\n{:#?}", config);

    // Launch the server as a background task
    let _ = tokio::spawn(app.run());

    Test {
        address,
        brevo_server,
    }
}
