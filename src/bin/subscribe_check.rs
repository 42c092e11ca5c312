//! Subscribes one address with the configured Brevo credentials and prints
//! the outcome. Useful to check an API key and list id before deploying.
//!
//! $ cargo run --bin subscribe_check -- ursula@domain.com | bunyan
use anyhow::Context;
use folio::configuration::get_configuration;
use folio::domain::SubscriberEmail;
use folio::newsletter::NewsletterSubscriber;
use folio::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let subscriber = get_subscriber("subscribe_check".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let email = std::env::args()
        .nth(1)
        .context("Usage: subscribe_check <email>")?;
    let email = SubscriberEmail::parse(email)?;

    let config = get_configuration()?;
    let newsletter = NewsletterSubscriber::from(config.brevo);
    if newsletter.is_simulated() {
        println!("BREVO_API_KEY is not set, running in simulation mode");
    }

    let subscribed = newsletter.subscribe(&email).await;
    println!("{:#?}", subscribed);

    if !subscribed {
        anyhow::bail!("Failed to subscribe {}", email);
    }

    Ok(())
}
