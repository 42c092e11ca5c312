use folio::configuration::get_configuration;
use folio::startup::build;
use folio::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let subscriber = get_subscriber("folio".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let config = get_configuration()?;
    let app = build(config)?;
    app.run().await?;

    Ok(())
}
