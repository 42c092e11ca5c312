//! src/startup.rs
use crate::configuration::Settings;
use crate::newsletter::NewsletterSubscriber;
use crate::routes::{health_check, sign_up};
use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run(self) -> std::io::Result<()> {
        self.server.await
    }
}

pub fn build(config: Settings) -> Result<Application, std::io::Error> {
    let address = format!("{}:{}", config.application.host, config.application.port);
    let tcp_listener = TcpListener::bind(address)?;
    let port = tcp_listener.local_addr()?.port();

    let subscriber = NewsletterSubscriber::from(config.brevo);
    if subscriber.is_simulated() {
        tracing::warn!("Brevo API key is missing, newsletter sign-ups will be simulated");
    }

    let server = run(tcp_listener, subscriber)?;

    Ok(Application { port, server })
}

pub fn run(
    listener: TcpListener,
    subscriber: NewsletterSubscriber,
) -> Result<Server, std::io::Error> {
    let subscriber = web::Data::new(subscriber);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .route("/health_check", web::get().to(health_check))
            .route("/newsletter", web::post().to(sign_up))
            .app_data(subscriber.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
