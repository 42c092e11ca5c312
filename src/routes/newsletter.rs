//! src/routes/newsletter.rs
use crate::domain::{SubscriberEmail, SubscriptionResult};
use crate::newsletter::NewsletterSubscriber;
use actix_web::{web, HttpResponse, Result};
use uuid::Uuid;

#[derive(serde::Deserialize)]
pub struct SignUpForm {
    pub email: String,
}

/// Handles the sign-up form on the site.
///
/// A blank address is a 400. Anything else is a 200 whose JSON body carries
/// the boolean outcome, the page shows a generic message from it.
#[tracing::instrument(
    name = "Signing up for the newsletter",
    skip(form, subscriber),
    fields(
        request_id = %Uuid::new_v4(),
        subscriber_email = %form.email,
    )
)]
pub async fn sign_up(
    form: web::Form<SignUpForm>,
    subscriber: web::Data<NewsletterSubscriber>,
) -> Result<HttpResponse, actix_web::Error> {
    let email = match SubscriberEmail::parse(form.into_inner().email) {
        Ok(email) => email,
        Err(e) => return Err(actix_web::error::ErrorBadRequest(e)),
    };

    let success = subscriber.subscribe(&email).await;

    Ok(HttpResponse::Ok().json(SubscriptionResult::from(success)))
}
