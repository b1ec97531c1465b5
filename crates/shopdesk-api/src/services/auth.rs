// Authentication endpoints
//
// Bearer-token login. The service only talks to the backend; installing
// the returned token into the session is `CoreApi::login`'s job.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::debug;

use super::{post_ack, post_data};
use crate::error::Error;
use crate::http::HttpCore;
use crate::models::{LoginResponse, OwnerRegistration, UserProfile};

pub struct AuthService {
    http: Arc<HttpCore>,
}

impl AuthService {
    pub fn new(http: Arc<HttpCore>) -> Self {
        Self { http }
    }

    /// `POST /auth/login`
    pub async fn login(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<LoginResponse, Error> {
        debug!(username, "logging in");
        let body = json!({
            "username": username,
            "password": password.expose_secret(),
        });
        post_data(&self.http, "auth/login", &body).await
    }

    /// `POST /auth/register` for a new shop owner.
    pub async fn register_owner(
        &self,
        registration: &OwnerRegistration,
    ) -> Result<UserProfile, Error> {
        debug!(username = %registration.username, "registering shop owner");
        post_data(&self.http, "auth/register", registration).await
    }

    /// `POST /auth/logout`
    pub async fn logout(&self) -> Result<(), Error> {
        debug!("logging out");
        post_ack(&self.http, "auth/logout", &json!({})).await
    }
}
