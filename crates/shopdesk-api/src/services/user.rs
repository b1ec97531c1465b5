// Profile endpoints for the logged-in user.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::debug;

use super::{fetch, put_ack, put_data};
use crate::error::Error;
use crate::http::{HttpCore, RequestConfig};
use crate::models::{ProfileUpdate, UserProfile};

pub struct UserService {
    http: Arc<HttpCore>,
}

impl UserService {
    pub fn new(http: Arc<HttpCore>) -> Self {
        Self { http }
    }

    /// `GET /user/profile`
    pub async fn profile(&self) -> Result<UserProfile, Error> {
        fetch(&self.http, "user/profile", &RequestConfig::default()).await
    }

    /// `PUT /user/profile`
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile, Error> {
        debug!("updating profile");
        put_data(&self.http, "user/profile", update).await
    }

    /// `PUT /user/password`
    pub async fn change_password(
        &self,
        current: &SecretString,
        new: &SecretString,
    ) -> Result<(), Error> {
        debug!("changing password");
        let body = json!({
            "currentPassword": current.expose_secret(),
            "newPassword": new.expose_secret(),
        });
        put_ack(&self.http, "user/password", &body).await
    }
}
