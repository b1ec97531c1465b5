// Platform settings: key/value pairs under `/setting`.

use std::sync::Arc;

use serde_json::{Value, json};
use tracing::debug;

use super::{fetch, put_data, segment};
use crate::error::Error;
use crate::http::{HttpCore, RequestConfig};
use crate::models::Setting;

pub struct SettingService {
    http: Arc<HttpCore>,
}

impl SettingService {
    pub fn new(http: Arc<HttpCore>) -> Self {
        Self { http }
    }

    /// `GET /setting`
    pub async fn list(&self) -> Result<Vec<Setting>, Error> {
        fetch(&self.http, "setting", &RequestConfig::default()).await
    }

    /// `GET /setting/{key}`
    pub async fn get(&self, key: &str) -> Result<Setting, Error> {
        fetch(&self.http, &format!("setting/{}", segment(&key)), &RequestConfig::default()).await
    }

    /// `PUT /setting/{key}` with `{"value": ...}`
    pub async fn update(&self, key: &str, value: Value) -> Result<Setting, Error> {
        debug!(key, "updating setting");
        put_data(&self.http, &format!("setting/{}", segment(&key)), &json!({ "value": value })).await
    }
}
