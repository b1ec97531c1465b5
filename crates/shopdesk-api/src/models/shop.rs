// ── Shop domain types ──

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::entity_id::EntityId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shop {
    pub id: EntityId,
    pub name: String,
    /// URL-safe handle used in customer join links.
    pub slug: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub description: Option<String>,
    pub avatar: Option<String>,
    pub cover: Option<String>,
    #[serde(alias = "owner")]
    pub owner_id: Option<EntityId>,
    pub config: Option<ShopConfig>,
}

/// Opening and closing time, kept as the backend's `HH:MM` strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpeningHours {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Per-shop settings.
///
/// Fields the client does not model are kept in `extra`. Explicit `null`s
/// are not preserved here; [`ShopConfigPatch::apply_to`] edits the raw JSON
/// when a config must go back byte-for-byte.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<OpeningHours>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_email: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_sms: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Targeted edits to a shop config; `None` leaves a field as it was.
#[derive(Debug, Clone, Default)]
pub struct ShopConfigPatch {
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub open: Option<String>,
    pub close: Option<String>,
    pub is_active: Option<bool>,
    pub notify_email: Option<bool>,
    pub notify_sms: Option<bool>,
    pub locale: Option<String>,
    pub currency: Option<String>,
    pub theme: Option<String>,
}

impl ShopConfigPatch {
    /// Write the set fields into a raw config object.
    ///
    /// Every other key, nested or `null`, is left exactly as it was. A
    /// non-object `config` is replaced by an empty object first.
    pub fn apply_to(self, config: &mut Value) {
        if !config.is_object() {
            *config = Value::Object(Map::new());
        }
        let Value::Object(obj) = config else {
            return;
        };

        put(obj, "address", self.address);
        put(obj, "latitude", self.latitude);
        put(obj, "longitude", self.longitude);
        if self.open.is_some() || self.close.is_some() {
            let hours = obj
                .entry("openingHours")
                .or_insert_with(|| Value::Object(Map::new()));
            if !hours.is_object() {
                *hours = Value::Object(Map::new());
            }
            if let Value::Object(hours) = hours {
                put(hours, "open", self.open);
                put(hours, "close", self.close);
            }
        }
        put(obj, "isActive", self.is_active);
        put(obj, "notifyEmail", self.notify_email);
        put(obj, "notifySms", self.notify_sms);
        put(obj, "locale", self.locale);
        put(obj, "currency", self.currency);
        put(obj, "theme", self.theme);
    }
}

fn put<V: Into<Value>>(obj: &mut Map<String, Value>, key: &str, value: Option<V>) {
    if let Some(value) = value {
        obj.insert(key.to_owned(), value.into());
    }
}

/// Body for creating or updating a shop.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn sample_config() -> Value {
        json!({
            "address": "12 Harbour Rd",
            "latitude": 10.776,
            "longitude": 106.700,
            "openingHours": {"open": "08:00", "close": "21:30"},
            "isActive": true,
            "notifyEmail": false,
            "notifySms": true,
            "locale": "vi-VN",
            "currency": "VND",
            "theme": "dark",
            "loyaltyProgram": {"enabled": true, "ratio": 0.05}
        })
    }

    #[test]
    fn config_round_trips_unknown_fields() {
        let mut raw = sample_config();
        raw["openingHours"]["days"] = json!(["mon", "tue"]);
        let config: ShopConfig = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(config.currency.as_deref(), Some("VND"));
        assert!(config.extra.contains_key("loyaltyProgram"));
        assert!(config.opening_hours.as_ref().unwrap().extra.contains_key("days"));
        assert_eq!(serde_json::to_value(&config).unwrap(), raw);
    }

    #[test]
    fn empty_patch_changes_nothing() {
        let mut raw = sample_config();
        raw["theme"] = Value::Null;
        let before = raw.clone();
        ShopConfigPatch::default().apply_to(&mut raw);
        assert_eq!(raw, before);
    }

    #[test]
    fn patch_touches_only_named_fields() {
        let mut raw = json!({
            "openingHours": {"open": "08:00", "close": "21:00", "days": ["mon", "tue"]},
            "isActive": true,
            "theme": null,
            "loyaltyProgram": {"enabled": true}
        });
        ShopConfigPatch {
            close: Some("22:00".into()),
            is_active: Some(false),
            latitude: Some(10.5),
            ..ShopConfigPatch::default()
        }
        .apply_to(&mut raw);

        assert_eq!(
            raw,
            json!({
                "openingHours": {"open": "08:00", "close": "22:00", "days": ["mon", "tue"]},
                "isActive": false,
                "latitude": 10.5,
                "theme": null,
                "loyaltyProgram": {"enabled": true}
            })
        );
    }

    #[test]
    fn patch_creates_missing_opening_hours() {
        let mut raw = Value::Null;
        ShopConfigPatch {
            open: Some("07:30".into()),
            ..ShopConfigPatch::default()
        }
        .apply_to(&mut raw);
        assert_eq!(raw, json!({"openingHours": {"open": "07:30"}}));
    }
}
