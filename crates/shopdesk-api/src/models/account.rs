// ── Account types: login, profile, settings ──

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::entity_id::EntityId;
use crate::session::Role;

/// Payload returned by the login endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(alias = "accessToken")]
    pub token: String,
    pub role: Role,
    pub username: String,
    #[serde(alias = "owner", alias = "user_id")]
    pub user_id: Option<EntityId>,
    #[serde(alias = "customer_id")]
    pub customer_id: Option<EntityId>,
}

/// Body for registering a new shop owner account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerRegistration {
    pub username: String,
    pub password: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: EntityId,
    pub username: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub role: Option<Role>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// A platform-level key/value setting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Setting {
    pub key: String,
    pub value: Value,
    pub description: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn login_accepts_owner_alias() {
        let resp: LoginResponse = serde_json::from_value(json!({
            "token": "t0k",
            "role": "SHOP_OWNER",
            "username": "mira",
            "owner": 12
        }))
        .unwrap();
        assert_eq!(resp.user_id, Some(EntityId::Numeric(12)));
        assert_eq!(resp.role, Role::ShopOwner);
        assert!(resp.customer_id.is_none());
    }
}
