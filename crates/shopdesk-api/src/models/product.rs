// ── Product catalog types ──
//
// `ProductMaster` is the platform-wide catalog entry; `Product` is a
// shop's listing, optionally derived from a master.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::entity_id::EntityId;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum ProductStatus {
    Active,
    Inactive,
    OutOfStock,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: EntityId,
    pub sku: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub cost_price: Option<Decimal>,
    pub sale_price: Option<Decimal>,
    pub stock: Option<i64>,
    pub status: Option<ProductStatus>,
    pub category_id: Option<EntityId>,
    pub image: Option<String>,
    pub shop_id: Option<EntityId>,
    pub master_id: Option<EntityId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductMaster {
    pub id: EntityId,
    pub sku: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub cost_price: Option<Decimal>,
    pub sale_price: Option<Decimal>,
    pub stock: Option<i64>,
    pub status: Option<ProductStatus>,
    pub category_id: Option<EntityId>,
    pub image: Option<String>,
}

/// Body for creating or editing a product or product master.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProductStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shop_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub master_id: Option<EntityId>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use serde_json::json;

    use super::*;

    #[test]
    fn prices_accept_numbers_and_strings() {
        let product: Product = serde_json::from_value(json!({
            "id": 3,
            "name": "Cà phê sữa đá",
            "price": 29000,
            "salePrice": "25000.50",
            "status": "OUT_OF_STOCK"
        }))
        .unwrap();

        assert_eq!(product.price, Some(Decimal::from(29000)));
        assert_eq!(
            product.sale_price,
            Some(Decimal::from_str("25000.50").unwrap())
        );
        assert_eq!(product.status, Some(ProductStatus::OutOfStock));
    }

    #[test]
    fn unrecognised_status_does_not_fail_the_row() {
        let product: Product =
            serde_json::from_value(json!({"id": "p1", "name": "Tea", "status": "ARCHIVED"}))
                .unwrap();
        assert_eq!(product.status, Some(ProductStatus::Unknown));
    }
}
