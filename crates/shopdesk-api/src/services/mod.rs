// Resource services
//
// One service per backend resource. Plain CRUD resources share
// `CrudService<T>`; resources with extra endpoints add inherent methods
// on their concrete `CrudService<Model>` in their own file. Every method
// unwraps the `{code, message, data}` envelope before returning.

pub mod auth;
pub mod catalog;
pub mod crud;
pub mod customer;
pub mod employee;
pub mod product;
pub mod setting;
pub mod shop;
pub mod user;

pub use auth::AuthService;
pub use catalog::{CategoryService, SupplierService, WarehouseService};
pub use crud::{CrudService, Resource};
pub use customer::CustomerService;
pub use employee::EmployeeService;
pub use product::{ProductMasterService, ProductService};
pub use setting::SettingService;
pub use shop::{ShopImage, ShopService};
pub use user::UserService;

use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::envelope::{ApiResponse, Page};
use crate::error::Error;
use crate::http::{HttpCore, RequestConfig};
use crate::models::EntityId;

/// Pagination and filters for list endpoints, passed through as query pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub search: Option<String>,
    pub status: Option<String>,
    pub shop_id: Option<EntityId>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paged(page: u32, size: u32) -> Self {
        Self {
            page: Some(page),
            size: Some(size),
            ..Self::default()
        }
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn status(mut self, status: impl ToString) -> Self {
        self.status = Some(status.to_string());
        self
    }

    pub fn shop(mut self, shop_id: EntityId) -> Self {
        self.shop_id = Some(shop_id);
        self
    }

    pub fn to_request_config(&self) -> RequestConfig {
        let mut config = RequestConfig::new();
        if let Some(page) = self.page {
            config = config.query("page", page);
        }
        if let Some(size) = self.size {
            config = config.query("size", size);
        }
        if let Some(ref search) = self.search {
            config = config.query("search", search);
        }
        if let Some(ref status) = self.status {
            config = config.query("status", status);
        }
        if let Some(ref shop_id) = self.shop_id {
            config = config.query("shopId", shop_id);
        }
        config
    }
}

/// Percent-encode one path segment so `/`, `?` and `#` cannot escape it.
pub(crate) fn segment(value: &impl fmt::Display) -> String {
    urlencoding::encode(&value.to_string()).into_owned()
}

// ── Envelope-aware call helpers ──────────────────────────────────────

pub(crate) async fn fetch<T: DeserializeOwned>(
    http: &HttpCore,
    path: &str,
    config: &RequestConfig,
) -> Result<T, Error> {
    http.get::<ApiResponse<T>>(path, config)
        .await?
        .into_data(path)
}

pub(crate) async fn fetch_page<T: DeserializeOwned>(
    http: &HttpCore,
    path: &str,
    query: &ListQuery,
) -> Result<Page<T>, Error> {
    http.get::<ApiResponse<Page<T>>>(path, &query.to_request_config())
        .await?
        .into_data_or_default()
}

pub(crate) async fn post_data<T, B>(http: &HttpCore, path: &str, body: &B) -> Result<T, Error>
where
    T: DeserializeOwned,
    B: Serialize + Sync + ?Sized,
{
    http.post::<ApiResponse<T>, B>(path, body, &RequestConfig::default())
        .await?
        .into_data(path)
}

pub(crate) async fn put_data<T, B>(http: &HttpCore, path: &str, body: &B) -> Result<T, Error>
where
    T: DeserializeOwned,
    B: Serialize + Sync + ?Sized,
{
    http.put::<ApiResponse<T>, B>(path, body, &RequestConfig::default())
        .await?
        .into_data(path)
}

pub(crate) async fn patch_data<T, B>(http: &HttpCore, path: &str, body: &B) -> Result<T, Error>
where
    T: DeserializeOwned,
    B: Serialize + Sync + ?Sized,
{
    http.patch::<ApiResponse<T>, B>(path, body, &RequestConfig::default())
        .await?
        .into_data(path)
}

/// DELETE, accepting either an envelope or an empty body.
pub(crate) async fn delete_ack(http: &HttpCore, path: &str) -> Result<(), Error> {
    let resp: Option<ApiResponse<Value>> = http.delete(path, &RequestConfig::default()).await?;
    if let Some(resp) = resp {
        resp.into_result()?;
    }
    Ok(())
}

/// POST with no meaningful payload in the reply.
pub(crate) async fn post_ack<B: Serialize + Sync + ?Sized>(
    http: &HttpCore,
    path: &str,
    body: &B,
) -> Result<(), Error> {
    let resp: Option<ApiResponse<Value>> =
        http.post(path, body, &RequestConfig::default()).await?;
    if let Some(resp) = resp {
        resp.into_result()?;
    }
    Ok(())
}

/// PUT with no meaningful payload in the reply.
pub(crate) async fn put_ack<B: Serialize + Sync + ?Sized>(
    http: &HttpCore,
    path: &str,
    body: &B,
) -> Result<(), Error> {
    let resp: Option<ApiResponse<Value>> = http.put(path, body, &RequestConfig::default()).await?;
    if let Some(resp) = resp {
        resp.into_result()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_query_emits_only_set_fields() {
        let config = ListQuery::paged(2, 50)
            .search("latte")
            .shop(EntityId::Numeric(7))
            .to_request_config();
        assert_eq!(
            config.query,
            vec![
                ("page".to_owned(), "2".to_owned()),
                ("size".to_owned(), "50".to_owned()),
                ("search".to_owned(), "latte".to_owned()),
                ("shopId".to_owned(), "7".to_owned()),
            ]
        );
    }

    #[test]
    fn segments_escape_reserved_characters() {
        assert_eq!(segment(&"tax/rate?x=1#y"), "tax%2Frate%3Fx%3D1%23y");
        assert_eq!(segment(&EntityId::Numeric(42)), "42");
        assert_eq!(segment(&"shop a"), "shop%20a");
    }

    #[test]
    fn empty_query_adds_nothing() {
        assert!(ListQuery::new().to_request_config().query.is_empty());
    }
}
