// Employee endpoints
//
// Listing and hiring are scoped to a shop (`/shop/{shop}/employee`);
// everything else addresses the employee directly (`/employee/{id}`).

use std::sync::Arc;

use serde_json::json;
use tracing::debug;

use super::crud::{DEFAULT_PAGE_SIZE, collect_pages};
use super::{
    ListQuery, delete_ack, fetch, fetch_page, patch_data, post_data, put_data, segment,
};
use crate::envelope::Page;
use crate::error::Error;
use crate::http::{HttpCore, RequestConfig};
use crate::models::{EntityId, Employee, EmployeeInput, EmployeeStatus};

pub struct EmployeeService {
    http: Arc<HttpCore>,
}

impl EmployeeService {
    pub fn new(http: Arc<HttpCore>) -> Self {
        Self { http }
    }

    /// `GET /shop/{shop_id}/employee`
    pub async fn list(&self, shop_id: &EntityId, query: &ListQuery) -> Result<Page<Employee>, Error> {
        debug!(%shop_id, "listing employees");
        fetch_page(&self.http, &format!("shop/{}/employee", segment(shop_id)), query).await
    }

    /// Every page of a shop's employees, starting at `query.page`.
    pub async fn list_all(&self, shop_id: &EntityId, query: &ListQuery) -> Result<Vec<Employee>, Error> {
        let size = query.size.unwrap_or(DEFAULT_PAGE_SIZE);
        collect_pages(query.page.unwrap_or(1), size, |page| {
            let query = ListQuery {
                page: Some(page),
                size: Some(size),
                ..query.clone()
            };
            async move { self.list(shop_id, &query).await }
        })
        .await
    }

    /// `GET /employee/{id}`
    pub async fn get(&self, id: &EntityId) -> Result<Employee, Error> {
        fetch(&self.http, &format!("employee/{}", segment(id)), &RequestConfig::default()).await
    }

    /// `POST /shop/{shop_id}/employee`
    pub async fn create(&self, shop_id: &EntityId, input: &EmployeeInput) -> Result<Employee, Error> {
        debug!(%shop_id, "adding employee");
        post_data(&self.http, &format!("shop/{}/employee", segment(shop_id)), input).await
    }

    /// `PUT /employee/{id}`
    pub async fn update(&self, id: &EntityId, input: &EmployeeInput) -> Result<Employee, Error> {
        debug!(%id, "updating employee");
        put_data(&self.http, &format!("employee/{}", segment(id)), input).await
    }

    /// `PATCH /employee/{id}/status`
    pub async fn set_status(&self, id: &EntityId, status: EmployeeStatus) -> Result<Employee, Error> {
        debug!(%id, %status, "changing employee status");
        patch_data(
            &self.http,
            &format!("employee/{}/status", segment(id)),
            &json!({ "status": status }),
        )
        .await
    }

    /// `DELETE /employee/{id}`
    pub async fn delete(&self, id: &EntityId) -> Result<(), Error> {
        debug!(%id, "removing employee");
        delete_ack(&self.http, &format!("employee/{}", segment(id))).await
    }
}
