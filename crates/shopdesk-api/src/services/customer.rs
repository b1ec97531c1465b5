// Customer endpoints
//
// Customers self-register against a shop slug and stay PENDING until the
// shop approves or rejects them.

use tracing::debug;

use super::crud::{CrudService, Resource};
use super::{patch_data, post_data};
use crate::error::Error;
use crate::models::{Customer, CustomerRegistration, EntityId, Rejection};

pub type CustomerService = CrudService<Customer>;

impl Resource for Customer {
    const PATH: &'static str = "customer";
    type Input = CustomerRegistration;
}

impl CrudService<Customer> {
    /// Public self-registration from a join link.
    ///
    /// `POST /customer/register`
    pub async fn register(&self, registration: &CustomerRegistration) -> Result<Customer, Error> {
        debug!(shop = %registration.shop_slug, "registering customer");
        post_data(self.http(), "customer/register", registration).await
    }

    /// `PATCH /customer/{id}/approve`
    pub async fn approve(&self, id: &EntityId) -> Result<Customer, Error> {
        debug!(%id, "approving customer");
        let path = format!("{}/approve", Self::item_path(id));
        patch_data(self.http(), &path, &serde_json::json!({})).await
    }

    /// `PATCH /customer/{id}/reject`
    pub async fn reject(&self, id: &EntityId, reason: Option<String>) -> Result<Customer, Error> {
        debug!(%id, "rejecting customer");
        let path = format!("{}/reject", Self::item_path(id));
        patch_data(self.http(), &path, &Rejection { reason }).await
    }
}
