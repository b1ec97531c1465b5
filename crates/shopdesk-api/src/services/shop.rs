// Shop endpoints
//
// CRUD under `/shop`, plus owner lookup, per-shop config, and the two
// image slots (avatar, cover).

use serde_json::Value;
use tracing::debug;

use super::crud::{CrudService, Resource};
use super::{ListQuery, fetch, fetch_page, put_data, segment};
use crate::envelope::{ApiResponse, Page};
use crate::error::Error;
use crate::http::RequestConfig;
use crate::models::{EntityId, Shop, ShopConfig, ShopConfigPatch, ShopInput};
use crate::upload::ImageUpload;

pub type ShopService = CrudService<Shop>;

impl Resource for Shop {
    const PATH: &'static str = "shop";
    type Input = ShopInput;
}

/// Which image slot an upload targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum ShopImage {
    Avatar,
    Cover,
}

impl CrudService<Shop> {
    /// `GET /shop/{id}`
    pub async fn get_shop_by_id(&self, id: &EntityId) -> Result<Shop, Error> {
        self.get(id).await
    }

    /// Shops owned by a user.
    ///
    /// `GET /shop/owner/{owner_id}`
    pub async fn list_by_owner(
        &self,
        owner_id: &EntityId,
        query: &ListQuery,
    ) -> Result<Page<Shop>, Error> {
        debug!(%owner_id, "listing shops by owner");
        fetch_page(self.http(), &format!("shop/owner/{}", segment(owner_id)), query).await
    }

    /// `GET /shop/{id}/config`
    pub async fn get_config(&self, id: &EntityId) -> Result<ShopConfig, Error> {
        let path = format!("{}/config", Self::item_path(id));
        fetch(self.http(), &path, &RequestConfig::default()).await
    }

    /// `PUT /shop/{id}/config` with the full config.
    pub async fn update_config(
        &self,
        id: &EntityId,
        config: &ShopConfig,
    ) -> Result<ShopConfig, Error> {
        debug!(%id, "updating shop config");
        put_data(self.http(), &format!("{}/config", Self::item_path(id)), config).await
    }

    /// Fetch the current config, apply `patch`, and send the result back.
    ///
    /// The config is edited as raw JSON, so fields the patch leaves unset
    /// (including unknown nested keys and explicit `null`s) go back exactly
    /// as the server sent them.
    pub async fn patch_config(
        &self,
        id: &EntityId,
        patch: ShopConfigPatch,
    ) -> Result<ShopConfig, Error> {
        let path = format!("{}/config", Self::item_path(id));
        let mut raw: Value = fetch(self.http(), &path, &RequestConfig::default()).await?;
        patch.apply_to(&mut raw);
        debug!(%id, "updating shop config");
        put_data(self.http(), &path, &raw).await
    }

    /// `POST /shop/{id}/{avatar|cover}` as multipart.
    pub async fn upload_image(
        &self,
        id: &EntityId,
        slot: ShopImage,
        image: ImageUpload,
    ) -> Result<Shop, Error> {
        let path = format!("{}/{}", Self::item_path(id), slot.as_ref());
        debug!(%id, %slot, file = image.file_name(), "uploading shop image");
        let form = image.into_form()?;
        self.http()
            .post_multipart::<ApiResponse<Shop>>(&path, form, &RequestConfig::default())
            .await?
            .into_data(&path)
    }

    pub async fn upload_avatar(&self, id: &EntityId, image: ImageUpload) -> Result<Shop, Error> {
        self.upload_image(id, ShopImage::Avatar, image).await
    }

    pub async fn upload_cover(&self, id: &EntityId, image: ImageUpload) -> Result<Shop, Error> {
        self.upload_image(id, ShopImage::Cover, image).await
    }
}
