// Product endpoints
//
// Shop listings live under `/product`, the platform catalog under
// `/product-master`. Only shop listings carry an uploadable image.

use tracing::debug;

use super::crud::{CrudService, Resource};
use crate::envelope::ApiResponse;
use crate::error::Error;
use crate::http::RequestConfig;
use crate::models::{EntityId, Product, ProductInput, ProductMaster};
use crate::upload::ImageUpload;

pub type ProductService = CrudService<Product>;
pub type ProductMasterService = CrudService<ProductMaster>;

impl Resource for Product {
    const PATH: &'static str = "product";
    type Input = ProductInput;
}

impl Resource for ProductMaster {
    const PATH: &'static str = "product-master";
    type Input = ProductInput;
}

impl CrudService<Product> {
    /// `POST /product/{id}/image` as multipart.
    pub async fn upload_image(&self, id: &EntityId, image: ImageUpload) -> Result<Product, Error> {
        let path = format!("{}/image", Self::item_path(id));
        debug!(%id, file = image.file_name(), "uploading product image");
        let form = image.into_form()?;
        self.http()
            .post_multipart::<ApiResponse<Product>>(&path, form, &RequestConfig::default())
            .await?
            .into_data(&path)
    }
}
