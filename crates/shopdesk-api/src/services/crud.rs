// Generic CRUD service
//
// `{collection}` for list/create, `{collection}/{id}` for get/update/delete.

use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::{ListQuery, delete_ack, fetch, fetch_page, post_data, put_data, segment};
use crate::envelope::Page;
use crate::error::Error;
use crate::http::{HttpCore, RequestConfig};
use crate::models::EntityId;

/// Default page size used by [`CrudService::list_all`].
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Upper bound on pages fetched by one `list_all` walk.
pub const MAX_PAGES: u32 = 1_000;

/// A backend resource reachable under a fixed collection path.
pub trait Resource: DeserializeOwned + PartialEq + Send {
    /// Collection path relative to the API base URL, without slashes.
    const PATH: &'static str;

    /// Body accepted by create and update.
    type Input: Serialize + Sync;
}

/// List/get/create/update/delete for one resource type.
pub struct CrudService<T> {
    http: Arc<HttpCore>,
    _resource: PhantomData<fn() -> T>,
}

impl<T: Resource> CrudService<T> {
    pub fn new(http: Arc<HttpCore>) -> Self {
        Self {
            http,
            _resource: PhantomData,
        }
    }

    pub(crate) fn http(&self) -> &HttpCore {
        &self.http
    }

    /// Path of a single item: `{collection}/{id}`, with `id` percent-encoded.
    pub fn item_path(id: &EntityId) -> String {
        format!("{}/{}", T::PATH, segment(id))
    }

    /// `GET {collection}` with pagination/filter query pairs.
    pub async fn list(&self, query: &ListQuery) -> Result<Page<T>, Error> {
        debug!(resource = T::PATH, ?query, "listing");
        fetch_page(&self.http, T::PATH, query).await
    }

    /// Walk every page of `list`, starting at `query.page` (default 1).
    pub async fn list_all(&self, query: &ListQuery) -> Result<Vec<T>, Error> {
        let size = query.size.unwrap_or(DEFAULT_PAGE_SIZE);
        let first = query.page.unwrap_or(1);
        collect_pages(first, size, |page| {
            let query = ListQuery {
                page: Some(page),
                size: Some(size),
                ..query.clone()
            };
            async move { self.list(&query).await }
        })
        .await
    }

    /// `GET {collection}/{id}`
    pub async fn get(&self, id: &EntityId) -> Result<T, Error> {
        let path = Self::item_path(id);
        fetch(&self.http, &path, &RequestConfig::default()).await
    }

    /// `POST {collection}`
    pub async fn create(&self, input: &T::Input) -> Result<T, Error> {
        debug!(resource = T::PATH, "creating");
        post_data(&self.http, T::PATH, input).await
    }

    /// `PUT {collection}/{id}`
    pub async fn update(&self, id: &EntityId, input: &T::Input) -> Result<T, Error> {
        debug!(resource = T::PATH, %id, "updating");
        put_data(&self.http, &Self::item_path(id), input).await
    }

    /// `DELETE {collection}/{id}`
    pub async fn delete(&self, id: &EntityId) -> Result<(), Error> {
        debug!(resource = T::PATH, %id, "deleting");
        delete_ack(&self.http, &Self::item_path(id)).await
    }
}

/// Fetch successive pages until the listing is exhausted.
///
/// A walk stops on an empty or short page, once the reported total is
/// reached, when the response carries no pagination metadata at all (a bare
/// array is the whole listing), when a page repeats the previous one, or
/// after [`MAX_PAGES`] requests.
pub(crate) async fn collect_pages<T, F, Fut>(
    first_page: u32,
    size: u32,
    load: F,
) -> Result<Vec<T>, Error>
where
    T: PartialEq,
    F: Fn(u32) -> Fut,
    Fut: Future<Output = Result<Page<T>, Error>>,
{
    let mut all: Vec<T> = Vec::new();
    let mut page = first_page;
    let size_usize = usize::try_from(size).unwrap_or(usize::MAX);

    for fetched in 1..=MAX_PAGES {
        let batch = load(page).await?;
        let received = batch.len();
        let paginated = batch.total.is_some() || batch.page.is_some();
        let total = batch.total;

        let repeated = received > 0
            && all.len() >= received
            && all[all.len() - received..] == batch.items[..];
        if repeated {
            debug!(page, "page repeats the previous one, stopping");
            break;
        }
        all.extend(batch.items);

        let reached_total =
            total.is_some_and(|t| u64::try_from(all.len()).unwrap_or(u64::MAX) >= t);
        if !paginated || received == 0 || received < size_usize || reached_total {
            break;
        }
        if fetched == MAX_PAGES {
            warn!(pages = MAX_PAGES, "page limit reached, listing may be incomplete");
        }
        page += 1;
    }

    Ok(all)
}
