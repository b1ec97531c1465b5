// Response envelope
//
// Every backend response is `{ code, message, data }` with `code == 1000`
// on success, regardless of HTTP status. Some endpoints spell `data` as
// `datarow`, and list endpoints disagree on whether `data` is an array or
// an object wrapping one. Both differences are absorbed here so services
// only ever see `T` or `Page<T>`.
//
// `data` stays raw JSON until `code` has been checked: failed responses
// often carry a placeholder (`""`, `{}`, `[]`) that is not a `T`.

use std::marker::PhantomData;

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;

/// Application-level success code carried in the `code` field.
pub const SUCCESS_CODE: i64 = 1000;

/// The `{code, message, data}` envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub code: i64,
    pub message: Option<String>,
    #[serde(default, alias = "datarow")]
    pub data: Option<Value>,
    #[serde(skip)]
    payload: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    /// Check the application code, then decode the (possibly absent) payload.
    pub fn into_result(self) -> Result<Option<T>, Error> {
        if !self.is_success() {
            return Err(Error::Application {
                code: self.code,
                message: self
                    .message
                    .unwrap_or_else(|| format!("request failed with code {}", self.code)),
            });
        }
        match self.data {
            None => Ok(None),
            Some(raw) => T::deserialize(&raw)
                .map(Some)
                .map_err(|e| Error::Deserialization {
                    message: e.to_string(),
                    body: raw.to_string(),
                }),
        }
    }

    /// Check the application code and require a payload.
    pub fn into_data(self, path: &str) -> Result<T, Error> {
        self.into_result()?.ok_or_else(|| Error::MissingData {
            path: path.to_owned(),
        })
    }
}

impl<T: DeserializeOwned + Default> ApiResponse<T> {
    /// Check the application code, substituting `T::default()` for a missing payload.
    pub fn into_data_or_default(self) -> Result<T, Error> {
        Ok(self.into_result()?.unwrap_or_default())
    }
}

// ── Pages ───────────────────────────────────────────────────────────

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: Option<u64>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: None,
            page: None,
            size: None,
        }
    }
}

impl<T> Page<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total matching rows, falling back to the page length.
    pub fn total_or_len(&self) -> u64 {
        self.total
            .unwrap_or_else(|| u64::try_from(self.items.len()).unwrap_or(u64::MAX))
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PageRepr<T> {
    Bare(Vec<T>),
    Wrapped(PageObject<T>),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageObject<T> {
    #[serde(alias = "data", alias = "rows", alias = "content", alias = "datarow")]
    items: Vec<T>,
    #[serde(alias = "totalElements", alias = "totalItems", alias = "count")]
    total: Option<u64>,
    #[serde(alias = "currentPage")]
    page: Option<u32>,
    #[serde(alias = "pageSize", alias = "limit")]
    size: Option<u32>,
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Page<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match PageRepr::<T>::deserialize(deserializer)? {
            PageRepr::Bare(items) => Self {
                items,
                ..Self::default()
            },
            PageRepr::Wrapped(obj) => Self {
                items: obj.items,
                total: obj.total,
                page: obj.page,
                size: obj.size,
            },
        })
    }
}
