// shopdesk-api: Async Rust client for the shopdesk point-of-sale backend
//
// Layering, leaf to root:
//   transport  -> reqwest::Client construction (TLS, timeout, user agent)
//   http       -> HttpCore: verb helpers that return decoded bodies
//   envelope   -> `{code, message, data}` unwrapping and list normalization
//   services   -> one struct per backend resource
//   core_api   -> CoreApi, the fixed registry of services handed to callers

pub mod core_api;
pub mod envelope;
pub mod error;
pub mod http;
pub mod models;
pub mod services;
pub mod session;
pub mod transport;
pub mod upload;

pub use core_api::{ClientConfig, CoreApi};
pub use envelope::{ApiResponse, Page, SUCCESS_CODE};
pub use error::{Error, ErrorKind};
pub use http::{HttpCore, RequestConfig};
pub use models::*;
pub use services::ListQuery;
pub use session::{MemorySessionStore, Role, Session, SessionHandle, SessionStore};
pub use transport::{TlsMode, TransportConfig};
pub use upload::{ImageUpload, MAX_IMAGE_SIZE};
