// CoreApi
//
// The one object front ends hold. It owns the shared HttpCore and a fixed
// set of resource services built on top of it, plus the session-level
// operations (login, logout, join links) that touch more than one piece.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::Error;
use crate::http::HttpCore;
use crate::models::Shop;
use crate::services::{
    segment, AuthService, CategoryService, CustomerService, EmployeeService, ProductMasterService,
    ProductService, SettingService, ShopService, SupplierService, UserService, WarehouseService,
};
use crate::session::{Session, SessionHandle, SessionStore};
use crate::transport::TransportConfig;

/// Everything needed to reach one backend.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL every service path is appended to.
    pub api_url: Url,
    /// Customer-facing site used to build join links.
    pub domain_url: Option<Url>,
    pub transport: TransportConfig,
}

impl ClientConfig {
    pub fn new(api_url: Url) -> Self {
        Self {
            api_url,
            domain_url: None,
            transport: TransportConfig::default(),
        }
    }
}

/// Process-wide registry of resource services.
pub struct CoreApi {
    http: Arc<HttpCore>,
    domain_url: Option<Url>,
    auth: AuthService,
    user: UserService,
    shops: ShopService,
    employees: EmployeeService,
    products: ProductService,
    product_masters: ProductMasterService,
    customers: CustomerService,
    categories: CategoryService,
    suppliers: SupplierService,
    warehouses: WarehouseService,
    settings: SettingService,
}

impl CoreApi {
    /// Build the client, loading any stored session once.
    pub fn new(config: ClientConfig, store: Arc<dyn SessionStore>) -> Result<Self, Error> {
        let session = Arc::new(SessionHandle::load(store)?);
        let http = Arc::new(HttpCore::new(config.api_url, &config.transport, session)?);
        Ok(Self::from_http(http, config.domain_url))
    }

    /// Build on an existing HttpCore.
    pub fn from_http(http: Arc<HttpCore>, domain_url: Option<Url>) -> Self {
        debug!(api_url = %http.base_url(), "building service registry");
        Self {
            auth: AuthService::new(Arc::clone(&http)),
            user: UserService::new(Arc::clone(&http)),
            shops: ShopService::new(Arc::clone(&http)),
            employees: EmployeeService::new(Arc::clone(&http)),
            products: ProductService::new(Arc::clone(&http)),
            product_masters: ProductMasterService::new(Arc::clone(&http)),
            customers: CustomerService::new(Arc::clone(&http)),
            categories: CategoryService::new(Arc::clone(&http)),
            suppliers: SupplierService::new(Arc::clone(&http)),
            warehouses: WarehouseService::new(Arc::clone(&http)),
            settings: SettingService::new(Arc::clone(&http)),
            domain_url,
            http,
        }
    }

    // ── Services ─────────────────────────────────────────────────────

    pub fn auth(&self) -> &AuthService {
        &self.auth
    }

    pub fn user(&self) -> &UserService {
        &self.user
    }

    pub fn shops(&self) -> &ShopService {
        &self.shops
    }

    pub fn employees(&self) -> &EmployeeService {
        &self.employees
    }

    pub fn products(&self) -> &ProductService {
        &self.products
    }

    pub fn product_masters(&self) -> &ProductMasterService {
        &self.product_masters
    }

    pub fn customers(&self) -> &CustomerService {
        &self.customers
    }

    pub fn categories(&self) -> &CategoryService {
        &self.categories
    }

    pub fn suppliers(&self) -> &SupplierService {
        &self.suppliers
    }

    pub fn warehouses(&self) -> &WarehouseService {
        &self.warehouses
    }

    pub fn settings(&self) -> &SettingService {
        &self.settings
    }

    pub fn http(&self) -> &Arc<HttpCore> {
        &self.http
    }

    // ── Session ──────────────────────────────────────────────────────

    pub fn session(&self) -> Option<Session> {
        self.http.session().current()
    }

    /// The current session, or `Error::NotAuthenticated`.
    pub fn require_session(&self) -> Result<Session, Error> {
        self.session().ok_or(Error::NotAuthenticated)
    }

    /// Log in and install the returned token for all later calls.
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<Session, Error> {
        let resp = self.auth.login(username, password).await?;
        if resp.token.is_empty() {
            return Err(Error::Application {
                code: crate::envelope::SUCCESS_CODE,
                message: "login succeeded but no token was returned".into(),
            });
        }

        let session = Session {
            token: SecretString::from(resp.token),
            role: resp.role,
            username: resp.username,
            user_id: resp.user_id.map(|id| id.to_string()),
            customer_id: resp.customer_id.map(|id| id.to_string()),
        };
        self.http.session().set(session.clone())?;
        info!(username = %session.username, role = %session.role, "logged in");
        Ok(session)
    }

    /// Tell the backend, then forget the session locally.
    ///
    /// The local session is cleared even when the backend call fails.
    pub async fn logout(&self) -> Result<(), Error> {
        if !self.http.session().is_authenticated() {
            return Ok(());
        }
        if let Err(e) = self.auth.logout().await {
            warn!("backend logout failed: {e}");
        }
        self.http.session().clear()
    }

    /// Whether the current token looks usable (non-empty).
    pub fn has_token(&self) -> bool {
        self.session()
            .is_some_and(|s| !s.token.expose_secret().is_empty())
    }

    // ── Join links ───────────────────────────────────────────────────

    /// Customer self-registration link: `{domain_url}/join/{slug}`.
    ///
    /// Falls back to the shop id when the shop has no slug.
    pub fn join_link(&self, shop: &Shop) -> Result<Url, Error> {
        let domain = self
            .domain_url
            .as_ref()
            .ok_or_else(|| Error::Config("no domain URL configured for join links".into()))?;
        let handle = shop
            .slug
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| shop.id.to_string());
        let base = domain.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/join/{}", segment(&handle)))?)
    }
}
