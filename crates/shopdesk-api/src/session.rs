// Session state
//
// The bearer token plus the identity fields returned at login. One
// `SessionHandle` per client holds the live copy in memory and writes
// through to a `SessionStore` so the next process picks it up.

use std::sync::{Arc, PoisonError, RwLock};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::Error;

/// Account role granted by the backend at login.
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
pub enum Role {
    Admin,
    ShopOwner,
    Employee,
    Customer,
    #[serde(other)]
    Unknown,
}

/// An authenticated session.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: SecretString,
    pub role: Role,
    pub username: String,
    pub user_id: Option<String>,
    pub customer_id: Option<String>,
}

impl Session {
    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token.expose_secret())
    }
}

/// Persistent storage for the session between runs.
pub trait SessionStore: Send + Sync {
    /// Read the stored session, `None` if nobody is logged in.
    fn load(&self) -> Result<Option<Session>, Error>;

    /// Replace the stored session.
    fn save(&self, session: &Session) -> Result<(), Error>;

    /// Remove the stored session. Clearing an empty store is not an error.
    fn clear(&self) -> Result<(), Error>;
}

/// Process-local session store.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    inner: RwLock<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a session already present.
    pub fn with_session(session: Session) -> Self {
        Self {
            inner: RwLock::new(Some(session)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<Session>, Error> {
        Ok(self
            .inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, session: &Session) -> Result<(), Error> {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), Error> {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// Live session for one client, written through to its store.
pub struct SessionHandle {
    current: RwLock<Option<Session>>,
    store: Arc<dyn SessionStore>,
}

impl SessionHandle {
    /// Read the store once and keep the result in memory.
    pub fn load(store: Arc<dyn SessionStore>) -> Result<Self, Error> {
        let current = store.load()?;
        debug!(logged_in = current.is_some(), "session loaded");
        Ok(Self {
            current: RwLock::new(current),
            store,
        })
    }

    pub fn current(&self) -> Option<Session> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// The `Authorization` header value, if a session exists.
    pub(crate) fn bearer(&self) -> Option<String> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(Session::bearer)
    }

    /// Install a new session and persist it.
    pub fn set(&self, session: Session) -> Result<(), Error> {
        self.store.save(&session)?;
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(session);
        Ok(())
    }

    /// Swap in a rotated token, keeping the rest of the session.
    ///
    /// Ignored when nobody is logged in.
    pub fn rotate_token(&self, token: SecretString) -> Result<(), Error> {
        let updated = {
            let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
            let Some(session) = guard.as_mut() else {
                return Ok(());
            };
            session.token = token;
            session.clone()
        };
        trace!("session token rotated");
        self.store.save(&updated)
    }

    /// Forget the session in memory and in the store.
    pub fn clear(&self) -> Result<(), Error> {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = None;
        debug!("session cleared");
        self.store.clear()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::str::FromStr;

    use super::*;

    fn session(token: &str) -> Session {
        Session {
            token: SecretString::from(token.to_owned()),
            role: Role::ShopOwner,
            username: "mira".into(),
            user_id: Some("7".into()),
            customer_id: None,
        }
    }

    #[test]
    fn handle_writes_through_to_store() {
        let store = Arc::new(MemorySessionStore::new());
        let handle = SessionHandle::load(store.clone()).unwrap();
        assert!(!handle.is_authenticated());

        handle.set(session("abc")).unwrap();
        assert_eq!(handle.bearer().as_deref(), Some("Bearer abc"));
        assert_eq!(store.load().unwrap().unwrap().username, "mira");

        handle.clear().unwrap();
        assert!(handle.current().is_none());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn rotation_keeps_identity_and_persists() {
        let store = Arc::new(MemorySessionStore::with_session(session("old")));
        let handle = SessionHandle::load(store.clone()).unwrap();

        handle
            .rotate_token(SecretString::from("new".to_owned()))
            .unwrap();

        let stored = store.load().unwrap().unwrap();
        assert_eq!(stored.token.expose_secret(), "new");
        assert_eq!(stored.user_id.as_deref(), Some("7"));
    }

    /// Records whether the handle's lock was free while `save` ran.
    #[derive(Default)]
    struct LockCheckingStore {
        handle: std::sync::OnceLock<std::sync::Weak<SessionHandle>>,
        saved_unlocked: std::sync::atomic::AtomicBool,
    }

    impl SessionStore for LockCheckingStore {
        fn load(&self) -> Result<Option<Session>, Error> {
            Ok(Some(session("old")))
        }

        fn save(&self, _: &Session) -> Result<(), Error> {
            let handle = self.handle.get().and_then(std::sync::Weak::upgrade).unwrap();
            let free = handle.current.try_read().is_ok();
            self.saved_unlocked
                .store(free, std::sync::atomic::Ordering::SeqCst);
            Ok(())
        }

        fn clear(&self) -> Result<(), Error> {
            Ok(())
        }
    }

    #[test]
    fn rotation_saves_outside_the_lock() {
        let store = Arc::new(LockCheckingStore::default());
        let handle = Arc::new(SessionHandle::load(store.clone()).unwrap());
        store.handle.set(Arc::downgrade(&handle)).unwrap();

        handle
            .rotate_token(SecretString::from("new".to_owned()))
            .unwrap();

        assert!(store.saved_unlocked.load(std::sync::atomic::Ordering::SeqCst));
        assert_eq!(handle.bearer().as_deref(), Some("Bearer new"));
    }

    #[test]
    fn rotation_without_session_is_a_no_op() {
        let store = Arc::new(MemorySessionStore::new());
        let handle = SessionHandle::load(store.clone()).unwrap();
        handle
            .rotate_token(SecretString::from("stray".to_owned()))
            .unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn role_parses_backend_spelling() {
        assert_eq!(Role::from_str("SHOP_OWNER").unwrap(), Role::ShopOwner);
        assert_eq!(Role::from_str("admin").unwrap(), Role::Admin);
        assert_eq!(Role::Customer.to_string(), "CUSTOMER");
    }
}
