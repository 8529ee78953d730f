//! Auth State Store
//!
//! Single source of truth for the session during the client lifetime.
//! Holds the in-memory copy and mirrors every change into durable storage
//! (authoritative across reloads) and the session cookie (the projection
//! the edge guard reads).

use std::sync::{Arc, PoisonError, RwLock};

use chrono::Utc;
use kernel::{AuthSession, InvalidSession, SessionVerdict, parse_session};
use platform::cookie::CookieJar;
use platform::storage::DurableStorage;

use crate::application::config::GuardConfig;
use crate::error::GuardResult;

/// Explicitly constructed session store; one per application root.
///
/// Without a durable storage or cookie jar (server-side rendering, tests)
/// the corresponding mirror writes are skipped and only memory changes.
pub struct AuthStateStore {
    config: Arc<GuardConfig>,
    session: RwLock<Option<AuthSession>>,
    durable: Option<Arc<dyn DurableStorage>>,
    cookies: Option<Arc<dyn CookieJar>>,
}

/// Builder for [`AuthStateStore`]
pub struct AuthStateStoreBuilder {
    config: Arc<GuardConfig>,
    durable: Option<Arc<dyn DurableStorage>>,
    cookies: Option<Arc<dyn CookieJar>>,
}

impl AuthStateStoreBuilder {
    pub fn durable(mut self, storage: Arc<dyn DurableStorage>) -> Self {
        self.durable = Some(storage);
        self
    }

    pub fn cookies(mut self, jar: Arc<dyn CookieJar>) -> Self {
        self.cookies = Some(jar);
        self
    }

    /// Hydrate synchronously from durable storage and build.
    pub fn build(self) -> AuthStateStore {
        let session = self
            .durable
            .as_deref()
            .and_then(|storage| hydrate(storage, &self.config.storage_key));

        AuthStateStore {
            config: self.config,
            session: RwLock::new(session),
            durable: self.durable,
            cookies: self.cookies,
        }
    }
}

impl AuthStateStore {
    pub fn builder(config: Arc<GuardConfig>) -> AuthStateStoreBuilder {
        AuthStateStoreBuilder {
            config,
            durable: None,
            cookies: None,
        }
    }

    /// Store with no storage capability at all
    pub fn detached(config: Arc<GuardConfig>) -> Self {
        Self::builder(config).build()
    }

    pub fn is_detached(&self) -> bool {
        self.durable.is_none() && self.cookies.is_none()
    }

    /// Current session, if any
    pub fn get(&self) -> Option<AuthSession> {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// `true` when the current session carries a token
    pub fn is_authenticated(&self) -> bool {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(AuthSession::is_valid)
    }

    pub fn set(&self, session: AuthSession) -> GuardResult<()> {
        self.persist_session(Some(session))
    }

    pub fn clear(&self) -> GuardResult<()> {
        self.persist_session(None)
    }

    /// Write `session` (or its absence) to all three tiers.
    ///
    /// Memory is updated first, so `get()` observes the new value even when
    /// a mirror write fails. Mirror failures are returned, not retried; the
    /// cookie is written regardless of the durable outcome.
    pub fn persist_session(&self, session: Option<AuthSession>) -> GuardResult<()> {
        let serialized = session.as_ref().map(AuthSession::to_json).transpose()?;
        let authenticated = session.as_ref().is_some_and(AuthSession::is_valid);

        *self.session.write().unwrap_or_else(PoisonError::into_inner) = session;

        let key = self.config.storage_key.as_str();
        let durable_result = match (&self.durable, &serialized) {
            (Some(storage), Some(json)) => storage.set_item(key, json),
            (Some(storage), None) => storage.remove_item(key),
            (None, _) => Ok(()),
        };

        if let Some(jar) = &self.cookies {
            let cookie = &self.config.cookie;
            match &serialized {
                Some(json) => jar.write(&cookie.build_set_cookie(json, Utc::now())),
                None => jar.write(&cookie.build_delete_cookie()),
            }
        }

        if let Err(e) = durable_result {
            tracing::warn!(error = %e, key = %key, "Failed to mirror session to durable storage");
            return Err(e.into());
        }

        tracing::debug!(
            authenticated = authenticated,
            detached = self.is_detached(),
            "Session persisted"
        );
        Ok(())
    }
}

/// Read the stored session. Absent, unreadable or malformed entries all
/// hydrate to `None`.
fn hydrate(storage: &dyn DurableStorage, key: &str) -> Option<AuthSession> {
    let raw = match storage.get_item(key) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(error = %e, key = %key, "Durable session unreadable, starting signed out");
            return None;
        }
    };

    match parse_session(raw.as_deref()) {
        SessionVerdict::Valid(session) => Some(session),
        SessionVerdict::Invalid(InvalidSession::Missing) => None,
        SessionVerdict::Invalid(reason) => {
            tracing::warn!(reason = %reason, key = %key, "Ignoring stored session");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::cookie::{MemoryCookieJar, ParsedSetCookie};
    use platform::storage::{FileStorage, MemoryStorage, StorageError, StorageResult};

    use crate::error::GuardError;

    fn config() -> Arc<GuardConfig> {
        Arc::new(GuardConfig::default())
    }

    fn session() -> AuthSession {
        AuthSession::new("xyz")
            .with_name("Kwame", "Asante")
            .with_email("kwame@hospital.example")
    }

    #[test]
    fn test_set_then_get_is_deep_equal() {
        let storage = Arc::new(MemoryStorage::new());
        let jar = Arc::new(MemoryCookieJar::new());
        let store = AuthStateStore::builder(config())
            .durable(storage.clone())
            .cookies(jar.clone())
            .build();

        assert_eq!(store.get(), None);
        store.set(session()).unwrap();
        assert_eq!(store.get(), Some(session()));
        assert!(store.is_authenticated());

        let stored = storage.get_item("authentications").unwrap().unwrap();
        assert_eq!(parse_session(Some(&stored)).into_session(), Some(session()));

        let raw_cookie = jar.read("authentications").unwrap();
        let decoded = platform::cookie::decode_cookie_value(&raw_cookie).unwrap();
        assert_eq!(decoded, stored);
    }

    #[test]
    fn test_clear_removes_every_tier() {
        let storage = Arc::new(MemoryStorage::new());
        let jar = Arc::new(MemoryCookieJar::new());
        let store = AuthStateStore::builder(config())
            .durable(storage.clone())
            .cookies(jar.clone())
            .build();

        store.set(session()).unwrap();
        store.clear().unwrap();

        assert_eq!(store.get(), None);
        assert!(!store.is_authenticated());
        assert_eq!(storage.get_item("authentications").unwrap(), None);
        assert_eq!(jar.read("authentications"), None);
    }

    #[test]
    fn test_hydrates_from_durable_storage() {
        let storage = Arc::new(MemoryStorage::with_item(
            "authentications",
            r#"{"access_token":"restored","first_name":"Efua"}"#,
        ));
        let store = AuthStateStore::builder(config()).durable(storage).build();

        let restored = store.get().unwrap();
        assert_eq!(restored.access_token, "restored");
        assert_eq!(restored.first_name.as_deref(), Some("Efua"));
    }

    #[test]
    fn test_malformed_durable_entry_hydrates_to_none() {
        for raw in ["not-json", "null", "{}", r#"{"access_token":""}"#, ""] {
            let storage = Arc::new(MemoryStorage::with_item("authentications", raw));
            let store = AuthStateStore::builder(config()).durable(storage).build();
            assert_eq!(store.get(), None, "raw {raw:?}");
        }
    }

    #[test]
    fn test_detached_store_keeps_memory_only() {
        let store = AuthStateStore::detached(config());
        assert!(store.is_detached());

        store.set(session()).unwrap();
        assert_eq!(store.get(), Some(session()));

        store.clear().unwrap();
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_cookie_carries_seven_day_expiry() {
        let jar = Arc::new(RecordingJar::default());
        let store = AuthStateStore::builder(config()).cookies(jar.clone()).build();

        store.set(session()).unwrap();
        store.clear().unwrap();

        let writes = jar.writes();
        assert_eq!(writes.len(), 2);

        let set = ParsedSetCookie::parse(&writes[0]).unwrap();
        assert_eq!(set.max_age, Some(7 * 24 * 3600));
        assert!(writes[0].contains("; Path=/"));
        let expires = set.expires.unwrap();
        let horizon = expires - Utc::now();
        assert!(horizon > chrono::Duration::days(6) && horizon <= chrono::Duration::days(7));

        let delete = ParsedSetCookie::parse(&writes[1]).unwrap();
        assert!(delete.is_expired(Utc::now()));
    }

    #[test]
    fn test_file_storage_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Arc::new(FileStorage::new(dir.path()));

        let first = AuthStateStore::builder(config()).durable(storage.clone()).build();
        first.set(session()).unwrap();

        let reloaded = AuthStateStore::builder(config()).durable(storage).build();
        assert_eq!(reloaded.get(), Some(session()));
    }

    #[test]
    fn test_failing_durable_write_still_updates_memory_and_cookie() {
        let jar = Arc::new(MemoryCookieJar::new());
        let store = AuthStateStore::builder(config())
            .durable(Arc::new(BrokenStorage))
            .cookies(jar.clone())
            .build();

        let result = store.set(session());
        assert!(matches!(result, Err(GuardError::Storage(_))));
        assert_eq!(store.get(), Some(session()));
        assert!(jar.read("authentications").is_some());
    }

    #[test]
    fn test_unreadable_durable_storage_hydrates_to_none() {
        let store = AuthStateStore::builder(config())
            .durable(Arc::new(BrokenStorage))
            .build();
        assert_eq!(store.get(), None);
    }

    #[derive(Default)]
    struct RecordingJar {
        writes: std::sync::Mutex<Vec<String>>,
    }

    impl RecordingJar {
        fn writes(&self) -> Vec<String> {
            self.writes.lock().unwrap().clone()
        }
    }

    impl CookieJar for RecordingJar {
        fn write(&self, set_cookie: &str) {
            self.writes.lock().unwrap().push(set_cookie.to_string());
        }

        fn read(&self, _name: &str) -> Option<String> {
            None
        }

        fn cookie_header(&self) -> Option<String> {
            None
        }
    }

    struct BrokenStorage;

    impl DurableStorage for BrokenStorage {
        fn get_item(&self, _key: &str) -> StorageResult<Option<String>> {
            Err(StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "quota exceeded",
            )))
        }

        fn set_item(&self, _key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "quota exceeded",
            )))
        }

        fn remove_item(&self, _key: &str) -> StorageResult<()> {
            Ok(())
        }
    }
}
