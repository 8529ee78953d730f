//! Application Configuration
//!
//! Configuration shared by the edge guard, the client guard and the store.

use chrono::Duration;
use kernel::RouteScope;
use platform::cookie::{CookieConfig, MAX_COOKIE_AGE_DAYS};
use platform::matcher::PathMatcher;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

use crate::error::{GuardError, GuardResult};

/// Path segments the edge guard never intercepts
pub const DEFAULT_EXCLUDED_PATHS: &[&str] = &[
    "api",
    "_next/static",
    "_next/image",
    "favicon.ico",
    "public",
    "static",
];

/// Guard configuration
#[derive(Debug, Clone)]
pub struct GuardConfig {
    /// Root, protected prefix and landing path
    pub routes: RouteScope,
    /// Session cookie (name `authentications`, 7 days, path `/`)
    pub cookie: CookieConfig,
    /// Durable storage key holding the session JSON
    pub storage_key: String,
    /// Leading path segments excluded from edge interception
    pub excluded_paths: Vec<String>,
    /// Shown when the client guard bounces an unauthenticated user
    pub login_notice: String,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            routes: RouteScope::default(),
            cookie: CookieConfig::default(),
            storage_key: "authentications".to_string(),
            excluded_paths: DEFAULT_EXCLUDED_PATHS
                .iter()
                .map(|segment| segment.to_string())
                .collect(),
            login_notice: "Please login to access this page".to_string(),
        }
    }
}

impl GuardConfig {
    /// Production defaults: `Secure` cookie
    pub fn production() -> Self {
        let mut config = Self::default();
        config.cookie.secure = true;
        config
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self::default()
    }

    /// Read `GUARD_*` variables from the process environment.
    pub fn from_env() -> GuardResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any variable source; unset variables keep their default.
    ///
    /// | Variable | Meaning |
    /// |----------|---------|
    /// | `GUARD_COOKIE_NAME` | session cookie name |
    /// | `GUARD_STORAGE_KEY` | durable storage key |
    /// | `GUARD_ROOT_PATH` | public entry route |
    /// | `GUARD_PROTECTED_PREFIX` | namespace requiring a session |
    /// | `GUARD_LANDING_PATH` | where signed-in users land |
    /// | `GUARD_EXCLUDED_PATHS` | comma-separated segments |
    /// | `GUARD_COOKIE_SECURE` | `true` / `false` |
    /// | `GUARD_COOKIE_SAME_SITE` | `strict` / `lax` / `none` |
    /// | `GUARD_COOKIE_MAX_AGE_DAYS` | cookie lifetime |
    pub fn from_lookup<F>(lookup: F) -> GuardResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let root = lookup("GUARD_ROOT_PATH").unwrap_or(defaults.routes.root);
        let prefix =
            lookup("GUARD_PROTECTED_PREFIX").unwrap_or(defaults.routes.protected_prefix);
        let landing = lookup("GUARD_LANDING_PATH").unwrap_or(defaults.routes.landing);

        let mut cookie = defaults.cookie;
        if let Some(name) = lookup("GUARD_COOKIE_NAME") {
            cookie.name = name;
        }
        if let Some(secure) = lookup("GUARD_COOKIE_SECURE") {
            cookie.secure = secure.parse().map_err(|_| {
                GuardError::Config(format!("GUARD_COOKIE_SECURE must be true or false, got {secure:?}"))
            })?;
        }
        if let Some(same_site) = lookup("GUARD_COOKIE_SAME_SITE") {
            cookie.same_site = SameSite::parse(&same_site).ok_or_else(|| {
                GuardError::Config(format!("Unknown GUARD_COOKIE_SAME_SITE {same_site:?}"))
            })?;
        }
        if let Some(days) = lookup("GUARD_COOKIE_MAX_AGE_DAYS") {
            let days: i64 = days.parse().map_err(|_| {
                GuardError::Config(format!("GUARD_COOKIE_MAX_AGE_DAYS must be a number, got {days:?}"))
            })?;
            cookie.max_age = Duration::try_days(days).ok_or_else(|| {
                GuardError::Config(format!("GUARD_COOKIE_MAX_AGE_DAYS out of range: {days}"))
            })?;
        }

        let excluded_paths = match lookup("GUARD_EXCLUDED_PATHS") {
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .collect(),
            None => defaults.excluded_paths,
        };

        let config = Self {
            routes: RouteScope::new(root, prefix, landing),
            cookie,
            storage_key: lookup("GUARD_STORAGE_KEY").unwrap_or(defaults.storage_key),
            excluded_paths,
            login_notice: defaults.login_notice,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject layouts in which the two client guard rules could overlap or
    /// a redirect could loop.
    pub fn validate(&self) -> GuardResult<()> {
        let routes = &self.routes;
        for (name, path) in [
            ("root", &routes.root),
            ("protected prefix", &routes.protected_prefix),
            ("landing", &routes.landing),
        ] {
            if !path.starts_with('/') {
                return Err(GuardError::Config(format!("{name} path must start with '/': {path}")));
            }
        }
        if routes.is_protected(&routes.root) {
            return Err(GuardError::Config(format!(
                "root {} lies under the protected prefix {}",
                routes.root, routes.protected_prefix
            )));
        }
        if routes.is_root(&routes.landing) {
            return Err(GuardError::Config("landing path must differ from root".to_string()));
        }
        if self.cookie.name.is_empty() || self.storage_key.is_empty() {
            return Err(GuardError::Config(
                "cookie name and storage key must not be empty".to_string(),
            ));
        }
        if self.cookie.max_age <= Duration::zero() {
            return Err(GuardError::Config("cookie max age must be positive".to_string()));
        }
        if self.cookie.max_age > Duration::days(MAX_COOKIE_AGE_DAYS) {
            return Err(GuardError::Config(format!(
                "cookie max age must not exceed {MAX_COOKIE_AGE_DAYS} days"
            )));
        }
        Ok(())
    }

    /// Compile the exclusion list
    pub fn path_matcher(&self) -> GuardResult<PathMatcher> {
        Ok(PathMatcher::new(&self.excluded_paths)?)
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie.name
    }
}
