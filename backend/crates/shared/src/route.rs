//! Route Scope
//!
//! Which paths are public, which need a session, and where each tier
//! sends the user.

/// Route layout of the console
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteScope {
    /// Public entry route (login screen)
    pub root: String,
    /// Namespace that requires a valid session
    pub protected_prefix: String,
    /// Where an authenticated user lands from the root
    pub landing: String,
}

impl Default for RouteScope {
    fn default() -> Self {
        Self {
            root: "/".to_string(),
            protected_prefix: "/dashboard".to_string(),
            landing: "/dashboard".to_string(),
        }
    }
}

impl RouteScope {
    pub fn new(
        root: impl Into<String>,
        protected_prefix: impl Into<String>,
        landing: impl Into<String>,
    ) -> Self {
        let prefix = protected_prefix.into();
        let prefix = match prefix.trim_end_matches('/') {
            "" => "/".to_string(),
            trimmed => trimmed.to_string(),
        };
        Self {
            root: root.into(),
            protected_prefix: prefix,
            landing: landing.into(),
        }
    }

    /// `true` for the prefix itself and anything below it.
    ///
    /// `/dashboard` and `/dashboard/patients` match, `/dashboards` does not.
    pub fn is_protected(&self, path: &str) -> bool {
        let prefix = self.protected_prefix.as_str();
        if prefix == "/" {
            return path.starts_with('/');
        }
        match path.strip_prefix(prefix) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }

    pub fn is_root(&self, path: &str) -> bool {
        path == self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scope() {
        let scope = RouteScope::default();
        assert!(scope.is_protected("/dashboard"));
        assert!(scope.is_protected("/dashboard/"));
        assert!(scope.is_protected("/dashboard/patient"));
        assert!(scope.is_protected("/dashboard/international-patients/42/edit"));
        assert!(!scope.is_protected("/dashboards"));
        assert!(!scope.is_protected("/"));
        assert!(!scope.is_protected("/about"));
        assert!(scope.is_root("/"));
        assert!(!scope.is_root("/dashboard"));
    }

    #[test]
    fn test_trailing_slash_prefix_is_normalized() {
        let scope = RouteScope::new("/", "/admin/", "/admin/home");
        assert_eq!(scope.protected_prefix, "/admin");
        assert!(scope.is_protected("/admin"));
        assert!(scope.is_protected("/admin/home"));
        assert!(!scope.is_protected("/administrator"));
    }

    #[test]
    fn test_root_and_prefix_never_overlap() {
        let scope = RouteScope::default();
        for path in ["/", "/dashboard", "/dashboard/doctors", "/news"] {
            assert!(!(scope.is_root(path) && scope.is_protected(path)), "{path}");
        }
    }
}
