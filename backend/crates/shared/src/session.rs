//! Auth Session
//!
//! The session handed out by the hospital API on login, and the single
//! parser both guard tiers use to decide whether raw session data counts
//! as authenticated.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Credentials of a logged-in console user.
///
/// Fields the backend adds beyond the known profile are kept in `extra`
/// so that a stored session reads back exactly as it was written. A known
/// profile field of another JSON type also lands in `extra`, untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    /// Opaque bearer token for the hospital API
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AuthSession {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            first_name: None,
            last_name: None,
            phone_number: None,
            email: None,
            extra: Map::new(),
        }
    }

    pub fn with_name(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self.last_name = Some(last_name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = Some(phone_number.into());
        self
    }

    /// A session only counts when it carries a token.
    pub fn is_valid(&self) -> bool {
        !self.access_token.is_empty()
    }

    /// "First Last", or whichever half is known
    pub fn display_name(&self) -> Option<String> {
        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (Some(first), Some(last)) => Some(format!("{first} {last}")),
            (Some(name), None) | (None, Some(name)) => Some(name.to_string()),
            (None, None) => None,
        }
    }

    /// Serialized form written to durable storage and the cookie
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Build from a JSON object whose token was already checked. Profile
    /// fields are read only when they are strings.
    fn from_fields(access_token: String, mut fields: Map<String, Value>) -> Self {
        fields.remove("access_token");
        let mut take = |key: &str| match fields.remove(key) {
            Some(Value::String(value)) => Some(value),
            Some(other) => {
                fields.insert(key.to_string(), other);
                None
            }
            None => None,
        };

        let first_name = take("first_name");
        let last_name = take("last_name");
        let phone_number = take("phone_number");
        let email = take("email");

        Self {
            access_token,
            first_name,
            last_name,
            phone_number,
            email,
            extra: fields,
        }
    }
}

/// Why raw session data was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidSession {
    /// Nothing stored at all
    Missing,
    /// Stored, but the value is empty
    Empty,
    /// Not JSON, or an undecodable cookie value
    Malformed,
    /// Valid JSON, but not an object (`null`, array, string, ...)
    NotAnObject,
    /// Object without a non-empty string `access_token`
    MissingToken,
}

impl InvalidSession {
    pub const fn as_str(&self) -> &'static str {
        match self {
            InvalidSession::Missing => "missing",
            InvalidSession::Empty => "empty",
            InvalidSession::Malformed => "malformed",
            InvalidSession::NotAnObject => "not_an_object",
            InvalidSession::MissingToken => "missing_token",
        }
    }
}

impl fmt::Display for InvalidSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of [`parse_session`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionVerdict {
    Valid(AuthSession),
    Invalid(InvalidSession),
}

impl SessionVerdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, SessionVerdict::Valid(_))
    }

    pub fn session(&self) -> Option<&AuthSession> {
        match self {
            SessionVerdict::Valid(session) => Some(session),
            SessionVerdict::Invalid(_) => None,
        }
    }

    pub fn into_session(self) -> Option<AuthSession> {
        match self {
            SessionVerdict::Valid(session) => Some(session),
            SessionVerdict::Invalid(_) => None,
        }
    }

    pub fn invalid_reason(&self) -> Option<InvalidSession> {
        match self {
            SessionVerdict::Valid(_) => None,
            SessionVerdict::Invalid(reason) => Some(*reason),
        }
    }
}

/// Decide whether raw session data is an authenticated session.
///
/// Never fails: anything that is not a JSON object with a non-empty string
/// `access_token` is `Invalid`. Only the token decides; the profile fields
/// never reject a session.
pub fn parse_session(raw: Option<&str>) -> SessionVerdict {
    let Some(raw) = raw else {
        return SessionVerdict::Invalid(InvalidSession::Missing);
    };
    if raw.is_empty() {
        return SessionVerdict::Invalid(InvalidSession::Empty);
    }

    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(_) => return SessionVerdict::Invalid(InvalidSession::Malformed),
    };

    let Value::Object(fields) = value else {
        return SessionVerdict::Invalid(InvalidSession::NotAnObject);
    };

    let token = match fields.get("access_token") {
        Some(Value::String(token)) if !token.is_empty() => token.clone(),
        // A token is an opaque string; numbers and booleans are not tokens
        // even where they would be truthy.
        _ => return SessionVerdict::Invalid(InvalidSession::MissingToken),
    };

    SessionVerdict::Valid(AuthSession::from_fields(token, fields))
}
