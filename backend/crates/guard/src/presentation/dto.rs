//! Response DTOs

use kernel::AuthSession;
use serde::Serialize;

/// `GET /api/session` response
#[derive(Debug, Clone, Serialize)]
pub struct SessionStatusResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl From<&AuthSession> for SessionStatusResponse {
    fn from(session: &AuthSession) -> Self {
        Self {
            authenticated: session.is_valid(),
            display_name: session.display_name(),
            first_name: session.first_name.clone(),
            last_name: session.last_name.clone(),
            email: session.email.clone(),
        }
    }
}
