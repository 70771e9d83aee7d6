//! Provider configuration supplied by the host.

use serde::{Deserialize, Serialize};

use crate::extract::DEFAULT_MAX_BODY_BYTES;

/// Settings for [`DelegatedAuthenticationProvider`](crate::DelegatedAuthenticationProvider).
///
/// Missing fields fall back to their defaults, so hosts only need to spell
/// out what they change.
///
/// # Examples
///
/// ```
/// use delegated_auth::ProviderConfig;
///
/// let config: ProviderConfig = serde_json::from_str(r#"{"user_name":"kiosk"}"#).unwrap();
/// assert_eq!(config.identifier, "delegated");
/// assert_eq!(config.user_name, "kiosk");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Identifier the provider reports to the host
    pub identifier: String,
    /// Name of the single user of every session
    pub user_name: String,
    /// Maximum number of body bytes read from a JSON request
    pub max_body_bytes: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            identifier: "delegated".to_string(),
            user_name: "delegated".to_string(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl ProviderConfig {
    /// Sets the provider identifier.
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = identifier.into();
        self
    }

    /// Sets the session user name.
    pub fn with_user_name(mut self, user_name: impl Into<String>) -> Self {
        self.user_name = user_name.into();
        self
    }

    /// Sets the JSON body size cap.
    pub fn with_max_body_bytes(mut self, max_body_bytes: u64) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }
}
