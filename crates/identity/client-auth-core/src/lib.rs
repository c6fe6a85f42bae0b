//! Core traits and types for OAuth2 client-credential authentication.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

/// Authority granted to every successfully authenticated client.
pub const ROLE_CLIENT: &str = "ROLE_CLIENT";

/// Grant type whose token exchange requires an explicit scope.
pub const GRANT_AUTHORIZATION_CODE: &str = "authorization_code";

/// Errors produced while authenticating a client.
///
/// All variants are routine rejections of the current call, never process
/// failures. `ClientLookup` and `UnauthorizedClient` are kept distinct for
/// diagnostics, but neither message reveals whether the client id exists;
/// callers mapping these to an OAuth2 response should collapse both into a
/// generic `invalid_client`.
#[derive(Debug, Error)]
pub enum ClientAuthError {
    /// The client id is not registered or the registry was unavailable.
    #[error("Unknown client: {0}")]
    ClientLookup(String),

    /// The presented secret does not match the stored secret.
    #[error("Invalid client secret.")]
    UnauthorizedClient,

    /// A requested scope is outside the client's allowed scopes.
    #[error("Invalid scope: {0}")]
    InvalidScope(String),

    /// The grant type requires an explicit scope but none was requested.
    #[error("Invalid scope (none)")]
    MissingScope,
}

pub type ClientAuthResult<T> = Result<T, ClientAuthError>;

/// A registered OAuth2 client as seen by the authentication provider.
///
/// The record is owned and mutated by the registry; the provider only reads
/// it for the duration of a single `authenticate` call.
pub trait ClientDetails: Send + Sync {
    fn client_id(&self) -> &str;

    /// Stored secret representation. Plaintext or an encoded digest,
    /// depending on the verifier the provider was configured with.
    fn client_secret(&self) -> &str;

    /// Scopes this client may be granted. Empty means no scope may ever be
    /// requested.
    fn scope(&self) -> &HashSet<String>;

    /// Per-client salt mixed into secret hashing, for records that carry
    /// one. The default is no salt.
    fn salt(&self) -> Option<&str> {
        None
    }
}

/// Plain client record without a hashing salt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseClientDetails {
    pub client_id: String,
    pub client_secret: String,
    pub scope: HashSet<String>,
}

impl BaseClientDetails {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            scope: HashSet::new(),
        }
    }

    pub fn with_scope(mut self, scope: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.scope = scope.into_iter().map(Into::into).collect();
        self
    }
}

impl ClientDetails for BaseClientDetails {
    fn client_id(&self) -> &str {
        &self.client_id
    }

    fn client_secret(&self) -> &str {
        &self.client_secret
    }

    fn scope(&self) -> &HashSet<String> {
        &self.scope
    }
}

/// Client record that exposes a per-client salt for secret hashing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaltedClientDetails {
    pub details: BaseClientDetails,
    pub salt: String,
}

impl SaltedClientDetails {
    pub fn new(details: BaseClientDetails, salt: impl Into<String>) -> Self {
        Self {
            details,
            salt: salt.into(),
        }
    }
}

impl ClientDetails for SaltedClientDetails {
    fn client_id(&self) -> &str {
        &self.details.client_id
    }

    fn client_secret(&self) -> &str {
        &self.details.client_secret
    }

    fn scope(&self) -> &HashSet<String> {
        &self.details.scope
    }

    fn salt(&self) -> Option<&str> {
        Some(&self.salt)
    }
}

/// Lookup service for client records.
///
/// Implementations may be backed by anything (in-memory map, database,
/// remote registry); the provider only requires that a call either returns
/// the record or reports `ClientAuthError::ClientLookup` before it proceeds.
#[async_trait]
pub trait ClientDetailsService: Send + Sync {
    async fn load_client(&self, client_id: &str) -> ClientAuthResult<Arc<dyn ClientDetails>>;
}

/// Credentials presented by a client on a token request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientCredentials {
    pub client_id: String,

    /// `None` means the caller asserted no secret at all.
    pub client_secret: Option<String>,

    /// Requested scopes in the order the caller presented them. Order is
    /// observable: scope validation rejects the first offending entry.
    #[serde(default)]
    pub scope: Vec<String>,

    #[serde(default)]
    pub grant_type: Option<String>,
}

impl ClientCredentials {
    pub fn new(client_id: impl Into<String>, client_secret: Option<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret,
            scope: Vec::new(),
            grant_type: None,
        }
    }

    pub fn with_scope(mut self, scope: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.scope = scope.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_grant_type(mut self, grant_type: impl Into<String>) -> Self {
        self.grant_type = Some(grant_type.into());
        self
    }
}

/// Result of a successful client authentication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorizedClient {
    /// Client id as recorded in the registry, not as presented.
    pub client_id: String,

    /// Granted authorities. Always contains [`ROLE_CLIENT`].
    pub authorities: HashSet<String>,

    /// The validated requested scopes; empty when none were requested.
    pub scope: Vec<String>,
}

impl AuthorizedClient {
    pub fn new(client_id: impl Into<String>, scope: Vec<String>) -> Self {
        Self {
            client_id: client_id.into(),
            authorities: HashSet::from([ROLE_CLIENT.to_string()]),
            scope,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn salt_capability_defaults_to_none() {
        let details = BaseClientDetails::new("myClientId", "mySecret");
        assert_eq!(details.salt(), None);

        let salted = SaltedClientDetails::new(details, "mySalt");
        assert_eq!(salted.salt(), Some("mySalt"));
        assert_eq!(salted.client_id(), "myClientId");
    }

    #[test]
    fn error_messages_match_contract() {
        assert_eq!(
            ClientAuthError::UnauthorizedClient.to_string(),
            "Invalid client secret."
        );
        assert_eq!(
            ClientAuthError::InvalidScope("foo".to_string()).to_string(),
            "Invalid scope: foo"
        );
        assert_eq!(
            ClientAuthError::MissingScope.to_string(),
            "Invalid scope (none)"
        );
    }

    #[test]
    fn authorized_client_carries_role_marker() {
        let authorized = AuthorizedClient::new("myClientId", vec!["read".to_string()]);
        assert!(authorized.authorities.contains(ROLE_CLIENT));
        assert_eq!(authorized.scope, vec!["read".to_string()]);
    }

    #[test]
    fn credentials_deserialize_with_defaults() {
        let credentials: ClientCredentials = serde_json::from_value(serde_json::json!({
            "client_id": "myClientId",
            "client_secret": "mySecret"
        }))
        .unwrap();

        assert_eq!(credentials.client_id, "myClientId");
        assert!(credentials.scope.is_empty());
        assert!(credentials.grant_type.is_none());
    }
}
