//! Client authentication orchestration.

use crate::verifier::{PlaintextVerifier, SecretVerifier};
use client_auth_core::{
    AuthorizedClient, ClientAuthError, ClientAuthResult, ClientCredentials, ClientDetailsService,
    GRANT_AUTHORIZATION_CODE,
};
use std::sync::Arc;
use tracing::debug;

/// Authenticates client-credential requests against a client registry.
///
/// Each `authenticate` call is stateless and single-shot: lookup, secret
/// verification, then scope validation, in that order, short-circuiting on
/// the first failure. The provider never caches records or retains anything
/// between calls, so it is safe to share across tasks and safe to retry.
#[derive(Clone)]
pub struct ClientAuthProvider {
    clients: Arc<dyn ClientDetailsService>,
    verifier: Arc<dyn SecretVerifier>,
}

impl ClientAuthProvider {
    /// Create a provider that compares secrets as plaintext.
    pub fn new(clients: Arc<dyn ClientDetailsService>) -> Self {
        Self::with_verifier(clients, Arc::new(PlaintextVerifier))
    }

    /// Create a provider with an injected secret verification strategy.
    pub fn with_verifier(
        clients: Arc<dyn ClientDetailsService>,
        verifier: Arc<dyn SecretVerifier>,
    ) -> Self {
        Self { clients, verifier }
    }

    /// Authenticate a client and return its granted authorities and scope.
    pub async fn authenticate(
        &self,
        credentials: &ClientCredentials,
    ) -> ClientAuthResult<AuthorizedClient> {
        let client = self.clients.load_client(&credentials.client_id).await?;

        // An absent secret is verified as the empty string.
        let presented = credentials.client_secret.as_deref().unwrap_or("");
        if !self
            .verifier
            .matches(client.client_secret(), presented, client.salt())
        {
            debug!(client_id = %credentials.client_id, "client secret mismatch");
            return Err(ClientAuthError::UnauthorizedClient);
        }

        if credentials.scope.is_empty() {
            // An authorization_code exchange with no scope is a request
            // error when the client has scopes configured.
            if credentials.grant_type.as_deref() == Some(GRANT_AUTHORIZATION_CODE)
                && !client.scope().is_empty()
            {
                debug!(client_id = %credentials.client_id, "missing scope for authorization_code grant");
                return Err(ClientAuthError::MissingScope);
            }
        } else {
            // First offending scope wins, in request order.
            for requested in &credentials.scope {
                if !client.scope().contains(requested) {
                    debug!(
                        client_id = %credentials.client_id,
                        scope = %requested,
                        "requested scope not allowed for client"
                    );
                    return Err(ClientAuthError::InvalidScope(requested.clone()));
                }
            }
        }

        // Identifier comes from the record so registry normalization wins.
        Ok(AuthorizedClient::new(
            client.client_id(),
            credentials.scope.clone(),
        ))
    }
}
