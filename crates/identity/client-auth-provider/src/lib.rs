//! OAuth2 client-credential authentication provider.
//!
//! This crate authenticates "client credentials"-style requests: it looks up
//! the claimed client in a [`ClientDetailsService`], verifies the presented
//! secret under a pluggable [`SecretVerifier`], and validates that the
//! requested scopes fall inside the client's allowed scopes. It does not
//! issue tokens or own any transport; it produces an
//! [`AuthorizedClient`] for the surrounding pipeline to consume.

mod provider;
mod registry;
mod verifier;


pub use provider::ClientAuthProvider;
pub use registry::InMemoryClientRegistry;
pub use verifier::{PlaintextVerifier, SecretVerifier, Sha256SecretVerifier};

// Re-export common types for convenience
pub use client_auth_core::{
    AuthorizedClient, BaseClientDetails, ClientAuthError, ClientAuthResult, ClientCredentials,
    ClientDetails, ClientDetailsService, SaltedClientDetails,
};
