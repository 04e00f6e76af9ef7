//! Login and logout controls.
//!
//! ARCHITECTURE
//! ============
//! The credential exchange itself happens in the external identity provider;
//! login only receives the opaque credential it issued. The credential is kept
//! as the session marker and sent as a bearer token on later requests. How the
//! backend should exchange it for its own session is not settled, so nothing
//! here calls the backend.

use std::fmt::Write;

use sha2::{Digest, Sha256};

use crate::error::ClientError;
use crate::session::SessionStore;

const FINGERPRINT_HEX_LEN: usize = 12;

/// Accept a credential from the identity provider and persist it.
///
/// Returns a short fingerprint of the credential for display; the credential
/// itself is never logged.
///
/// # Errors
///
/// Returns [`ClientError::MissingCredential`] when no non-blank credential was
/// received, or a store error if it cannot be persisted.
pub fn login(store: &SessionStore, credential: Option<&str>) -> Result<String, ClientError> {
    let Some(credential) = credential.map(str::trim).filter(|c| !c.is_empty()) else {
        tracing::error!("login failed");
        return Err(ClientError::MissingCredential);
    };

    store.set_token(credential)?;
    let fp = fingerprint(credential);
    tracing::info!(fingerprint = %fp, "login succeeded");
    Ok(fp)
}

/// Remove the session marker. Succeeds whether or not one was stored.
///
/// # Errors
///
/// Returns a store error if the session file exists but cannot be rewritten.
pub fn logout(store: &SessionStore) -> Result<bool, ClientError> {
    let removed = store.clear_token()?;
    tracing::info!(removed, "logged out");
    Ok(removed)
}

/// Leading hex digits of the credential's SHA-256 digest.
#[must_use]
pub fn fingerprint(credential: &str) -> String {
    let digest = Sha256::digest(credential.as_bytes());
    let mut hex = String::with_capacity(FINGERPRINT_HEX_LEN);
    for b in digest.iter().take(FINGERPRINT_HEX_LEN / 2) {
        let _ = write!(hex, "{b:02x}");
    }
    hex
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
