//! Access-token sources.
//!
//! The searcher asks a [`CredentialSource`] for a token only when the
//! config does not carry one, so tests can supply deterministic
//! credentials without touching real process state.

use std::env;

/// Supplier of the upstream access token.
///
/// An empty token counts as absent everywhere, mirroring how an empty
/// environment variable is treated.
pub trait CredentialSource: Send + Sync {
    /// A usable token, or `None` when this source has nothing to offer.
    fn access_token(&self) -> Option<String>;
}

/// Reads the token from a process environment variable.
#[derive(Debug, Clone)]
pub struct EnvCredentials {
    var: String,
}

impl EnvCredentials {
    /// Variable consulted by [`EnvCredentials::default`].
    pub const DEFAULT_VAR: &'static str = "VENUESCOPE_ACCESS_TOKEN";

    /// Read the token from `var` instead of the default variable.
    #[must_use]
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvCredentials {
    fn default() -> Self {
        Self::new(Self::DEFAULT_VAR)
    }
}

impl CredentialSource for EnvCredentials {
    fn access_token(&self) -> Option<String> {
        env::var(&self.var).ok().filter(|token| !token.is_empty())
    }
}

/// A fixed token, handed over verbatim.
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    token: String,
}

impl StaticCredentials {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl CredentialSource for StaticCredentials {
    fn access_token(&self) -> Option<String> {
        Some(self.token.clone()).filter(|token| !token.is_empty())
    }
}

/// Never produces a token. Useful for exercising the unauthenticated
/// rejection path in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCredentials;

impl CredentialSource for NullCredentials {
    fn access_token(&self) -> Option<String> {
        None
    }
}
