// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Refresh-token exchange.
//!
//! One form-encoded POST to the token endpoint per job. A response without
//! an access token (revoked or invalid refresh token) is terminal for the
//! job; there is no retry.

use nudge_adapters::{HttpAdapter, HttpError, HttpResponse};
use nudge_core::{AccessToken, CredentialError, Credentials, ResolvedCredentials};
use thiserror::Error;

/// Microsoft identity platform token endpoint.
pub const TOKEN_ENDPOINT: &str = "https://login.microsoftonline.com/common/oauth2/v2.0/token";

/// Redirect URI registered for the refresh tokens this service consumes.
pub const REDIRECT_URI: &str = "http://localhost:53682/";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    Credentials(#[from] CredentialError),
    #[error("failed to acquire the access token: {0}")]
    NoAccessToken(String),
    #[error("token exchange failed: {0}")]
    Transport(#[from] HttpError),
}

/// Exchanges refresh tokens for access tokens.
#[derive(Debug, Clone)]
pub struct TokenAcquirer<H> {
    http: H,
    endpoint: String,
    fallback: Option<Credentials>,
}

impl<H: HttpAdapter> TokenAcquirer<H> {
    /// `fallback` supplies any field a caller omits (legacy single-account mode).
    pub fn new(http: H, fallback: Option<Credentials>) -> Self {
        Self { http, endpoint: TOKEN_ENDPOINT.to_string(), fallback }
    }

    /// Override the token endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fill omitted fields from the fallback and require all three.
    pub fn resolve(&self, credentials: Credentials) -> Result<ResolvedCredentials, CredentialError> {
        credentials.or_fallback(self.fallback.as_ref()).resolve()
    }

    /// Resolve `credentials` and exchange them for an access token.
    pub async fn acquire(&self, credentials: Credentials) -> Result<AccessToken, AuthError> {
        let resolved = self.resolve(credentials)?;
        self.exchange(&resolved).await
    }

    async fn exchange(&self, credentials: &ResolvedCredentials) -> Result<AccessToken, AuthError> {
        let form = [
            ("grant_type", "refresh_token"),
            ("refresh_token", credentials.refresh_token.expose()),
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.expose()),
            ("redirect_uri", REDIRECT_URI),
        ];
        let headers = [("Accept", "application/json".to_string())];
        let response = self.http.post_form(&self.endpoint, &headers, &form).await?;
        extract_access_token(&response)
    }
}

/// Pull `access_token` out of a token endpoint response.
///
/// The error carries the endpoint's `error_description` (or `error`) when it
/// sent one, so operators can tell an expired grant from a bad client secret.
fn extract_access_token(response: &HttpResponse) -> Result<AccessToken, AuthError> {
    let body = response.json();
    let token = body
        .as_ref()
        .and_then(|v| v.get("access_token"))
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty());
    if let Some(token) = token {
        return Ok(AccessToken::new(token));
    }

    let reason = body
        .as_ref()
        .and_then(|v| v.get("error_description").or_else(|| v.get("error")))
        .and_then(|v| v.as_str())
        .map(|s| s.lines().next().unwrap_or(s).to_string())
        .unwrap_or_else(|| format!("HTTP {} without access_token", response.status));
    Err(AuthError::NoAccessToken(reason))
}

#[cfg(test)]
#[path = "token_tests.rs"]
mod tests;
