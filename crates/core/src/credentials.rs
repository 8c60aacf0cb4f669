// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! OAuth credential sets and access tokens.
//!
//! Credentials arrive either ad-hoc with a dispatch request (any field may be
//! omitted) or from a configured [`Profile`](crate::Profile). Omitted or empty
//! fields fall back, one by one, to the process-wide fallback set before the
//! token exchange; all three must resolve to non-empty values.

use crate::secret::Secret;
use thiserror::Error;

/// One of the three fields needed for a refresh-token exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialField {
    RefreshToken,
    ClientId,
    ClientSecret,
}

crate::simple_display! {
    CredentialField {
        RefreshToken => "refresh_token",
        ClientId => "client_id",
        ClientSecret => "client_secret",
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("no {0} supplied and no fallback configured")]
    Missing(CredentialField),
}

/// A possibly partial credential set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub refresh_token: Option<Secret>,
    pub client_id: Option<String>,
    pub client_secret: Option<Secret>,
}

impl Credentials {
    /// A complete credential set.
    pub fn new(
        refresh_token: impl Into<Secret>,
        client_id: impl Into<String>,
        client_secret: impl Into<Secret>,
    ) -> Self {
        Self {
            refresh_token: Some(refresh_token.into()),
            client_id: Some(client_id.into()),
            client_secret: Some(client_secret.into()),
        }
    }

    /// Fill every omitted or empty field from `fallback`.
    pub fn or_fallback(self, fallback: Option<&Credentials>) -> Credentials {
        let Some(fallback) = fallback else {
            return self;
        };
        Credentials {
            refresh_token: non_empty_secret(self.refresh_token)
                .or_else(|| fallback.refresh_token.clone()),
            client_id: non_empty(self.client_id).or_else(|| fallback.client_id.clone()),
            client_secret: non_empty_secret(self.client_secret)
                .or_else(|| fallback.client_secret.clone()),
        }
    }

    /// True when all three fields are present and non-empty.
    pub fn is_complete(&self) -> bool {
        self.clone().resolve().is_ok()
    }

    /// Require all three fields to be present and non-empty.
    pub fn resolve(self) -> Result<ResolvedCredentials, CredentialError> {
        let refresh_token = non_empty_secret(self.refresh_token)
            .ok_or(CredentialError::Missing(CredentialField::RefreshToken))?;
        let client_id =
            non_empty(self.client_id).ok_or(CredentialError::Missing(CredentialField::ClientId))?;
        let client_secret = non_empty_secret(self.client_secret)
            .ok_or(CredentialError::Missing(CredentialField::ClientSecret))?;
        Ok(ResolvedCredentials { refresh_token, client_id, client_secret })
    }
}

/// A complete credential set, ready for the token exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCredentials {
    pub refresh_token: Secret,
    pub client_id: String,
    pub client_secret: Secret,
}

/// Short-lived bearer token. Owned by the job that acquired it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken(Secret);

impl AccessToken {
    pub fn new(token: impl Into<Secret>) -> Self {
        Self(token.into())
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0.expose())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn non_empty_secret(value: Option<Secret>) -> Option<Secret> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
#[path = "credentials_tests.rs"]
mod tests;
