// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configured accounts.

use crate::anonymize::anonymize_name;
use crate::credentials::Credentials;
use crate::secret::Secret;
use serde::{Deserialize, Serialize};

/// Characters of the client id shown in profile listings.
pub const CLIENT_ID_PREFIX_LEN: usize = 8;

/// Name given to the profile synthesized from fallback credentials.
pub const DEFAULT_PROFILE_NAME: &str = "default";

/// A named set of OAuth credentials for one managed account.
///
/// Omitted credential fields deserialize as empty, which leaves the profile
/// incomplete rather than failing the whole file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Profile {
    pub name: String,
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: Secret,
    #[serde(default)]
    pub refresh_token: Secret,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

fn enabled_by_default() -> bool {
    true
}

crate::builder! {
    pub struct ProfileBuilder => Profile {
        into {
            name: String = "alice@example.com",
            client_id: String = "11111111-2222-3333-4444-555555555555",
            client_secret: Secret = "client-secret",
            refresh_token: Secret = "refresh-token",
        }
        set {
            enabled: bool = true,
        }
    }
}

impl Profile {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(
            self.refresh_token.clone(),
            self.client_id.clone(),
            self.client_secret.clone(),
        )
    }

    /// Listing view with personal and sensitive fields masked.
    pub fn summary(&self) -> ProfileSummary {
        let prefix: String = self.client_id.chars().take(CLIENT_ID_PREFIX_LEN).collect();
        ProfileSummary {
            name: anonymize_name(&self.name),
            client_id: format!("{}...", prefix),
            enabled: self.enabled,
        }
    }
}

/// Masked profile as exposed by profile listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub name: String,
    pub client_id: String,
    pub enabled: bool,
}

/// All configured profiles. Immutable once loaded.
#[derive(Debug, Clone, Default)]
pub struct ProfileSet {
    profiles: Vec<Profile>,
}

impl ProfileSet {
    /// Build the set. When no profile is enabled and `fallback` is complete,
    /// a [`DEFAULT_PROFILE_NAME`] profile is synthesized from it. Disabled
    /// profiles are kept for listing.
    pub fn new(mut profiles: Vec<Profile>, fallback: Option<Credentials>) -> Self {
        if !profiles.iter().any(|p| p.enabled) {
            profiles.extend(fallback.as_ref().and_then(default_profile));
        }
        Self { profiles }
    }

    pub fn all(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn enabled(&self) -> impl Iterator<Item = &Profile> {
        self.profiles.iter().filter(|p| p.enabled)
    }

    pub fn summaries(&self) -> Vec<ProfileSummary> {
        self.profiles.iter().map(Profile::summary).collect()
    }
}

fn default_profile(fallback: &Credentials) -> Option<Profile> {
    let resolved = fallback.clone().resolve().ok()?;
    Some(Profile {
        name: DEFAULT_PROFILE_NAME.to_string(),
        client_id: resolved.client_id,
        client_secret: resolved.client_secret,
        refresh_token: resolved.refresh_token,
        enabled: true,
    })
}

#[cfg(test)]
#[path = "profile_tests.rs"]
mod tests;
