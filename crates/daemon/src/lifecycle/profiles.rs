// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `profiles.json` loading.

use std::path::Path;

use nudge_core::{anonymize_name, Profile, ProfileSet};
use serde::Deserialize;
use tracing::warn;

use super::{Config, ConfigError};

#[derive(Debug, Deserialize)]
struct ProfilesFile {
    #[serde(default)]
    profiles: Vec<serde_json::Value>,
}

/// Read every profile in `path`. A missing file holds no profiles.
///
/// Entries are decoded one by one; a malformed entry is logged and skipped
/// so it cannot take the other accounts down with it.
pub fn load_profiles(path: &Path) -> Result<Vec<Profile>, ConfigError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => return Err(ConfigError::ProfilesRead { path: path.to_path_buf(), source }),
    };
    let file: ProfilesFile = serde_json::from_str(&text)
        .map_err(|source| ConfigError::ProfilesParse { path: path.to_path_buf(), source })?;

    let profiles = file
        .profiles
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value::<Profile>(entry) {
            Ok(profile) => Some(profile),
            Err(e) => {
                warn!(index, error = %e, "skipping malformed profile entry");
                None
            }
        })
        .collect();
    Ok(profiles)
}

/// Build the profile set for `config`.
///
/// A broken profiles file is logged and treated as empty. Profiles with an
/// empty credential field are skipped. With no profiles left, a complete
/// fallback credential set becomes the `default` profile.
pub fn load_profile_set(config: &Config) -> ProfileSet {
    let profiles = match load_profiles(&config.profiles_path) {
        Ok(profiles) => profiles,
        Err(e) => {
            warn!(error = %e, "ignoring profiles file");
            Vec::new()
        }
    };

    let profiles: Vec<_> = profiles
        .into_iter()
        .filter(|profile| {
            let complete = profile.credentials().is_complete();
            if !complete {
                warn!(profile = %anonymize_name(&profile.name), "skipping profile with incomplete credentials");
            }
            complete
        })
        .collect();

    let set = ProfileSet::new(profiles, config.fallback.clone());
    tracing::info!(
        profiles = set.all().len(),
        enabled = set.enabled().count(),
        "profiles loaded"
    );
    set
}

#[cfg(test)]
#[path = "profiles_tests.rs"]
mod tests;
