// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use nudge_core::Credentials;
use serde::Deserialize;

/// Values of `as_file` that request an attachment.
const TRUTHY: [&str; 3] = ["TRUE", "True", "true"];

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// JSON body of `POST /call` and `POST /call-all-profiles`.
///
/// The credential fields are only read by `/call`; any omitted field is
/// filled from the fallback credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CallRequest {
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub client_secret: Option<String>,
}

impl CallRequest {
    /// The supplied password; empty counts as absent.
    pub fn password(&self) -> Option<&str> {
        non_empty(&self.password)
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            refresh_token: self.refresh_token.clone().map(Into::into),
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone().map(Into::into),
        }
    }
}

/// `?password=` query of the read-only routes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PasswordQuery {
    #[serde(default)]
    pub password: Option<String>,
}

impl PasswordQuery {
    pub fn password(&self) -> Option<&str> {
        non_empty(&self.password)
    }
}

/// `?password=&as_file=` query of `GET /logs`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LogsQuery {
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub as_file: Option<String>,
}

impl LogsQuery {
    pub fn password(&self) -> Option<&str> {
        non_empty(&self.password)
    }

    /// True when the log should be sent as a download.
    pub fn as_attachment(&self) -> bool {
        self.as_file.as_deref().is_some_and(|v| TRUTHY.contains(&v))
    }
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
