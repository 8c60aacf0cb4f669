// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Short random identifiers for tasks and batches.

/// Length of a freshly generated identifier.
pub const ID_LEN: usize = 8;

/// Alphabet for generated identifiers.
///
/// Excludes `-`, which separates the batch prefix from the profile name in
/// composite task ids.
pub const ID_ALPHABET: [char; 36] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i',
    'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

/// Separator between a batch id and the profile name in a composite task id.
pub const COMPOSITE_SEPARATOR: char = '-';

/// Generate a random [`ID_LEN`]-character identifier.
pub fn generate() -> String {
    nanoid::format(nanoid::rngs::default, &ID_ALPHABET, ID_LEN)
}

/// Define a newtype ID wrapper around `SmolStr`.
///
/// Generates `new()` for random ID generation, `from_string()` for parsing,
/// `as_str()`, `Display`, `From<String>`, `From<&str>`, `PartialEq<str>`,
/// `PartialEq<&str>`, `Borrow<str>`, and `Deref` implementations.
///
/// Generated ids are [`ID_LEN`] characters drawn from [`ID_ALPHABET`].
///
/// ```ignore
/// define_id! {
///     /// Doc comment for the ID type.
///     pub struct TaskId;
/// }
/// ```
#[macro_export]
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        pub struct $name:ident;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub smol_str::SmolStr);

        impl $name {
            /// Generate a new random ID
            pub fn new() -> Self {
                Self(smol_str::SmolStr::new($crate::id::generate()))
            }

            /// Create ID from existing string (for parsing/deserialization)
            pub fn from_string(id: impl Into<smol_str::SmolStr>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns true if the ID is an empty string.
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::from_string(s)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::from_string(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            fn deref(&self) -> &str {
                &self.0
            }
        }
    };
}

crate::define_id! {
    /// Identifier of a single job.
    ///
    /// Either a bare random id (ad-hoc dispatch) or a composite
    /// `{batch_id}-{profile_name}` for jobs dispatched as part of a batch.
    pub struct TaskId;
}

crate::define_id! {
    /// Identifier shared by every job of one all-profiles dispatch.
    pub struct BatchId;
}

impl TaskId {
    /// Composite id for a profile's job within a batch.
    pub fn for_profile(batch: &BatchId, profile_name: &str) -> Self {
        Self::from_string(format!("{}{}{}", batch, COMPOSITE_SEPARATOR, profile_name))
    }

    /// Split a composite id into its batch prefix and profile suffix.
    ///
    /// Returns `None` for bare ids.
    pub fn split_composite(&self) -> Option<(&str, &str)> {
        self.0.split_once(COMPOSITE_SEPARATOR)
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
