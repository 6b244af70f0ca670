// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Email identity normalization.
//!
//! The normalized email is the merge key for invitation events. Two raw
//! strings that normalize to the same value belong to the same invitation,
//! regardless of the casing or whitespace they were captured with.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// A normalized email address.
///
/// Can only be constructed through [`normalize_email`], so every value of
/// this type is trimmed, lower-cased and contains an `@`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Returns the normalized address.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for EmailAddress {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        normalize_email(s)
    }
}

impl<'de> Deserialize<'de> for EmailAddress {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: String = String::deserialize(deserializer)?;
        normalize_email(&raw).map_err(serde::de::Error::custom)
    }
}

/// Canonicalizes a raw email into its merge key.
///
/// Trims surrounding whitespace and lower-cases the result.
///
/// # Arguments
///
/// * `raw` - The email as captured from user input or a stored event
///
/// # Errors
///
/// Returns `DomainError::InvalidEmail` if the normalized value is empty or
/// contains no `@`.
pub fn normalize_email(raw: &str) -> Result<EmailAddress, DomainError> {
    let normalized: String = raw.trim().to_lowercase();

    if normalized.is_empty() {
        return Err(DomainError::InvalidEmail {
            email: raw.to_string(),
            reason: String::from("email cannot be empty"),
        });
    }

    if !normalized.contains('@') {
        return Err(DomainError::InvalidEmail {
            email: raw.to_string(),
            reason: String::from("email must contain '@'"),
        });
    }

    Ok(EmailAddress(normalized))
}
