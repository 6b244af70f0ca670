// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// Identifies a landlord account.
///
/// Landlords own invitations and are the only actors who may approve or
/// suspend the agents they invited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandlordId(i64);

impl LandlordId {
    /// Creates a new `LandlordId`.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for LandlordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies an agent profile created after an invitation is redeemed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(i64);

impl AgentId {
    /// Creates a new `AgentId`.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies the user account backing an agent profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentUserId(i64);

impl AgentUserId {
    /// Creates a new `AgentUserId`.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for AgentUserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An opaque, single-use invitation token.
///
/// Tokens are only ever carried by `SENT` events.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InviteToken(String);

impl InviteToken {
    /// Wraps a token value.
    ///
    /// Surrounding whitespace is trimmed; tokens are otherwise compared verbatim.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(value.trim().to_string())
    }

    /// Returns the token value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }

    /// Returns true if the token has no content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for InviteToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Profile snapshot captured on an event.
///
/// Every field is optional: an event records whatever the actor supplied at
/// that moment, and later events may fill in or replace earlier values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// The agent's first name.
    pub first_name: Option<String>,
    /// The agent's last name.
    pub last_name: Option<String>,
    /// The agent's phone number, as entered.
    pub phone: Option<String>,
}

impl Profile {
    /// Creates a profile snapshot, discarding blank values.
    #[must_use]
    pub fn new(
        first_name: Option<String>,
        last_name: Option<String>,
        phone: Option<String>,
    ) -> Self {
        Self {
            first_name: non_blank(first_name),
            last_name: non_blank(last_name),
            phone: non_blank(phone),
        }
    }

    /// Returns true if no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.phone.is_none()
    }

    /// Overlays the non-empty fields of `newer` on top of this snapshot.
    pub fn refresh_from(&mut self, newer: &Self) {
        if newer.first_name.is_some() {
            self.first_name.clone_from(&newer.first_name);
        }
        if newer.last_name.is_some() {
            self.last_name.clone_from(&newer.last_name);
        }
        if newer.phone.is_some() {
            self.phone.clone_from(&newer.phone);
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
