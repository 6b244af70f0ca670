// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Invitation status states and their ordering.
//!
//! Status is never stored. It is derived from the invitation event log on
//! every read, and the derivation only ever moves it forward:
//! `PENDING` -> `PENDING_APPROVAL` -> `APPROVED`. `EXPIRED` is a read-time
//! overlay on `PENDING` and never participates in the fold itself.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Derived status of an invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvitationStatus {
    /// Invitation sent, no account created yet
    Pending,
    /// Account created from the invitation, awaiting landlord approval
    PendingApproval,
    /// Landlord approved the agent
    Approved,
    /// Invitation was still pending when its token expired
    Expired,
}

impl InvitationStatus {
    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::PendingApproval => "PENDING_APPROVAL",
            Self::Approved => "APPROVED",
            Self::Expired => "EXPIRED",
        }
    }

    /// Position of this status along the forward-only progression.
    ///
    /// `Expired` shares the rank of `Pending`: it is only ever applied to a
    /// pending invitation after folding.
    #[must_use]
    pub const fn rank(&self) -> u8 {
        match self {
            Self::Pending | Self::Expired => 0,
            Self::PendingApproval => 1,
            Self::Approved => 2,
        }
    }

    /// Returns the higher of the two statuses by rank.
    ///
    /// This is the only way the reducer changes status, which is what keeps
    /// duplicate or reordered events from moving an invitation backward.
    #[must_use]
    pub const fn raise_to(self, candidate: Self) -> Self {
        if candidate.rank() > self.rank() {
            candidate
        } else {
            self
        }
    }

    /// Returns true if an account already exists for this invitation.
    #[must_use]
    pub const fn has_account(&self) -> bool {
        matches!(self, Self::PendingApproval | Self::Approved)
    }

    /// Returns true if time-based expiry can still apply.
    #[must_use]
    pub const fn is_expirable(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl std::fmt::Display for InvitationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvitationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "PENDING_APPROVAL" => Ok(Self::PendingApproval),
            "APPROVED" => Ok(Self::Approved),
            "EXPIRED" => Ok(Self::Expired),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}
