// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use leasehold_domain::{
    AgentId, AgentUserId, EmailAddress, InvitationStatus, InviteToken, LandlordId, Profile,
    SuspensionReason,
};
use leasehold_events::InvitationEvent;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// The current state of one invitation, derived from its events.
///
/// Never persisted. It is rebuilt from the event log on every read, so it
/// cannot drift from the history it summarizes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedInvitation {
    /// The merge key shared by every event of this invitation.
    pub email: EmailAddress,
    /// The landlord of the most recent `SENT` event.
    pub landlord_id: LandlordId,
    /// Latest known profile details.
    #[serde(flatten)]
    pub profile: Profile,
    /// The current token (refreshed by re-invites).
    pub token: InviteToken,
    /// Expiry of the current token.
    #[serde(with = "time::serde::rfc3339")]
    pub expires_at: OffsetDateTime,
    /// The agent profile linked by account creation, if any.
    pub agent_id: Option<AgentId>,
    /// The user account linked by account creation, if any.
    pub agent_user_id: Option<AgentUserId>,
    /// Derived status.
    pub status: InvitationStatus,
    /// When the earliest `SENT` event was issued.
    #[serde(with = "time::serde::rfc3339")]
    pub sent_at: OffsetDateTime,
    /// When the account was created.
    #[serde(with = "time::serde::rfc3339::option")]
    pub account_created_at: Option<OffsetDateTime>,
    /// When the landlord approved the agent.
    #[serde(with = "time::serde::rfc3339::option")]
    pub approved_at: Option<OffsetDateTime>,
    /// When the newest event of this invitation was issued.
    #[serde(with = "time::serde::rfc3339")]
    pub last_activity_at: OffsetDateTime,
}

/// The result of applying a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The event recording this transition, ready to append.
    pub event: InvitationEvent,
    /// The invitation as derived once the event is appended.
    pub invitation: DerivedInvitation,
}

/// Profile snapshot returned by a successful token verification.
///
/// Used to pre-fill the registration form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    /// The email the token was issued to.
    pub email: EmailAddress,
    /// The landlord who sent the invitation.
    pub landlord_id: LandlordId,
    /// Profile details captured on the invitation.
    #[serde(flatten)]
    pub profile: Profile,
}

/// An agent's suspension, one row per agent at most.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuspensionRecord {
    /// The suspended agent.
    pub agent_id: AgentId,
    /// The landlord who suspended the agent.
    pub landlord_id: LandlordId,
    /// The disclosed reason.
    pub reason_code: SuspensionReason,
    /// Verbatim reason text (always present for `OTHER`).
    pub reason_text: Option<String>,
    /// Notes visible to the agent.
    pub notes: Option<String>,
    /// Length of the suspension window.
    pub duration_days: i64,
    /// Start of the suspension window (inclusive).
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    /// End of the suspension window (exclusive).
    #[serde(with = "time::serde::rfc3339")]
    pub ends_at: OffsetDateTime,
}

/// A suspension annotated with its time-based status at query time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuspensionView {
    /// The stored suspension.
    #[serde(flatten)]
    pub record: SuspensionRecord,
    /// True once `now > ends_at`.
    ///
    /// Advisory only: the record stays in force until it is explicitly lifted.
    pub is_expired_by_time: bool,
    /// Whole seconds left in the window; zero once expired.
    pub remaining_seconds: i64,
}

/// An agent's position on the access axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccessState {
    /// No suspension record exists.
    Active,
    /// A suspension record exists.
    Suspended,
}

/// What the agent-facing dashboard should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DashboardAccess {
    /// The account exists but the landlord has not approved it yet.
    PendingApproval,
    /// Approved but suspended: the agent may look, not act.
    SuspendedViewOnly,
    /// Approved and not suspended.
    FullAccess,
}

/// Combined invitation and suspension view for one agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentLifecycle {
    /// The agent.
    pub agent_id: AgentId,
    /// The landlord the agent's invitation belongs to.
    pub landlord_id: LandlordId,
    /// Derived invitation status.
    pub status: InvitationStatus,
    /// True once the landlord has approved the agent.
    pub approved: bool,
    /// The current suspension, if any.
    pub suspension: Option<SuspensionView>,
}

impl AgentLifecycle {
    /// Returns the agent's position on the access axis.
    #[must_use]
    pub const fn access_state(&self) -> AccessState {
        if self.suspension.is_some() {
            AccessState::Suspended
        } else {
            AccessState::Active
        }
    }

    /// Decides which dashboard the agent should see.
    #[must_use]
    pub const fn dashboard_access(&self) -> DashboardAccess {
        if !self.approved {
            return DashboardAccess::PendingApproval;
        }
        match self.access_state() {
            AccessState::Suspended => DashboardAccess::SuspendedViewOnly,
            AccessState::Active => DashboardAccess::FullAccess,
        }
    }
}
