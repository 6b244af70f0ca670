// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use leasehold::{AgentLifecycle, DerivedInvitation, SuspensionView, VerificationResult};
use time::OffsetDateTime;

/// API request to invite an agent.
///
/// This DTO is distinct from domain types and represents the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteRequest {
    /// The email to invite (normalized before use).
    pub email: String,
    /// The agent's first name.
    pub first_name: String,
    /// The agent's last name.
    pub last_name: String,
    /// The agent's phone number.
    pub phone: Option<String>,
}

/// API response for a sent invitation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct InviteResponse {
    /// The normalized email the invitation was sent to.
    pub email: String,
    /// The inviting landlord.
    pub landlord_id: i64,
    /// The single-use token to embed in the invitation link.
    pub token: String,
    /// When the token stops being redeemable.
    #[serde(with = "time::serde::rfc3339")]
    pub expires_at: OffsetDateTime,
    /// A success message.
    pub message: String,
}

/// One row of a landlord's invitation list.
///
/// Tokens are never listed.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct InvitationInfo {
    /// The invited email.
    pub email: String,
    /// The agent's first name, if known.
    pub first_name: Option<String>,
    /// The agent's last name, if known.
    pub last_name: Option<String>,
    /// The agent's phone number, if known.
    pub phone: Option<String>,
    /// Derived status (`PENDING`, `EXPIRED`, `PENDING_APPROVAL`, `APPROVED`).
    pub status: String,
    /// The linked agent, once an account exists.
    pub agent_id: Option<i64>,
    /// When the first invitation was sent.
    #[serde(with = "time::serde::rfc3339")]
    pub sent_at: OffsetDateTime,
    /// Expiry of the current token.
    #[serde(with = "time::serde::rfc3339")]
    pub expires_at: OffsetDateTime,
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

impl From<DerivedInvitation> for InvitationInfo {
    fn from(invitation: DerivedInvitation) -> Self {
        Self {
            email: invitation.email.as_str().to_string(),
            first_name: invitation.profile.first_name,
            last_name: invitation.profile.last_name,
            phone: invitation.profile.phone,
            status: invitation.status.as_str().to_string(),
            agent_id: invitation.agent_id.map(|id| id.value()),
            sent_at: invitation.sent_at,
            expires_at: invitation.expires_at,
            account_created_at: invitation.account_created_at,
            approved_at: invitation.approved_at,
            last_activity_at: invitation.last_activity_at,
        }
    }
}

/// API response listing a landlord's invitations, most recently active first.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListInvitationsResponse {
    /// The landlord the invitations belong to.
    pub landlord_id: i64,
    /// The invitations.
    pub invitations: Vec<InvitationInfo>,
}

/// API request to verify an invitation token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyTokenRequest {
    /// The presented token.
    pub token: String,
    /// The email the presenter claims, if any.
    pub email: Option<String>,
}

/// API response for a redeemable token.
///
/// Carries the profile snapshot used to pre-fill registration.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct VerifyTokenResponse {
    /// The email the token was issued to.
    pub email: String,
    /// The inviting landlord.
    pub landlord_id: i64,
    /// The agent's first name, if known.
    pub first_name: Option<String>,
    /// The agent's last name, if known.
    pub last_name: Option<String>,
    /// The agent's phone number, if known.
    pub phone: Option<String>,
}

impl From<VerificationResult> for VerifyTokenResponse {
    fn from(result: VerificationResult) -> Self {
        Self {
            email: result.email.as_str().to_string(),
            landlord_id: result.landlord_id.value(),
            first_name: result.profile.first_name,
            last_name: result.profile.last_name,
            phone: result.profile.phone,
        }
    }
}

/// API request recording that an invited agent created an account elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountCreatedRequest {
    /// The invited email.
    pub email: String,
    /// The created agent profile.
    pub agent_id: i64,
    /// The created user account.
    pub agent_user_id: i64,
}

/// API response for a recorded account creation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AccountCreatedResponse {
    /// The invited email.
    pub email: String,
    /// The linked agent profile.
    pub agent_id: i64,
    /// The linked user account.
    pub agent_user_id: i64,
    /// The derived status after the event (`PENDING_APPROVAL`, or `APPROVED`
    /// when an approval was recorded earlier).
    pub status: String,
    /// A success message.
    pub message: String,
}

/// API request to redeem an invitation and create the agent's account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterAgentRequest {
    /// The presented token.
    pub token: String,
    /// The email the agent registers with.
    pub email: String,
    /// The agent's first name.
    pub first_name: String,
    /// The agent's last name.
    pub last_name: String,
    /// The agent's phone number.
    pub phone: Option<String>,
}

/// API response for a completed registration.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RegisterAgentResponse {
    /// The registered email.
    pub email: String,
    /// The landlord the agent now awaits approval from.
    pub landlord_id: i64,
    /// The created agent profile.
    pub agent_id: i64,
    /// The created user account.
    pub agent_user_id: i64,
    /// The derived status after registration.
    pub status: String,
    /// A success message.
    pub message: String,
}

/// API response for an approval.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ApproveResponse {
    /// The approving landlord.
    pub landlord_id: i64,
    /// The approved agent.
    pub agent_id: i64,
    /// The agent's email.
    pub email: String,
    /// When the approval was recorded.
    #[serde(with = "time::serde::rfc3339")]
    pub approved_at: OffsetDateTime,
    /// A success message.
    pub message: String,
}

/// API request to suspend an approved agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuspendRequest {
    /// The reason code (e.g. `POOR_PERFORMANCE`, `OTHER`).
    pub reason_code: String,
    /// Verbatim reason text; required for `OTHER`.
    pub reason_text: Option<String>,
    /// Notes shown to the agent.
    pub notes: Option<String>,
    /// Length of the suspension window in days.
    pub duration_days: i64,
}

/// A suspension as shown to landlords and agents.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SuspensionInfo {
    /// The suspended agent.
    pub agent_id: i64,
    /// The suspending landlord.
    pub landlord_id: i64,
    /// The reason code.
    pub reason_code: String,
    /// Human-readable label for the reason code.
    pub reason_label: String,
    /// Verbatim reason text.
    pub reason_text: Option<String>,
    /// Notes shown to the agent.
    pub notes: Option<String>,
    /// Length of the window in days.
    pub duration_days: i64,
    /// Start of the window.
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    /// End of the window.
    #[serde(with = "time::serde::rfc3339")]
    pub ends_at: OffsetDateTime,
    /// True once the window has passed. The suspension still applies until lifted.
    pub is_expired_by_time: bool,
    /// Whole seconds left in the window.
    pub remaining_seconds: i64,
}

impl From<SuspensionView> for SuspensionInfo {
    fn from(view: SuspensionView) -> Self {
        Self {
            agent_id: view.record.agent_id.value(),
            landlord_id: view.record.landlord_id.value(),
            reason_code: view.record.reason_code.as_str().to_string(),
            reason_label: view.record.reason_code.label().to_string(),
            reason_text: view.record.reason_text,
            notes: view.record.notes,
            duration_days: view.record.duration_days,
            started_at: view.record.started_at,
            ends_at: view.record.ends_at,
            is_expired_by_time: view.is_expired_by_time,
            remaining_seconds: view.remaining_seconds,
        }
    }
}

/// API response for a lifted suspension.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UnsuspendResponse {
    /// The reinstated agent.
    pub agent_id: i64,
    /// False when the agent had no suspension to lift.
    pub lifted: bool,
    /// A success message.
    pub message: String,
}

/// API response describing an agent's lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AgentLifecycleResponse {
    /// The agent.
    pub agent_id: i64,
    /// The landlord the agent's invitation belongs to.
    pub landlord_id: i64,
    /// Derived invitation status.
    pub status: String,
    /// True once the landlord approved the agent.
    pub approved: bool,
    /// `ACTIVE` or `SUSPENDED`.
    pub access_state: String,
    /// `PENDING_APPROVAL`, `SUSPENDED_VIEW_ONLY` or `FULL_ACCESS`.
    pub dashboard_access: String,
    /// The current suspension, if any.
    pub suspension: Option<SuspensionInfo>,
}

impl From<AgentLifecycle> for AgentLifecycleResponse {
    fn from(lifecycle: AgentLifecycle) -> Self {
        let access_state: &str = match lifecycle.access_state() {
            leasehold::AccessState::Active => "ACTIVE",
            leasehold::AccessState::Suspended => "SUSPENDED",
        };
        let dashboard_access: &str = match lifecycle.dashboard_access() {
            leasehold::DashboardAccess::PendingApproval => "PENDING_APPROVAL",
            leasehold::DashboardAccess::SuspendedViewOnly => "SUSPENDED_VIEW_ONLY",
            leasehold::DashboardAccess::FullAccess => "FULL_ACCESS",
        };

        Self {
            agent_id: lifecycle.agent_id.value(),
            landlord_id: lifecycle.landlord_id.value(),
            status: lifecycle.status.as_str().to_string(),
            approved: lifecycle.approved,
            access_state: access_state.to_string(),
            dashboard_access: dashboard_access.to_string(),
            suspension: lifecycle.suspension.map(SuspensionInfo::from),
        }
    }
}
