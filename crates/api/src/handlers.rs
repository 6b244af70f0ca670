// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API operations.
//!
//! Each operation reads the events it needs, lets the core decide, and
//! appends the resulting event. Nothing here mutates derived state.

use leasehold::{
    AgentLifecycle, Command, CoreError, DerivedInvitation, SuspensionRecord, TransitionResult,
    VerificationResult, apply, get_agent_lifecycle, list_invitations_for_landlord,
    require_approved_agent, verify, view,
};
use leasehold_domain::{
    AgentId, AgentUserId, EmailAddress, InviteToken, LandlordId, Profile, SuspensionReason,
    normalize_email, validate_required_text,
};
use leasehold_events::InvitationEvent;
use leasehold_persistence::Persistence;
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::config::LifecycleConfig;
use crate::directory::{DirectoryError, UserDirectory, UserRole};
use crate::error::{
    ApiError, translate_core_error, translate_directory_error, translate_domain_error,
    translate_persistence_error,
};
use crate::request_response::{
    AccountCreatedRequest, AccountCreatedResponse, AgentLifecycleResponse, ApproveResponse,
    InvitationInfo, InviteRequest, InviteResponse, ListInvitationsResponse, RegisterAgentRequest,
    RegisterAgentResponse, SuspendRequest, SuspensionInfo, UnsuspendResponse,
    VerifyTokenRequest, VerifyTokenResponse,
};
use crate::token::generate_invite_token;

/// Builds the profile entered on a form, requiring both names.
fn profile_from_form(
    context: &str,
    first_name: &str,
    last_name: &str,
    phone: Option<String>,
) -> Result<Profile, ApiError> {
    validate_required_text("first_name", context, first_name).map_err(translate_domain_error)?;
    validate_required_text("last_name", context, last_name).map_err(translate_domain_error)?;

    Ok(Profile::new(
        Some(first_name.to_string()),
        Some(last_name.to_string()),
        phone,
    ))
}

/// Looks up the invitation a token belongs to and verifies it.
fn verify_presented_token(
    persistence: &mut Persistence,
    raw_token: &str,
    email_hint: Option<&str>,
    now: OffsetDateTime,
) -> Result<VerificationResult, ApiError> {
    let token: InviteToken = InviteToken::new(raw_token);
    let sent: Option<InvitationEvent> = if token.is_empty() {
        None
    } else {
        persistence
            .find_sent_event_by_token(&token)
            .map_err(translate_persistence_error)?
    };

    let Some(sent) = sent else {
        warn!("Rejected unknown invitation token");
        return Err(translate_core_error(CoreError::TokenNotFound));
    };

    let events: Vec<InvitationEvent> = persistence
        .events_for_email(&sent.email)
        .map_err(translate_persistence_error)?;

    verify(&token, email_hint, &events, now).map_err(|err| {
        warn!(email = %sent.email, error = %err, "Rejected invitation token");
        translate_core_error(err)
    })
}

/// Records `ACCOUNT_CREATED` for an email against the events of both the
/// email and the agent, so an account cannot be relinked.
fn record_account(
    persistence: &mut Persistence,
    email: EmailAddress,
    agent_id: AgentId,
    agent_user_id: AgentUserId,
    profile: Profile,
    now: OffsetDateTime,
) -> Result<DerivedInvitation, ApiError> {
    let mut history: Vec<InvitationEvent> = persistence
        .events_for_email(&email)
        .map_err(translate_persistence_error)?;
    let linked: Vec<InvitationEvent> = persistence
        .events_for_agent(agent_id)
        .map_err(translate_persistence_error)?;
    history.extend(linked.into_iter().filter(|event| event.email != email));

    let command: Command = Command::RecordAccountCreated {
        email,
        agent_id,
        agent_user_id,
        profile,
    };
    let transition: TransitionResult =
        apply(&history, command, now).map_err(translate_core_error)?;
    persistence
        .append_event(&transition.event)
        .map_err(translate_persistence_error)?;

    Ok(transition.invitation)
}

/// Sends (or re-sends) an invitation.
///
/// A fresh token is generated on every call; re-inviting a pending or
/// expired email supersedes its previous token and extends the expiry.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `config` - Lifecycle settings (invitation lifetime)
/// * `landlord_id` - The inviting landlord
/// * `request` - The invitation details
/// * `now` - The instant the invitation is sent at
///
/// # Errors
///
/// Returns an error if:
/// - The email is invalid or a name is blank
/// - An account already exists for the email
/// - The generated token collides with a live token
/// - The database operation fails
pub fn invite(
    persistence: &mut Persistence,
    config: &LifecycleConfig,
    landlord_id: LandlordId,
    request: InviteRequest,
    now: OffsetDateTime,
) -> Result<InviteResponse, ApiError> {
    let email: EmailAddress = normalize_email(&request.email).map_err(translate_domain_error)?;
    let profile: Profile = profile_from_form(
        "invitation",
        &request.first_name,
        &request.last_name,
        request.phone,
    )?;

    let history: Vec<InvitationEvent> = persistence
        .events_for_email(&email)
        .map_err(translate_persistence_error)?;

    let command: Command = Command::Invite {
        landlord_id,
        email,
        profile,
        token: generate_invite_token(),
        ttl: config.invitation_ttl(),
    };

    let transition: TransitionResult =
        apply(&history, command, now).map_err(translate_core_error)?;
    let stored: InvitationEvent = persistence
        .append_event(&transition.event)
        .map_err(translate_persistence_error)?;

    info!(
        landlord_id = %landlord_id,
        email = %stored.email,
        "Invitation sent"
    );

    Ok(InviteResponse {
        email: stored.email.as_str().to_string(),
        landlord_id: landlord_id.value(),
        token: transition.invitation.token.value().to_string(),
        expires_at: transition.invitation.expires_at,
        message: format!("Invitation sent to {}", stored.email),
    })
}

/// Lists a landlord's invitations, most recently active first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_invitations(
    persistence: &mut Persistence,
    landlord_id: LandlordId,
    now: OffsetDateTime,
) -> Result<ListInvitationsResponse, ApiError> {
    let events: Vec<InvitationEvent> = persistence
        .events_for_landlord(landlord_id)
        .map_err(translate_persistence_error)?;
    debug!(landlord_id = %landlord_id, events = events.len(), "Loaded landlord events");

    let invitations: Vec<InvitationInfo> =
        list_invitations_for_landlord(&events, landlord_id, now)
            .into_iter()
            .map(InvitationInfo::from)
            .collect();

    Ok(ListInvitationsResponse {
        landlord_id: landlord_id.value(),
        invitations,
    })
}

/// Verifies a presented invitation token.
///
/// Read-only: a successful verification does not consume the token.
///
/// # Errors
///
/// Returns an error if:
/// - The token is unknown
/// - The invitation has expired
/// - An account already exists for the invitation
/// - The email hint does not match the invitation
pub fn verify_token(
    persistence: &mut Persistence,
    request: &VerifyTokenRequest,
    now: OffsetDateTime,
) -> Result<VerifyTokenResponse, ApiError> {
    let verified: VerificationResult =
        verify_presented_token(persistence, &request.token, request.email.as_deref(), now)?;
    Ok(VerifyTokenResponse::from(verified))
}

/// Records that an invited agent created an account.
///
/// Used when the account was created outside [`register_agent`]. Recording
/// the same account again is harmless: the derived status is unchanged.
/// Once linked, an email cannot be relinked to a different account.
///
/// # Errors
///
/// Returns an error if:
/// - The email is invalid
/// - The email was never invited
/// - The email is already linked to a different account
/// - The agent is already linked to another email
/// - The database operation fails
pub fn account_created(
    persistence: &mut Persistence,
    request: &AccountCreatedRequest,
    now: OffsetDateTime,
) -> Result<AccountCreatedResponse, ApiError> {
    let email: EmailAddress = normalize_email(&request.email).map_err(translate_domain_error)?;
    let agent_id: AgentId = AgentId::new(request.agent_id);
    let agent_user_id: AgentUserId = AgentUserId::new(request.agent_user_id);

    let invitation: DerivedInvitation = record_account(
        persistence,
        email,
        agent_id,
        agent_user_id,
        Profile::default(),
        now,
    )?;

    info!(
        email = %invitation.email,
        agent_id = %agent_id,
        "Recorded agent account creation"
    );

    Ok(AccountCreatedResponse {
        email: invitation.email.as_str().to_string(),
        agent_id: agent_id.value(),
        agent_user_id: agent_user_id.value(),
        status: invitation.status.as_str().to_string(),
        message: format!("Account recorded for {}", invitation.email),
    })
}

/// Redeems an invitation token and creates the agent's account.
///
/// The token is verified against the registering email, the user and agent
/// profile are created in the directory, and `ACCOUNT_CREATED` is appended.
/// After this the token no longer verifies.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `directory` - The user directory accounts are created in
/// * `request` - The registration form
/// * `now` - The instant of registration
///
/// # Errors
///
/// Returns an error if:
/// - The token is unknown, expired or already used
/// - The email does not match the invitation
/// - A name is blank
/// - A user with the email already exists in the directory
/// - The agent minted by the directory is already linked to another email
/// - The directory or database operation fails
///
/// If the account cannot be recorded, the directory user is removed again.
pub fn register_agent<D: UserDirectory>(
    persistence: &mut Persistence,
    directory: &mut D,
    request: RegisterAgentRequest,
    now: OffsetDateTime,
) -> Result<RegisterAgentResponse, ApiError> {
    validate_required_text("email", "registration", &request.email)
        .map_err(translate_domain_error)?;
    let verified: VerificationResult =
        verify_presented_token(persistence, &request.token, Some(&request.email), now)?;
    let profile: Profile = profile_from_form(
        "registration",
        &request.first_name,
        &request.last_name,
        request.phone,
    )?;

    if directory
        .email_exists(&verified.email)
        .map_err(translate_directory_error)?
    {
        return Err(translate_directory_error(DirectoryError::EmailTaken {
            email: verified.email,
        }));
    }

    let agent_user_id: AgentUserId = directory
        .create_user(&verified.email, &profile, UserRole::Agent)
        .map_err(translate_directory_error)?;
    let recorded: Result<(AgentId, DerivedInvitation), ApiError> = directory
        .create_agent_profile(agent_user_id)
        .map_err(translate_directory_error)
        .and_then(|agent_id| {
            record_account(persistence, verified.email, agent_id, agent_user_id, profile, now)
                .map(|invitation| (agent_id, invitation))
        });

    let (agent_id, invitation): (AgentId, DerivedInvitation) = match recorded {
        Ok(linked) => linked,
        Err(err) => {
            warn!(
                agent_user_id = %agent_user_id,
                error = %err,
                "Registration not recorded, removing directory user"
            );
            directory
                .remove_user(agent_user_id)
                .map_err(translate_directory_error)?;
            return Err(err);
        }
    };

    info!(
        email = %invitation.email,
        agent_id = %agent_id,
        landlord_id = %invitation.landlord_id,
        "Agent registered from invitation"
    );

    Ok(RegisterAgentResponse {
        email: invitation.email.as_str().to_string(),
        landlord_id: invitation.landlord_id.value(),
        agent_id: agent_id.value(),
        agent_user_id: agent_user_id.value(),
        status: invitation.status.as_str().to_string(),
        message: format!("Welcome, {}", invitation.email),
    })
}

/// Approves an agent awaiting approval.
///
/// # Errors
///
/// Returns an error if:
/// - The agent has no invitation from this landlord awaiting approval
///   (including an agent that is already approved)
/// - The database operation fails
pub fn approve(
    persistence: &mut Persistence,
    landlord_id: LandlordId,
    agent_id: AgentId,
    now: OffsetDateTime,
) -> Result<ApproveResponse, ApiError> {
    let history: Vec<InvitationEvent> = persistence
        .events_for_agent(agent_id)
        .map_err(translate_persistence_error)?;

    let command: Command = Command::Approve {
        landlord_id,
        agent_id,
    };
    let transition: TransitionResult =
        apply(&history, command, now).map_err(translate_core_error)?;
    persistence
        .append_event(&transition.event)
        .map_err(translate_persistence_error)?;

    info!(landlord_id = %landlord_id, agent_id = %agent_id, "Agent approved");

    Ok(ApproveResponse {
        landlord_id: landlord_id.value(),
        agent_id: agent_id.value(),
        email: transition.invitation.email.as_str().to_string(),
        approved_at: transition.invitation.approved_at.unwrap_or(now),
        message: format!("Agent {agent_id} approved"),
    })
}

/// Suspends an approved agent, replacing any earlier suspension.
///
/// # Errors
///
/// Returns an error if:
/// - The reason code is unknown
/// - The reason is `OTHER` and no reason text is given
/// - The duration is out of range
/// - The agent is not an approved agent of the landlord
/// - The database operation fails
pub fn suspend(
    persistence: &mut Persistence,
    landlord_id: LandlordId,
    agent_id: AgentId,
    request: &SuspendRequest,
    now: OffsetDateTime,
) -> Result<SuspensionInfo, ApiError> {
    let reason_code: SuspensionReason = request
        .reason_code
        .trim()
        .to_ascii_uppercase()
        .parse()
        .map_err(translate_domain_error)?;

    let events: Vec<InvitationEvent> = persistence
        .events_for_agent(agent_id)
        .map_err(translate_persistence_error)?;
    require_approved_agent(&events, landlord_id, agent_id, now).map_err(translate_core_error)?;

    let record: SuspensionRecord = leasehold::suspend(
        agent_id,
        landlord_id,
        reason_code,
        request.reason_text.as_deref(),
        request.notes.as_deref(),
        request.duration_days,
        now,
    )
    .map_err(translate_core_error)?;

    persistence
        .upsert_suspension(&record)
        .map_err(translate_persistence_error)?;

    info!(
        landlord_id = %landlord_id,
        agent_id = %agent_id,
        reason_code = %record.reason_code,
        duration_days = record.duration_days,
        "Agent suspended"
    );

    Ok(SuspensionInfo::from(view(record, now)))
}

/// Lifts an agent's suspension.
///
/// Lifting when no suspension exists succeeds with `lifted: false`.
///
/// # Errors
///
/// Returns an error if:
/// - The agent is not an approved agent of the landlord
/// - The database operation fails
pub fn unsuspend(
    persistence: &mut Persistence,
    landlord_id: LandlordId,
    agent_id: AgentId,
    now: OffsetDateTime,
) -> Result<UnsuspendResponse, ApiError> {
    let events: Vec<InvitationEvent> = persistence
        .events_for_agent(agent_id)
        .map_err(translate_persistence_error)?;
    require_approved_agent(&events, landlord_id, agent_id, now).map_err(translate_core_error)?;

    let lifted: bool = persistence
        .delete_suspension(agent_id)
        .map_err(translate_persistence_error)?;

    if lifted {
        info!(landlord_id = %landlord_id, agent_id = %agent_id, "Agent suspension lifted");
    }

    let message: String = if lifted {
        format!("Agent {agent_id} reinstated")
    } else {
        format!("Agent {agent_id} was not suspended")
    };

    Ok(UnsuspendResponse {
        agent_id: agent_id.value(),
        lifted,
        message,
    })
}

/// Describes an agent's approval and suspension state.
///
/// # Errors
///
/// Returns an error if:
/// - No invitation references the agent
/// - The database query fails
pub fn agent_lifecycle(
    persistence: &mut Persistence,
    agent_id: AgentId,
    now: OffsetDateTime,
) -> Result<AgentLifecycleResponse, ApiError> {
    let events: Vec<InvitationEvent> = persistence
        .events_for_agent(agent_id)
        .map_err(translate_persistence_error)?;
    let suspension: Option<SuspensionRecord> = persistence
        .get_suspension(agent_id)
        .map_err(translate_persistence_error)?;

    let lifecycle: AgentLifecycle =
        get_agent_lifecycle(&events, suspension, agent_id, now).map_err(translate_core_error)?;
    Ok(AgentLifecycleResponse::from(lifecycle))
}
