// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-side composition of invitations and suspensions.

use std::cmp::Ordering;

use leasehold_domain::{AgentId, EmailAddress, InvitationStatus, LandlordId};
use leasehold_events::InvitationEvent;
use time::OffsetDateTime;

use crate::error::CoreError;
use crate::reducer::{reduce, reduce_all};
use crate::state::{AgentLifecycle, DerivedInvitation, SuspensionRecord};
use crate::suspension::current_suspension;

/// Lists a landlord's invitations, most recently active first.
///
/// Only events owned by the landlord are considered, so one invitation is
/// returned per distinct email the landlord has invited. Ties on activity
/// are broken by email.
///
/// # Arguments
///
/// * `events` - Events to derive from (typically the landlord's log slice)
/// * `landlord_id` - The landlord whose invitations to list
/// * `now` - The instant expiry is evaluated against
#[must_use]
pub fn list_invitations_for_landlord(
    events: &[InvitationEvent],
    landlord_id: LandlordId,
    now: OffsetDateTime,
) -> Vec<DerivedInvitation> {
    let owned: Vec<InvitationEvent> = events
        .iter()
        .filter(|event| event.landlord_id == landlord_id)
        .cloned()
        .collect();

    let mut invitations: Vec<DerivedInvitation> = reduce_all(&owned, now);
    invitations.sort_by(|a, b| match b.last_activity_at.cmp(&a.last_activity_at) {
        Ordering::Equal => a.email.cmp(&b.email),
        other => other,
    });
    invitations
}

/// Finds the email most recently linked to an agent.
fn email_for_agent(events: &[InvitationEvent], agent_id: AgentId) -> Option<&EmailAddress> {
    events
        .iter()
        .filter(|event| event.agent_id() == Some(agent_id))
        .max_by_key(|event| (event.issued_at, event.event_id))
        .map(|event| &event.email)
}

/// Derives the invitation an agent was created from.
///
/// # Arguments
///
/// * `events` - Events for the agent's email (other emails are ignored)
/// * `agent_id` - The agent to look up
/// * `now` - The instant expiry is evaluated against
#[must_use]
pub fn invitation_for_agent(
    events: &[InvitationEvent],
    agent_id: AgentId,
    now: OffsetDateTime,
) -> Option<DerivedInvitation> {
    let email: &EmailAddress = email_for_agent(events, agent_id)?;
    let owned: Vec<InvitationEvent> = events
        .iter()
        .filter(|event| &event.email == email)
        .cloned()
        .collect();
    reduce(&owned, now).filter(|invitation| invitation.agent_id == Some(agent_id))
}

/// Requires the agent to be an approved agent of the landlord.
///
/// Landlords may only suspend or reinstate agents they approved.
///
/// # Errors
///
/// Returns `CoreError::ApprovedAgentNotFound` if the agent has no approved
/// invitation owned by the landlord.
pub fn require_approved_agent(
    events: &[InvitationEvent],
    landlord_id: LandlordId,
    agent_id: AgentId,
    now: OffsetDateTime,
) -> Result<DerivedInvitation, CoreError> {
    invitation_for_agent(events, agent_id, now)
        .filter(|invitation| {
            invitation.landlord_id == landlord_id
                && invitation.status == InvitationStatus::Approved
        })
        .ok_or(CoreError::ApprovedAgentNotFound {
            landlord_id,
            agent_id,
        })
}

/// Combines an agent's derived invitation with their suspension.
///
/// # Arguments
///
/// * `events` - Events for the agent's email
/// * `suspension` - The agent's stored suspension, if any
/// * `agent_id` - The agent to describe
/// * `now` - The instant expiry is evaluated against
///
/// # Errors
///
/// Returns `CoreError::AgentNotFound` if no invitation references the agent.
pub fn get_agent_lifecycle(
    events: &[InvitationEvent],
    suspension: Option<SuspensionRecord>,
    agent_id: AgentId,
    now: OffsetDateTime,
) -> Result<AgentLifecycle, CoreError> {
    let invitation: DerivedInvitation =
        invitation_for_agent(events, agent_id, now).ok_or(CoreError::AgentNotFound { agent_id })?;

    Ok(AgentLifecycle {
        agent_id,
        landlord_id: invitation.landlord_id,
        status: invitation.status,
        approved: invitation.status == InvitationStatus::Approved,
        suspension: current_suspension(suspension, now),
    })
}
