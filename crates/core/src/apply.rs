// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::lifecycle::invitation_for_agent;
use crate::reducer::reduce;
use crate::state::{DerivedInvitation, TransitionResult};
use leasehold_domain::{DomainError, EmailAddress, InvitationStatus};
use leasehold_events::InvitationEvent;
use time::OffsetDateTime;

/// Applies a command to the invitation history, producing the event to append.
///
/// The history is never modified. The returned event has not been persisted;
/// the caller appends it and may then discard the derived invitation.
///
/// # Arguments
///
/// * `history` - Existing events for the email and agent the command targets
/// * `command` - The command to apply
/// * `now` - The instant the command is applied at
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new event and the invitation it produces
/// * `Err(CoreError)` if the command is not allowed in the current state
///
/// # Errors
///
/// Returns an error if:
/// - An invite targets an email that already has an account
/// - An account is recorded for an email that was never invited
/// - An account is recorded for an email already linked to a different account
/// - An account is recorded for an agent already linked to another email
/// - An approval targets an agent with no invitation awaiting approval
/// - The invitation expiry cannot be represented
pub fn apply(
    history: &[InvitationEvent],
    command: Command,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    let event: InvitationEvent = match command {
        Command::Invite {
            landlord_id,
            email,
            profile,
            token,
            ttl,
        } => {
            let registered: bool = reduce_email(history, &email, now)
                .is_some_and(|existing| existing.status.has_account());
            if registered {
                return Err(CoreError::AlreadyRegistered { email });
            }

            let expires_at: OffsetDateTime =
                now.checked_add(ttl)
                    .ok_or_else(|| DomainError::DateArithmeticOverflow {
                        operation: format!("invitation expiry {now} + {ttl}"),
                    })?;

            InvitationEvent::sent(email, landlord_id, profile, token, now, expires_at)
        }
        Command::RecordAccountCreated {
            email,
            agent_id,
            agent_user_id,
            profile,
        } => {
            let existing: DerivedInvitation = reduce_email(history, &email, now)
                .ok_or_else(|| CoreError::InvitationNotFound {
                    email: email.clone(),
                })?;

            let linked_elsewhere: Option<&EmailAddress> = history
                .iter()
                .find(|event| event.agent_id() == Some(agent_id) && event.email != email)
                .map(|event| &event.email);
            if let Some(other) = linked_elsewhere {
                return Err(CoreError::AgentLinkedElsewhere {
                    agent_id,
                    email: other.clone(),
                });
            }

            // A retry with the identical account is accepted and changes nothing
            if let Some(linked_agent) = existing.agent_id {
                let same_account: bool = linked_agent == agent_id
                    && existing
                        .agent_user_id
                        .is_none_or(|linked_user| linked_user == agent_user_id);
                if !same_account {
                    return Err(CoreError::AccountAlreadyLinked {
                        email,
                        agent_id: linked_agent,
                    });
                }
            }

            InvitationEvent::account_created(
                email,
                existing.landlord_id,
                profile,
                agent_id,
                agent_user_id,
                now,
            )
        }
        Command::Approve {
            landlord_id,
            agent_id,
        } => {
            let existing: DerivedInvitation = invitation_for_agent(history, agent_id, now)
                .filter(|invitation| {
                    invitation.landlord_id == landlord_id
                        && invitation.status == InvitationStatus::PendingApproval
                })
                .ok_or(CoreError::PendingApprovalNotFound {
                    landlord_id,
                    agent_id,
                })?;

            InvitationEvent::approved(
                existing.email,
                landlord_id,
                agent_id,
                existing.agent_user_id,
                now,
            )
        }
    };

    event.validate()?;

    let mut next: Vec<InvitationEvent> = history
        .iter()
        .filter(|candidate| candidate.email == event.email)
        .cloned()
        .collect();
    next.push(event.clone());

    let invitation: DerivedInvitation =
        reduce(&next, now).ok_or_else(|| CoreError::InvitationNotFound {
            email: event.email.clone(),
        })?;

    Ok(TransitionResult { event, invitation })
}

fn reduce_email(
    history: &[InvitationEvent],
    email: &EmailAddress,
    now: OffsetDateTime,
) -> Option<DerivedInvitation> {
    let owned: Vec<InvitationEvent> = history
        .iter()
        .filter(|event| &event.email == email)
        .cloned()
        .collect();
    reduce(&owned, now)
}
