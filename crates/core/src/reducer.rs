// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Invitation reduction.
//!
//! Folds the events of one email into a [`DerivedInvitation`]. The fold is
//! a pure function of its inputs: the same events and the same `now`
//! always produce the same result.
//!
//! Status only moves forward. A duplicate or out-of-order `SENT` or
//! `ACCOUNT_CREATED` event can never revoke an approval or send an
//! account-holding invitation back to `PENDING`. Expiry is applied after
//! the fold and only to invitations that are still `PENDING`.

use std::collections::BTreeMap;

use leasehold_domain::{EmailAddress, InvitationStatus};
use leasehold_events::{EventPayload, InvitationEvent};
use time::OffsetDateTime;

use crate::state::DerivedInvitation;

/// Reduces the events of a single invitation identity.
///
/// The invitation is seeded from the earliest `SENT` event. Events for any
/// other email than the seed's are ignored; use [`reduce_all`] for mixed
/// input.
///
/// # Arguments
///
/// * `events` - Events for one email, in any order
/// * `now` - The instant expiry is evaluated against
///
/// # Returns
///
/// The derived invitation, or `None` if no `SENT` event is present.
#[must_use]
pub fn reduce(events: &[InvitationEvent], now: OffsetDateTime) -> Option<DerivedInvitation> {
    reduce_refs(events.iter().collect(), now)
}

/// Reduces a mixed event sequence into one invitation per email.
///
/// Groups are returned in email order. Emails with no `SENT` event produce
/// no invitation.
///
/// # Arguments
///
/// * `events` - Events for any number of emails
/// * `now` - The instant expiry is evaluated against
#[must_use]
pub fn reduce_all(events: &[InvitationEvent], now: OffsetDateTime) -> Vec<DerivedInvitation> {
    let mut groups: BTreeMap<&EmailAddress, Vec<&InvitationEvent>> = BTreeMap::new();
    for event in events {
        groups.entry(&event.email).or_default().push(event);
    }

    groups
        .into_values()
        .filter_map(|group| reduce_refs(group, now))
        .collect()
}

fn reduce_refs(
    mut ordered: Vec<&InvitationEvent>,
    now: OffsetDateTime,
) -> Option<DerivedInvitation> {
    // Stable: events sharing an instant keep their log order
    ordered.sort_by_key(|event| event.issued_at);

    let (seed_index, seed, token, expires_at) =
        ordered
            .iter()
            .enumerate()
            .find_map(|(index, event)| match &event.payload {
                EventPayload::Sent { token, expires_at } => {
                    Some((index, *event, token, *expires_at))
                }
                EventPayload::AccountCreated { .. } | EventPayload::Approved { .. } => None,
            })?;

    let mut derived: DerivedInvitation = DerivedInvitation {
        email: seed.email.clone(),
        landlord_id: seed.landlord_id,
        profile: seed.profile.clone(),
        token: token.clone(),
        expires_at,
        agent_id: None,
        agent_user_id: None,
        status: InvitationStatus::Pending,
        sent_at: seed.issued_at,
        account_created_at: None,
        approved_at: None,
        last_activity_at: seed.issued_at,
    };

    for (index, event) in ordered.iter().enumerate() {
        if index == seed_index || event.email != derived.email {
            continue;
        }
        fold_event(&mut derived, event);
    }

    // Expiry is evaluated last and only voids invitations with no account
    if derived.status.is_expirable() && now > derived.expires_at {
        derived.status = InvitationStatus::Expired;
    }

    Some(derived)
}

fn fold_event(derived: &mut DerivedInvitation, event: &InvitationEvent) {
    match &event.payload {
        EventPayload::Sent { token, expires_at } => {
            // Re-invite: refresh the redeemable details, never the status
            derived.token = token.clone();
            derived.expires_at = *expires_at;
            derived.landlord_id = event.landlord_id;
            derived.profile.refresh_from(&event.profile);
        }
        EventPayload::AccountCreated {
            agent_id,
            agent_user_id,
        } => {
            // The first linked account wins
            derived.agent_id.get_or_insert(*agent_id);
            derived.agent_user_id.get_or_insert(*agent_user_id);
            derived.account_created_at.get_or_insert(event.issued_at);
            derived.status = derived.status.raise_to(InvitationStatus::PendingApproval);
        }
        EventPayload::Approved {
            agent_id,
            agent_user_id,
        } => {
            derived.agent_id.get_or_insert(*agent_id);
            if derived.agent_user_id.is_none() {
                derived.agent_user_id = *agent_user_id;
            }
            derived.approved_at.get_or_insert(event.issued_at);
            derived.status = derived.status.raise_to(InvitationStatus::Approved);
        }
    }

    if event.issued_at > derived.last_activity_at {
        derived.last_activity_at = event.issued_at;
    }
}
