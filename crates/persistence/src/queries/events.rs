// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use leasehold_domain::{AgentId, EmailAddress, InviteToken, LandlordId};
use leasehold_events::{EventKind, InvitationEvent};
use tracing::debug;

use crate::data_models::InvitationEventRow;
use crate::diesel_schema::invitation_events;
use crate::error::PersistenceError;

fn into_events(rows: Vec<InvitationEventRow>) -> Result<Vec<InvitationEvent>, PersistenceError> {
    rows.into_iter().map(InvitationEvent::try_from).collect()
}

/// Retrieves every event of a landlord's invitations.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn events_for_landlord(
    conn: &mut SqliteConnection,
    landlord_id: LandlordId,
) -> Result<Vec<InvitationEvent>, PersistenceError> {
    let rows: Vec<InvitationEventRow> = invitation_events::table
        .filter(invitation_events::landlord_id.eq(landlord_id.value()))
        .order((
            invitation_events::issued_at_ns.asc(),
            invitation_events::event_id.asc(),
        ))
        .select(InvitationEventRow::as_select())
        .load(conn)?;

    debug!(landlord_id = %landlord_id, count = rows.len(), "Loaded landlord events");
    into_events(rows)
}

/// Retrieves every event for an email, across landlords.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn events_for_email(
    conn: &mut SqliteConnection,
    email: &EmailAddress,
) -> Result<Vec<InvitationEvent>, PersistenceError> {
    let rows: Vec<InvitationEventRow> = invitation_events::table
        .filter(invitation_events::email.eq(email.as_str()))
        .order((
            invitation_events::issued_at_ns.asc(),
            invitation_events::event_id.asc(),
        ))
        .select(InvitationEventRow::as_select())
        .load(conn)?;

    debug!(email = %email, count = rows.len(), "Loaded email events");
    into_events(rows)
}

/// Finds the most recent `SENT` event carrying a token.
///
/// # Errors
///
/// Returns an error if the query fails or the row cannot be reconstructed.
pub fn find_sent_event_by_token(
    conn: &mut SqliteConnection,
    token: &InviteToken,
) -> Result<Option<InvitationEvent>, PersistenceError> {
    let row: Option<InvitationEventRow> = invitation_events::table
        .filter(invitation_events::kind.eq(EventKind::Sent.as_str()))
        .filter(invitation_events::token.eq(token.value()))
        .order((
            invitation_events::issued_at_ns.desc(),
            invitation_events::event_id.desc(),
        ))
        .select(InvitationEventRow::as_select())
        .first(conn)
        .optional()?;

    row.map(InvitationEvent::try_from).transpose()
}

/// Retrieves every event for the emails an agent is linked to.
///
/// An agent is linked to an email through its `ACCOUNT_CREATED` or
/// `APPROVED` events; the returned slice includes the `SENT` events of
/// those emails so the invitation can be fully derived.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn events_for_agent(
    conn: &mut SqliteConnection,
    agent_id: AgentId,
) -> Result<Vec<InvitationEvent>, PersistenceError> {
    let emails: Vec<String> = invitation_events::table
        .filter(invitation_events::agent_id.eq(agent_id.value()))
        .select(invitation_events::email)
        .distinct()
        .load(conn)?;

    if emails.is_empty() {
        debug!(agent_id = %agent_id, "No events reference agent");
        return Ok(Vec::new());
    }

    let rows: Vec<InvitationEventRow> = invitation_events::table
        .filter(invitation_events::email.eq_any(&emails))
        .order((
            invitation_events::issued_at_ns.asc(),
            invitation_events::event_id.asc(),
        ))
        .select(InvitationEventRow::as_select())
        .load(conn)?;

    debug!(agent_id = %agent_id, count = rows.len(), "Loaded agent events");
    into_events(rows)
}
