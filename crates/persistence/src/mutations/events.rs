// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Invitation log appends.

use diesel::prelude::*;
use diesel::SqliteConnection;
use leasehold_domain::InviteToken;
use leasehold_events::{EventId, InvitationEvent};
use tracing::{info, warn};

use crate::backend::get_last_insert_rowid;
use crate::data_models::NewInvitationEventRow;
use crate::diesel_schema::invitation_events;
use crate::error::PersistenceError;

/// Appends an event to the invitation log.
///
/// The token collision check and the insert share one transaction, so two
/// concurrent invites cannot both claim the same token.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `event` - The event to append
///
/// # Returns
///
/// The event carrying the ID assigned by the database.
///
/// # Errors
///
/// Returns an error if:
/// - The event fails validation
/// - A `SENT` event reuses a token that is still redeemable
/// - The database write fails
pub fn append_event(
    conn: &mut SqliteConnection,
    event: &InvitationEvent,
) -> Result<InvitationEvent, PersistenceError> {
    event.validate()?;

    let row: NewInvitationEventRow<'_> = NewInvitationEventRow::from_event(event)?;

    let event_id: i64 = conn.transaction::<_, PersistenceError, _>(|conn| {
        if let Some(token) = row.token {
            let live: i64 = invitation_events::table
                .filter(invitation_events::token.eq(token))
                .filter(invitation_events::expires_at_ns.gt(row.issued_at_ns))
                .count()
                .get_result(conn)?;

            if live > 0 {
                warn!(email = %event.email, "Rejected invitation with a token already in use");
                return Err(PersistenceError::TokenConflict {
                    token: InviteToken::new(token),
                });
            }
        }

        diesel::insert_into(invitation_events::table)
            .values(&row)
            .execute(conn)?;

        get_last_insert_rowid(conn)
    })?;

    info!(
        event_id,
        kind = %event.kind(),
        email = %event.email,
        landlord_id = %event.landlord_id,
        "Appended invitation event"
    );

    Ok(event.clone().with_id(EventId::new(event_id)))
}
