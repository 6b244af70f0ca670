// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row models and their conversions to and from domain values.
//!
//! Instants are stored as Unix nanoseconds in `BIGINT` columns so that
//! ordering by column is ordering by time.

use diesel::prelude::*;
use leasehold::SuspensionRecord;
use leasehold_domain::{
    AgentId, AgentUserId, EmailAddress, InviteToken, LandlordId, Profile, SuspensionReason,
};
use leasehold_events::{EventId, EventKind, EventPayload, InvitationEvent};
use num_traits::ToPrimitive;
use std::str::FromStr;
use time::OffsetDateTime;

use crate::diesel_schema::{agent_suspensions, invitation_events};
use crate::error::PersistenceError;

/// Converts an instant to Unix nanoseconds.
///
/// # Errors
///
/// Returns an error if the instant falls outside the `i64` nanosecond range.
pub fn to_unix_nanos(instant: OffsetDateTime) -> Result<i64, PersistenceError> {
    instant.unix_timestamp_nanos().to_i64().ok_or_else(|| {
        PersistenceError::QueryFailed(format!("Timestamp {instant} out of storable range"))
    })
}

/// Converts Unix nanoseconds back to an instant.
///
/// # Errors
///
/// Returns an error if the value is not a valid instant.
pub fn from_unix_nanos(nanos: i64) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(nanos)).map_err(|e| {
        PersistenceError::ReconstructionError(format!("Invalid timestamp {nanos}: {e}"))
    })
}

/// A row of the invitation log.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = invitation_events)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct InvitationEventRow {
    pub event_id: i64,
    pub kind: String,
    pub email: String,
    pub landlord_id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub token: Option<String>,
    pub issued_at_ns: i64,
    pub expires_at_ns: Option<i64>,
    pub agent_id: Option<i64>,
    pub agent_user_id: Option<i64>,
}

/// An invitation event ready to be inserted.
#[derive(Debug, Insertable)]
#[diesel(table_name = invitation_events)]
pub struct NewInvitationEventRow<'a> {
    pub kind: &'static str,
    pub email: &'a str,
    pub landlord_id: i64,
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub token: Option<&'a str>,
    pub issued_at_ns: i64,
    pub expires_at_ns: Option<i64>,
    pub agent_id: Option<i64>,
    pub agent_user_id: Option<i64>,
}

impl<'a> NewInvitationEventRow<'a> {
    /// Flattens an event into its column values.
    ///
    /// # Errors
    ///
    /// Returns an error if a timestamp cannot be stored.
    pub fn from_event(event: &'a InvitationEvent) -> Result<Self, PersistenceError> {
        let mut row: Self = Self {
            kind: event.kind().as_str(),
            email: event.email.as_str(),
            landlord_id: event.landlord_id.value(),
            first_name: event.profile.first_name.as_deref(),
            last_name: event.profile.last_name.as_deref(),
            phone: event.profile.phone.as_deref(),
            token: None,
            issued_at_ns: to_unix_nanos(event.issued_at)?,
            expires_at_ns: None,
            agent_id: None,
            agent_user_id: None,
        };

        match &event.payload {
            EventPayload::Sent { token, expires_at } => {
                row.token = Some(token.value());
                row.expires_at_ns = Some(to_unix_nanos(*expires_at)?);
            }
            EventPayload::AccountCreated {
                agent_id,
                agent_user_id,
            } => {
                row.agent_id = Some(agent_id.value());
                row.agent_user_id = Some(agent_user_id.value());
            }
            EventPayload::Approved {
                agent_id,
                agent_user_id,
            } => {
                row.agent_id = Some(agent_id.value());
                row.agent_user_id = agent_user_id.map(|id| id.value());
            }
        }

        Ok(row)
    }
}

fn missing_column(event_id: i64, column: &str) -> PersistenceError {
    PersistenceError::ReconstructionError(format!("Event {event_id} is missing {column}"))
}

impl TryFrom<InvitationEventRow> for InvitationEvent {
    type Error = PersistenceError;

    fn try_from(row: InvitationEventRow) -> Result<Self, Self::Error> {
        let event_id: i64 = row.event_id;
        let kind: EventKind = EventKind::from_str(&row.kind)
            .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;
        let email: EmailAddress = EmailAddress::from_str(&row.email)
            .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;

        let payload: EventPayload = match kind {
            EventKind::Sent => EventPayload::Sent {
                token: InviteToken::new(
                    row.token
                        .as_deref()
                        .ok_or_else(|| missing_column(event_id, "token"))?,
                ),
                expires_at: from_unix_nanos(
                    row.expires_at_ns
                        .ok_or_else(|| missing_column(event_id, "expires_at_ns"))?,
                )?,
            },
            EventKind::AccountCreated => EventPayload::AccountCreated {
                agent_id: AgentId::new(
                    row.agent_id
                        .ok_or_else(|| missing_column(event_id, "agent_id"))?,
                ),
                agent_user_id: AgentUserId::new(
                    row.agent_user_id
                        .ok_or_else(|| missing_column(event_id, "agent_user_id"))?,
                ),
            },
            EventKind::Approved => EventPayload::Approved {
                agent_id: AgentId::new(
                    row.agent_id
                        .ok_or_else(|| missing_column(event_id, "agent_id"))?,
                ),
                agent_user_id: row.agent_user_id.map(AgentUserId::new),
            },
        };

        Ok(Self {
            event_id: Some(EventId::new(event_id)),
            email,
            landlord_id: LandlordId::new(row.landlord_id),
            profile: Profile::new(row.first_name, row.last_name, row.phone),
            issued_at: from_unix_nanos(row.issued_at_ns)?,
            payload,
        })
    }
}

/// A row of the suspension table.
#[derive(Debug, Queryable, Selectable, Insertable)]
#[diesel(table_name = agent_suspensions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SuspensionRow {
    pub agent_id: i64,
    pub landlord_id: i64,
    pub reason_code: String,
    pub reason_text: Option<String>,
    pub notes: Option<String>,
    pub duration_days: i64,
    pub started_at_ns: i64,
    pub ends_at_ns: i64,
}

impl SuspensionRow {
    /// Flattens a suspension record into its column values.
    ///
    /// # Errors
    ///
    /// Returns an error if a timestamp cannot be stored.
    pub fn from_record(record: &SuspensionRecord) -> Result<Self, PersistenceError> {
        Ok(Self {
            agent_id: record.agent_id.value(),
            landlord_id: record.landlord_id.value(),
            reason_code: record.reason_code.as_str().to_string(),
            reason_text: record.reason_text.clone(),
            notes: record.notes.clone(),
            duration_days: record.duration_days,
            started_at_ns: to_unix_nanos(record.started_at)?,
            ends_at_ns: to_unix_nanos(record.ends_at)?,
        })
    }
}

impl TryFrom<SuspensionRow> for SuspensionRecord {
    type Error = PersistenceError;

    fn try_from(row: SuspensionRow) -> Result<Self, Self::Error> {
        let reason_code: SuspensionReason = SuspensionReason::from_str(&row.reason_code)
            .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;

        Ok(Self {
            agent_id: AgentId::new(row.agent_id),
            landlord_id: LandlordId::new(row.landlord_id),
            reason_code,
            reason_text: row.reason_text,
            notes: row.notes,
            duration_days: row.duration_days,
            started_at: from_unix_nanos(row.started_at_ns)?,
            ends_at: from_unix_nanos(row.ends_at_ns)?,
        })
    }
}
