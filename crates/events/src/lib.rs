// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

//! Invitation events.
//!
//! The invitation log is append-only: an event is never mutated or deleted
//! once written, and it is the sole source of truth for invitation history.
//! Each event kind carries only the fields that are meaningful for it, so a
//! `SENT` event cannot lack a token and an `ACCOUNT_CREATED` event cannot
//! lack the identity it links to.

use leasehold_domain::{
    AgentId, AgentUserId, DomainError, EmailAddress, InviteToken, LandlordId, Profile,
    validate_required_text,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Identifier assigned to an event when it is appended to the log.
///
/// Event IDs increase with insertion order and break ties between events
/// that share an `issued_at` instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(i64);

impl EventId {
    /// Creates a new `EventId`.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kind of an invitation event, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    /// A landlord sent (or re-sent) an invitation.
    Sent,
    /// The invited agent created an account.
    AccountCreated,
    /// The landlord approved the agent.
    Approved,
}

impl EventKind {
    /// Returns the string representation used for persistence.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sent => "SENT",
            Self::AccountCreated => "ACCOUNT_CREATED",
            Self::Approved => "APPROVED",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SENT" => Ok(Self::Sent),
            "ACCOUNT_CREATED" => Ok(Self::AccountCreated),
            "APPROVED" => Ok(Self::Approved),
            _ => Err(DomainError::InvalidEventKind(s.to_string())),
        }
    }
}

/// Kind-specific event data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventPayload {
    /// An invitation was sent.
    Sent {
        /// The single-use token delivered to the invitee.
        token: InviteToken,
        /// After this instant a still-pending invitation is void.
        #[serde(with = "time::serde::rfc3339")]
        expires_at: OffsetDateTime,
    },
    /// An account was created for the invited email.
    AccountCreated {
        /// The agent profile created for the account.
        agent_id: AgentId,
        /// The user account backing the agent profile.
        agent_user_id: AgentUserId,
    },
    /// The landlord approved the agent.
    Approved {
        /// The approved agent.
        agent_id: AgentId,
        /// The user account backing the agent, when known.
        agent_user_id: Option<AgentUserId>,
    },
}

/// An immutable invitation event.
///
/// Every landlord action and every account creation on the invitation path
/// produces exactly one event. Events are grouped by their normalized
/// `email` to reconstruct the invitation they belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvitationEvent {
    /// The event ID, if this event has been persisted.
    pub event_id: Option<EventId>,
    /// The normalized email this event belongs to.
    pub email: EmailAddress,
    /// The landlord who owns the invitation.
    pub landlord_id: LandlordId,
    /// Profile snapshot at event time.
    pub profile: Profile,
    /// When the event happened. This is the authoritative ordering key.
    #[serde(with = "time::serde::rfc3339")]
    pub issued_at: OffsetDateTime,
    /// Kind-specific data.
    pub payload: EventPayload,
}

impl InvitationEvent {
    /// Creates a `SENT` event.
    ///
    /// # Arguments
    ///
    /// * `email` - The invited email
    /// * `landlord_id` - The inviting landlord
    /// * `profile` - Profile details entered by the landlord
    /// * `token` - The single-use invitation token
    /// * `issued_at` - When the invitation was sent
    /// * `expires_at` - When the invitation stops being redeemable
    #[must_use]
    pub const fn sent(
        email: EmailAddress,
        landlord_id: LandlordId,
        profile: Profile,
        token: InviteToken,
        issued_at: OffsetDateTime,
        expires_at: OffsetDateTime,
    ) -> Self {
        Self {
            event_id: None,
            email,
            landlord_id,
            profile,
            issued_at,
            payload: EventPayload::Sent { token, expires_at },
        }
    }

    /// Creates an `ACCOUNT_CREATED` event.
    ///
    /// # Arguments
    ///
    /// * `email` - The email the account was created for
    /// * `landlord_id` - The landlord who owns the invitation
    /// * `profile` - Profile details entered at registration
    /// * `agent_id` - The created agent profile
    /// * `agent_user_id` - The created user account
    /// * `issued_at` - When the account was persisted
    #[must_use]
    pub const fn account_created(
        email: EmailAddress,
        landlord_id: LandlordId,
        profile: Profile,
        agent_id: AgentId,
        agent_user_id: AgentUserId,
        issued_at: OffsetDateTime,
    ) -> Self {
        Self {
            event_id: None,
            email,
            landlord_id,
            profile,
            issued_at,
            payload: EventPayload::AccountCreated {
                agent_id,
                agent_user_id,
            },
        }
    }

    /// Creates an `APPROVED` event.
    ///
    /// # Arguments
    ///
    /// * `email` - The email of the approved invitation
    /// * `landlord_id` - The approving landlord
    /// * `agent_id` - The approved agent
    /// * `agent_user_id` - The agent's user account, when known
    /// * `issued_at` - When the approval happened
    #[must_use]
    pub fn approved(
        email: EmailAddress,
        landlord_id: LandlordId,
        agent_id: AgentId,
        agent_user_id: Option<AgentUserId>,
        issued_at: OffsetDateTime,
    ) -> Self {
        Self {
            event_id: None,
            email,
            landlord_id,
            profile: Profile::default(),
            issued_at,
            payload: EventPayload::Approved {
                agent_id,
                agent_user_id,
            },
        }
    }

    /// Returns a copy of this event carrying the given persisted ID.
    #[must_use]
    pub fn with_id(mut self, event_id: EventId) -> Self {
        self.event_id = Some(event_id);
        self
    }

    /// Returns the kind of this event.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self.payload {
            EventPayload::Sent { .. } => EventKind::Sent,
            EventPayload::AccountCreated { .. } => EventKind::AccountCreated,
            EventPayload::Approved { .. } => EventKind::Approved,
        }
    }

    /// Returns the token if this is a `SENT` event.
    #[must_use]
    pub const fn token(&self) -> Option<&InviteToken> {
        match &self.payload {
            EventPayload::Sent { token, .. } => Some(token),
            EventPayload::AccountCreated { .. } | EventPayload::Approved { .. } => None,
        }
    }

    /// Returns the expiry if this is a `SENT` event.
    #[must_use]
    pub const fn expires_at(&self) -> Option<OffsetDateTime> {
        match &self.payload {
            EventPayload::Sent { expires_at, .. } => Some(*expires_at),
            EventPayload::AccountCreated { .. } | EventPayload::Approved { .. } => None,
        }
    }

    /// Returns the linked agent if this is an `ACCOUNT_CREATED` or `APPROVED` event.
    #[must_use]
    pub const fn agent_id(&self) -> Option<AgentId> {
        match &self.payload {
            EventPayload::Sent { .. } => None,
            EventPayload::AccountCreated { agent_id, .. }
            | EventPayload::Approved { agent_id, .. } => Some(*agent_id),
        }
    }

    /// Returns the linked user account, when the event carries one.
    #[must_use]
    pub const fn agent_user_id(&self) -> Option<AgentUserId> {
        match &self.payload {
            EventPayload::Sent { .. } => None,
            EventPayload::AccountCreated { agent_user_id, .. } => Some(*agent_user_id),
            EventPayload::Approved { agent_user_id, .. } => *agent_user_id,
        }
    }

    /// Validates the fields the type system cannot enforce.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A `SENT` event has a blank token
    /// - A `SENT` event expires at or before the instant it was issued
    pub fn validate(&self) -> Result<(), DomainError> {
        if let EventPayload::Sent { token, expires_at } = &self.payload {
            validate_required_text("token", EventKind::Sent.as_str(), token.value())?;

            if *expires_at <= self.issued_at {
                return Err(DomainError::MissingField {
                    field: "expires_at",
                    context: format!(
                        "{} event (expiry {expires_at} is not after issue time {})",
                        EventKind::Sent,
                        self.issued_at
                    ),
                });
            }
        }
        Ok(())
    }
}
