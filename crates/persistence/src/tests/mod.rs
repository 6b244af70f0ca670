// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod event_tests;

use leasehold_domain::{
    AgentId, AgentUserId, EmailAddress, InviteToken, LandlordId, Profile, normalize_email,
};
use leasehold_events::InvitationEvent;
use time::macros::datetime;
use time::{Duration, OffsetDateTime};

use crate::Persistence;

fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

fn t0() -> OffsetDateTime {
    datetime!(2026-03-01 09:00 UTC)
}

fn email(raw: &str) -> EmailAddress {
    normalize_email(raw).unwrap()
}

fn create_sent(
    address: &str,
    landlord_id: i64,
    token: &str,
    issued_at: OffsetDateTime,
) -> InvitationEvent {
    InvitationEvent::sent(
        email(address),
        LandlordId::new(landlord_id),
        Profile::new(
            Some(String::from("Ada")),
            None,
            Some(String::from("555-0100")),
        ),
        InviteToken::new(token),
        issued_at,
        issued_at + Duration::days(7),
    )
}

fn create_account_created(
    address: &str,
    landlord_id: i64,
    agent_id: i64,
    issued_at: OffsetDateTime,
) -> InvitationEvent {
    InvitationEvent::account_created(
        email(address),
        LandlordId::new(landlord_id),
        Profile::default(),
        AgentId::new(agent_id),
        AgentUserId::new(agent_id + 100),
        issued_at,
    )
}
