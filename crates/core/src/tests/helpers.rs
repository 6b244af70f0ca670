// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use leasehold_domain::{
    AgentId, AgentUserId, EmailAddress, InviteToken, LandlordId, Profile, normalize_email,
};
use leasehold_events::InvitationEvent;
use time::macros::datetime;
use time::{Duration, OffsetDateTime};

pub fn t0() -> OffsetDateTime {
    datetime!(2026-03-01 09:00 UTC)
}

pub fn days(n: i64) -> Duration {
    Duration::days(n)
}

pub fn create_test_email() -> EmailAddress {
    normalize_email("a@x.com").unwrap()
}

pub fn create_test_profile() -> Profile {
    Profile::new(
        Some(String::from("Ada")),
        Some(String::from("Lovelace")),
        Some(String::from("+1 555 0100")),
    )
}

pub fn create_sent(
    email: &EmailAddress,
    landlord_id: i64,
    token: &str,
    issued_at: OffsetDateTime,
) -> InvitationEvent {
    InvitationEvent::sent(
        email.clone(),
        LandlordId::new(landlord_id),
        create_test_profile(),
        InviteToken::new(token),
        issued_at,
        issued_at + days(7),
    )
}

pub fn create_account_created(
    email: &EmailAddress,
    landlord_id: i64,
    agent_id: i64,
    issued_at: OffsetDateTime,
) -> InvitationEvent {
    InvitationEvent::account_created(
        email.clone(),
        LandlordId::new(landlord_id),
        Profile::default(),
        AgentId::new(agent_id),
        AgentUserId::new(agent_id * 10),
        issued_at,
    )
}

pub fn create_approved(
    email: &EmailAddress,
    landlord_id: i64,
    agent_id: i64,
    issued_at: OffsetDateTime,
) -> InvitationEvent {
    InvitationEvent::approved(
        email.clone(),
        LandlordId::new(landlord_id),
        AgentId::new(agent_id),
        Some(AgentUserId::new(agent_id * 10)),
        issued_at,
    )
}

/// Invited at `t0`, account at `t0 + 1d`, approved at `t0 + 2d`.
pub fn create_approved_history(
    email: &EmailAddress,
    landlord_id: i64,
    agent_id: i64,
) -> Vec<InvitationEvent> {
    vec![
        create_sent(email, landlord_id, "tok-approved", t0()),
        create_account_created(email, landlord_id, agent_id, t0() + days(1)),
        create_approved(email, landlord_id, agent_id, t0() + days(2)),
    ]
}
