// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use leasehold_domain::{AgentId, LandlordId};
use leasehold_persistence::Persistence;
use time::macros::datetime;
use time::{Duration, OffsetDateTime};

use crate::{
    InMemoryUserDirectory, InviteRequest, InviteResponse, LifecycleConfig, RegisterAgentRequest,
    RegisterAgentResponse, approve, invite, register_agent,
};

pub const TEST_LANDLORD: i64 = 1;

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn t0() -> OffsetDateTime {
    datetime!(2026-03-01 09:00 UTC)
}

pub fn days(n: i64) -> Duration {
    Duration::days(n)
}

pub fn landlord(id: i64) -> LandlordId {
    LandlordId::new(id)
}

pub fn create_invite_request(email: &str) -> InviteRequest {
    InviteRequest {
        email: email.to_string(),
        first_name: String::from("Ada"),
        last_name: String::from("Lovelace"),
        phone: Some(String::from("555-0100")),
    }
}

pub fn create_register_request(token: &str, email: &str) -> RegisterAgentRequest {
    RegisterAgentRequest {
        token: token.to_string(),
        email: email.to_string(),
        first_name: String::from("Ada"),
        last_name: String::from("Byron"),
        phone: None,
    }
}

pub fn invite_at(
    persistence: &mut Persistence,
    landlord_id: i64,
    email: &str,
    now: OffsetDateTime,
) -> InviteResponse {
    invite(
        persistence,
        &LifecycleConfig::default(),
        landlord(landlord_id),
        create_invite_request(email),
        now,
    )
    .expect("invite should succeed")
}

pub fn register_at(
    persistence: &mut Persistence,
    directory: &mut InMemoryUserDirectory,
    token: &str,
    email: &str,
    now: OffsetDateTime,
) -> RegisterAgentResponse {
    register_agent(
        persistence,
        directory,
        create_register_request(token, email),
        now,
    )
    .expect("registration should succeed")
}

/// Invites at t0, registers a day later and approves a day after that.
pub fn create_approved_agent(
    persistence: &mut Persistence,
    directory: &mut InMemoryUserDirectory,
    email: &str,
) -> AgentId {
    let invited: InviteResponse = invite_at(persistence, TEST_LANDLORD, email, t0());
    let registered: RegisterAgentResponse =
        register_at(persistence, directory, &invited.token, email, t0() + days(1));
    let agent_id: AgentId = AgentId::new(registered.agent_id);
    approve(persistence, landlord(TEST_LANDLORD), agent_id, t0() + days(2))
        .expect("approval should succeed");
    agent_id
}
