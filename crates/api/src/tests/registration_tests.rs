// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use leasehold_domain::{AgentId, AgentUserId, Profile, normalize_email};

use super::helpers::{
    TEST_LANDLORD, create_register_request, create_test_persistence, days, invite_at, register_at,
    t0,
};
use crate::{
    AccountCreatedRequest, ApiError, InMemoryUserDirectory, RegisterAgentRequest, UserDirectory,
    UserRole, VerifyTokenRequest, account_created, register_agent, verify_token,
};

#[test]
fn test_registration_creates_user_and_agent() {
    let mut persistence = create_test_persistence();
    let mut directory = InMemoryUserDirectory::new();
    let invited = invite_at(&mut persistence, TEST_LANDLORD, "a@x.com", t0());

    let registered = register_at(
        &mut persistence,
        &mut directory,
        &invited.token,
        "A@X.com",
        t0() + days(1),
    );

    assert_eq!(registered.email, "a@x.com");
    assert_eq!(registered.landlord_id, TEST_LANDLORD);
    assert_eq!(registered.status, "PENDING_APPROVAL");

    let user_id: AgentUserId = AgentUserId::new(registered.agent_user_id);
    let user = directory.user(user_id).expect("user should exist");
    assert_eq!(user.role, UserRole::Agent);
    assert_eq!(user.email.as_str(), "a@x.com");
    assert_eq!(user.profile.last_name.as_deref(), Some("Byron"));
    assert_eq!(
        directory.agent_user(AgentId::new(registered.agent_id)),
        Some(user_id)
    );
}

#[test]
fn test_registration_consumes_token() {
    let mut persistence = create_test_persistence();
    let mut directory = InMemoryUserDirectory::new();
    let invited = invite_at(&mut persistence, TEST_LANDLORD, "a@x.com", t0());
    register_at(
        &mut persistence,
        &mut directory,
        &invited.token,
        "a@x.com",
        t0() + days(1),
    );

    let second = register_agent(
        &mut persistence,
        &mut directory,
        create_register_request(&invited.token, "a@x.com"),
        t0() + days(1),
    );

    assert!(matches!(second, Err(ApiError::TokenAlreadyUsed { .. })));
}

#[test]
fn test_registration_rejects_other_email() {
    let mut persistence = create_test_persistence();
    let mut directory = InMemoryUserDirectory::new();
    let invited = invite_at(&mut persistence, TEST_LANDLORD, "a@x.com", t0());

    let result = register_agent(
        &mut persistence,
        &mut directory,
        create_register_request(&invited.token, "b@x.com"),
        t0(),
    );

    assert!(matches!(result, Err(ApiError::TokenEmailMismatch { .. })));
    assert!(!directory
        .email_exists(&normalize_email("b@x.com").unwrap())
        .unwrap());
}

#[test]
fn test_registration_requires_email() {
    let mut persistence = create_test_persistence();
    let mut directory = InMemoryUserDirectory::new();
    let invited = invite_at(&mut persistence, TEST_LANDLORD, "a@x.com", t0());

    let result = register_agent(
        &mut persistence,
        &mut directory,
        create_register_request(&invited.token, " "),
        t0(),
    );

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "email"
    ));
}

#[test]
fn test_registration_after_expiry_fails() {
    let mut persistence = create_test_persistence();
    let mut directory = InMemoryUserDirectory::new();
    let invited = invite_at(&mut persistence, TEST_LANDLORD, "a@x.com", t0());

    let result = register_agent(
        &mut persistence,
        &mut directory,
        create_register_request(&invited.token, "a@x.com"),
        t0() + days(8),
    );

    assert!(matches!(result, Err(ApiError::TokenExpired { .. })));
}

#[test]
fn test_registration_rejects_existing_directory_user() {
    let mut persistence = create_test_persistence();
    let mut directory = InMemoryUserDirectory::new();
    directory
        .create_user(
            &normalize_email("a@x.com").unwrap(),
            &Profile::default(),
            UserRole::Landlord,
        )
        .unwrap();
    let invited = invite_at(&mut persistence, TEST_LANDLORD, "a@x.com", t0());

    let result = register_agent(
        &mut persistence,
        &mut directory,
        create_register_request(&invited.token, "a@x.com"),
        t0() + days(1),
    );

    assert!(matches!(result, Err(ApiError::Conflict { .. })));

    // Nothing was recorded, so the invitation is still redeemable
    let still_valid = verify_token(
        &mut persistence,
        &VerifyTokenRequest {
            token: invited.token,
            email: None,
        },
        t0() + days(1),
    );
    assert!(still_valid.is_ok());
}

#[test]
fn test_registration_requires_names() {
    let mut persistence = create_test_persistence();
    let mut directory = InMemoryUserDirectory::new();
    let invited = invite_at(&mut persistence, TEST_LANDLORD, "a@x.com", t0());

    let result = register_agent(
        &mut persistence,
        &mut directory,
        RegisterAgentRequest {
            last_name: String::new(),
            ..create_register_request(&invited.token, "a@x.com")
        },
        t0(),
    );

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "last_name"
    ));
}

#[test]
fn test_registration_removes_directory_user_when_not_recorded() {
    let mut persistence = create_test_persistence();
    let mut directory = InMemoryUserDirectory::new();

    // Agent 1 is linked elsewhere before the directory mints it
    invite_at(&mut persistence, TEST_LANDLORD, "b@x.com", t0());
    account_created(
        &mut persistence,
        &AccountCreatedRequest {
            email: String::from("b@x.com"),
            agent_id: 1,
            agent_user_id: 50,
        },
        t0(),
    )
    .unwrap();
    let invited = invite_at(&mut persistence, TEST_LANDLORD, "a@x.com", t0());

    let result = register_agent(
        &mut persistence,
        &mut directory,
        create_register_request(&invited.token, "a@x.com"),
        t0() + days(1),
    );

    assert!(matches!(result, Err(ApiError::Conflict { .. })));
    assert!(
        !directory
            .email_exists(&normalize_email("a@x.com").unwrap())
            .unwrap()
    );
    assert_eq!(directory.agent_user(AgentId::new(1)), None);

    // The invitation is untouched, so a retry can succeed
    let registered = register_at(
        &mut persistence,
        &mut directory,
        &invited.token,
        "a@x.com",
        t0() + days(1),
    );
    assert_eq!(registered.agent_id, 2);
    assert_eq!(registered.status, "PENDING_APPROVAL");
}

#[test]
fn test_remove_user_drops_agent_profile() {
    let mut directory = InMemoryUserDirectory::new();
    let user_id: AgentUserId = directory
        .create_user(
            &normalize_email("a@x.com").unwrap(),
            &Profile::default(),
            UserRole::Agent,
        )
        .unwrap();
    let agent_id: AgentId = directory.create_agent_profile(user_id).unwrap();

    directory.remove_user(user_id).unwrap();

    assert!(directory.user(user_id).is_none());
    assert_eq!(directory.agent_user(agent_id), None);
    assert!(directory.remove_user(user_id).is_err());
}
