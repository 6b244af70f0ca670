// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use leasehold_domain::AgentId;

use super::helpers::{
    TEST_LANDLORD, create_approved_agent, create_test_persistence, days, invite_at, landlord,
    register_at, t0,
};
use crate::{
    AccountCreatedRequest, ApiError, InMemoryUserDirectory, SuspendRequest, account_created,
    agent_lifecycle, approve, suspend, unsuspend,
};

fn suspend_request(reason_code: &str, reason_text: Option<&str>, duration_days: i64) -> SuspendRequest {
    SuspendRequest {
        reason_code: reason_code.to_string(),
        reason_text: reason_text.map(str::to_string),
        notes: Some(String::from("Please contact the office")),
        duration_days,
    }
}

#[test]
fn test_approve_grants_full_access() {
    let mut persistence = create_test_persistence();
    let mut directory = InMemoryUserDirectory::new();
    let agent_id: AgentId = create_approved_agent(&mut persistence, &mut directory, "a@x.com");

    let lifecycle = agent_lifecycle(&mut persistence, agent_id, t0() + days(3)).unwrap();

    assert_eq!(lifecycle.status, "APPROVED");
    assert!(lifecycle.approved);
    assert_eq!(lifecycle.access_state, "ACTIVE");
    assert_eq!(lifecycle.dashboard_access, "FULL_ACCESS");
    assert!(lifecycle.suspension.is_none());
}

#[test]
fn test_approve_reports_agent_details() {
    let mut persistence = create_test_persistence();
    let mut directory = InMemoryUserDirectory::new();
    let invited = invite_at(&mut persistence, TEST_LANDLORD, "a@x.com", t0());
    let registered = register_at(
        &mut persistence,
        &mut directory,
        &invited.token,
        "a@x.com",
        t0() + days(1),
    );

    let approved = approve(
        &mut persistence,
        landlord(TEST_LANDLORD),
        AgentId::new(registered.agent_id),
        t0() + days(2),
    )
    .unwrap();

    assert_eq!(approved.email, "a@x.com");
    assert_eq!(approved.approved_at, t0() + days(2));
}

#[test]
fn test_approve_twice_is_not_found() {
    let mut persistence = create_test_persistence();
    let mut directory = InMemoryUserDirectory::new();
    let agent_id: AgentId = create_approved_agent(&mut persistence, &mut directory, "a@x.com");

    let result = approve(&mut persistence, landlord(TEST_LANDLORD), agent_id, t0() + days(3));

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_approve_by_other_landlord_is_not_found() {
    let mut persistence = create_test_persistence();
    let mut directory = InMemoryUserDirectory::new();
    let invited = invite_at(&mut persistence, TEST_LANDLORD, "a@x.com", t0());
    let registered = register_at(
        &mut persistence,
        &mut directory,
        &invited.token,
        "a@x.com",
        t0() + days(1),
    );

    let result = approve(
        &mut persistence,
        landlord(2),
        AgentId::new(registered.agent_id),
        t0() + days(2),
    );

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_approve_unknown_agent_is_not_found() {
    let mut persistence = create_test_persistence();

    let result = approve(&mut persistence, landlord(TEST_LANDLORD), AgentId::new(42), t0());

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_pending_agent_sees_pending_dashboard() {
    let mut persistence = create_test_persistence();
    let mut directory = InMemoryUserDirectory::new();
    let invited = invite_at(&mut persistence, TEST_LANDLORD, "a@x.com", t0());
    let registered = register_at(
        &mut persistence,
        &mut directory,
        &invited.token,
        "a@x.com",
        t0() + days(1),
    );

    let lifecycle =
        agent_lifecycle(&mut persistence, AgentId::new(registered.agent_id), t0() + days(30))
            .unwrap();

    assert_eq!(lifecycle.status, "PENDING_APPROVAL");
    assert!(!lifecycle.approved);
    assert_eq!(lifecycle.access_state, "ACTIVE");
    assert_eq!(lifecycle.dashboard_access, "PENDING_APPROVAL");
}

#[test]
fn test_lifecycle_unknown_agent_is_not_found() {
    let mut persistence = create_test_persistence();

    let result = agent_lifecycle(&mut persistence, AgentId::new(42), t0());

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_suspend_sets_window_and_view_only_access() {
    let mut persistence = create_test_persistence();
    let mut directory = InMemoryUserDirectory::new();
    let agent_id: AgentId = create_approved_agent(&mut persistence, &mut directory, "a@x.com");
    let now = t0() + days(3);

    let suspension = suspend(
        &mut persistence,
        landlord(TEST_LANDLORD),
        agent_id,
        &suspend_request("poor_performance", None, 30),
        now,
    )
    .unwrap();

    assert_eq!(suspension.reason_code, "POOR_PERFORMANCE");
    assert_eq!(suspension.reason_label, "Poor performance");
    assert_eq!(suspension.started_at, now);
    assert_eq!(suspension.ends_at, now + days(30));
    assert_eq!(suspension.remaining_seconds, 30 * 86_400);
    assert!(!suspension.is_expired_by_time);

    let lifecycle = agent_lifecycle(&mut persistence, agent_id, now + days(1)).unwrap();
    assert_eq!(lifecycle.access_state, "SUSPENDED");
    assert_eq!(lifecycle.dashboard_access, "SUSPENDED_VIEW_ONLY");
    assert_eq!(
        lifecycle.suspension.unwrap().notes.as_deref(),
        Some("Please contact the office")
    );
}

#[test]
fn test_suspension_outlives_its_window_until_lifted() {
    let mut persistence = create_test_persistence();
    let mut directory = InMemoryUserDirectory::new();
    let agent_id: AgentId = create_approved_agent(&mut persistence, &mut directory, "a@x.com");
    suspend(
        &mut persistence,
        landlord(TEST_LANDLORD),
        agent_id,
        &suspend_request("MUTUAL_AGREEMENT", None, 1),
        t0() + days(3),
    )
    .unwrap();

    let lifecycle = agent_lifecycle(&mut persistence, agent_id, t0() + days(10)).unwrap();

    let view = lifecycle.suspension.expect("suspension should remain");
    assert!(view.is_expired_by_time);
    assert_eq!(view.remaining_seconds, 0);
    assert_eq!(lifecycle.dashboard_access, "SUSPENDED_VIEW_ONLY");
}

#[test]
fn test_suspend_other_requires_reason_text() {
    let mut persistence = create_test_persistence();
    let mut directory = InMemoryUserDirectory::new();
    let agent_id: AgentId = create_approved_agent(&mut persistence, &mut directory, "a@x.com");

    let result = suspend(
        &mut persistence,
        landlord(TEST_LANDLORD),
        agent_id,
        &suspend_request("OTHER", Some("   "), 7),
        t0() + days(3),
    );

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "reason_text"
    ));
    assert!(
        agent_lifecycle(&mut persistence, agent_id, t0() + days(3))
            .unwrap()
            .suspension
            .is_none()
    );
}

#[test]
fn test_suspend_rejects_bad_code_and_duration() {
    let mut persistence = create_test_persistence();
    let mut directory = InMemoryUserDirectory::new();
    let agent_id: AgentId = create_approved_agent(&mut persistence, &mut directory, "a@x.com");

    let bad_code = suspend(
        &mut persistence,
        landlord(TEST_LANDLORD),
        agent_id,
        &suspend_request("BORED", None, 7),
        t0() + days(3),
    );
    let bad_duration = suspend(
        &mut persistence,
        landlord(TEST_LANDLORD),
        agent_id,
        &suspend_request("POOR_PERFORMANCE", None, 0),
        t0() + days(3),
    );

    assert!(matches!(
        bad_code,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "reason_code"
    ));
    assert!(matches!(
        bad_duration,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "duration_days"
    ));
}

#[test]
fn test_suspend_requires_approved_agent_of_landlord() {
    let mut persistence = create_test_persistence();
    let mut directory = InMemoryUserDirectory::new();
    let invited = invite_at(&mut persistence, TEST_LANDLORD, "pending@x.com", t0());
    let registered = register_at(
        &mut persistence,
        &mut directory,
        &invited.token,
        "pending@x.com",
        t0() + days(1),
    );
    let approved: AgentId = create_approved_agent(&mut persistence, &mut directory, "a@x.com");

    let pending = suspend(
        &mut persistence,
        landlord(TEST_LANDLORD),
        AgentId::new(registered.agent_id),
        &suspend_request("POOR_PERFORMANCE", None, 7),
        t0() + days(3),
    );
    let other_landlord = suspend(
        &mut persistence,
        landlord(2),
        approved,
        &suspend_request("POOR_PERFORMANCE", None, 7),
        t0() + days(3),
    );

    assert!(matches!(pending, Err(ApiError::ResourceNotFound { .. })));
    assert!(matches!(other_landlord, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_resuspend_replaces_previous_suspension() {
    let mut persistence = create_test_persistence();
    let mut directory = InMemoryUserDirectory::new();
    let agent_id: AgentId = create_approved_agent(&mut persistence, &mut directory, "a@x.com");
    suspend(
        &mut persistence,
        landlord(TEST_LANDLORD),
        agent_id,
        &suspend_request("POOR_PERFORMANCE", None, 30),
        t0() + days(3),
    )
    .unwrap();

    suspend(
        &mut persistence,
        landlord(TEST_LANDLORD),
        agent_id,
        &suspend_request("OTHER", Some("Keys not returned"), 5),
        t0() + days(4),
    )
    .unwrap();

    let view = agent_lifecycle(&mut persistence, agent_id, t0() + days(4))
        .unwrap()
        .suspension
        .unwrap();
    assert_eq!(view.reason_code, "OTHER");
    assert_eq!(view.reason_text.as_deref(), Some("Keys not returned"));
    assert_eq!(view.duration_days, 5);
    assert_eq!(view.ends_at, t0() + days(9));
}

#[test]
fn test_unsuspend_restores_access_and_is_idempotent() {
    let mut persistence = create_test_persistence();
    let mut directory = InMemoryUserDirectory::new();
    let agent_id: AgentId = create_approved_agent(&mut persistence, &mut directory, "a@x.com");
    suspend(
        &mut persistence,
        landlord(TEST_LANDLORD),
        agent_id,
        &suspend_request("POOR_PERFORMANCE", None, 30),
        t0() + days(3),
    )
    .unwrap();

    let first = unsuspend(&mut persistence, landlord(TEST_LANDLORD), agent_id, t0() + days(4))
        .unwrap();
    let second = unsuspend(&mut persistence, landlord(TEST_LANDLORD), agent_id, t0() + days(4))
        .unwrap();

    assert!(first.lifted);
    assert!(!second.lifted);
    let lifecycle = agent_lifecycle(&mut persistence, agent_id, t0() + days(4)).unwrap();
    assert_eq!(lifecycle.dashboard_access, "FULL_ACCESS");
}

#[test]
fn test_unsuspend_unknown_agent_is_not_found() {
    let mut persistence = create_test_persistence();

    let result = unsuspend(&mut persistence, landlord(TEST_LANDLORD), AgentId::new(5), t0());

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

fn account_created_request(
    email: &str,
    agent_id: i64,
    agent_user_id: i64,
) -> AccountCreatedRequest {
    AccountCreatedRequest {
        email: email.to_string(),
        agent_id,
        agent_user_id,
    }
}

#[test]
fn test_account_created_cannot_relink_approved_agent() {
    let mut persistence = create_test_persistence();
    let mut directory = InMemoryUserDirectory::new();
    let agent_id: AgentId = create_approved_agent(&mut persistence, &mut directory, "a@x.com");

    let result = account_created(
        &mut persistence,
        &account_created_request("a@x.com", 999, 999),
        t0() + days(3),
    );

    assert!(matches!(result, Err(ApiError::Conflict { .. })));

    let lifecycle = agent_lifecycle(&mut persistence, agent_id, t0() + days(3)).unwrap();
    assert_eq!(lifecycle.status, "APPROVED");
    assert_eq!(lifecycle.dashboard_access, "FULL_ACCESS");

    // The rejected agent gained nothing
    let stranger = agent_lifecycle(&mut persistence, AgentId::new(999), t0() + days(3));
    assert!(matches!(stranger, Err(ApiError::ResourceNotFound { .. })));

    // The landlord can still act on the real agent
    let suspended = suspend(
        &mut persistence,
        landlord(TEST_LANDLORD),
        agent_id,
        &suspend_request("MUTUAL_AGREEMENT", None, 7),
        t0() + days(3),
    );
    assert!(suspended.is_ok());
}

#[test]
fn test_account_created_cannot_link_agent_to_second_email() {
    let mut persistence = create_test_persistence();
    let mut directory = InMemoryUserDirectory::new();
    let agent_id: AgentId = create_approved_agent(&mut persistence, &mut directory, "a@x.com");
    invite_at(&mut persistence, TEST_LANDLORD, "b@x.com", t0() + days(3));

    let result = account_created(
        &mut persistence,
        &account_created_request("b@x.com", agent_id.value(), 1),
        t0() + days(4),
    );

    assert!(matches!(result, Err(ApiError::Conflict { .. })));

    let lifecycle = agent_lifecycle(&mut persistence, agent_id, t0() + days(4)).unwrap();
    assert_eq!(lifecycle.agent_id, agent_id.value());
    assert_eq!(lifecycle.status, "APPROVED");
}

#[test]
fn test_account_created_retry_with_same_account_is_accepted() {
    let mut persistence = create_test_persistence();
    let mut directory = InMemoryUserDirectory::new();
    let agent_id: AgentId = create_approved_agent(&mut persistence, &mut directory, "a@x.com");
    let agent_user_id: i64 = directory
        .agent_user(agent_id)
        .expect("agent should have a user")
        .value();

    let retried = account_created(
        &mut persistence,
        &account_created_request("a@x.com", agent_id.value(), agent_user_id),
        t0() + days(3),
    )
    .unwrap();

    assert_eq!(retried.status, "APPROVED");

    let lifecycle = agent_lifecycle(&mut persistence, agent_id, t0() + days(3)).unwrap();
    assert_eq!(lifecycle.status, "APPROVED");
    assert_eq!(lifecycle.dashboard_access, "FULL_ACCESS");
}
