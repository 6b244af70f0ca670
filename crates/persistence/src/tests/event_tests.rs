// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{create_account_created, create_sent, create_test_persistence, email, t0};
use crate::{Persistence, PersistenceError};
use leasehold_domain::{AgentId, DomainError, InviteToken, LandlordId, Profile};
use leasehold_events::{EventKind, InvitationEvent};
use time::Duration;

#[test]
fn test_append_assigns_increasing_ids() {
    let mut persistence: Persistence = create_test_persistence();

    let first: InvitationEvent = persistence
        .append_event(&create_sent("a@x.com", 1, "tok-1", t0()))
        .unwrap();
    let second: InvitationEvent = persistence
        .append_event(&create_sent("b@x.com", 1, "tok-2", t0()))
        .unwrap();

    assert!(first.event_id.unwrap() < second.event_id.unwrap());
}

#[test]
fn test_appended_event_reads_back_unchanged() {
    let mut persistence: Persistence = create_test_persistence();
    let sent: InvitationEvent = create_sent("a@x.com", 3, "tok-1", t0());
    let created: InvitationEvent =
        create_account_created("a@x.com", 3, 7, t0() + Duration::nanoseconds(1_500));

    let stored_sent: InvitationEvent = persistence.append_event(&sent).unwrap();
    let stored_created: InvitationEvent = persistence.append_event(&created).unwrap();

    let loaded: Vec<InvitationEvent> = persistence.events_for_email(&email("a@x.com")).unwrap();

    assert_eq!(loaded, vec![stored_sent, stored_created]);
    assert_eq!(loaded[0].profile.first_name.as_deref(), Some("Ada"));
    assert_eq!(loaded[1].issued_at, t0() + Duration::nanoseconds(1_500));
}

#[test]
fn test_events_are_returned_in_issue_order() {
    let mut persistence: Persistence = create_test_persistence();

    persistence
        .append_event(&create_account_created("a@x.com", 1, 7, t0() + Duration::days(1)))
        .unwrap();
    persistence
        .append_event(&create_sent("a@x.com", 1, "tok-1", t0()))
        .unwrap();

    let kinds: Vec<EventKind> = persistence
        .events_for_email(&email("a@x.com"))
        .unwrap()
        .iter()
        .map(InvitationEvent::kind)
        .collect();

    assert_eq!(kinds, vec![EventKind::Sent, EventKind::AccountCreated]);
}

#[test]
fn test_events_sharing_an_instant_keep_insertion_order() {
    let mut persistence: Persistence = create_test_persistence();

    persistence
        .append_event(&create_sent("a@x.com", 1, "tok-1", t0()))
        .unwrap();
    persistence
        .append_event(&create_account_created("a@x.com", 1, 7, t0()))
        .unwrap();

    let loaded: Vec<InvitationEvent> = persistence.events_for_email(&email("a@x.com")).unwrap();

    assert_eq!(loaded[0].kind(), EventKind::Sent);
    assert_eq!(loaded[1].kind(), EventKind::AccountCreated);
}

#[test]
fn test_events_for_landlord_filters_by_owner() {
    let mut persistence: Persistence = create_test_persistence();

    persistence
        .append_event(&create_sent("a@x.com", 1, "tok-1", t0()))
        .unwrap();
    persistence
        .append_event(&create_sent("b@x.com", 2, "tok-2", t0()))
        .unwrap();

    let loaded: Vec<InvitationEvent> = persistence.events_for_landlord(LandlordId::new(1)).unwrap();

    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].email, email("a@x.com"));
}

#[test]
fn test_events_for_agent_include_the_invitation() {
    let mut persistence: Persistence = create_test_persistence();

    persistence
        .append_event(&create_sent("a@x.com", 1, "tok-1", t0()))
        .unwrap();
    persistence
        .append_event(&create_account_created("a@x.com", 1, 7, t0() + Duration::days(1)))
        .unwrap();
    persistence
        .append_event(&create_sent("b@x.com", 1, "tok-2", t0()))
        .unwrap();

    let loaded: Vec<InvitationEvent> = persistence.events_for_agent(AgentId::new(7)).unwrap();

    assert_eq!(loaded.len(), 2);
    assert!(loaded.iter().all(|e| e.email == email("a@x.com")));
    assert!(persistence.events_for_agent(AgentId::new(8)).unwrap().is_empty());
}

#[test]
fn test_find_sent_event_by_token() {
    let mut persistence: Persistence = create_test_persistence();

    persistence
        .append_event(&create_sent("a@x.com", 1, "tok-1", t0()))
        .unwrap();

    let found: Option<InvitationEvent> = persistence
        .find_sent_event_by_token(&InviteToken::new("tok-1"))
        .unwrap();
    assert_eq!(found.map(|e| e.email), Some(email("a@x.com")));

    assert_eq!(
        persistence
            .find_sent_event_by_token(&InviteToken::new("tok-missing"))
            .unwrap(),
        None
    );
}

#[test]
fn test_live_token_collision_is_a_conflict() {
    let mut persistence: Persistence = create_test_persistence();

    persistence
        .append_event(&create_sent("a@x.com", 1, "tok-1", t0()))
        .unwrap();

    let result = persistence.append_event(&create_sent(
        "b@x.com",
        2,
        "tok-1",
        t0() + Duration::days(1),
    ));

    assert_eq!(
        result,
        Err(PersistenceError::TokenConflict {
            token: InviteToken::new("tok-1")
        })
    );
    assert!(persistence.events_for_email(&email("b@x.com")).unwrap().is_empty());
}

#[test]
fn test_expired_token_may_be_reused() {
    let mut persistence: Persistence = create_test_persistence();

    persistence
        .append_event(&create_sent("a@x.com", 1, "tok-1", t0()))
        .unwrap();

    let result = persistence.append_event(&create_sent(
        "b@x.com",
        2,
        "tok-1",
        t0() + Duration::days(8),
    ));

    assert!(result.is_ok());
}

#[test]
fn test_sent_event_with_blank_token_is_rejected() {
    let mut persistence: Persistence = create_test_persistence();
    let event: InvitationEvent = InvitationEvent::sent(
        email("a@x.com"),
        LandlordId::new(1),
        Profile::default(),
        InviteToken::new(" "),
        t0(),
        t0() + Duration::days(7),
    );

    assert!(matches!(
        persistence.append_event(&event),
        Err(PersistenceError::Validation(DomainError::MissingField { field: "token", .. }))
    ));
}
