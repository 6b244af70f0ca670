// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Invitation token verification.
//!
//! Single use is enforced through the derived status rather than a
//! separate "used" flag: once an account exists for the email, every token
//! issued to it is spent. Verification itself never changes state.

use leasehold_domain::{EmailAddress, InvitationStatus, InviteToken, normalize_email};
use leasehold_events::InvitationEvent;
use time::OffsetDateTime;

use crate::error::CoreError;
use crate::reducer::reduce;
use crate::state::{DerivedInvitation, VerificationResult};

/// Verifies a presented invitation token.
///
/// # Arguments
///
/// * `token` - The presented token
/// * `email_hint` - The email the presenter claims, if any
/// * `events` - Every event for the email the token was issued to
/// * `now` - The instant expiry is evaluated against
///
/// # Returns
///
/// The profile snapshot for pre-filling registration.
///
/// # Errors
///
/// Returns an error if:
/// - No `SENT` event in `events` carries the token
/// - The invitation has expired
/// - An account already exists for the token's email
/// - The email hint is invalid or belongs to a different identity
pub fn verify(
    token: &InviteToken,
    email_hint: Option<&str>,
    events: &[InvitationEvent],
    now: OffsetDateTime,
) -> Result<VerificationResult, CoreError> {
    if token.is_empty() {
        return Err(CoreError::TokenNotFound);
    }

    let owner: &EmailAddress = events
        .iter()
        .find(|event| event.token() == Some(token))
        .map(|event| &event.email)
        .ok_or(CoreError::TokenNotFound)?;

    let owned: Vec<InvitationEvent> = events
        .iter()
        .filter(|event| &event.email == owner)
        .cloned()
        .collect();

    let invitation: DerivedInvitation = reduce(&owned, now).ok_or(CoreError::TokenNotFound)?;

    match invitation.status {
        InvitationStatus::Expired => {
            return Err(CoreError::TokenExpired {
                email: invitation.email,
            });
        }
        InvitationStatus::PendingApproval | InvitationStatus::Approved => {
            return Err(CoreError::TokenAlreadyUsed {
                email: invitation.email,
            });
        }
        InvitationStatus::Pending => {}
    }

    if let Some(hint) = email_hint.filter(|hint| !hint.trim().is_empty()) {
        let presented: EmailAddress = normalize_email(hint)?;
        if presented != invitation.email {
            return Err(CoreError::TokenEmailMismatch { presented });
        }
    }

    Ok(VerificationResult {
        email: invitation.email,
        landlord_id: invitation.landlord_id,
        profile: invitation.profile,
    })
}
