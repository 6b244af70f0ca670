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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod email;
mod error;
mod invitation_status;
mod suspension;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use email::{EmailAddress, normalize_email};
pub use error::DomainError;
pub use invitation_status::InvitationStatus;
pub use suspension::{SuspensionReason, SuspensionTerms};
pub use types::{AgentId, AgentUserId, InviteToken, LandlordId, Profile};
pub use validation::{
    MAX_SUSPENSION_DAYS, MIN_SUSPENSION_DAYS, validate_duration_days, validate_reason_text,
    validate_required_text,
};
