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

//! Invitation and agent lifecycle derivation.
//!
//! Everything in this crate is a pure function over event and suspension
//! snapshots. Nothing here reads a clock or touches storage: callers fetch
//! the relevant events, pass `now` explicitly, and persist whatever event
//! [`apply`] hands back.

mod apply;
mod command;
mod error;
mod lifecycle;
mod reducer;
mod state;
mod suspension;
mod verifier;

#[cfg(test)]
mod tests;

pub use apply::apply;
pub use command::Command;
pub use error::CoreError;
pub use lifecycle::{
    get_agent_lifecycle, invitation_for_agent, list_invitations_for_landlord,
    require_approved_agent,
};
pub use reducer::{reduce, reduce_all};
pub use state::{
    AccessState, AgentLifecycle, DashboardAccess, DerivedInvitation, SuspensionRecord,
    SuspensionView, TransitionResult, VerificationResult,
};
pub use suspension::{current_suspension, suspend, view};
pub use verifier::verify;
