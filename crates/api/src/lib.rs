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
#![allow(clippy::multiple_crate_versions)]

//! API boundary for the Leasehold agent lifecycle.
//!
//! Every operation here takes the persistence handle and the current
//! instant explicitly, translates its inputs into domain values, delegates
//! the decision to the core crate, and translates every failure into an
//! [`ApiError`]. Transport concerns live in the server crate.

mod config;
mod directory;
mod error;
mod handlers;
mod request_response;
mod token;

#[cfg(test)]
mod tests;

pub use config::{DEFAULT_INVITATION_TTL_DAYS, LifecycleConfig, MAX_INVITATION_TTL_DAYS};
pub use directory::{
    DirectoryError, DirectoryUser, InMemoryUserDirectory, UserDirectory, UserRole,
};
pub use error::{
    ApiError, translate_core_error, translate_directory_error, translate_domain_error,
    translate_persistence_error,
};
pub use handlers::{
    account_created, agent_lifecycle, approve, invite, list_invitations, register_agent, suspend,
    unsuspend, verify_token,
};
pub use request_response::{
    AccountCreatedRequest, AccountCreatedResponse, AgentLifecycleResponse, ApproveResponse,
    InvitationInfo, InviteRequest, InviteResponse, ListInvitationsResponse, RegisterAgentRequest,
    RegisterAgentResponse, SuspendRequest, SuspensionInfo, UnsuspendResponse,
    VerifyTokenRequest, VerifyTokenResponse,
};
pub use token::generate_invite_token;
