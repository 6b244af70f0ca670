// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use leasehold_domain::{AgentId, DomainError, EmailAddress, LandlordId};

/// Errors that can occur while deriving or changing lifecycle state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// A domain rule was violated.
    #[error("Domain violation: {0}")]
    DomainViolation(#[from] DomainError),
    /// No invitation exists for the email.
    #[error("No invitation found for {email}")]
    InvitationNotFound {
        /// The email that was looked up.
        email: EmailAddress,
    },
    /// No invitation references the agent.
    #[error("No invitation found for agent {agent_id}")]
    AgentNotFound {
        /// The agent that was looked up.
        agent_id: AgentId,
    },
    /// The agent has no invitation awaiting approval under the landlord.
    #[error("No invitation pending approval for agent {agent_id} under landlord {landlord_id}")]
    PendingApprovalNotFound {
        /// The landlord attempting the approval.
        landlord_id: LandlordId,
        /// The agent to approve.
        agent_id: AgentId,
    },
    /// The agent is not an approved agent of the landlord.
    #[error("Agent {agent_id} is not an approved agent of landlord {landlord_id}")]
    ApprovedAgentNotFound {
        /// The landlord attempting the action.
        landlord_id: LandlordId,
        /// The agent the action targets.
        agent_id: AgentId,
    },
    /// An account already exists for the invited email.
    #[error("An account already exists for {email}")]
    AlreadyRegistered {
        /// The email that already has an account.
        email: EmailAddress,
    },
    /// The invited email is already linked to a different account.
    #[error("The account for {email} is already linked to agent {agent_id}")]
    AccountAlreadyLinked {
        /// The email whose account is linked.
        email: EmailAddress,
        /// The agent the email is linked to.
        agent_id: AgentId,
    },
    /// The agent is already linked to another invited email.
    #[error("Agent {agent_id} is already linked to {email}")]
    AgentLinkedElsewhere {
        /// The agent that was presented.
        agent_id: AgentId,
        /// The email the agent is linked to.
        email: EmailAddress,
    },
    /// No `SENT` event carries the token.
    #[error("Invitation token not found")]
    TokenNotFound,
    /// The invitation expired before it was redeemed.
    #[error("Invitation for {email} has expired")]
    TokenExpired {
        /// The email the token was issued to.
        email: EmailAddress,
    },
    /// An account already exists for the token's email.
    #[error("Invitation for {email} has already been used")]
    TokenAlreadyUsed {
        /// The email the token was issued to.
        email: EmailAddress,
    },
    /// The presented email does not belong to the token.
    #[error("Invitation token was not issued to {presented}")]
    TokenEmailMismatch {
        /// The email presented alongside the token.
        presented: EmailAddress,
    },
}
