// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use leasehold_domain::{AgentId, AgentUserId, EmailAddress, InviteToken, LandlordId, Profile};
use time::Duration;

/// A command represents landlord or agent intent as data only.
///
/// Commands are the only way to append to the invitation log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Send (or re-send) an invitation.
    Invite {
        /// The inviting landlord.
        landlord_id: LandlordId,
        /// The invited email.
        email: EmailAddress,
        /// Profile details entered by the landlord.
        profile: Profile,
        /// The freshly generated single-use token.
        token: InviteToken,
        /// How long the invitation stays redeemable.
        ttl: Duration,
    },
    /// Record that the invited agent created an account.
    RecordAccountCreated {
        /// The email the account was created for.
        email: EmailAddress,
        /// The created agent profile.
        agent_id: AgentId,
        /// The created user account.
        agent_user_id: AgentUserId,
        /// Profile details entered at registration.
        profile: Profile,
    },
    /// Approve an agent awaiting approval.
    Approve {
        /// The approving landlord.
        landlord_id: LandlordId,
        /// The agent to approve.
        agent_id: AgentId,
    },
}
