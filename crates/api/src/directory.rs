// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The user directory the registration flow writes to.
//!
//! User and agent-profile rows are owned by an external collaborator; this
//! module only describes the interface the lifecycle needs from it, plus an
//! in-memory implementation for tests and demo deployments.

use std::collections::BTreeMap;

use leasehold_domain::{AgentId, AgentUserId, EmailAddress, Profile};

/// The role a directory user is created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserRole {
    /// A landlord who invites and manages agents.
    Landlord,
    /// An agent acting on a landlord's behalf.
    Agent,
}

/// Errors raised by a user directory.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    /// A user with the email already exists.
    #[error("A user with email {email} already exists")]
    EmailTaken {
        /// The duplicate email.
        email: EmailAddress,
    },
    /// The referenced user does not exist.
    #[error("User {user_id} does not exist")]
    UserNotFound {
        /// The missing user.
        user_id: AgentUserId,
    },
}

/// The external store of user accounts and agent profiles.
pub trait UserDirectory {
    /// Returns true if any user already has the email.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be queried.
    fn email_exists(&self, email: &EmailAddress) -> Result<bool, DirectoryError>;

    /// Creates a user account.
    ///
    /// # Errors
    ///
    /// Returns an error if the email is taken or the directory rejects the user.
    fn create_user(
        &mut self,
        email: &EmailAddress,
        profile: &Profile,
        role: UserRole,
    ) -> Result<AgentUserId, DirectoryError>;

    /// Creates the agent profile backing a user account.
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not exist.
    fn create_agent_profile(&mut self, user_id: AgentUserId) -> Result<AgentId, DirectoryError>;

    /// Removes a user and any agent profile backing it.
    ///
    /// Used to undo a registration whose account could not be recorded.
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not exist.
    fn remove_user(&mut self, user_id: AgentUserId) -> Result<(), DirectoryError>;
}

/// A user held by [`InMemoryUserDirectory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryUser {
    /// The user's ID.
    pub user_id: AgentUserId,
    /// The user's email.
    pub email: EmailAddress,
    /// Profile details captured at creation.
    pub profile: Profile,
    /// The user's role.
    pub role: UserRole,
}

/// A user directory kept in process memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    users: BTreeMap<AgentUserId, DirectoryUser>,
    agents: BTreeMap<AgentId, AgentUserId>,
    last_user_id: i64,
    last_agent_id: i64,
}

impl InMemoryUserDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a user by ID.
    #[must_use]
    pub fn user(&self, user_id: AgentUserId) -> Option<&DirectoryUser> {
        self.users.get(&user_id)
    }

    /// Returns the user account backing an agent profile.
    #[must_use]
    pub fn agent_user(&self, agent_id: AgentId) -> Option<AgentUserId> {
        self.agents.get(&agent_id).copied()
    }
}

impl UserDirectory for InMemoryUserDirectory {
    fn email_exists(&self, email: &EmailAddress) -> Result<bool, DirectoryError> {
        Ok(self.users.values().any(|user| &user.email == email))
    }

    fn create_user(
        &mut self,
        email: &EmailAddress,
        profile: &Profile,
        role: UserRole,
    ) -> Result<AgentUserId, DirectoryError> {
        if self.email_exists(email)? {
            return Err(DirectoryError::EmailTaken {
                email: email.clone(),
            });
        }

        self.last_user_id += 1;
        let user_id: AgentUserId = AgentUserId::new(self.last_user_id);
        self.users.insert(
            user_id,
            DirectoryUser {
                user_id,
                email: email.clone(),
                profile: profile.clone(),
                role,
            },
        );
        Ok(user_id)
    }

    fn create_agent_profile(&mut self, user_id: AgentUserId) -> Result<AgentId, DirectoryError> {
        if !self.users.contains_key(&user_id) {
            return Err(DirectoryError::UserNotFound { user_id });
        }

        self.last_agent_id += 1;
        let agent_id: AgentId = AgentId::new(self.last_agent_id);
        self.agents.insert(agent_id, user_id);
        Ok(agent_id)
    }

    fn remove_user(&mut self, user_id: AgentUserId) -> Result<(), DirectoryError> {
        if self.users.remove(&user_id).is_none() {
            return Err(DirectoryError::UserNotFound { user_id });
        }

        self.agents.retain(|_, backing| *backing != user_id);
        Ok(())
    }
}
