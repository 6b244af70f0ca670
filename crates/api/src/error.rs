// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use leasehold::CoreError;
use leasehold_domain::DomainError;
use leasehold_persistence::PersistenceError;

use crate::directory::DirectoryError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
/// The token variants stay separate so clients can render tailored guidance.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Invalid input was provided.
    #[error("Invalid input for field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    #[error("{resource_type} not found: {message}")]
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The invitation expired before it was redeemed.
    #[error("Invitation expired: {message}")]
    TokenExpired {
        /// A human-readable description of the expired invitation.
        message: String,
    },
    /// An account already exists for the invitation.
    #[error("Invitation already used: {message}")]
    TokenAlreadyUsed {
        /// A human-readable description of the used invitation.
        message: String,
    },
    /// The presented email does not match the invitation.
    #[error("Invitation email mismatch: {message}")]
    TokenEmailMismatch {
        /// A human-readable description of the mismatch.
        message: String,
    },
    /// The request conflicts with existing state.
    #[error("Conflict: {message}")]
    Conflict {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// An internal error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidEmail { email, reason } => ApiError::InvalidInput {
            field: String::from("email"),
            message: format!("'{email}' is not a valid email address: {reason}"),
        },
        DomainError::InvalidDuration { days, min, max } => ApiError::InvalidInput {
            field: String::from("duration_days"),
            message: format!("Suspension must last between {min} and {max} days, got {days}"),
        },
        DomainError::MissingReasonText => ApiError::InvalidInput {
            field: String::from("reason_text"),
            message: String::from("A reason text is required when the reason code is OTHER"),
        },
        DomainError::MissingField { field, context } => ApiError::InvalidInput {
            field: field.to_string(),
            message: format!("Missing required field '{field}' for {context}"),
        },
        DomainError::InvalidStatus(status) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Unknown invitation status '{status}'"),
        },
        DomainError::InvalidReasonCode(code) => ApiError::InvalidInput {
            field: String::from("reason_code"),
            message: format!("Unknown suspension reason code '{code}'"),
        },
        DomainError::InvalidEventKind(kind) => ApiError::Internal {
            message: format!("Unknown invitation event kind '{kind}'"),
        },
        DomainError::DateArithmeticOverflow { operation } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Date arithmetic overflow while computing {operation}"),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::InvitationNotFound { email } => ApiError::ResourceNotFound {
            resource_type: String::from("Invitation"),
            message: format!("No invitation exists for {email}"),
        },
        CoreError::AgentNotFound { agent_id } => ApiError::ResourceNotFound {
            resource_type: String::from("Agent"),
            message: format!("No invitation references agent {agent_id}"),
        },
        CoreError::PendingApprovalNotFound {
            landlord_id,
            agent_id,
        } => ApiError::ResourceNotFound {
            resource_type: String::from("Pending approval"),
            message: format!(
                "Agent {agent_id} has no invitation awaiting approval by landlord {landlord_id}"
            ),
        },
        CoreError::ApprovedAgentNotFound {
            landlord_id,
            agent_id,
        } => ApiError::ResourceNotFound {
            resource_type: String::from("Approved agent"),
            message: format!("Agent {agent_id} is not an approved agent of landlord {landlord_id}"),
        },
        CoreError::AlreadyRegistered { email } => ApiError::Conflict {
            message: format!("An account already exists for {email}"),
        },
        CoreError::AccountAlreadyLinked { email, agent_id } => ApiError::Conflict {
            message: format!("The account for {email} is already linked to agent {agent_id}"),
        },
        CoreError::AgentLinkedElsewhere { agent_id, email } => ApiError::Conflict {
            message: format!("Agent {agent_id} is already linked to {email}"),
        },
        CoreError::TokenNotFound => ApiError::ResourceNotFound {
            resource_type: String::from("Invitation token"),
            message: String::from("The invitation link is not valid"),
        },
        CoreError::TokenExpired { email } => ApiError::TokenExpired {
            message: format!("The invitation for {email} has expired; ask the landlord to resend it"),
        },
        CoreError::TokenAlreadyUsed { email } => ApiError::TokenAlreadyUsed {
            message: format!("An account already exists for {email}; sign in instead"),
        },
        CoreError::TokenEmailMismatch { presented } => ApiError::TokenEmailMismatch {
            message: format!("The invitation was not sent to {presented}"),
        },
    }
}

/// Translates a persistence error into an API error.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::Validation(domain_err) => translate_domain_error(domain_err),
        PersistenceError::TokenConflict { .. } => ApiError::Conflict {
            message: String::from("The generated invitation token is already in use; retry"),
        },
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message,
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}

/// Translates a user-directory error into an API error.
#[must_use]
pub fn translate_directory_error(err: DirectoryError) -> ApiError {
    match err {
        DirectoryError::EmailTaken { email } => ApiError::Conflict {
            message: format!("A user with email {email} already exists"),
        },
        DirectoryError::UserNotFound { .. } => ApiError::Internal {
            message: err.to_string(),
        },
    }
}
