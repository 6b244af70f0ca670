// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// The email address is empty or has no `@` after normalization.
    #[error("Invalid email address '{email}': {reason}")]
    InvalidEmail {
        /// The raw value that was rejected.
        email: String,
        /// Why the value was rejected.
        reason: String,
    },
    /// Suspension duration is outside the permitted range.
    #[error("Invalid suspension duration: {days} days. Must be between {min} and {max}")]
    InvalidDuration {
        /// The requested duration in days.
        days: i64,
        /// The minimum permitted duration.
        min: i64,
        /// The maximum permitted duration.
        max: i64,
    },
    /// The `OTHER` reason code was used without a reason text.
    #[error("Reason text is required when the suspension reason is OTHER")]
    MissingReasonText,
    /// A field required for this kind of record is missing or blank.
    #[error("Missing required field '{field}' for {context}")]
    MissingField {
        /// The missing field.
        field: &'static str,
        /// The record or event kind being validated.
        context: String,
    },
    /// An invitation status string could not be parsed.
    #[error("Invalid invitation status: {0}")]
    InvalidStatus(String),
    /// A suspension reason code could not be parsed.
    #[error("Invalid suspension reason code: {0}")]
    InvalidReasonCode(String),
    /// An event kind string could not be parsed.
    #[error("Invalid event kind: {0}")]
    InvalidEventKind(String),
    /// Date arithmetic overflow.
    #[error("Date arithmetic overflow while {operation}")]
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
}
