// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::suspension::SuspensionReason;

/// Shortest permitted suspension, in days.
pub const MIN_SUSPENSION_DAYS: i64 = 1;

/// Longest permitted suspension, in days.
pub const MAX_SUSPENSION_DAYS: i64 = 3650;

/// Validates a suspension duration.
///
/// # Arguments
///
/// * `days` - The requested duration in days
///
/// # Errors
///
/// Returns `DomainError::InvalidDuration` if the duration is below
/// [`MIN_SUSPENSION_DAYS`] or above [`MAX_SUSPENSION_DAYS`].
pub const fn validate_duration_days(days: i64) -> Result<(), DomainError> {
    if days < MIN_SUSPENSION_DAYS || days > MAX_SUSPENSION_DAYS {
        return Err(DomainError::InvalidDuration {
            days,
            min: MIN_SUSPENSION_DAYS,
            max: MAX_SUSPENSION_DAYS,
        });
    }
    Ok(())
}

/// Validates the reason text against the reason code.
///
/// Returns the text exactly as supplied, or `None` when it is missing or
/// blank and none is required.
///
/// # Arguments
///
/// * `reason_code` - The disclosed reason code
/// * `reason_text` - The free-form reason text as supplied
///
/// # Errors
///
/// Returns `DomainError::MissingReasonText` if the code is `OTHER` and the
/// text is missing or blank.
pub fn validate_reason_text(
    reason_code: SuspensionReason,
    reason_text: Option<&str>,
) -> Result<Option<String>, DomainError> {
    let supplied: Option<&str> = reason_text.filter(|t| !t.trim().is_empty());

    // Rule: OTHER must disclose the reason verbatim
    if reason_code.requires_text() && supplied.is_none() {
        return Err(DomainError::MissingReasonText);
    }

    Ok(supplied.map(str::to_string))
}

/// Validates that a required text field is present and non-blank.
///
/// # Arguments
///
/// * `field` - The field name, for error reporting
/// * `context` - The record being validated
/// * `value` - The value to check
///
/// # Errors
///
/// Returns `DomainError::MissingField` if the value is blank.
pub fn validate_required_text(
    field: &'static str,
    context: &str,
    value: &str,
) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::MissingField {
            field,
            context: context.to_string(),
        });
    }
    Ok(())
}
