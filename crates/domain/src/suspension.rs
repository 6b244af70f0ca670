// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Suspension reason codes and validated suspension terms.

use crate::error::DomainError;
use crate::validation::{validate_duration_days, validate_reason_text};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Duration, OffsetDateTime};

/// Disclosed reason for suspending an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SuspensionReason {
    /// The landlord is ending the agent's contract.
    TerminatingContract,
    /// The agent's performance is below expectations.
    PoorPerformance,
    /// The agent violated the platform or landlord terms.
    ViolationOfTerms,
    /// The agent breached their contract.
    BreachOfContract,
    /// Both parties agreed to pause the relationship.
    MutualAgreement,
    /// Any other reason; requires a verbatim reason text.
    Other,
}

impl SuspensionReason {
    /// Every reason code, in display order.
    pub const ALL: [Self; 6] = [
        Self::TerminatingContract,
        Self::PoorPerformance,
        Self::ViolationOfTerms,
        Self::BreachOfContract,
        Self::MutualAgreement,
        Self::Other,
    ];

    /// Returns the string representation of the reason code.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TerminatingContract => "TERMINATING_CONTRACT",
            Self::PoorPerformance => "POOR_PERFORMANCE",
            Self::ViolationOfTerms => "VIOLATION_OF_TERMS",
            Self::BreachOfContract => "BREACH_OF_CONTRACT",
            Self::MutualAgreement => "MUTUAL_AGREEMENT",
            Self::Other => "OTHER",
        }
    }

    /// Returns the label shown to the suspended agent.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::TerminatingContract => "Terminating contract",
            Self::PoorPerformance => "Poor performance",
            Self::ViolationOfTerms => "Violation of terms",
            Self::BreachOfContract => "Breach of contract",
            Self::MutualAgreement => "Mutual agreement",
            Self::Other => "Other",
        }
    }

    /// Returns true if this reason requires a verbatim reason text.
    #[must_use]
    pub const fn requires_text(&self) -> bool {
        matches!(self, Self::Other)
    }
}

impl std::fmt::Display for SuspensionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SuspensionReason {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|reason| reason.as_str() == s)
            .ok_or_else(|| DomainError::InvalidReasonCode(s.to_string()))
    }
}

/// Validated terms of a suspension, before a start instant is chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuspensionTerms {
    reason_code: SuspensionReason,
    reason_text: Option<String>,
    notes: Option<String>,
    duration_days: i64,
}

impl SuspensionTerms {
    /// Validates and creates suspension terms.
    ///
    /// Reason text is kept verbatim and notes are trimmed; blank values become `None`.
    ///
    /// # Arguments
    ///
    /// * `reason_code` - The disclosed reason
    /// * `reason_text` - Verbatim reason text, required for `OTHER`
    /// * `notes` - Optional notes visible to the agent
    /// * `duration_days` - Length of the suspension window in days
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `duration_days` is below 1 or above the permitted maximum
    /// - `reason_code` is `OTHER` and `reason_text` is blank
    pub fn new(
        reason_code: SuspensionReason,
        reason_text: Option<&str>,
        notes: Option<&str>,
        duration_days: i64,
    ) -> Result<Self, DomainError> {
        validate_duration_days(duration_days)?;
        let reason_text: Option<String> = validate_reason_text(reason_code, reason_text)?;
        let notes: Option<String> = notes
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);

        Ok(Self {
            reason_code,
            reason_text,
            notes,
            duration_days,
        })
    }

    /// Returns the reason code.
    #[must_use]
    pub const fn reason_code(&self) -> SuspensionReason {
        self.reason_code
    }

    /// Returns the reason text, if any.
    #[must_use]
    pub fn reason_text(&self) -> Option<&str> {
        self.reason_text.as_deref()
    }

    /// Returns the agent-visible notes, if any.
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Returns the duration in days.
    #[must_use]
    pub const fn duration_days(&self) -> i64 {
        self.duration_days
    }

    /// Computes the end of a suspension window starting at `started_at`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DateArithmeticOverflow` if the end instant is
    /// not representable.
    pub fn ends_at(&self, started_at: OffsetDateTime) -> Result<OffsetDateTime, DomainError> {
        started_at
            .checked_add(Duration::days(self.duration_days))
            .ok_or_else(|| DomainError::DateArithmeticOverflow {
                operation: format!(
                    "adding {} days to suspension start {started_at}",
                    self.duration_days
                ),
            })
    }
}
