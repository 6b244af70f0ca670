// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Suspension window arithmetic.
//!
//! A suspension is an overlay on an approved agent, independent of the
//! invitation log. Passing `ends_at` does not lift it: the view reports
//! `is_expired_by_time` and the record stays until it is explicitly removed.

use leasehold_domain::{AgentId, LandlordId, SuspensionReason, SuspensionTerms};
use time::OffsetDateTime;

use crate::error::CoreError;
use crate::state::{SuspensionRecord, SuspensionView};

/// Builds the suspension record for an agent.
///
/// Storing the record replaces any earlier suspension of the same agent.
///
/// # Arguments
///
/// * `agent_id` - The agent to suspend
/// * `landlord_id` - The suspending landlord
/// * `reason_code` - The disclosed reason
/// * `reason_text` - Verbatim reason text, required for `OTHER`
/// * `notes` - Optional notes visible to the agent
/// * `duration_days` - Length of the window in days
/// * `now` - Start of the window
///
/// # Errors
///
/// Returns an error if:
/// - `duration_days` is below 1 or above the permitted maximum
/// - `reason_code` is `OTHER` and `reason_text` is blank
/// - The end of the window is not representable
pub fn suspend(
    agent_id: AgentId,
    landlord_id: LandlordId,
    reason_code: SuspensionReason,
    reason_text: Option<&str>,
    notes: Option<&str>,
    duration_days: i64,
    now: OffsetDateTime,
) -> Result<SuspensionRecord, CoreError> {
    let terms: SuspensionTerms =
        SuspensionTerms::new(reason_code, reason_text, notes, duration_days)?;

    Ok(SuspensionRecord {
        agent_id,
        landlord_id,
        reason_code: terms.reason_code(),
        reason_text: terms.reason_text().map(str::to_string),
        notes: terms.notes().map(str::to_string),
        duration_days: terms.duration_days(),
        started_at: now,
        ends_at: terms.ends_at(now)?,
    })
}

/// Annotates a stored suspension with its time-based status.
#[must_use]
pub fn view(record: SuspensionRecord, now: OffsetDateTime) -> SuspensionView {
    let is_expired_by_time: bool = now > record.ends_at;
    let remaining_seconds: i64 = if is_expired_by_time {
        0
    } else {
        (record.ends_at - now).whole_seconds().max(0)
    };

    SuspensionView {
        record,
        is_expired_by_time,
        remaining_seconds,
    }
}

/// Returns the current suspension view, if a record exists.
#[must_use]
pub fn current_suspension(
    record: Option<SuspensionRecord>,
    now: OffsetDateTime,
) -> Option<SuspensionView> {
    record.map(|record| view(record, now))
}
