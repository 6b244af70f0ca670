// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Suspension writes.

use diesel::prelude::*;
use diesel::SqliteConnection;
use leasehold::SuspensionRecord;
use leasehold_domain::AgentId;
use tracing::info;

use crate::data_models::SuspensionRow;
use crate::diesel_schema::agent_suspensions;
use crate::error::PersistenceError;

/// Stores a suspension, replacing any earlier suspension of the agent.
///
/// The last committed write wins.
///
/// # Errors
///
/// Returns an error if the database write fails.
pub fn upsert_suspension(
    conn: &mut SqliteConnection,
    record: &SuspensionRecord,
) -> Result<(), PersistenceError> {
    let row: SuspensionRow = SuspensionRow::from_record(record)?;

    diesel::replace_into(agent_suspensions::table)
        .values(&row)
        .execute(conn)?;

    info!(
        agent_id = %record.agent_id,
        landlord_id = %record.landlord_id,
        reason_code = %record.reason_code,
        ends_at = %record.ends_at,
        "Stored agent suspension"
    );

    Ok(())
}

/// Removes an agent's suspension.
///
/// # Returns
///
/// `true` if a suspension was removed, `false` if none existed.
///
/// # Errors
///
/// Returns an error if the database write fails.
pub fn delete_suspension(
    conn: &mut SqliteConnection,
    agent_id: AgentId,
) -> Result<bool, PersistenceError> {
    let deleted: usize = diesel::delete(
        agent_suspensions::table.filter(agent_suspensions::agent_id.eq(agent_id.value())),
    )
    .execute(conn)?;

    if deleted > 0 {
        info!(agent_id = %agent_id, "Lifted agent suspension");
    }

    Ok(deleted > 0)
}
