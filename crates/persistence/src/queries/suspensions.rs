// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use leasehold::SuspensionRecord;
use leasehold_domain::AgentId;

use crate::data_models::SuspensionRow;
use crate::diesel_schema::agent_suspensions;
use crate::error::PersistenceError;

/// Retrieves an agent's stored suspension, if any.
///
/// # Errors
///
/// Returns an error if the query fails or the row cannot be reconstructed.
pub fn get_suspension(
    conn: &mut SqliteConnection,
    agent_id: AgentId,
) -> Result<Option<SuspensionRecord>, PersistenceError> {
    let row: Option<SuspensionRow> = agent_suspensions::table
        .filter(agent_suspensions::agent_id.eq(agent_id.value()))
        .select(SuspensionRow::as_select())
        .first(conn)
        .optional()?;

    row.map(SuspensionRecord::try_from).transpose()
}
