// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Leasehold agent lifecycle.
//!
//! This crate stores the append-only invitation log and the one-row-per-agent
//! suspension table in `SQLite` through Diesel. It holds no derived state:
//! invitations are reduced from the log by the core crate on every read.
//!
//! ## Storage
//!
//! - In-memory databases back unit and integration tests
//! - File databases run in WAL mode
//! - Migrations are embedded and applied on open
//!
//! ## Ordering
//!
//! Every event query returns events ordered by `issued_at`, then by the
//! insertion-ordered `event_id`.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use leasehold::SuspensionRecord;
use leasehold_domain::{AgentId, EmailAddress, InviteToken, LandlordId};
use leasehold_events::InvitationEvent;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter for the invitation log and agent suspensions.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives its own shared in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_test_{db_id}?mode=memory&cache=shared");

        let conn: SqliteConnection = backend::initialize_database(&shared_memory_url)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::initialize_database(path_str)?;

        // Enable WAL mode for better read concurrency
        backend::enable_wal_mode(&mut conn)?;

        Ok(Self { conn })
    }

    // ========================================================================
    // Invitation Log
    // ========================================================================

    /// Appends an event to the invitation log.
    ///
    /// # Arguments
    ///
    /// * `event` - The event to append
    ///
    /// # Returns
    ///
    /// The event carrying its assigned ID.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The event is missing a required field
    /// - A `SENT` event reuses a token that is still redeemable
    /// - The database write fails
    pub fn append_event(
        &mut self,
        event: &InvitationEvent,
    ) -> Result<InvitationEvent, PersistenceError> {
        mutations::append_event(&mut self.conn, event)
    }

    /// Retrieves every event of a landlord's invitations, in log order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn events_for_landlord(
        &mut self,
        landlord_id: LandlordId,
    ) -> Result<Vec<InvitationEvent>, PersistenceError> {
        queries::events_for_landlord(&mut self.conn, landlord_id)
    }

    /// Retrieves every event for an email, in log order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn events_for_email(
        &mut self,
        email: &EmailAddress,
    ) -> Result<Vec<InvitationEvent>, PersistenceError> {
        queries::events_for_email(&mut self.conn, email)
    }

    /// Finds the most recent `SENT` event carrying a token.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_sent_event_by_token(
        &mut self,
        token: &InviteToken,
    ) -> Result<Option<InvitationEvent>, PersistenceError> {
        queries::find_sent_event_by_token(&mut self.conn, token)
    }

    /// Retrieves every event for the emails an agent is linked to, in log order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn events_for_agent(
        &mut self,
        agent_id: AgentId,
    ) -> Result<Vec<InvitationEvent>, PersistenceError> {
        queries::events_for_agent(&mut self.conn, agent_id)
    }

    // ========================================================================
    // Suspensions
    // ========================================================================

    /// Stores a suspension, replacing any earlier suspension of the agent.
    ///
    /// # Errors
    ///
    /// Returns an error if the database write fails.
    pub fn upsert_suspension(&mut self, record: &SuspensionRecord) -> Result<(), PersistenceError> {
        mutations::upsert_suspension(&mut self.conn, record)
    }

    /// Removes an agent's suspension.
    ///
    /// Returns `false` when the agent had no suspension.
    ///
    /// # Errors
    ///
    /// Returns an error if the database write fails.
    pub fn delete_suspension(&mut self, agent_id: AgentId) -> Result<bool, PersistenceError> {
        mutations::delete_suspension(&mut self.conn, agent_id)
    }

    /// Retrieves an agent's stored suspension, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_suspension(
        &mut self,
        agent_id: AgentId,
    ) -> Result<Option<SuspensionRecord>, PersistenceError> {
        queries::get_suspension(&mut self.conn, agent_id)
    }
}
