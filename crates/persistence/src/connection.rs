// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Opening and preparing `SQLite` connections.
//!
//! PRAGMA statements go through `sql_query`; Diesel has no DSL for them.

use diesel::prelude::*;
use diesel::sql_types::Integer;
use diesel::{Connection, RunQueryDsl, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info};

use crate::error::PersistenceError;

/// Schema migrations compiled into the crate.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

#[derive(QueryableByName)]
struct ForeignKeysPragma {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

fn pragma(conn: &mut SqliteConnection, statement: &str) -> Result<(), PersistenceError> {
    debug!(statement, "Applying PRAGMA");
    diesel::sql_query(statement)
        .execute(conn)
        .map_err(|e| PersistenceError::StorageFailure(format!("{statement}: {e}")))?;
    Ok(())
}

/// Opens `database_url`, turns on foreign keys and applies pending
/// migrations.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or a migration fails.
pub fn open(database_url: &str) -> Result<SqliteConnection, PersistenceError> {
    info!(database_url, "Opening fleet database");

    let mut conn: SqliteConnection = SqliteConnection::establish(database_url)?;
    pragma(&mut conn, "PRAGMA foreign_keys = ON")?;

    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?;
    info!(applied = applied.len(), "Migrations applied");

    Ok(conn)
}

/// Switches a file database to write-ahead logging.
///
/// # Errors
///
/// Returns an error if the journal mode cannot be changed.
pub fn enable_wal(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    pragma(conn, "PRAGMA journal_mode = WAL")
}

/// Fails unless `SQLite` is enforcing foreign keys on `conn`.
///
/// Assignment rows rely on `ON DELETE CASCADE`, which `SQLite` ignores
/// when enforcement is off.
///
/// # Errors
///
/// Returns [`PersistenceError::ForeignKeyEnforcementNotEnabled`] if
/// enforcement is off, or a storage error if the PRAGMA cannot be read.
pub fn verify_foreign_keys(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    let row: ForeignKeysPragma = diesel::sql_query("PRAGMA foreign_keys").get_result(conn)?;

    if row.foreign_keys == 0 {
        return Err(PersistenceError::ForeignKeyEnforcementNotEnabled);
    }

    debug!("Foreign key enforcement confirmed");
    Ok(())
}
