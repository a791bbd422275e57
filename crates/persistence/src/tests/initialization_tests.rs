// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend initialization tests.

use crate::Persistence;
use crate::error::PersistenceError;
use crate::tests::{TEST_HASH_COST, create_test_driver, create_test_persistence};

#[test]
fn test_persistence_initialization() {
    let result: Result<Persistence, PersistenceError> = Persistence::new_in_memory();
    assert!(result.is_ok());
}

#[test]
fn test_foreign_key_enforcement_is_verified() {
    let mut persistence: Persistence = create_test_persistence();
    assert!(persistence.verify_foreign_key_enforcement().is_ok());
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let mut db1: Persistence = create_test_persistence();
    let mut db2: Persistence = create_test_persistence();

    create_test_driver(&mut db1, "driver1");

    assert_eq!(db1.list_drivers().unwrap().len(), 1);
    assert!(db2.list_drivers().unwrap().is_empty());
}

#[test]
fn test_file_database_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fleet.db");

    let driver_id: i64 = {
        let mut persistence: Persistence = Persistence::new_with_file(&path)
            .unwrap()
            .with_hash_cost(TEST_HASH_COST);
        create_test_driver(&mut persistence, "driver1")
    };

    let mut reopened: Persistence = Persistence::new_with_file(&path).unwrap();
    let driver = reopened.get_user_by_id(driver_id).unwrap().unwrap();
    assert_eq!(driver.login, "driver1");
}

#[test]
fn test_verify_foreign_keys_rejects_unenforced_connection() {
    use diesel::{Connection, SqliteConnection};

    let mut conn: SqliteConnection = SqliteConnection::establish(":memory:").unwrap();

    assert_eq!(
        crate::connection::verify_foreign_keys(&mut conn),
        Err(PersistenceError::ForeignKeyEnforcementNotEnabled)
    );
}

#[test]
fn test_open_enables_foreign_keys_and_migrates() {
    let mut conn = crate::connection::open(":memory:").unwrap();

    assert!(crate::connection::verify_foreign_keys(&mut conn).is_ok());
    assert!(crate::queries::metadata::get_metadata(&mut conn, "seeded")
        .unwrap()
        .is_none());
}
