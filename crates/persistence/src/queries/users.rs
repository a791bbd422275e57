// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User queries and authentication.

use diesel::SqliteConnection;
use diesel::prelude::*;
use fleet_domain::{Role, User};
use tracing::debug;

use crate::data_models::{UserRow, users_from_rows};
use crate::diesel_schema::users;
use crate::error::PersistenceError;

/// Retrieves a user by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the user is not found.
pub fn get_user_by_id(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Option<User>, PersistenceError> {
    debug!("Looking up user by ID: {}", user_id);

    let result: Result<UserRow, diesel::result::Error> = users::table
        .filter(users::user_id.eq(user_id))
        .select(UserRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into_user()?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Retrieves the full user row for a `(login, role)` pair, including the
/// password hash.
fn get_user_row(
    conn: &mut SqliteConnection,
    login: &str,
    role: Role,
) -> Result<Option<UserRow>, PersistenceError> {
    Ok(users::table
        .filter(users::login.eq(login))
        .filter(users::role.eq(role.as_str()))
        .select(UserRow::as_select())
        .first(conn)
        .optional()?)
}

/// Retrieves a user by login and role.
///
/// Logins are only unique per role, so both are required.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if no such user exists.
pub fn get_user_by_login_and_role(
    conn: &mut SqliteConnection,
    login: &str,
    role: Role,
) -> Result<Option<User>, PersistenceError> {
    debug!("Looking up user by login: {}, role: {}", login, role);

    get_user_row(conn, login, role)?
        .map(UserRow::into_user)
        .transpose()
}

/// Checks whether a `(login, role)` pair is already taken.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn login_exists(
    conn: &mut SqliteConnection,
    login: &str,
    role: Role,
) -> Result<bool, PersistenceError> {
    use diesel::dsl::{exists, select};

    Ok(select(exists(
        users::table
            .filter(users::login.eq(login))
            .filter(users::role.eq(role.as_str())),
    ))
    .get_result::<bool>(conn)?)
}

/// Authenticates a user by exact login, password and role.
///
/// The password is checked against the stored bcrypt hash. A wrong
/// password and an unknown login are indistinguishable to the caller: both
/// return `Ok(None)`.
///
/// # Errors
///
/// Returns an error if the database query fails or the stored hash is
/// unreadable.
pub fn authenticate(
    conn: &mut SqliteConnection,
    login: &str,
    password: &str,
    role: Role,
) -> Result<Option<User>, PersistenceError> {
    debug!("Authenticating login: {}, role: {}", login, role);

    let Some(row) = get_user_row(conn, login, role)? else {
        return Ok(None);
    };

    if !verify_password(password, &row.password_hash)? {
        debug!("Password mismatch for login: {}", login);
        return Ok(None);
    }

    Ok(Some(row.into_user()?))
}

/// Lists all users holding `role`, in creation order.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_users_by_role(
    conn: &mut SqliteConnection,
    role: Role,
) -> Result<Vec<User>, PersistenceError> {
    debug!("Listing users with role: {}", role);

    let rows: Vec<UserRow> = users::table
        .filter(users::role.eq(role.as_str()))
        .select(UserRow::as_select())
        .order_by(users::user_id.asc())
        .load(conn)?;

    users_from_rows(rows)
}

/// Counts the users holding `role`.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_users_by_role(
    conn: &mut SqliteConnection,
    role: Role,
) -> Result<i64, PersistenceError> {
    use diesel::dsl::count;

    let count: i64 = users::table
        .filter(users::role.eq(role.as_str()))
        .select(count(users::user_id))
        .first(conn)?;

    debug!("Users with role {}: {}", role, count);
    Ok(count)
}

/// Counts all users.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_users(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    use diesel::dsl::count;

    Ok(users::table.select(count(users::user_id)).first(conn)?)
}

/// Verifies a password against a stored hash.
///
/// # Errors
///
/// Returns an error if the hash cannot be parsed.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, PersistenceError> {
    bcrypt::verify(password, password_hash)
        .map_err(|e| PersistenceError::StorageFailure(format!("Failed to verify password: {e}")))
}
