// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User mutations.
//!
//! Passwords never reach the database in clear text: they are hashed with
//! bcrypt at the cost the caller supplies.

use diesel::SqliteConnection;
use diesel::prelude::*;
use fleet_domain::{NewUser, Role, UserUpdate, validate_user_constraints, validate_user_update};
use tracing::info;

use crate::diesel_schema::users;
use crate::error::PersistenceError;
use crate::queries::users::{get_user_by_id, login_exists};

#[derive(AsChangeset)]
#[diesel(table_name = users)]
struct UserChangeset<'a> {
    name: Option<&'a str>,
    email: Option<&'a str>,
    password_hash: Option<String>,
    salary_bonus: Option<f64>,
}

/// Hashes a password with bcrypt.
///
/// # Errors
///
/// Returns an error if hashing fails.
pub fn hash_password(password: &str, cost: u32) -> Result<String, PersistenceError> {
    bcrypt::hash(password, cost)
        .map_err(|e| PersistenceError::StorageFailure(format!("Failed to hash password: {e}")))
}

/// Creates a new user.
///
/// # Returns
///
/// The ID assigned to the new user.
///
/// # Errors
///
/// Returns `DuplicateKey` if the `(login, role)` pair is taken,
/// `ConstraintViolation` if a field is invalid, or a storage error.
pub fn create_user(
    conn: &mut SqliteConnection,
    user: &NewUser,
    hash_cost: u32,
) -> Result<i64, PersistenceError> {
    validate_user_constraints(user)?;

    if login_exists(conn, &user.login, user.role)? {
        return Err(PersistenceError::DuplicateKey(format!(
            "User with login '{}' and role '{}' already exists",
            user.login, user.role
        )));
    }

    info!(
        "Creating user with login: {}, role: {}",
        user.login, user.role
    );

    let password_hash: String = hash_password(&user.password, hash_cost)?;

    let user_id: i64 = diesel::insert_into(users::table)
        .values((
            users::name.eq(&user.name),
            users::email.eq(&user.email),
            users::login.eq(&user.login),
            users::password_hash.eq(&password_hash),
            users::role.eq(user.role.as_str()),
            users::salary_bonus.eq(user.salary_bonus),
        ))
        .returning(users::user_id)
        .get_result(conn)?;

    info!(user_id, "User created");
    Ok(user_id)
}

/// Applies the set fields of `update` to a user.
///
/// A new password is re-hashed. An update with no fields set only checks
/// that the user exists.
///
/// # Errors
///
/// Returns `NotFound` if the user does not exist, `ConstraintViolation` if
/// a field is invalid, or a storage error.
pub fn update_user(
    conn: &mut SqliteConnection,
    user_id: i64,
    update: &UserUpdate,
    hash_cost: u32,
) -> Result<(), PersistenceError> {
    validate_user_update(update)?;

    if get_user_by_id(conn, user_id)?.is_none() {
        return Err(PersistenceError::NotFound(format!("User {user_id}")));
    }

    let password_hash: Option<String> = update
        .password
        .as_deref()
        .map(|password| hash_password(password, hash_cost))
        .transpose()?;

    let changeset = UserChangeset {
        name: update.name.as_deref(),
        email: update.email.as_deref(),
        password_hash,
        salary_bonus: update.salary_bonus,
    };

    if changeset.name.is_none()
        && changeset.email.is_none()
        && changeset.password_hash.is_none()
        && changeset.salary_bonus.is_none()
    {
        return Ok(());
    }

    info!("Updating user ID: {}", user_id);

    diesel::update(users::table)
        .filter(users::user_id.eq(user_id))
        .set(&changeset)
        .execute(conn)?;

    Ok(())
}

/// Deletes a user and, through cascading foreign keys, every route and
/// bus link that references them.
///
/// # Errors
///
/// Returns `NotFound` if the user does not exist, or a storage error.
pub fn delete_user(conn: &mut SqliteConnection, user_id: i64) -> Result<(), PersistenceError> {
    info!("Deleting user ID: {}", user_id);

    let deleted: usize =
        diesel::delete(users::table.filter(users::user_id.eq(user_id))).execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!("User {user_id}")));
    }
    Ok(())
}

/// Deletes the passenger registered under `login`.
///
/// # Returns
///
/// The number of rows removed, which is zero when no such passenger exists.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_passenger_by_login(
    conn: &mut SqliteConnection,
    login: &str,
) -> Result<usize, PersistenceError> {
    info!("Deleting passenger with login: {}", login);

    Ok(diesel::delete(
        users::table
            .filter(users::login.eq(login))
            .filter(users::role.eq(Role::Passenger.as_str())),
    )
    .execute(conn)?)
}
