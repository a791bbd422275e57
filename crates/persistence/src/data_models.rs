// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Diesel row types and their conversion into domain types.

use diesel::prelude::*;
use fleet_domain::{Bus, BusCondition, Role, Route, User};
use std::str::FromStr;

use crate::diesel_schema::{buses, routes, users};
use crate::error::PersistenceError;

/// Diesel Queryable struct for user rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = users)]
pub struct UserRow {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub login: String,
    pub password_hash: String,
    pub role: String,
    pub salary_bonus: f64,
}

impl UserRow {
    /// Converts the row into a domain user, dropping the password hash.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored role is not a known role.
    pub fn into_user(self) -> Result<User, PersistenceError> {
        let role: Role = Role::from_str(&self.role).map_err(|e| {
            PersistenceError::StorageFailure(format!(
                "Corrupt user row {}: {e}",
                self.user_id
            ))
        })?;

        Ok(User {
            user_id: self.user_id,
            name: self.name,
            email: self.email,
            login: self.login,
            role,
            salary_bonus: self.salary_bonus,
        })
    }
}

/// Diesel Queryable struct for bus rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = buses)]
pub struct BusRow {
    pub bus_id: i64,
    pub bus_number: i32,
    pub model: String,
    pub registration_number: String,
    pub purchase_date: String,
    pub initial_price: f64,
    pub current_value: f64,
    pub depreciation: f64,
    pub condition: String,
    pub mileage: i32,
}

impl BusRow {
    /// Converts the row into a domain bus.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored condition is not a known rating.
    pub fn into_bus(self) -> Result<Bus, PersistenceError> {
        let condition: BusCondition = BusCondition::from_str(&self.condition).map_err(|e| {
            PersistenceError::StorageFailure(format!("Corrupt bus row {}: {e}", self.bus_id))
        })?;

        Ok(Bus {
            bus_id: self.bus_id,
            bus_number: self.bus_number,
            model: self.model,
            registration_number: self.registration_number,
            purchase_date: self.purchase_date,
            initial_price: self.initial_price,
            current_value: self.current_value,
            depreciation: self.depreciation,
            condition,
            mileage: self.mileage,
        })
    }
}

/// Diesel Queryable struct for route rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = routes)]
pub struct RouteRow {
    pub route_id: i64,
    pub route_number: String,
    pub start_point: String,
    pub end_point: String,
    pub distance: f64,
    pub estimated_time: i32,
}

impl From<RouteRow> for Route {
    fn from(row: RouteRow) -> Self {
        Self {
            route_id: row.route_id,
            route_number: row.route_number,
            start_point: row.start_point,
            end_point: row.end_point,
            distance: row.distance,
            estimated_time: row.estimated_time,
        }
    }
}

/// Converts loaded user rows, failing on the first corrupt row.
///
/// # Errors
///
/// Returns an error if any row holds an unknown role.
pub fn users_from_rows(rows: Vec<UserRow>) -> Result<Vec<User>, PersistenceError> {
    rows.into_iter().map(UserRow::into_user).collect()
}

/// Converts loaded bus rows, failing on the first corrupt row.
///
/// # Errors
///
/// Returns an error if any row holds an unknown condition.
pub fn buses_from_rows(rows: Vec<BusRow>) -> Result<Vec<Bus>, PersistenceError> {
    rows.into_iter().map(BusRow::into_bus).collect()
}
