// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bus queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use fleet_domain::{Bus, BusCondition};
use tracing::debug;

use crate::data_models::{BusRow, buses_from_rows};
use crate::diesel_schema::{bus_drivers, buses};
use crate::error::PersistenceError;

/// Retrieves a bus by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the bus is not found.
pub fn get_bus_by_id(
    conn: &mut SqliteConnection,
    bus_id: i64,
) -> Result<Option<Bus>, PersistenceError> {
    debug!("Looking up bus by ID: {}", bus_id);

    let result: Result<BusRow, diesel::result::Error> = buses::table
        .filter(buses::bus_id.eq(bus_id))
        .select(BusRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into_bus()?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Retrieves a bus by its fleet number.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if no bus carries that number.
pub fn get_bus_by_number(
    conn: &mut SqliteConnection,
    bus_number: i32,
) -> Result<Option<Bus>, PersistenceError> {
    debug!("Looking up bus by number: {}", bus_number);

    buses::table
        .filter(buses::bus_number.eq(bus_number))
        .select(BusRow::as_select())
        .first(conn)
        .optional()?
        .map(BusRow::into_bus)
        .transpose()
}

/// Lists all buses ordered by bus number.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_buses(conn: &mut SqliteConnection) -> Result<Vec<Bus>, PersistenceError> {
    debug!("Listing all buses");

    let rows: Vec<BusRow> = buses::table
        .select(BusRow::as_select())
        .order_by(buses::bus_number.asc())
        .load(conn)?;

    buses_from_rows(rows)
}

/// Lists the buses in `condition`, ordered by bus number.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_buses_by_condition(
    conn: &mut SqliteConnection,
    condition: BusCondition,
) -> Result<Vec<Bus>, PersistenceError> {
    debug!("Listing buses in condition: {}", condition);

    let rows: Vec<BusRow> = buses::table
        .filter(buses::condition.eq(condition.as_str()))
        .select(BusRow::as_select())
        .order_by(buses::bus_number.asc())
        .load(conn)?;

    buses_from_rows(rows)
}

/// Lists the buses that have no driver, ordered by bus number.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_unassigned_buses(conn: &mut SqliteConnection) -> Result<Vec<Bus>, PersistenceError> {
    debug!("Listing buses without a driver");

    let rows: Vec<BusRow> = buses::table
        .filter(diesel::dsl::not(
            buses::bus_id.eq_any(bus_drivers::table.select(bus_drivers::bus_id)),
        ))
        .select(BusRow::as_select())
        .order_by(buses::bus_number.asc())
        .load(conn)?;

    buses_from_rows(rows)
}

/// Counts all buses.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_buses(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    use diesel::dsl::count;

    let count: i64 = buses::table.select(count(buses::bus_id)).first(conn)?;

    debug!("Total buses: {}", count);
    Ok(count)
}

/// Counts the buses in `condition`.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_buses_by_condition(
    conn: &mut SqliteConnection,
    condition: BusCondition,
) -> Result<i64, PersistenceError> {
    use diesel::dsl::count;

    Ok(buses::table
        .filter(buses::condition.eq(condition.as_str()))
        .select(count(buses::bus_id))
        .first(conn)?)
}

/// Sums the current value of every bus.
///
/// An empty fleet is worth `0.0`.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn total_fleet_value(conn: &mut SqliteConnection) -> Result<f64, PersistenceError> {
    use diesel::dsl::sum;

    let total: Option<f64> = buses::table
        .select(sum(buses::current_value))
        .first(conn)?;

    debug!("Total fleet value: {:?}", total);
    Ok(total.unwrap_or(0.0))
}
