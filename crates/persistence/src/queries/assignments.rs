// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Relationship queries over the driver/route and bus/driver links.
//!
//! Every list returned here is ordered by link creation.

use diesel::SqliteConnection;
use diesel::prelude::*;
use fleet_domain::{Bus, DriverDetails, Role, Route, RouteDetails, User};
use tracing::debug;

use crate::data_models::{BusRow, RouteRow, UserRow, buses_from_rows, users_from_rows};
use crate::diesel_schema::{bus_drivers, buses, driver_routes, routes, users};
use crate::error::PersistenceError;
use crate::queries::routes::get_route_by_id;
use crate::queries::users::get_user_by_id;

/// Retrieves the driver assigned to a bus.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the bus has no driver or does not exist.
pub fn get_driver_for_bus(
    conn: &mut SqliteConnection,
    bus_id: i64,
) -> Result<Option<User>, PersistenceError> {
    debug!("Looking up driver for bus ID: {}", bus_id);

    bus_drivers::table
        .inner_join(users::table)
        .filter(bus_drivers::bus_id.eq(bus_id))
        .select(UserRow::as_select())
        .first(conn)
        .optional()?
        .map(UserRow::into_user)
        .transpose()
}

/// Retrieves the first bus assigned to a driver.
///
/// A driver may hold several buses; the earliest link wins.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the driver holds no bus.
pub fn get_bus_for_driver(
    conn: &mut SqliteConnection,
    driver_id: i64,
) -> Result<Option<Bus>, PersistenceError> {
    debug!("Looking up bus for driver ID: {}", driver_id);

    bus_drivers::table
        .inner_join(buses::table)
        .filter(bus_drivers::driver_id.eq(driver_id))
        .order_by(bus_drivers::assignment_id.asc())
        .select(BusRow::as_select())
        .first(conn)
        .optional()?
        .map(BusRow::into_bus)
        .transpose()
}

/// Lists every bus assigned to a driver.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_buses_for_driver(
    conn: &mut SqliteConnection,
    driver_id: i64,
) -> Result<Vec<Bus>, PersistenceError> {
    debug!("Listing buses for driver ID: {}", driver_id);

    let rows: Vec<BusRow> = bus_drivers::table
        .inner_join(buses::table)
        .filter(bus_drivers::driver_id.eq(driver_id))
        .order_by(bus_drivers::assignment_id.asc())
        .select(BusRow::as_select())
        .load(conn)?;

    buses_from_rows(rows)
}

/// Lists the drivers who know a route.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_drivers_for_route(
    conn: &mut SqliteConnection,
    route_id: i64,
) -> Result<Vec<User>, PersistenceError> {
    debug!("Listing drivers for route ID: {}", route_id);

    let rows: Vec<UserRow> = driver_routes::table
        .inner_join(users::table)
        .filter(driver_routes::route_id.eq(route_id))
        .order_by(driver_routes::assignment_id.asc())
        .select(UserRow::as_select())
        .load(conn)?;

    users_from_rows(rows)
}

/// Lists the routes a driver knows.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_routes_for_driver(
    conn: &mut SqliteConnection,
    driver_id: i64,
) -> Result<Vec<Route>, PersistenceError> {
    debug!("Listing routes for driver ID: {}", driver_id);

    let rows: Vec<RouteRow> = driver_routes::table
        .inner_join(routes::table)
        .filter(driver_routes::driver_id.eq(driver_id))
        .order_by(driver_routes::assignment_id.asc())
        .select(RouteRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(Route::from).collect())
}

/// Retrieves a driver with their known routes and assigned buses.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the user does not exist or is not a driver.
pub fn get_driver_details(
    conn: &mut SqliteConnection,
    driver_id: i64,
) -> Result<Option<DriverDetails>, PersistenceError> {
    let Some(driver) = get_user_by_id(conn, driver_id)? else {
        return Ok(None);
    };
    if driver.role != Role::Driver {
        debug!("User {} is not a driver", driver_id);
        return Ok(None);
    }

    let known_routes: Vec<Route> = get_routes_for_driver(conn, driver_id)?;
    let assigned_buses: Vec<Bus> = get_buses_for_driver(conn, driver_id)?;

    Ok(Some(DriverDetails {
        driver,
        known_routes,
        assigned_buses,
    }))
}

/// Retrieves a route with the drivers qualified to run it.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the route does not exist.
pub fn get_route_details(
    conn: &mut SqliteConnection,
    route_id: i64,
) -> Result<Option<RouteDetails>, PersistenceError> {
    let Some(route) = get_route_by_id(conn, route_id)? else {
        return Ok(None);
    };
    let qualified_drivers: Vec<User> = get_drivers_for_route(conn, route_id)?;

    Ok(Some(RouteDetails {
        route,
        qualified_drivers,
    }))
}

/// Counts all driver/route links.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_driver_route_links(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    use diesel::dsl::count;

    Ok(driver_routes::table
        .select(count(driver_routes::assignment_id))
        .first(conn)?)
}

/// Counts all bus/driver links.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_bus_driver_links(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    use diesel::dsl::count;

    Ok(bus_drivers::table
        .select(count(bus_drivers::assignment_id))
        .first(conn)?)
}
