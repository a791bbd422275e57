// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Driver/route and bus/driver link mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use fleet_domain::Role;
use tracing::{debug, info};

use crate::diesel_schema::{bus_drivers, buses, driver_routes, routes};
use crate::error::PersistenceError;
use crate::queries::users::get_user_by_id;

fn require_bus(conn: &mut SqliteConnection, bus_id: i64) -> Result<(), PersistenceError> {
    let exists: bool = diesel::select(diesel::dsl::exists(
        buses::table.filter(buses::bus_id.eq(bus_id)),
    ))
    .get_result::<bool>(conn)?;

    if exists {
        Ok(())
    } else {
        Err(PersistenceError::NotFound(format!("Bus {bus_id}")))
    }
}

fn require_route(conn: &mut SqliteConnection, route_id: i64) -> Result<(), PersistenceError> {
    let exists: bool = diesel::select(diesel::dsl::exists(
        routes::table.filter(routes::route_id.eq(route_id)),
    ))
    .get_result::<bool>(conn)?;

    if exists {
        Ok(())
    } else {
        Err(PersistenceError::NotFound(format!("Route {route_id}")))
    }
}

/// Resolves `driver_id` and checks that it names a driver.
fn require_driver(conn: &mut SqliteConnection, driver_id: i64) -> Result<(), PersistenceError> {
    let Some(user) = get_user_by_id(conn, driver_id)? else {
        return Err(PersistenceError::NotFound(format!("User {driver_id}")));
    };

    if user.role != Role::Driver {
        return Err(PersistenceError::ConstraintViolation(format!(
            "User {driver_id} has role '{}', only drivers can be assigned",
            user.role
        )));
    }
    Ok(())
}

/// Assigns a bus to a driver, replacing any previous driver of that bus.
///
/// The removal of the old link and the insertion of the new one commit
/// together or not at all.
///
/// # Returns
///
/// The ID of the driver who held the bus before, if any.
///
/// # Errors
///
/// Returns `NotFound` if the bus or user does not exist,
/// `ConstraintViolation` if the user is not a driver, or a storage error.
pub fn assign_bus_to_driver(
    conn: &mut SqliteConnection,
    bus_id: i64,
    driver_id: i64,
) -> Result<Option<i64>, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        require_bus(conn, bus_id)?;
        require_driver(conn, driver_id)?;

        let previous: Option<i64> = bus_drivers::table
            .filter(bus_drivers::bus_id.eq(bus_id))
            .select(bus_drivers::driver_id)
            .first::<i64>(conn)
            .optional()?;

        diesel::delete(bus_drivers::table.filter(bus_drivers::bus_id.eq(bus_id)))
            .execute(conn)?;

        diesel::insert_into(bus_drivers::table)
            .values((
                bus_drivers::bus_id.eq(bus_id),
                bus_drivers::driver_id.eq(driver_id),
            ))
            .execute(conn)?;

        info!(
            bus_id,
            driver_id,
            previous_driver = ?previous,
            "Bus assigned to driver"
        );
        Ok(previous)
    })
}

/// Removes the driver link of a bus.
///
/// # Returns
///
/// `true` if the bus had a driver.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn unassign_bus(conn: &mut SqliteConnection, bus_id: i64) -> Result<bool, PersistenceError> {
    info!("Removing driver from bus ID: {}", bus_id);

    let deleted: usize =
        diesel::delete(bus_drivers::table.filter(bus_drivers::bus_id.eq(bus_id))).execute(conn)?;

    Ok(deleted > 0)
}

/// Records that a driver knows a route.
///
/// Assigning an existing pair again leaves the store unchanged.
///
/// # Returns
///
/// `true` if a new link was created.
///
/// # Errors
///
/// Returns `NotFound` if the driver or route does not exist,
/// `ConstraintViolation` if the user is not a driver, or a storage error.
pub fn assign_driver_to_route(
    conn: &mut SqliteConnection,
    driver_id: i64,
    route_id: i64,
) -> Result<bool, PersistenceError> {
    require_driver(conn, driver_id)?;
    require_route(conn, route_id)?;

    let inserted: usize = diesel::insert_or_ignore_into(driver_routes::table)
        .values((
            driver_routes::driver_id.eq(driver_id),
            driver_routes::route_id.eq(route_id),
        ))
        .execute(conn)?;

    if inserted == 0 {
        debug!(driver_id, route_id, "Driver already knows route");
    } else {
        info!(driver_id, route_id, "Driver assigned to route");
    }
    Ok(inserted > 0)
}

/// Removes a driver/route link.
///
/// # Returns
///
/// `true` if a link was removed.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn remove_driver_from_route(
    conn: &mut SqliteConnection,
    driver_id: i64,
    route_id: i64,
) -> Result<bool, PersistenceError> {
    info!("Removing driver {} from route {}", driver_id, route_id);

    let deleted: usize = diesel::delete(
        driver_routes::table
            .filter(driver_routes::driver_id.eq(driver_id))
            .filter(driver_routes::route_id.eq(route_id)),
    )
    .execute(conn)?;

    Ok(deleted > 0)
}
