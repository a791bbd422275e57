// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Route mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use fleet_domain::{NewRoute, RouteUpdate, validate_route_constraints, validate_route_update};
use tracing::info;

use crate::diesel_schema::routes;
use crate::error::PersistenceError;
use crate::queries::routes::{get_route_by_id, get_route_by_number};

#[derive(AsChangeset)]
#[diesel(table_name = routes)]
struct RouteChangeset<'a> {
    start_point: Option<&'a str>,
    end_point: Option<&'a str>,
    distance: Option<f64>,
    estimated_time: Option<i32>,
}

/// Creates a new route.
///
/// Route numbers are compared exactly: `"12"` and `"12A"` are distinct.
///
/// # Returns
///
/// The ID assigned to the new route.
///
/// # Errors
///
/// Returns `DuplicateKey` if the route number is taken,
/// `ConstraintViolation` if the distance or time is not positive, or a
/// storage error.
pub fn create_route(
    conn: &mut SqliteConnection,
    route: &NewRoute,
) -> Result<i64, PersistenceError> {
    validate_route_constraints(route)?;

    if get_route_by_number(conn, &route.route_number)?.is_some() {
        return Err(PersistenceError::DuplicateKey(format!(
            "Route number '{}' already exists",
            route.route_number
        )));
    }

    info!(
        "Creating route {}: {} -> {}",
        route.route_number, route.start_point, route.end_point
    );

    let route_id: i64 = diesel::insert_into(routes::table)
        .values((
            routes::route_number.eq(&route.route_number),
            routes::start_point.eq(&route.start_point),
            routes::end_point.eq(&route.end_point),
            routes::distance.eq(route.distance),
            routes::estimated_time.eq(route.estimated_time),
        ))
        .returning(routes::route_id)
        .get_result(conn)?;

    info!(route_id, "Route created");
    Ok(route_id)
}

/// Applies the set fields of `update` to a route.
///
/// # Errors
///
/// Returns `NotFound` if the route does not exist, `ConstraintViolation` if
/// a field is invalid, or a storage error.
pub fn update_route(
    conn: &mut SqliteConnection,
    route_id: i64,
    update: &RouteUpdate,
) -> Result<(), PersistenceError> {
    validate_route_update(update)?;

    if get_route_by_id(conn, route_id)?.is_none() {
        return Err(PersistenceError::NotFound(format!("Route {route_id}")));
    }

    let changeset = RouteChangeset {
        start_point: update.start_point.as_deref(),
        end_point: update.end_point.as_deref(),
        distance: update.distance,
        estimated_time: update.estimated_time,
    };

    if changeset.start_point.is_none()
        && changeset.end_point.is_none()
        && changeset.distance.is_none()
        && changeset.estimated_time.is_none()
    {
        return Ok(());
    }

    info!("Updating route ID: {}", route_id);

    diesel::update(routes::table)
        .filter(routes::route_id.eq(route_id))
        .set(&changeset)
        .execute(conn)?;

    Ok(())
}

/// Deletes a route and every driver link to it.
///
/// # Errors
///
/// Returns `NotFound` if the route does not exist, or a storage error.
pub fn delete_route(conn: &mut SqliteConnection, route_id: i64) -> Result<(), PersistenceError> {
    info!("Deleting route ID: {}", route_id);

    let deleted: usize =
        diesel::delete(routes::table.filter(routes::route_id.eq(route_id))).execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!("Route {route_id}")));
    }
    Ok(())
}
