// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Route queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use fleet_domain::Route;
use tracing::debug;

use crate::data_models::RouteRow;
use crate::diesel_schema::routes;
use crate::error::PersistenceError;

/// Retrieves a route by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the route is not found.
pub fn get_route_by_id(
    conn: &mut SqliteConnection,
    route_id: i64,
) -> Result<Option<Route>, PersistenceError> {
    debug!("Looking up route by ID: {}", route_id);

    let row: Option<RouteRow> = routes::table
        .filter(routes::route_id.eq(route_id))
        .select(RouteRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(Route::from))
}

/// Retrieves a route by its exact route number.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if no route carries that number.
pub fn get_route_by_number(
    conn: &mut SqliteConnection,
    route_number: &str,
) -> Result<Option<Route>, PersistenceError> {
    debug!("Looking up route by number: {}", route_number);

    let row: Option<RouteRow> = routes::table
        .filter(routes::route_number.eq(route_number))
        .select(RouteRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(Route::from))
}

/// Lists all routes ordered by route number.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_routes(conn: &mut SqliteConnection) -> Result<Vec<Route>, PersistenceError> {
    debug!("Listing all routes");

    let rows: Vec<RouteRow> = routes::table
        .select(RouteRow::as_select())
        .order_by(routes::route_number.asc())
        .load(conn)?;

    Ok(rows.into_iter().map(Route::from).collect())
}

/// Finds the routes whose number contains `query`.
///
/// Matching is a case-sensitive substring test, so an empty query matches
/// every route. `SQLite`'s `LIKE` folds ASCII case, so the filter runs here
/// rather than in SQL. Results are in creation order.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn search_routes(
    conn: &mut SqliteConnection,
    query: &str,
) -> Result<Vec<Route>, PersistenceError> {
    debug!("Searching routes for: {:?}", query);

    let rows: Vec<RouteRow> = routes::table
        .select(RouteRow::as_select())
        .order_by(routes::route_id.asc())
        .load(conn)?;

    let matches: Vec<Route> = rows
        .into_iter()
        .filter(|row| row.route_number.contains(query))
        .map(Route::from)
        .collect();

    debug!("Routes matching {:?}: {}", query, matches.len());
    Ok(matches)
}

/// Counts all routes.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_routes(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    use diesel::dsl::count;

    Ok(routes::table.select(count(routes::route_id)).first(conn)?)
}
