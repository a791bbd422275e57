// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the fleet store.
//!
//! This crate stores users, buses, routes and the links between them in
//! `SQLite` through Diesel. The schema ships as embedded migrations and is
//! applied every time a store is opened.
//!
//! ## Referential Integrity
//!
//! - Foreign key enforcement is switched on per connection and verified at
//!   startup; opening fails if it cannot be confirmed.
//! - Deleting a user, bus or route cascades to every link that names it.
//! - A bus has at most one driver (unique index on `bus_drivers.bus_id`).
//!   Reassigning a bus replaces its driver in one transaction.
//! - Bus numbers and route numbers are unique. Users are unique per
//!   `(login, role)`.
//!
//! ## Lookups and Errors
//!
//! Single-entity lookups return `Ok(None)` when nothing matches. Mutations
//! that target a missing entity return `PersistenceError::NotFound`.
//!
//! ## Testing
//!
//! Every `Persistence::new_in_memory()` call opens its own uniquely named
//! shared in-memory database, so tests never see each other's rows.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use fleet_domain::{
    Bus, BusCondition, BusUpdate, DriverDetails, NewBus, NewRoute, NewUser, Role, Route,
    RouteDetails, RouteUpdate, User, UserUpdate, current_year,
};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

mod connection;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use mutations::{SEED_MARKER_KEY, SeedOutcome, SeedSummary};

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// bcrypt cost used unless the caller picks another.
pub const DEFAULT_HASH_COST: u32 = bcrypt::DEFAULT_COST;

/// Persistence adapter for the fleet store.
///
/// Owns a single `SQLite` connection. All methods are synchronous; callers
/// that need async access wrap the adapter and move calls onto a blocking
/// thread.
pub struct Persistence {
    conn: SqliteConnection,
    hash_cost: u32,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String =
            format!("file:memdb_fleet_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = connection::open(&shared_memory_url)?;
        connection::verify_foreign_keys(&mut conn)?;

        Ok(Self {
            conn,
            hash_cost: DEFAULT_HASH_COST,
        })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// The file is created if it does not exist. WAL journaling is enabled.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = connection::open(path_str)?;
        connection::enable_wal(&mut conn)?;
        connection::verify_foreign_keys(&mut conn)?;

        Ok(Self {
            conn,
            hash_cost: DEFAULT_HASH_COST,
        })
    }

    /// Sets the bcrypt cost used for passwords hashed from now on.
    ///
    /// Existing hashes keep the cost they were created with.
    #[must_use]
    pub const fn with_hash_cost(mut self, hash_cost: u32) -> Self {
        self.hash_cost = hash_cost;
        self
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        connection::verify_foreign_keys(&mut self.conn)
    }

    // ========================================================================
    // Seeding
    // ========================================================================

    /// Seeds the store if it has never been seeded.
    ///
    /// # Errors
    ///
    /// Returns an error if the seed cannot be written.
    pub fn seed_if_empty(&mut self) -> Result<SeedOutcome, PersistenceError> {
        mutations::seed::seed_if_empty(&mut self.conn, self.hash_cost)
    }

    // ========================================================================
    // Users
    // ========================================================================

    /// Authenticates a user by login, password and role.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    /// Returns `Ok(None)` if no user matches all three.
    pub fn authenticate(
        &mut self,
        login: &str,
        password: &str,
        role: Role,
    ) -> Result<Option<User>, PersistenceError> {
        queries::users::authenticate(&mut self.conn, login, password, role)
    }

    /// Creates a user and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateKey` if the `(login, role)` pair is taken.
    pub fn create_user(&mut self, user: &NewUser) -> Result<i64, PersistenceError> {
        mutations::users::create_user(&mut self.conn, user, self.hash_cost)
    }

    /// Retrieves a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_user_by_id(&mut self, user_id: i64) -> Result<Option<User>, PersistenceError> {
        queries::users::get_user_by_id(&mut self.conn, user_id)
    }

    /// Retrieves a user by login and role.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_user_by_login_and_role(
        &mut self,
        login: &str,
        role: Role,
    ) -> Result<Option<User>, PersistenceError> {
        queries::users::get_user_by_login_and_role(&mut self.conn, login, role)
    }

    /// Checks whether a `(login, role)` pair is taken.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn login_exists(&mut self, login: &str, role: Role) -> Result<bool, PersistenceError> {
        queries::users::login_exists(&mut self.conn, login, role)
    }

    /// Lists every user with the driver role, in creation order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_drivers(&mut self) -> Result<Vec<User>, PersistenceError> {
        queries::users::list_users_by_role(&mut self.conn, Role::Driver)
    }

    /// Lists every user holding `role`, in creation order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_users_by_role(&mut self, role: Role) -> Result<Vec<User>, PersistenceError> {
        queries::users::list_users_by_role(&mut self.conn, role)
    }

    /// Updates a user.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the user does not exist.
    pub fn update_user(
        &mut self,
        user_id: i64,
        update: &UserUpdate,
    ) -> Result<(), PersistenceError> {
        mutations::users::update_user(&mut self.conn, user_id, update, self.hash_cost)
    }

    /// Deletes a user and their links.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the user does not exist.
    pub fn delete_user(&mut self, user_id: i64) -> Result<(), PersistenceError> {
        mutations::users::delete_user(&mut self.conn, user_id)
    }

    /// Deletes the passenger registered under `login` and returns the
    /// number of rows removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn delete_passenger_by_login(&mut self, login: &str) -> Result<usize, PersistenceError> {
        mutations::users::delete_passenger_by_login(&mut self.conn, login)
    }

    /// Counts the users holding `role`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_users_by_role(&mut self, role: Role) -> Result<i64, PersistenceError> {
        queries::users::count_users_by_role(&mut self.conn, role)
    }

    // ========================================================================
    // Buses
    // ========================================================================

    /// Creates a bus valued as of the current calendar year.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateKey` if the bus number is taken, or
    /// `ConstraintViolation` if the price or mileage is invalid.
    pub fn create_bus(&mut self, bus: &NewBus) -> Result<i64, PersistenceError> {
        mutations::buses::create_bus(&mut self.conn, bus, current_year())
    }

    /// Creates a bus valued as of `year`.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateKey` if the bus number is taken, or
    /// `ConstraintViolation` if the price or mileage is invalid.
    pub fn create_bus_valued_in(
        &mut self,
        bus: &NewBus,
        year: i32,
    ) -> Result<i64, PersistenceError> {
        mutations::buses::create_bus(&mut self.conn, bus, year)
    }

    /// Retrieves a bus by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_bus_by_id(&mut self, bus_id: i64) -> Result<Option<Bus>, PersistenceError> {
        queries::buses::get_bus_by_id(&mut self.conn, bus_id)
    }

    /// Retrieves a bus by fleet number.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_bus_by_number(&mut self, bus_number: i32) -> Result<Option<Bus>, PersistenceError> {
        queries::buses::get_bus_by_number(&mut self.conn, bus_number)
    }

    /// Lists all buses by bus number.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_buses(&mut self) -> Result<Vec<Bus>, PersistenceError> {
        queries::buses::list_buses(&mut self.conn)
    }

    /// Lists the buses in `condition`, by bus number.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_buses_by_condition(
        &mut self,
        condition: BusCondition,
    ) -> Result<Vec<Bus>, PersistenceError> {
        queries::buses::get_buses_by_condition(&mut self.conn, condition)
    }

    /// Lists the buses without a driver, by bus number.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_unassigned_buses(&mut self) -> Result<Vec<Bus>, PersistenceError> {
        queries::buses::list_unassigned_buses(&mut self.conn)
    }

    /// Updates a bus.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the bus does not exist.
    pub fn update_bus(&mut self, bus_id: i64, update: &BusUpdate) -> Result<(), PersistenceError> {
        mutations::buses::update_bus(&mut self.conn, bus_id, update)
    }

    /// Deletes a bus and its driver link.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the bus does not exist.
    pub fn delete_bus(&mut self, bus_id: i64) -> Result<(), PersistenceError> {
        mutations::buses::delete_bus(&mut self.conn, bus_id)
    }

    /// Counts all buses.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_buses(&mut self) -> Result<i64, PersistenceError> {
        queries::buses::count_buses(&mut self.conn)
    }

    /// Counts the buses in `condition`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_buses_by_condition(
        &mut self,
        condition: BusCondition,
    ) -> Result<i64, PersistenceError> {
        queries::buses::count_buses_by_condition(&mut self.conn, condition)
    }

    /// Sums the current value of every bus.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn total_fleet_value(&mut self) -> Result<f64, PersistenceError> {
        queries::buses::total_fleet_value(&mut self.conn)
    }

    // ========================================================================
    // Routes
    // ========================================================================

    /// Creates a route and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateKey` if the route number is taken, or
    /// `ConstraintViolation` if the distance or time is not positive.
    pub fn create_route(&mut self, route: &NewRoute) -> Result<i64, PersistenceError> {
        mutations::routes::create_route(&mut self.conn, route)
    }

    /// Retrieves a route by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_route_by_id(&mut self, route_id: i64) -> Result<Option<Route>, PersistenceError> {
        queries::routes::get_route_by_id(&mut self.conn, route_id)
    }

    /// Retrieves a route by exact route number.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_route_by_number(
        &mut self,
        route_number: &str,
    ) -> Result<Option<Route>, PersistenceError> {
        queries::routes::get_route_by_number(&mut self.conn, route_number)
    }

    /// Lists all routes by route number.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_routes(&mut self) -> Result<Vec<Route>, PersistenceError> {
        queries::routes::list_routes(&mut self.conn)
    }

    /// Finds routes whose number contains `query`, case-sensitively.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn search_routes(&mut self, query: &str) -> Result<Vec<Route>, PersistenceError> {
        queries::routes::search_routes(&mut self.conn, query)
    }

    /// Updates a route.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the route does not exist.
    pub fn update_route(
        &mut self,
        route_id: i64,
        update: &RouteUpdate,
    ) -> Result<(), PersistenceError> {
        mutations::routes::update_route(&mut self.conn, route_id, update)
    }

    /// Deletes a route and its driver links.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the route does not exist.
    pub fn delete_route(&mut self, route_id: i64) -> Result<(), PersistenceError> {
        mutations::routes::delete_route(&mut self.conn, route_id)
    }

    /// Counts all routes.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_routes(&mut self) -> Result<i64, PersistenceError> {
        queries::routes::count_routes(&mut self.conn)
    }

    // ========================================================================
    // Assignments
    // ========================================================================

    /// Assigns a bus to a driver and returns the previous driver's ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if either ID does not resolve, or
    /// `ConstraintViolation` if the user is not a driver.
    pub fn assign_bus_to_driver(
        &mut self,
        bus_id: i64,
        driver_id: i64,
    ) -> Result<Option<i64>, PersistenceError> {
        mutations::assignments::assign_bus_to_driver(&mut self.conn, bus_id, driver_id)
    }

    /// Removes a bus's driver link; returns whether one existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn unassign_bus(&mut self, bus_id: i64) -> Result<bool, PersistenceError> {
        mutations::assignments::unassign_bus(&mut self.conn, bus_id)
    }

    /// Records that a driver knows a route; returns whether the link is new.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if either ID does not resolve, or
    /// `ConstraintViolation` if the user is not a driver.
    pub fn assign_driver_to_route(
        &mut self,
        driver_id: i64,
        route_id: i64,
    ) -> Result<bool, PersistenceError> {
        mutations::assignments::assign_driver_to_route(&mut self.conn, driver_id, route_id)
    }

    /// Removes a driver/route link; returns whether one existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn remove_driver_from_route(
        &mut self,
        driver_id: i64,
        route_id: i64,
    ) -> Result<bool, PersistenceError> {
        mutations::assignments::remove_driver_from_route(&mut self.conn, driver_id, route_id)
    }

    /// Retrieves the driver of a bus.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_driver_for_bus(&mut self, bus_id: i64) -> Result<Option<User>, PersistenceError> {
        queries::assignments::get_driver_for_bus(&mut self.conn, bus_id)
    }

    /// Retrieves the earliest-assigned bus of a driver.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_bus_for_driver(&mut self, driver_id: i64) -> Result<Option<Bus>, PersistenceError> {
        queries::assignments::get_bus_for_driver(&mut self.conn, driver_id)
    }

    /// Lists every bus of a driver.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_buses_for_driver(&mut self, driver_id: i64) -> Result<Vec<Bus>, PersistenceError> {
        queries::assignments::get_buses_for_driver(&mut self.conn, driver_id)
    }

    /// Lists the drivers who know a route.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_drivers_for_route(&mut self, route_id: i64) -> Result<Vec<User>, PersistenceError> {
        queries::assignments::get_drivers_for_route(&mut self.conn, route_id)
    }

    /// Lists the routes a driver knows.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_routes_for_driver(
        &mut self,
        driver_id: i64,
    ) -> Result<Vec<Route>, PersistenceError> {
        queries::assignments::get_routes_for_driver(&mut self.conn, driver_id)
    }

    /// Retrieves a driver with routes and buses.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_driver_details(
        &mut self,
        driver_id: i64,
    ) -> Result<Option<DriverDetails>, PersistenceError> {
        queries::assignments::get_driver_details(&mut self.conn, driver_id)
    }

    /// Retrieves a route with its qualified drivers.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_route_details(
        &mut self,
        route_id: i64,
    ) -> Result<Option<RouteDetails>, PersistenceError> {
        queries::assignments::get_route_details(&mut self.conn, route_id)
    }

    /// Counts all driver/route links.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_driver_route_links(&mut self) -> Result<i64, PersistenceError> {
        queries::assignments::count_driver_route_links(&mut self.conn)
    }

    /// Counts all bus/driver links.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_bus_driver_links(&mut self) -> Result<i64, PersistenceError> {
        queries::assignments::count_bus_driver_links(&mut self.conn)
    }
}
