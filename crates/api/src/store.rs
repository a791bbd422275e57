// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Async handle to the fleet store.
//!
//! Every operation runs on tokio's blocking pool while holding the store
//! lock, so async callers never block an executor thread. Dropping a
//! returned future does not cancel the blocking task: a write that has
//! started still completes and commits.

use fleet_domain::{
    Bus, BusCondition, BusUpdate, DriverDetails, NewBus, NewRoute, NewUser, Role, Route,
    RouteDetails, RouteUpdate, User, UserUpdate,
};
use fleet_persistence::{Persistence, SeedOutcome};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use crate::config::StoreConfig;
use crate::error::ApiError;
use crate::handlers;
use crate::request_response::{FleetStatistics, LoginRequest, LoginResponse, RouteOverview};

/// Shared, cloneable handle to one fleet database.
#[derive(Clone)]
pub struct FleetStore {
    persistence: Arc<Mutex<Persistence>>,
}

impl FleetStore {
    /// Opens the store described by `config`, seeding it if asked to.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the database
    /// cannot be opened, or seeding fails.
    pub async fn open(config: StoreConfig) -> Result<Self, ApiError> {
        let persistence: Persistence = tokio::task::spawn_blocking(move || {
            let mut persistence: Persistence = config.open_persistence()?;
            if config.seed_on_create {
                let outcome: SeedOutcome = persistence.seed_if_empty()?;
                info!(?outcome, "Seed check complete");
            }
            Ok::<_, ApiError>(persistence)
        })
        .await
        .map_err(join_error)??;

        Ok(Self::from_persistence(persistence))
    }

    /// Wraps an already opened persistence layer.
    #[must_use]
    pub fn from_persistence(persistence: Persistence) -> Self {
        Self {
            persistence: Arc::new(Mutex::new(persistence)),
        }
    }

    /// Runs `operation` against the store on the blocking pool.
    async fn run<T, F>(&self, operation: F) -> Result<T, ApiError>
    where
        F: FnOnce(&mut Persistence) -> Result<T, ApiError> + Send + 'static,
        T: Send + 'static,
    {
        let persistence: Arc<Mutex<Persistence>> = Arc::clone(&self.persistence);
        tokio::task::spawn_blocking(move || {
            let mut guard = persistence.blocking_lock();
            operation(&mut guard)
        })
        .await
        .map_err(join_error)?
    }

    /// Seeds the store if it has never been seeded.
    ///
    /// # Errors
    ///
    /// Returns an error if the seed cannot be written.
    pub async fn seed_if_empty(&self) -> Result<SeedOutcome, ApiError> {
        self.run(|p| Ok(p.seed_if_empty()?)).await
    }

    // ========================================================================
    // Flows
    // ========================================================================

    /// Registers or logs in a user from the login form.
    ///
    /// # Errors
    ///
    /// See [`handlers::register_or_login`].
    pub async fn register_or_login(
        &self,
        request: LoginRequest,
    ) -> Result<LoginResponse, ApiError> {
        self.run(move |p| handlers::register_or_login(p, &request))
            .await
    }

    /// Adds a bus from the add-bus form.
    ///
    /// # Errors
    ///
    /// See [`handlers::add_bus`].
    pub async fn add_bus(&self, bus: NewBus) -> Result<Bus, ApiError> {
        self.run(move |p| handlers::add_bus(p, &bus)).await
    }

    /// Adds a route from the add-route form.
    ///
    /// # Errors
    ///
    /// See [`handlers::add_route`].
    pub async fn add_route(&self, route: NewRoute) -> Result<Route, ApiError> {
        self.run(move |p| handlers::add_route(p, &route)).await
    }

    /// Computes the fleet overview.
    ///
    /// # Errors
    ///
    /// Returns an error only if the blocking task itself fails.
    pub async fn fleet_statistics(&self) -> Result<FleetStatistics, ApiError> {
        self.run(|p| Ok(handlers::fleet_statistics(p))).await
    }

    /// Lists every route with its drivers and their buses.
    ///
    /// # Errors
    ///
    /// See [`handlers::drivers_by_route`].
    pub async fn drivers_by_route(&self) -> Result<Vec<RouteOverview>, ApiError> {
        self.run(handlers::drivers_by_route).await
    }

    // ========================================================================
    // Users
    // ========================================================================

    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn authenticate(
        &self,
        login: String,
        password: String,
        role: Role,
    ) -> Result<Option<User>, ApiError> {
        self.run(move |p| Ok(p.authenticate(&login, &password, role)?))
            .await
    }

    /// # Errors
    ///
    /// Returns `ApiError::Duplicate` if the `(login, role)` pair is taken.
    pub async fn create_user(&self, user: NewUser) -> Result<i64, ApiError> {
        self.run(move |p| Ok(p.create_user(&user)?)).await
    }

    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_user_by_id(&self, user_id: i64) -> Result<Option<User>, ApiError> {
        self.run(move |p| Ok(p.get_user_by_id(user_id)?)).await
    }

    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_user_by_login_and_role(
        &self,
        login: String,
        role: Role,
    ) -> Result<Option<User>, ApiError> {
        self.run(move |p| Ok(p.get_user_by_login_and_role(&login, role)?))
            .await
    }

    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_drivers(&self) -> Result<Vec<User>, ApiError> {
        self.run(|p| Ok(p.list_drivers()?)).await
    }

    /// # Errors
    ///
    /// Returns `ApiError::ResourceNotFound` if the user does not exist.
    pub async fn update_user(&self, user_id: i64, update: UserUpdate) -> Result<(), ApiError> {
        self.run(move |p| Ok(p.update_user(user_id, &update)?))
            .await
    }

    /// # Errors
    ///
    /// Returns `ApiError::ResourceNotFound` if the user does not exist.
    pub async fn delete_user(&self, user_id: i64) -> Result<(), ApiError> {
        self.run(move |p| Ok(p.delete_user(user_id)?)).await
    }

    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete_passenger_by_login(&self, login: String) -> Result<usize, ApiError> {
        self.run(move |p| Ok(p.delete_passenger_by_login(&login)?))
            .await
    }

    // ========================================================================
    // Buses
    // ========================================================================

    /// Creates a bus without the form-level checks of [`Self::add_bus`].
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Duplicate` if the bus number is taken.
    pub async fn create_bus(&self, bus: NewBus) -> Result<i64, ApiError> {
        self.run(move |p| Ok(p.create_bus(&bus)?)).await
    }

    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_bus_by_id(&self, bus_id: i64) -> Result<Option<Bus>, ApiError> {
        self.run(move |p| Ok(p.get_bus_by_id(bus_id)?)).await
    }

    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_bus_by_number(&self, bus_number: i32) -> Result<Option<Bus>, ApiError> {
        self.run(move |p| Ok(p.get_bus_by_number(bus_number)?))
            .await
    }

    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_buses(&self) -> Result<Vec<Bus>, ApiError> {
        self.run(|p| Ok(p.list_buses()?)).await
    }

    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_buses_by_condition(
        &self,
        condition: BusCondition,
    ) -> Result<Vec<Bus>, ApiError> {
        self.run(move |p| Ok(p.get_buses_by_condition(condition)?))
            .await
    }

    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_unassigned_buses(&self) -> Result<Vec<Bus>, ApiError> {
        self.run(|p| Ok(p.list_unassigned_buses()?)).await
    }

    /// # Errors
    ///
    /// Returns `ApiError::ResourceNotFound` if the bus does not exist.
    pub async fn update_bus(&self, bus_id: i64, update: BusUpdate) -> Result<(), ApiError> {
        self.run(move |p| Ok(p.update_bus(bus_id, &update)?)).await
    }

    /// # Errors
    ///
    /// Returns `ApiError::ResourceNotFound` if the bus does not exist.
    pub async fn delete_bus(&self, bus_id: i64) -> Result<(), ApiError> {
        self.run(move |p| Ok(p.delete_bus(bus_id)?)).await
    }

    // ========================================================================
    // Routes
    // ========================================================================

    /// Creates a route without the form-level checks of [`Self::add_route`].
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Duplicate` if the route number is taken.
    pub async fn create_route(&self, route: NewRoute) -> Result<i64, ApiError> {
        self.run(move |p| Ok(p.create_route(&route)?)).await
    }

    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_route_by_id(&self, route_id: i64) -> Result<Option<Route>, ApiError> {
        self.run(move |p| Ok(p.get_route_by_id(route_id)?)).await
    }

    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_routes(&self) -> Result<Vec<Route>, ApiError> {
        self.run(|p| Ok(p.list_routes()?)).await
    }

    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn search_routes(&self, query: String) -> Result<Vec<Route>, ApiError> {
        self.run(move |p| Ok(p.search_routes(&query)?)).await
    }

    /// # Errors
    ///
    /// Returns `ApiError::ResourceNotFound` if the route does not exist.
    pub async fn update_route(&self, route_id: i64, update: RouteUpdate) -> Result<(), ApiError> {
        self.run(move |p| Ok(p.update_route(route_id, &update)?))
            .await
    }

    /// # Errors
    ///
    /// Returns `ApiError::ResourceNotFound` if the route does not exist.
    pub async fn delete_route(&self, route_id: i64) -> Result<(), ApiError> {
        self.run(move |p| Ok(p.delete_route(route_id)?)).await
    }

    // ========================================================================
    // Assignments
    // ========================================================================

    /// # Errors
    ///
    /// Returns `ApiError::ResourceNotFound` if either ID does not resolve.
    pub async fn assign_bus_to_driver(
        &self,
        bus_id: i64,
        driver_id: i64,
    ) -> Result<Option<i64>, ApiError> {
        self.run(move |p| Ok(p.assign_bus_to_driver(bus_id, driver_id)?))
            .await
    }

    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn unassign_bus(&self, bus_id: i64) -> Result<bool, ApiError> {
        self.run(move |p| Ok(p.unassign_bus(bus_id)?)).await
    }

    /// # Errors
    ///
    /// Returns `ApiError::ResourceNotFound` if either ID does not resolve.
    pub async fn assign_driver_to_route(
        &self,
        driver_id: i64,
        route_id: i64,
    ) -> Result<bool, ApiError> {
        self.run(move |p| Ok(p.assign_driver_to_route(driver_id, route_id)?))
            .await
    }

    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn remove_driver_from_route(
        &self,
        driver_id: i64,
        route_id: i64,
    ) -> Result<bool, ApiError> {
        self.run(move |p| Ok(p.remove_driver_from_route(driver_id, route_id)?))
            .await
    }

    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_driver_for_bus(&self, bus_id: i64) -> Result<Option<User>, ApiError> {
        self.run(move |p| Ok(p.get_driver_for_bus(bus_id)?)).await
    }

    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_bus_for_driver(&self, driver_id: i64) -> Result<Option<Bus>, ApiError> {
        self.run(move |p| Ok(p.get_bus_for_driver(driver_id)?))
            .await
    }

    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_drivers_for_route(&self, route_id: i64) -> Result<Vec<User>, ApiError> {
        self.run(move |p| Ok(p.get_drivers_for_route(route_id)?))
            .await
    }

    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_routes_for_driver(&self, driver_id: i64) -> Result<Vec<Route>, ApiError> {
        self.run(move |p| Ok(p.get_routes_for_driver(driver_id)?))
            .await
    }

    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_driver_details(
        &self,
        driver_id: i64,
    ) -> Result<Option<DriverDetails>, ApiError> {
        self.run(move |p| Ok(p.get_driver_details(driver_id)?))
            .await
    }

    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_route_details(&self, route_id: i64) -> Result<Option<RouteDetails>, ApiError> {
        self.run(move |p| Ok(p.get_route_details(route_id)?)).await
    }
}

fn join_error(err: tokio::task::JoinError) -> ApiError {
    ApiError::Internal {
        message: format!("Store task failed: {err}"),
    }
}
