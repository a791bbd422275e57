// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Application flows over a synchronous [`Persistence`].
//!
//! These functions block on database I/O. Async callers reach them through
//! [`crate::FleetStore`].

use fleet_domain::{
    Bus, BusCondition, ConditionCounts, NewBus, NewRoute, NewUser, Role, Route, User,
    validate_bus_form, validate_route_form,
};
use fleet_persistence::{Persistence, PersistenceError};
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::password_policy::PasswordPolicy;
use crate::request_response::{
    DriverOverview, FleetStatistics, LoginRequest, LoginResponse, RouteOverview,
};
use crate::session::SessionIdentity;

/// Range new drivers draw their starting salary bonus from.
pub(crate) const NEW_DRIVER_BONUS_RANGE: std::ops::RangeInclusive<u32> = 1000..=5000;

fn invalid_input(field: &str, message: &str) -> ApiError {
    ApiError::InvalidInput {
        field: String::from(field),
        message: String::from(message),
    }
}

/// Checks the login form before the store is consulted.
fn validate_login_form(email: &str, login: &str, password: &str) -> Result<(), ApiError> {
    if email.is_empty() {
        return Err(invalid_input("email", "Email cannot be empty"));
    }
    if !(email.contains('@') && email.contains('.')) {
        return Err(invalid_input("email", "Email must contain '@' and '.'"));
    }
    if login.is_empty() {
        return Err(invalid_input("login", "Login cannot be empty"));
    }
    PasswordPolicy::default().validate(password)?;
    Ok(())
}

/// Registers a new driver or passenger, or logs in an existing one.
///
/// Dispatchers can only log in. For drivers and passengers an unknown
/// login is registered on the spot with a generated display name; a known
/// login must present the matching password. Surrounding whitespace is
/// ignored in every field.
///
/// # Errors
///
/// Returns an error if:
/// - A form field is empty or malformed
/// - The password violates the password policy
/// - The credentials do not match an existing account
/// - Database operations fail
pub fn register_or_login(
    persistence: &mut Persistence,
    request: &LoginRequest,
) -> Result<LoginResponse, ApiError> {
    let email: &str = request.email.trim();
    let login: &str = request.login.trim();
    let password: &str = request.password.trim();
    let role: Role = request.role;

    validate_login_form(email, login, password)?;

    if role == Role::Dispatcher {
        let user: User = persistence
            .authenticate(login, password, role)?
            .ok_or_else(|| ApiError::AuthenticationFailed {
                reason: String::from("Invalid dispatcher credentials"),
            })?;
        info!(user_id = user.user_id, "Dispatcher logged in");
        return Ok(LoginResponse {
            session: SessionIdentity::from(&user),
            registered: false,
        });
    }

    if persistence.login_exists(login, role)? {
        let user: User = persistence
            .authenticate(login, password, role)?
            .ok_or_else(|| ApiError::AuthenticationFailed {
                reason: format!("Wrong password for {role} '{login}'"),
            })?;
        info!(user_id = user.user_id, %role, "User logged in");
        return Ok(LoginResponse {
            session: SessionIdentity::from(&user),
            registered: false,
        });
    }

    let (name, salary_bonus): (String, f64) = match role {
        Role::Driver => (
            format!("Driver {login}"),
            f64::from(rand::random_range(NEW_DRIVER_BONUS_RANGE)),
        ),
        _ => (format!("Passenger {login}"), 0.0),
    };
    let new_user: NewUser =
        NewUser::new(&name, email, login, password, role).with_salary_bonus(salary_bonus);

    let user_id: i64 = persistence.create_user(&new_user)?;
    let user: User = persistence
        .get_user_by_id(user_id)?
        .ok_or_else(|| ApiError::Internal {
            message: format!("User {user_id} missing after registration"),
        })?;

    info!(user_id, %role, "Registered new user");
    Ok(LoginResponse {
        session: SessionIdentity::from(&user),
        registered: true,
    })
}

/// Adds a bus entered on the add-bus form and returns it as stored.
///
/// # Errors
///
/// Returns an error if:
/// - A form field is missing or malformed
/// - The bus number is already taken
/// - Database operations fail
pub fn add_bus(persistence: &mut Persistence, bus: &NewBus) -> Result<Bus, ApiError> {
    validate_bus_form(bus)?;

    let bus_id: i64 = persistence.create_bus(bus)?;
    persistence
        .get_bus_by_id(bus_id)?
        .ok_or_else(|| ApiError::Internal {
            message: format!("Bus {bus_id} missing after creation"),
        })
}

/// Adds a route entered on the add-route form and returns it as stored.
///
/// # Errors
///
/// Returns an error if:
/// - A form field is missing or not positive
/// - The route number is already taken
/// - Database operations fail
pub fn add_route(persistence: &mut Persistence, route: &NewRoute) -> Result<Route, ApiError> {
    validate_route_form(route)?;

    let route_id: i64 = persistence.create_route(route)?;
    persistence
        .get_route_by_id(route_id)?
        .ok_or_else(|| ApiError::Internal {
            message: format!("Route {route_id} missing after creation"),
        })
}

/// Keeps a figure, or logs the failure and drops it.
pub(crate) fn degrade<T>(figure: &str, result: Result<T, PersistenceError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(figure, error = %e, "Fleet statistic unavailable");
            None
        }
    }
}

fn condition_counts(persistence: &mut Persistence) -> Result<ConditionCounts, PersistenceError> {
    let mut counts: ConditionCounts = ConditionCounts::default();
    for condition in BusCondition::ALL {
        let count: i64 = persistence.count_buses_by_condition(condition)?;
        let count: u32 = u32::try_from(count).map_err(|_| {
            PersistenceError::StorageFailure(format!("Bus count out of range: {count}"))
        })?;
        counts.add(condition, count);
    }
    Ok(counts)
}

/// Computes the dispatcher's fleet overview.
///
/// Never fails as a whole: a figure whose query fails is left out and the
/// failure is logged.
pub fn fleet_statistics(persistence: &mut Persistence) -> FleetStatistics {
    let total_buses: Option<i64> = degrade("total_buses", persistence.count_buses());
    let total_drivers: Option<i64> = degrade(
        "total_drivers",
        persistence.count_users_by_role(Role::Driver),
    );
    let total_routes: Option<i64> = degrade("total_routes", persistence.count_routes());
    let total_value: Option<f64> = degrade("total_value", persistence.total_fleet_value());
    let conditions: Option<ConditionCounts> =
        degrade("conditions", condition_counts(persistence));

    let recommendations = conditions
        .map(|counts| counts.recommendations())
        .unwrap_or_default();

    debug!(?total_buses, ?total_drivers, ?total_routes, "Fleet statistics computed");

    FleetStatistics {
        total_buses,
        total_drivers,
        total_routes,
        total_value,
        conditions,
        recommendations,
    }
}

/// Lists every route with its drivers and each driver's bus.
///
/// A failed bus lookup for one driver is logged and shown as no bus.
///
/// # Errors
///
/// Returns an error if the routes or a route's drivers cannot be loaded.
pub fn drivers_by_route(persistence: &mut Persistence) -> Result<Vec<RouteOverview>, ApiError> {
    let routes: Vec<Route> = persistence.list_routes()?;
    let mut overview: Vec<RouteOverview> = Vec::with_capacity(routes.len());

    for route in routes {
        let drivers: Vec<User> = persistence.get_drivers_for_route(route.route_id)?;
        let drivers: Vec<DriverOverview> = drivers
            .into_iter()
            .map(|driver| {
                let bus: Option<Bus> = persistence
                    .get_bus_for_driver(driver.user_id)
                    .unwrap_or_else(|e| {
                        warn!(driver_id = driver.user_id, error = %e, "Bus lookup failed");
                        None
                    });
                DriverOverview { driver, bus }
            })
            .collect();
        overview.push(RouteOverview { route, drivers });
    }

    Ok(overview)
}
