// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Field validation.
//!
//! Two levels of checks live here:
//!
//! - **Store constraints** (`validate_*_constraints`) are the rules the store
//!   itself enforces on every write: positive prices, distances and times,
//!   non-negative mileage, a non-empty login.
//! - **Form rules** (`validate_*_form`) are the stricter checks applied to
//!   user-entered data before it is handed to the store: required text fields,
//!   a positive bus number, a real `dd.mm.yyyy` purchase date.

use time::Date;
use time::macros::format_description;

use crate::error::DomainError;
use crate::types::{BusUpdate, NewBus, NewRoute, NewUser, RouteUpdate, UserUpdate};

/// Validates the fields the store requires of a new user.
///
/// # Errors
///
/// Returns an error if:
/// - The login is empty
/// - The salary bonus is negative or not finite
pub fn validate_user_constraints(user: &NewUser) -> Result<(), DomainError> {
    if user.login.trim().is_empty() {
        return Err(DomainError::InvalidLogin(String::from(
            "Login cannot be empty",
        )));
    }
    validate_salary_bonus(user.salary_bonus)
}

/// Validates a user update against the store constraints.
///
/// # Errors
///
/// Returns an error if the new salary bonus is negative or not finite, or
/// the new name is blank.
pub fn validate_user_update(update: &UserUpdate) -> Result<(), DomainError> {
    if let Some(name) = &update.name
        && name.trim().is_empty()
    {
        return Err(DomainError::InvalidName(String::from(
            "Name cannot be empty",
        )));
    }
    if let Some(salary_bonus) = update.salary_bonus {
        validate_salary_bonus(salary_bonus)?;
    }
    Ok(())
}

fn validate_salary_bonus(salary_bonus: f64) -> Result<(), DomainError> {
    if !salary_bonus.is_finite() || salary_bonus < 0.0 {
        return Err(DomainError::InvalidSalaryBonus(salary_bonus.to_string()));
    }
    Ok(())
}

/// Validates the fields the store requires of a new bus.
///
/// # Errors
///
/// Returns an error if:
/// - The initial price is not a positive, finite amount
/// - The mileage is negative
pub fn validate_bus_constraints(bus: &NewBus) -> Result<(), DomainError> {
    if !bus.initial_price.is_finite() || bus.initial_price <= 0.0 {
        return Err(DomainError::InvalidInitialPrice(
            bus.initial_price.to_string(),
        ));
    }
    if bus.mileage < 0 {
        return Err(DomainError::InvalidMileage(bus.mileage));
    }
    Ok(())
}

/// Validates a bus update against the store constraints.
///
/// # Errors
///
/// Returns an error if the new mileage is negative or the new model is blank.
pub fn validate_bus_update(update: &BusUpdate) -> Result<(), DomainError> {
    if let Some(model) = &update.model
        && model.trim().is_empty()
    {
        return Err(DomainError::InvalidModel(String::from(
            "Model cannot be empty",
        )));
    }
    if let Some(mileage) = update.mileage
        && mileage < 0
    {
        return Err(DomainError::InvalidMileage(mileage));
    }
    Ok(())
}

/// Validates a bus as entered on the add-bus form.
///
/// Applies the store constraints last.
///
/// # Errors
///
/// Returns an error if:
/// - Any store constraint fails
/// - The bus number is not positive
/// - The model is empty
/// - The purchase date is not a valid `dd.mm.yyyy` date
pub fn validate_bus_form(bus: &NewBus) -> Result<(), DomainError> {
    if bus.bus_number <= 0 {
        return Err(DomainError::InvalidBusNumber(bus.bus_number));
    }
    if bus.model.trim().is_empty() {
        return Err(DomainError::InvalidModel(String::from(
            "Model cannot be empty",
        )));
    }
    parse_purchase_date(&bus.purchase_date)?;
    validate_bus_constraints(bus)
}

/// Parses a `dd.mm.yyyy` purchase date.
///
/// # Errors
///
/// Returns an error if the string is not a real calendar date in that format.
pub fn parse_purchase_date(purchase_date: &str) -> Result<Date, DomainError> {
    let format = format_description!("[day].[month].[year]");
    Date::parse(purchase_date, format).map_err(|e| DomainError::InvalidPurchaseDate {
        date_string: purchase_date.to_string(),
        reason: e.to_string(),
    })
}

/// Validates the fields the store requires of a new route.
///
/// # Errors
///
/// Returns an error if:
/// - The distance is not a positive, finite number
/// - The estimated time is not positive
pub fn validate_route_constraints(route: &NewRoute) -> Result<(), DomainError> {
    validate_distance(route.distance)?;
    validate_estimated_time(route.estimated_time)
}

/// Validates a route update against the store constraints.
///
/// # Errors
///
/// Returns an error if a new distance or time is not positive, or a new
/// endpoint is blank.
pub fn validate_route_update(update: &RouteUpdate) -> Result<(), DomainError> {
    for endpoint in [&update.start_point, &update.end_point].into_iter().flatten() {
        if endpoint.trim().is_empty() {
            return Err(DomainError::InvalidEndpoint(String::from(
                "Endpoint cannot be empty",
            )));
        }
    }
    if let Some(distance) = update.distance {
        validate_distance(distance)?;
    }
    if let Some(estimated_time) = update.estimated_time {
        validate_estimated_time(estimated_time)?;
    }
    Ok(())
}

/// Validates a route as entered on the add-route form.
///
/// Applies the store constraints last.
///
/// # Errors
///
/// Returns an error if the route number or either endpoint is empty, or
/// any store constraint fails.
pub fn validate_route_form(route: &NewRoute) -> Result<(), DomainError> {
    if route.route_number.trim().is_empty() {
        return Err(DomainError::InvalidRouteNumber(String::from(
            "Route number cannot be empty",
        )));
    }
    if route.start_point.trim().is_empty() {
        return Err(DomainError::InvalidEndpoint(String::from(
            "Start point cannot be empty",
        )));
    }
    if route.end_point.trim().is_empty() {
        return Err(DomainError::InvalidEndpoint(String::from(
            "End point cannot be empty",
        )));
    }
    validate_route_constraints(route)
}

fn validate_distance(distance: f64) -> Result<(), DomainError> {
    if !distance.is_finite() || distance <= 0.0 {
        return Err(DomainError::InvalidDistance(distance.to_string()));
    }
    Ok(())
}

const fn validate_estimated_time(estimated_time: i32) -> Result<(), DomainError> {
    if estimated_time <= 0 {
        return Err(DomainError::InvalidEstimatedTime(estimated_time));
    }
    Ok(())
}
