// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The kind of account a user holds.
///
/// The same login may exist once per role, so a person can register as a
/// driver and separately as a passenger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Manages buses, routes and driver assignments.
    Dispatcher,
    /// Drives an assigned bus on known routes.
    Driver,
    /// Browses and searches routes.
    Passenger,
}

impl Role {
    /// All roles, in a stable order.
    pub const ALL: [Self; 3] = [Self::Dispatcher, Self::Driver, Self::Passenger];

    /// Converts this role to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Dispatcher => "dispatcher",
            Self::Driver => "driver",
            Self::Passenger => "passenger",
        }
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dispatcher" => Ok(Self::Dispatcher),
            "driver" => Ok(Self::Driver),
            "passenger" => Ok(Self::Passenger),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Coarse health rating of a bus, independent of its depreciation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusCondition {
    Excellent,
    Good,
    Average,
    Poor,
}

impl BusCondition {
    /// All conditions, best first.
    pub const ALL: [Self; 4] = [Self::Excellent, Self::Good, Self::Average, Self::Poor];

    /// Converts this condition to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Average => "average",
            Self::Poor => "poor",
        }
    }
}

impl FromStr for BusCondition {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "excellent" => Ok(Self::Excellent),
            "good" => Ok(Self::Good),
            "average" => Ok(Self::Average),
            "poor" => Ok(Self::Poor),
            _ => Err(DomainError::InvalidCondition(s.to_string())),
        }
    }
}

impl std::fmt::Display for BusCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A persisted user account.
///
/// The password hash never leaves the persistence layer, so it is not part
/// of this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// The canonical numeric identifier assigned by the database.
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub login: String,
    pub role: Role,
    /// Bonus paid on top of salary. Only meaningful for drivers.
    pub salary_bonus: f64,
}

/// A user that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub login: String,
    /// Plain-text password. Hashed before it reaches storage.
    pub password: String,
    pub role: Role,
    pub salary_bonus: f64,
}

impl NewUser {
    /// Creates a new user with a zero salary bonus.
    #[must_use]
    pub fn new(name: &str, email: &str, login: &str, password: &str, role: Role) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            login: login.to_string(),
            password: password.to_string(),
            role,
            salary_bonus: 0.0,
        }
    }

    /// Sets the salary bonus.
    #[must_use]
    pub const fn with_salary_bonus(mut self, salary_bonus: f64) -> Self {
        self.salary_bonus = salary_bonus;
        self
    }
}

/// Editable user fields. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub salary_bonus: Option<f64>,
}

/// A persisted bus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bus {
    /// The canonical numeric identifier assigned by the database.
    pub bus_id: i64,
    /// Fleet number painted on the bus. Unique across the fleet.
    pub bus_number: i32,
    pub model: String,
    pub registration_number: String,
    /// Purchase date as entered, `dd.mm.yyyy`.
    pub purchase_date: String,
    pub initial_price: f64,
    pub current_value: f64,
    /// Depreciation percentage in `[0, 40]`.
    pub depreciation: f64,
    pub condition: BusCondition,
    pub mileage: i32,
}

/// A bus that has not been persisted yet.
///
/// Registration number, current value and depreciation are derived when the
/// bus is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBus {
    pub bus_number: i32,
    pub model: String,
    pub purchase_date: String,
    pub initial_price: f64,
    pub condition: BusCondition,
    pub mileage: i32,
}

/// Editable bus fields. `None` leaves a field unchanged.
///
/// Valuation fields are fixed at creation and cannot be edited.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusUpdate {
    pub model: Option<String>,
    pub condition: Option<BusCondition>,
    pub mileage: Option<i32>,
}

/// A persisted route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// The canonical numeric identifier assigned by the database.
    pub route_id: i64,
    pub route_number: String,
    pub start_point: String,
    pub end_point: String,
    /// Length in kilometres.
    pub distance: f64,
    /// Travel time in minutes.
    pub estimated_time: i32,
}

/// A route that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRoute {
    pub route_number: String,
    pub start_point: String,
    pub end_point: String,
    pub distance: f64,
    pub estimated_time: i32,
}

/// Editable route fields. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteUpdate {
    pub start_point: Option<String>,
    pub end_point: Option<String>,
    pub distance: Option<f64>,
    pub estimated_time: Option<i32>,
}

/// A driver together with the routes they know and the buses they hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverDetails {
    pub driver: User,
    pub known_routes: Vec<Route>,
    pub assigned_buses: Vec<Bus>,
}

/// A route together with the drivers qualified to drive it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteDetails {
    pub route: Route,
    pub qualified_drivers: Vec<User>,
}
