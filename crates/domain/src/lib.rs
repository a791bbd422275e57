// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain types for the fleet store.
//!
//! Users, buses and routes, the enumerations that constrain them, the bus
//! valuation rules, and field validation. Nothing in this crate performs I/O.

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

mod error;
mod statistics;
mod types;
mod validation;
mod valuation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use statistics::{
    ConditionCounts, HEALTHY_FLEET_SHARE, INSPECTION_THRESHOLD, MaintenanceRecommendation,
};
pub use types::{
    Bus, BusCondition, BusUpdate, DriverDetails, NewBus, NewRoute, NewUser, Role, Route,
    RouteDetails, RouteUpdate, User, UserUpdate,
};
pub use validation::{
    parse_purchase_date, validate_bus_constraints, validate_bus_form, validate_bus_update,
    validate_route_constraints, validate_route_form, validate_route_update,
    validate_user_constraints, validate_user_update,
};
pub use valuation::{
    BusValuation, DEPRECIATION_PER_YEAR, FALLBACK_PURCHASE_YEAR, MAX_DEPRECIATION_PERCENT,
    REGION_CODE, current_year, purchase_year, registration_number,
};
