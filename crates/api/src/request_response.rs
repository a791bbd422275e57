// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response types for the application flows.

use fleet_domain::{Bus, ConditionCounts, MaintenanceRecommendation, Role, Route, User};
use serde::{Deserialize, Serialize};

use crate::session::SessionIdentity;

/// Login form contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub login: String,
    pub password: String,
    pub role: Role,
}

/// Result of a successful register-or-login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Identity to store in the session.
    pub session: SessionIdentity,
    /// `true` if the account was created by this request.
    pub registered: bool,
}

/// Fleet overview for the dispatcher dashboard.
///
/// Each figure is `None` when the query behind it failed; the rest of the
/// overview is still filled in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FleetStatistics {
    pub total_buses: Option<i64>,
    pub total_drivers: Option<i64>,
    pub total_routes: Option<i64>,
    /// Sum of the buses' current values.
    pub total_value: Option<f64>,
    pub conditions: Option<ConditionCounts>,
    /// Empty when `conditions` is `None`.
    pub recommendations: Vec<MaintenanceRecommendation>,
}

/// A driver as listed under a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverOverview {
    pub driver: User,
    /// The driver's first bus, or `None` if they hold none or the lookup
    /// failed.
    pub bus: Option<Bus>,
}

/// A route with the drivers who know it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteOverview {
    pub route: Route,
    pub drivers: Vec<DriverOverview>,
}
