// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Async boundary of the fleet store.
//!
//! [`FleetStore`] is the handle applications hold. It moves every store
//! call onto the blocking pool and adds the application flows the screens
//! need: register-or-login, form-checked creation of buses and routes, and
//! the dispatcher's fleet overview.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod config;
mod error;
pub mod handlers;
mod password_policy;
mod request_response;
mod session;
mod store;

#[cfg(test)]
mod tests;

pub use config::{MAX_BCRYPT_COST, MIN_BCRYPT_COST, StoreConfig, StoreLocation};
pub use error::{ApiError, translate_domain_error, translate_persistence_error};
pub use password_policy::{PasswordPolicy, PasswordPolicyError};
pub use request_response::{
    DriverOverview, FleetStatistics, LoginRequest, LoginResponse, RouteOverview,
};
pub use session::{
    SESSION_IS_LOGGED_IN, SESSION_USER_EMAIL, SESSION_USER_ID, SESSION_USER_NAME,
    SESSION_USER_ROLE, SessionIdentity,
};
pub use store::FleetStore;
