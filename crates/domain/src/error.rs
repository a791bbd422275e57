// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Role string is not one of dispatcher, driver, passenger.
    InvalidRole(String),
    /// Bus condition string is not one of the four known ratings.
    InvalidCondition(String),
    /// User name is empty or invalid.
    InvalidName(String),
    /// Login is empty or invalid.
    InvalidLogin(String),
    /// Salary bonus is negative or not a finite number.
    InvalidSalaryBonus(String),
    /// Bus number must be positive.
    InvalidBusNumber(i32),
    /// Bus model is empty.
    InvalidModel(String),
    /// Purchase date does not match `dd.mm.yyyy`.
    InvalidPurchaseDate {
        /// The rejected date string.
        date_string: String,
        /// Why it was rejected.
        reason: String,
    },
    /// Initial price must be a positive, finite amount.
    InvalidInitialPrice(String),
    /// Mileage must not be negative.
    InvalidMileage(i32),
    /// Route number is empty.
    InvalidRouteNumber(String),
    /// Start or end point is empty.
    InvalidEndpoint(String),
    /// Distance must be a positive, finite number of kilometres.
    InvalidDistance(String),
    /// Estimated time must be a positive number of minutes.
    InvalidEstimatedTime(i32),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRole(role) => write!(f, "Invalid role: {role}"),
            Self::InvalidCondition(condition) => write!(f, "Invalid bus condition: {condition}"),
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidLogin(msg) => write!(f, "Invalid login: {msg}"),
            Self::InvalidSalaryBonus(value) => {
                write!(f, "Invalid salary bonus: {value}. Must be zero or greater")
            }
            Self::InvalidBusNumber(number) => {
                write!(f, "Invalid bus number: {number}. Must be greater than 0")
            }
            Self::InvalidModel(msg) => write!(f, "Invalid model: {msg}"),
            Self::InvalidPurchaseDate {
                date_string,
                reason,
            } => {
                write!(f, "Invalid purchase date '{date_string}': {reason}")
            }
            Self::InvalidInitialPrice(value) => {
                write!(f, "Invalid initial price: {value}. Must be greater than 0")
            }
            Self::InvalidMileage(mileage) => {
                write!(f, "Invalid mileage: {mileage}. Must be zero or greater")
            }
            Self::InvalidRouteNumber(msg) => write!(f, "Invalid route number: {msg}"),
            Self::InvalidEndpoint(msg) => write!(f, "Invalid route endpoint: {msg}"),
            Self::InvalidDistance(value) => {
                write!(f, "Invalid distance: {value}. Must be greater than 0")
            }
            Self::InvalidEstimatedTime(minutes) => {
                write!(
                    f,
                    "Invalid estimated time: {minutes}. Must be greater than 0"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
