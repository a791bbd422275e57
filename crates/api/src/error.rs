// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use fleet_domain::DomainError;
use fleet_persistence::PersistenceError;
use thiserror::Error;

use crate::password_policy::PasswordPolicyError;

/// API-level errors.
///
/// These are distinct from domain and persistence errors and represent the
/// contract callers of this crate program against.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Authentication failed.
    #[error("Authentication failed: {reason}")]
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Invalid input was provided.
    #[error("Invalid input for field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// Password policy violation.
    #[error("Password policy violation: {message}")]
    PasswordPolicyViolation {
        /// A human-readable description of the policy violation.
        message: String,
    },
    /// A requested resource was not found.
    #[error("Not found: {message}")]
    ResourceNotFound {
        /// A human-readable description of what was not found.
        message: String,
    },
    /// A unique key is already taken.
    #[error("Already exists: {message}")]
    Duplicate {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// A store rule was violated.
    #[error("Constraint violation: {message}")]
    ConstraintViolation {
        /// A human-readable description of the violation.
        message: String,
    },
    /// The store configuration is unusable.
    #[error("Invalid configuration: {message}")]
    Configuration {
        /// A description of the configuration problem.
        message: String,
    },
    /// The underlying storage failed.
    #[error("Storage failure: {message}")]
    Storage {
        /// A description of the storage failure.
        message: String,
    },
    /// An internal error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl From<PasswordPolicyError> for ApiError {
    fn from(err: PasswordPolicyError) -> Self {
        Self::PasswordPolicyViolation {
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        translate_domain_error(err)
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        translate_persistence_error(err)
    }
}

fn invalid(field: &str, err: &DomainError) -> ApiError {
    ApiError::InvalidInput {
        field: String::from(field),
        message: err.to_string(),
    }
}

/// Translates a domain error into an API error.
///
/// Every domain error is a rejected field value, so the translation names
/// the offending field.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let field: &str = match &err {
        DomainError::InvalidRole(_) => "role",
        DomainError::InvalidCondition(_) => "condition",
        DomainError::InvalidName(_) => "name",
        DomainError::InvalidLogin(_) => "login",
        DomainError::InvalidSalaryBonus(_) => "salary_bonus",
        DomainError::InvalidBusNumber(_) => "bus_number",
        DomainError::InvalidModel(_) => "model",
        DomainError::InvalidPurchaseDate { .. } => "purchase_date",
        DomainError::InvalidInitialPrice(_) => "initial_price",
        DomainError::InvalidMileage(_) => "mileage",
        DomainError::InvalidRouteNumber(_) => "route_number",
        DomainError::InvalidEndpoint(_) => "endpoint",
        DomainError::InvalidDistance(_) => "distance",
        DomainError::InvalidEstimatedTime(_) => "estimated_time",
    };
    invalid(field, &err)
}

/// Translates a persistence error into an API error.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound { message },
        PersistenceError::DuplicateKey(message) => ApiError::Duplicate { message },
        PersistenceError::ConstraintViolation(message) => {
            ApiError::ConstraintViolation { message }
        }
        PersistenceError::StorageFailure(message) => ApiError::Storage { message },
        other @ (PersistenceError::DatabaseConnectionFailed(_)
        | PersistenceError::MigrationFailed(_)
        | PersistenceError::InitializationError(_)
        | PersistenceError::ForeignKeyEnforcementNotEnabled) => ApiError::Storage {
            message: other.to_string(),
        },
    }
}
