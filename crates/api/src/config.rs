// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Store configuration.

use fleet_persistence::{DEFAULT_HASH_COST, Persistence};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ApiError;

/// Lowest bcrypt cost accepted.
pub const MIN_BCRYPT_COST: u32 = 4;

/// Highest bcrypt cost accepted.
pub const MAX_BCRYPT_COST: u32 = 31;

/// Where the store keeps its data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "path", rename_all = "snake_case")]
pub enum StoreLocation {
    /// A private in-memory database, discarded when the store is dropped.
    #[default]
    InMemory,
    /// A `SQLite` file, created on first open.
    File(PathBuf),
}

/// Configuration for opening a [`crate::FleetStore`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Database location.
    pub location: StoreLocation,
    /// Seed a fresh store with the demo fleet on open.
    pub seed_on_create: bool,
    /// bcrypt cost for newly hashed passwords.
    pub bcrypt_cost: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            location: StoreLocation::InMemory,
            seed_on_create: true,
            bcrypt_cost: DEFAULT_HASH_COST,
        }
    }
}

impl StoreConfig {
    /// In-memory configuration with defaults.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// File-backed configuration with defaults.
    #[must_use]
    pub fn file<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            location: StoreLocation::File(path.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_seed_on_create(mut self, seed_on_create: bool) -> Self {
        self.seed_on_create = seed_on_create;
        self
    }

    #[must_use]
    pub const fn with_bcrypt_cost(mut self, bcrypt_cost: u32) -> Self {
        self.bcrypt_cost = bcrypt_cost;
        self
    }

    /// Checks the configuration before anything is opened.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Configuration` if the bcrypt cost is out of range.
    pub fn validate(&self) -> Result<(), ApiError> {
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&self.bcrypt_cost) {
            return Err(ApiError::Configuration {
                message: format!(
                    "bcrypt cost {} is outside {MIN_BCRYPT_COST}..={MAX_BCRYPT_COST}",
                    self.bcrypt_cost
                ),
            });
        }
        Ok(())
    }

    /// Opens the persistence layer this configuration describes.
    ///
    /// Blocks on database I/O.
    pub(crate) fn open_persistence(&self) -> Result<Persistence, ApiError> {
        self.validate()?;

        let persistence: Persistence = match &self.location {
            StoreLocation::InMemory => Persistence::new_in_memory()?,
            StoreLocation::File(path) => Persistence::new_with_file(path)?,
        };

        Ok(persistence.with_hash_cost(self.bcrypt_cost))
    }
}
