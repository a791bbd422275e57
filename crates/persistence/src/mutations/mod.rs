// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! ## Module Organization
//!
//! - `users`: User creation, update and deletion, password hashing
//! - `buses`: Bus creation with valuation, update and deletion
//! - `routes`: Route creation, update and deletion
//! - `assignments`: Driver/route and bus/driver links
//! - `seed`: One-time population of a fresh store
//!
//! Inserts return the new row ID through a `RETURNING` clause.
//! Multi-statement mutations run inside a single Diesel transaction.

pub mod assignments;
pub mod buses;
pub mod routes;
pub mod seed;
pub mod users;

pub use seed::{SEED_MARKER_KEY, SeedOutcome, SeedSummary};
