// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! ## Module Organization
//!
//! - `users`: User lookups, authentication and role counts
//! - `buses`: Bus lookups, listings and condition counts
//! - `routes`: Route lookups and number search
//! - `assignments`: Driver/route and bus/driver relationship queries
//! - `metadata`: Store metadata markers
//!
//! Lookups of a single entity return `Ok(None)` on a miss rather than
//! `PersistenceError::NotFound`.

pub mod assignments;
pub mod buses;
pub mod metadata;
pub mod routes;
pub mod users;
