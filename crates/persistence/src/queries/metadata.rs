// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::diesel_schema::store_metadata;
use crate::error::PersistenceError;

/// Reads a store metadata value.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the key has never been written.
pub fn get_metadata(
    conn: &mut SqliteConnection,
    key: &str,
) -> Result<Option<String>, PersistenceError> {
    Ok(store_metadata::table
        .filter(store_metadata::meta_key.eq(key))
        .select(store_metadata::meta_value)
        .first::<String>(conn)
        .optional()?)
}
