// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bus mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use fleet_domain::{
    BusUpdate, BusValuation, NewBus, registration_number, validate_bus_constraints,
    validate_bus_update,
};
use tracing::info;

use crate::diesel_schema::buses;
use crate::error::PersistenceError;
use crate::queries::buses::get_bus_by_number;

#[derive(AsChangeset)]
#[diesel(table_name = buses)]
struct BusChangeset<'a> {
    model: Option<&'a str>,
    condition: Option<&'static str>,
    mileage: Option<i32>,
}

/// Creates a new bus valued as of `current_year`.
///
/// The bus number is checked before anything is written, so a duplicate
/// never reaches the table. Depreciation, current value and the
/// registration plate are derived here and stored once.
///
/// # Returns
///
/// The ID assigned to the new bus.
///
/// # Errors
///
/// Returns `DuplicateKey` if the bus number is taken, `ConstraintViolation`
/// if the price or mileage is invalid, or a storage error.
pub fn create_bus(
    conn: &mut SqliteConnection,
    bus: &NewBus,
    current_year: i32,
) -> Result<i64, PersistenceError> {
    validate_bus_constraints(bus)?;

    if get_bus_by_number(conn, bus.bus_number)?.is_some() {
        return Err(PersistenceError::DuplicateKey(format!(
            "Bus number {} already exists",
            bus.bus_number
        )));
    }

    let valuation: BusValuation =
        BusValuation::compute(bus.initial_price, &bus.purchase_date, current_year);
    let plate: String = registration_number(bus.bus_number);

    insert_bus(conn, bus, &plate, valuation)
}

/// Inserts a bus row with an explicit plate and valuation.
///
/// Callers are responsible for the duplicate check.
pub(crate) fn insert_bus(
    conn: &mut SqliteConnection,
    bus: &NewBus,
    plate: &str,
    valuation: BusValuation,
) -> Result<i64, PersistenceError> {
    info!(
        "Creating bus number: {}, model: {}, depreciation: {}%",
        bus.bus_number, bus.model, valuation.depreciation
    );

    let bus_id: i64 = diesel::insert_into(buses::table)
        .values((
            buses::bus_number.eq(bus.bus_number),
            buses::model.eq(&bus.model),
            buses::registration_number.eq(plate),
            buses::purchase_date.eq(&bus.purchase_date),
            buses::initial_price.eq(bus.initial_price),
            buses::current_value.eq(valuation.current_value),
            buses::depreciation.eq(valuation.depreciation),
            buses::condition.eq(bus.condition.as_str()),
            buses::mileage.eq(bus.mileage),
        ))
        .returning(buses::bus_id)
        .get_result(conn)?;

    info!(bus_id, "Bus created");
    Ok(bus_id)
}

/// Applies the set fields of `update` to a bus.
///
/// Valuation fields are fixed at creation and are not touched.
///
/// # Errors
///
/// Returns `NotFound` if the bus does not exist, `ConstraintViolation` if
/// a field is invalid, or a storage error.
pub fn update_bus(
    conn: &mut SqliteConnection,
    bus_id: i64,
    update: &BusUpdate,
) -> Result<(), PersistenceError> {
    validate_bus_update(update)?;

    let exists: bool = diesel::select(diesel::dsl::exists(
        buses::table.filter(buses::bus_id.eq(bus_id)),
    ))
    .get_result::<bool>(conn)?;
    if !exists {
        return Err(PersistenceError::NotFound(format!("Bus {bus_id}")));
    }

    let changeset = BusChangeset {
        model: update.model.as_deref(),
        condition: update.condition.map(|condition| condition.as_str()),
        mileage: update.mileage,
    };

    if changeset.model.is_none() && changeset.condition.is_none() && changeset.mileage.is_none()
    {
        return Ok(());
    }

    info!("Updating bus ID: {}", bus_id);

    diesel::update(buses::table)
        .filter(buses::bus_id.eq(bus_id))
        .set(&changeset)
        .execute(conn)?;

    Ok(())
}

/// Deletes a bus and its driver link.
///
/// # Errors
///
/// Returns `NotFound` if the bus does not exist, or a storage error.
pub fn delete_bus(conn: &mut SqliteConnection, bus_id: i64) -> Result<(), PersistenceError> {
    info!("Deleting bus ID: {}", bus_id);

    let deleted: usize =
        diesel::delete(buses::table.filter(buses::bus_id.eq(bus_id))).execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!("Bus {bus_id}")));
    }
    Ok(())
}
