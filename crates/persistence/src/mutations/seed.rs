// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! One-time seeding of a fresh store.
//!
//! The seed describes its links by the 1-based position of each entity in
//! its insertion list. Positions are resolved to the IDs the store actually
//! assigned; a position with no entity behind it is logged and skipped.

use diesel::SqliteConnection;
use diesel::prelude::*;
use fleet_domain::{BusCondition, BusValuation, NewBus, NewRoute, NewUser, Role};
use tracing::{info, warn};

use crate::diesel_schema::store_metadata;
use crate::error::PersistenceError;
use crate::mutations::assignments::{assign_bus_to_driver, assign_driver_to_route};
use crate::mutations::buses::insert_bus;
use crate::mutations::routes::create_route;
use crate::mutations::users::create_user;
use crate::queries::buses::count_buses;
use crate::queries::metadata::get_metadata;
use crate::queries::routes::count_routes;
use crate::queries::users::count_users;

/// Metadata key recording that the seed routine has run.
pub const SEED_MARKER_KEY: &str = "seeded";

struct SeedBus {
    bus_number: i32,
    model: &'static str,
    plate: &'static str,
    purchase_date: &'static str,
    initial_price: f64,
    depreciation: f64,
    condition: BusCondition,
    mileage: i32,
}

const SEED_BUSES: [SeedBus; 4] = [
    SeedBus {
        bus_number: 101,
        model: "ПАЗ-3205",
        plate: "А123ВС77",
        purchase_date: "01.01.2021",
        initial_price: 2_500_000.0,
        depreciation: 20.0,
        condition: BusCondition::Good,
        mileage: 45_000,
    },
    SeedBus {
        bus_number: 102,
        model: "ЛиАЗ-5292",
        plate: "В234ТР77",
        purchase_date: "15.03.2021",
        initial_price: 3_000_000.0,
        depreciation: 20.0,
        condition: BusCondition::Good,
        mileage: 60_000,
    },
    SeedBus {
        bus_number: 103,
        model: "МАЗ-206",
        plate: "С345УК77",
        purchase_date: "10.06.2022",
        initial_price: 2_800_000.0,
        depreciation: 10.0,
        condition: BusCondition::Good,
        mileage: 20_000,
    },
    SeedBus {
        bus_number: 104,
        model: "ПАЗ-3204",
        plate: "Е456МН77",
        purchase_date: "20.09.2020",
        initial_price: 2_200_000.0,
        depreciation: 32.0,
        condition: BusCondition::Poor,
        mileage: 80_000,
    },
];

/// `(driver position, route position)` pairs.
const SEED_DRIVER_ROUTES: [(usize, usize); 6] = [(2, 1), (2, 2), (3, 1), (3, 3), (4, 2), (4, 3)];

/// `(bus position, driver position)` pairs.
const SEED_BUS_DRIVERS: [(usize, usize); 4] = [(1, 2), (2, 3), (3, 4), (4, 2)];

/// What a call to [`seed_if_empty`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The seed data was written.
    Seeded(SeedSummary),
    /// The seed had already run on this store.
    AlreadySeeded,
    /// The store held data before it was ever seeded; only the marker was
    /// written.
    NotEmpty,
}

/// Counts of what the seed wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedSummary {
    pub users: usize,
    pub buses: usize,
    pub routes: usize,
    pub driver_route_links: usize,
    pub bus_driver_links: usize,
    /// Links skipped because a position named no seeded entity.
    pub skipped_links: usize,
}

fn seed_users() -> [NewUser; 3] {
    [
        NewUser::new(
            "Диспетчер",
            "dispatcher@mail.com",
            "dispatcher",
            "123456",
            Role::Dispatcher,
        ),
        NewUser::new(
            "Петр Петров",
            "petrov@mail.com",
            "driver1",
            "driver1",
            Role::Driver,
        )
        .with_salary_bonus(5200.0),
        NewUser::new(
            "Сергей Сергеев",
            "sergeev@mail.com",
            "driver2",
            "driver2",
            Role::Driver,
        )
        .with_salary_bonus(4800.0),
    ]
}

fn seed_routes() -> [NewRoute; 2] {
    [
        NewRoute {
            route_number: String::from("101"),
            start_point: String::from("Вокзал"),
            end_point: String::from("ЕКТС"),
            distance: 3.1,
            estimated_time: 35,
        },
        NewRoute {
            route_number: String::from("202"),
            start_point: String::from("Пассаж"),
            end_point: String::from("ЕКТС"),
            distance: 4.0,
            estimated_time: 11,
        },
    ]
}

/// Maps a 1-based seed position to the stored ID.
fn resolve(ids: &[i64], position: usize) -> Option<i64> {
    position.checked_sub(1).and_then(|index| ids.get(index)).copied()
}

fn write_marker(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    diesel::insert_or_ignore_into(store_metadata::table)
        .values((
            store_metadata::meta_key.eq(SEED_MARKER_KEY),
            store_metadata::meta_value.eq("1"),
        ))
        .execute(conn)?;
    Ok(())
}

/// Seeds the store the first time it is opened.
///
/// Runs at most once per database: the outcome is recorded in
/// `store_metadata` so that later opens leave user data alone, even after
/// every seeded row has been deleted. A store that already holds data on
/// its first open is marked but not seeded.
///
/// # Errors
///
/// Returns an error if any write fails; nothing is committed in that case.
pub fn seed_if_empty(
    conn: &mut SqliteConnection,
    hash_cost: u32,
) -> Result<SeedOutcome, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        if get_metadata(conn, SEED_MARKER_KEY)?.is_some() {
            info!("Store already seeded");
            return Ok(SeedOutcome::AlreadySeeded);
        }

        let existing: i64 = count_users(conn)? + count_buses(conn)? + count_routes(conn)?;
        if existing > 0 {
            info!(existing, "Store holds data, skipping seed");
            write_marker(conn)?;
            return Ok(SeedOutcome::NotEmpty);
        }

        info!("Seeding fresh store");
        let mut summary = SeedSummary::default();

        let mut user_ids: Vec<i64> = Vec::new();
        for user in &seed_users() {
            user_ids.push(create_user(conn, user, hash_cost)?);
        }
        summary.users = user_ids.len();

        let mut bus_ids: Vec<i64> = Vec::new();
        for seed in &SEED_BUSES {
            let bus = NewBus {
                bus_number: seed.bus_number,
                model: String::from(seed.model),
                purchase_date: String::from(seed.purchase_date),
                initial_price: seed.initial_price,
                condition: seed.condition,
                mileage: seed.mileage,
            };
            let valuation: BusValuation =
                BusValuation::with_depreciation(seed.initial_price, seed.depreciation);
            bus_ids.push(insert_bus(conn, &bus, seed.plate, valuation)?);
        }
        summary.buses = bus_ids.len();

        let mut route_ids: Vec<i64> = Vec::new();
        for route in &seed_routes() {
            route_ids.push(create_route(conn, route)?);
        }
        summary.routes = route_ids.len();

        for (driver_pos, route_pos) in SEED_DRIVER_ROUTES {
            match (resolve(&user_ids, driver_pos), resolve(&route_ids, route_pos)) {
                (Some(driver_id), Some(route_id)) => {
                    if assign_driver_to_route(conn, driver_id, route_id)? {
                        summary.driver_route_links += 1;
                    }
                }
                _ => {
                    warn!(driver_pos, route_pos, "Skipping seed route link to missing entity");
                    summary.skipped_links += 1;
                }
            }
        }

        for (bus_pos, driver_pos) in SEED_BUS_DRIVERS {
            match (resolve(&bus_ids, bus_pos), resolve(&user_ids, driver_pos)) {
                (Some(bus_id), Some(driver_id)) => {
                    assign_bus_to_driver(conn, bus_id, driver_id)?;
                    summary.bus_driver_links += 1;
                }
                _ => {
                    warn!(bus_pos, driver_pos, "Skipping seed bus link to missing entity");
                    summary.skipped_links += 1;
                }
            }
        }

        write_marker(conn)?;

        info!(?summary, "Seed complete");
        Ok(SeedOutcome::Seeded(summary))
    })
}
