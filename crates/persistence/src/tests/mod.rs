// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod assignment_tests;
mod bus_tests;
mod initialization_tests;

use fleet_domain::{BusCondition, NewBus, NewRoute, NewUser, Role};

use crate::Persistence;

/// Lowest cost bcrypt accepts; keeps hashing out of the test runtime.
pub const TEST_HASH_COST: u32 = 4;

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory()
        .unwrap()
        .with_hash_cost(TEST_HASH_COST)
}

pub fn create_test_driver(persistence: &mut Persistence, login: &str) -> i64 {
    persistence
        .create_user(&NewUser::new(
            &format!("Driver {login}"),
            &format!("{login}@mail.com"),
            login,
            "secret",
            Role::Driver,
        ))
        .unwrap()
}

pub fn create_test_passenger(persistence: &mut Persistence, login: &str) -> i64 {
    persistence
        .create_user(&NewUser::new(
            &format!("Passenger {login}"),
            &format!("{login}@mail.com"),
            login,
            "secret",
            Role::Passenger,
        ))
        .unwrap()
}

pub fn test_bus(bus_number: i32) -> NewBus {
    NewBus {
        bus_number,
        model: String::from("ПАЗ-3205"),
        purchase_date: String::from("01.01.2021"),
        initial_price: 1_000_000.0,
        condition: BusCondition::Good,
        mileage: 1000,
    }
}

pub fn create_test_bus(persistence: &mut Persistence, bus_number: i32) -> i64 {
    persistence.create_bus(&test_bus(bus_number)).unwrap()
}

pub fn test_route(route_number: &str) -> NewRoute {
    NewRoute {
        route_number: String::from(route_number),
        start_point: String::from("Вокзал"),
        end_point: String::from("ЕКТС"),
        distance: 3.1,
        estimated_time: 35,
    }
}

pub fn create_test_route(persistence: &mut Persistence, route_number: &str) -> i64 {
    persistence.create_route(&test_route(route_number)).unwrap()
}
