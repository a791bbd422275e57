// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use fleet_domain::{BusCondition, NewBus, NewRoute, Role};
use fleet_persistence::Persistence;

use crate::{FleetStore, LoginRequest, StoreConfig};

pub const TEST_HASH_COST: u32 = 4;

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory()
        .unwrap()
        .with_hash_cost(TEST_HASH_COST)
}

pub fn create_seeded_persistence() -> Persistence {
    let mut persistence: Persistence = create_test_persistence();
    persistence.seed_if_empty().unwrap();
    persistence
}

pub fn test_config() -> StoreConfig {
    StoreConfig::in_memory().with_bcrypt_cost(TEST_HASH_COST)
}

pub async fn create_seeded_store() -> FleetStore {
    FleetStore::open(test_config()).await.unwrap()
}

pub async fn create_empty_store() -> FleetStore {
    FleetStore::open(test_config().with_seed_on_create(false))
        .await
        .unwrap()
}

pub fn login_request(login: &str, password: &str, role: Role) -> LoginRequest {
    LoginRequest {
        email: format!("{login}@mail.com"),
        login: String::from(login),
        password: String::from(password),
        role,
    }
}

pub fn form_bus(bus_number: i32) -> NewBus {
    NewBus {
        bus_number,
        model: String::from("МАЗ-206"),
        purchase_date: String::from("10.06.2022"),
        initial_price: 2_800_000.0,
        condition: BusCondition::Excellent,
        mileage: 0,
    }
}

pub fn form_route(route_number: &str) -> NewRoute {
    NewRoute {
        route_number: String::from(route_number),
        start_point: String::from("Пассаж"),
        end_point: String::from("ЕКТС"),
        distance: 4.0,
        estimated_time: 11,
    }
}
