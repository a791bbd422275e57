// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use fleet_domain::{DriverDetails, RouteDetails};

use crate::Persistence;
use crate::error::PersistenceError;
use crate::tests::{
    create_test_bus, create_test_driver, create_test_passenger, create_test_persistence,
    create_test_route,
};

#[test]
fn test_reassigning_a_bus_moves_it() {
    let mut persistence: Persistence = create_test_persistence();
    let bus: i64 = create_test_bus(&mut persistence, 101);
    let d1: i64 = create_test_driver(&mut persistence, "driver1");
    let d2: i64 = create_test_driver(&mut persistence, "driver2");

    assert_eq!(persistence.assign_bus_to_driver(bus, d1).unwrap(), None);
    assert_eq!(persistence.assign_bus_to_driver(bus, d2).unwrap(), Some(d1));

    assert_eq!(
        persistence.get_driver_for_bus(bus).unwrap().unwrap().user_id,
        d2
    );
    assert!(persistence.get_bus_for_driver(d1).unwrap().is_none());
    assert_eq!(persistence.count_bus_driver_links().unwrap(), 1);
}

#[test]
fn test_reassigning_to_the_same_driver_keeps_one_link() {
    let mut persistence: Persistence = create_test_persistence();
    let bus: i64 = create_test_bus(&mut persistence, 101);
    let driver: i64 = create_test_driver(&mut persistence, "driver1");

    persistence.assign_bus_to_driver(bus, driver).unwrap();
    assert_eq!(
        persistence.assign_bus_to_driver(bus, driver).unwrap(),
        Some(driver)
    );
    assert_eq!(persistence.count_bus_driver_links().unwrap(), 1);
}

#[test]
fn test_driver_may_hold_several_buses() {
    let mut persistence: Persistence = create_test_persistence();
    let first: i64 = create_test_bus(&mut persistence, 104);
    let second: i64 = create_test_bus(&mut persistence, 101);
    let driver: i64 = create_test_driver(&mut persistence, "driver1");

    persistence.assign_bus_to_driver(first, driver).unwrap();
    persistence.assign_bus_to_driver(second, driver).unwrap();

    let held: Vec<i64> = persistence
        .get_buses_for_driver(driver)
        .unwrap()
        .into_iter()
        .map(|bus| bus.bus_id)
        .collect();
    assert_eq!(held, vec![first, second]);
    assert_eq!(
        persistence.get_bus_for_driver(driver).unwrap().unwrap().bus_id,
        first
    );
}

#[test]
fn test_assign_bus_with_unknown_ids_is_not_found() {
    let mut persistence: Persistence = create_test_persistence();
    let bus: i64 = create_test_bus(&mut persistence, 101);
    let driver: i64 = create_test_driver(&mut persistence, "driver1");

    let result: Result<Option<i64>, PersistenceError> =
        persistence.assign_bus_to_driver(bus + 10, driver);
    assert!(matches!(result, Err(PersistenceError::NotFound(_))));

    let result: Result<Option<i64>, PersistenceError> =
        persistence.assign_bus_to_driver(bus, driver + 10);
    assert!(matches!(result, Err(PersistenceError::NotFound(_))));

    assert_eq!(persistence.count_bus_driver_links().unwrap(), 0);
}

#[test]
fn test_only_drivers_can_be_assigned() {
    let mut persistence: Persistence = create_test_persistence();
    let bus: i64 = create_test_bus(&mut persistence, 101);
    let route: i64 = create_test_route(&mut persistence, "101");
    let passenger: i64 = create_test_passenger(&mut persistence, "rider");

    let result: Result<Option<i64>, PersistenceError> =
        persistence.assign_bus_to_driver(bus, passenger);
    assert!(matches!(result, Err(PersistenceError::ConstraintViolation(_))));

    let result: Result<bool, PersistenceError> =
        persistence.assign_driver_to_route(passenger, route);
    assert!(matches!(result, Err(PersistenceError::ConstraintViolation(_))));
}

#[test]
fn test_failed_reassignment_keeps_previous_driver() {
    let mut persistence: Persistence = create_test_persistence();
    let bus: i64 = create_test_bus(&mut persistence, 101);
    let driver: i64 = create_test_driver(&mut persistence, "driver1");
    let passenger: i64 = create_test_passenger(&mut persistence, "rider");
    persistence.assign_bus_to_driver(bus, driver).unwrap();

    assert!(persistence.assign_bus_to_driver(bus, passenger).is_err());
    assert_eq!(
        persistence.get_driver_for_bus(bus).unwrap().unwrap().user_id,
        driver
    );
}

#[test]
fn test_unassign_bus() {
    let mut persistence: Persistence = create_test_persistence();
    let bus: i64 = create_test_bus(&mut persistence, 101);
    let driver: i64 = create_test_driver(&mut persistence, "driver1");
    persistence.assign_bus_to_driver(bus, driver).unwrap();

    assert!(persistence.unassign_bus(bus).unwrap());
    assert!(!persistence.unassign_bus(bus).unwrap());
    assert!(persistence.get_driver_for_bus(bus).unwrap().is_none());
}

#[test]
fn test_assign_driver_to_route_is_idempotent() {
    let mut persistence: Persistence = create_test_persistence();
    let route: i64 = create_test_route(&mut persistence, "101");
    let driver: i64 = create_test_driver(&mut persistence, "driver1");

    assert!(persistence.assign_driver_to_route(driver, route).unwrap());
    assert!(!persistence.assign_driver_to_route(driver, route).unwrap());

    assert_eq!(persistence.get_drivers_for_route(route).unwrap().len(), 1);
    assert_eq!(persistence.count_driver_route_links().unwrap(), 1);
}

#[test]
fn test_assign_driver_to_unknown_route_is_not_found() {
    let mut persistence: Persistence = create_test_persistence();
    let driver: i64 = create_test_driver(&mut persistence, "driver1");

    let result: Result<bool, PersistenceError> = persistence.assign_driver_to_route(driver, 99);
    assert!(matches!(result, Err(PersistenceError::NotFound(_))));

    let route: i64 = create_test_route(&mut persistence, "101");
    let result: Result<bool, PersistenceError> =
        persistence.assign_driver_to_route(driver + 50, route);
    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_relationship_lists_follow_insertion_order() {
    let mut persistence: Persistence = create_test_persistence();
    let route_b: i64 = create_test_route(&mut persistence, "202");
    let route_a: i64 = create_test_route(&mut persistence, "101");
    let d1: i64 = create_test_driver(&mut persistence, "driver1");
    let d2: i64 = create_test_driver(&mut persistence, "driver2");

    persistence.assign_driver_to_route(d2, route_a).unwrap();
    persistence.assign_driver_to_route(d1, route_a).unwrap();
    persistence.assign_driver_to_route(d1, route_a).unwrap();
    persistence.assign_driver_to_route(d1, route_b).unwrap();

    let drivers: Vec<i64> = persistence
        .get_drivers_for_route(route_a)
        .unwrap()
        .into_iter()
        .map(|user| user.user_id)
        .collect();
    assert_eq!(drivers, vec![d2, d1]);

    let routes: Vec<i64> = persistence
        .get_routes_for_driver(d1)
        .unwrap()
        .into_iter()
        .map(|route| route.route_id)
        .collect();
    assert_eq!(routes, vec![route_a, route_b]);
}

#[test]
fn test_remove_driver_from_route() {
    let mut persistence: Persistence = create_test_persistence();
    let route: i64 = create_test_route(&mut persistence, "101");
    let driver: i64 = create_test_driver(&mut persistence, "driver1");
    persistence.assign_driver_to_route(driver, route).unwrap();

    assert!(persistence.remove_driver_from_route(driver, route).unwrap());
    assert!(!persistence.remove_driver_from_route(driver, route).unwrap());
    assert!(persistence.get_drivers_for_route(route).unwrap().is_empty());
}

#[test]
fn test_deleting_a_driver_removes_all_links() {
    let mut persistence: Persistence = create_test_persistence();
    let bus: i64 = create_test_bus(&mut persistence, 101);
    let route: i64 = create_test_route(&mut persistence, "101");
    let driver: i64 = create_test_driver(&mut persistence, "driver1");
    persistence.assign_bus_to_driver(bus, driver).unwrap();
    persistence.assign_driver_to_route(driver, route).unwrap();

    persistence.delete_user(driver).unwrap();

    assert!(persistence.get_driver_for_bus(bus).unwrap().is_none());
    assert!(persistence.get_drivers_for_route(route).unwrap().is_empty());
    assert_eq!(persistence.count_bus_driver_links().unwrap(), 0);
    assert_eq!(persistence.count_driver_route_links().unwrap(), 0);
    assert!(persistence.get_bus_by_id(bus).unwrap().is_some());
    assert!(persistence.get_route_by_id(route).unwrap().is_some());
}

#[test]
fn test_driver_details() {
    let mut persistence: Persistence = create_test_persistence();
    let bus: i64 = create_test_bus(&mut persistence, 101);
    let route: i64 = create_test_route(&mut persistence, "101");
    let driver: i64 = create_test_driver(&mut persistence, "driver1");
    let passenger: i64 = create_test_passenger(&mut persistence, "rider");
    persistence.assign_bus_to_driver(bus, driver).unwrap();
    persistence.assign_driver_to_route(driver, route).unwrap();

    let details: DriverDetails = persistence.get_driver_details(driver).unwrap().unwrap();
    assert_eq!(details.driver.user_id, driver);
    assert_eq!(details.known_routes.len(), 1);
    assert_eq!(details.assigned_buses[0].bus_id, bus);

    assert!(persistence.get_driver_details(passenger).unwrap().is_none());
    assert!(persistence.get_driver_details(999).unwrap().is_none());
}

#[test]
fn test_route_details() {
    let mut persistence: Persistence = create_test_persistence();
    let route: i64 = create_test_route(&mut persistence, "101");
    let driver: i64 = create_test_driver(&mut persistence, "driver1");
    persistence.assign_driver_to_route(driver, route).unwrap();

    let details: RouteDetails = persistence.get_route_details(route).unwrap().unwrap();
    assert_eq!(details.route.route_id, route);
    assert_eq!(details.qualified_drivers[0].user_id, driver);

    assert!(persistence.get_route_details(route + 1).unwrap().is_none());
}
