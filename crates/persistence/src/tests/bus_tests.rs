// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use fleet_domain::{Bus, BusCondition, BusUpdate, NewBus};

use crate::Persistence;
use crate::error::PersistenceError;
use crate::tests::{create_test_bus, create_test_driver, create_test_persistence, test_bus};

#[test]
fn test_create_bus_round_trip() {
    let mut persistence: Persistence = create_test_persistence();
    let bus: NewBus = test_bus(101);

    let bus_id: i64 = persistence.create_bus_valued_in(&bus, 2026).unwrap();
    let stored: Bus = persistence.get_bus_by_id(bus_id).unwrap().unwrap();

    assert_eq!(stored.bus_id, bus_id);
    assert_eq!(stored.bus_number, 101);
    assert_eq!(stored.model, bus.model);
    assert_eq!(stored.purchase_date, bus.purchase_date);
    assert_eq!(stored.condition, BusCondition::Good);
    assert_eq!(stored.mileage, 1000);
    assert_eq!(stored.registration_number, "А101АА77");
    assert!((stored.depreciation - 10.0).abs() < 1e-6);
    assert!((stored.current_value - 900_000.0).abs() < 1e-6);

    assert_eq!(persistence.get_bus_by_number(101).unwrap(), Some(stored));
}

#[test]
fn test_bus_bought_this_year_counts_one_year() {
    let mut persistence: Persistence = create_test_persistence();
    let bus = NewBus {
        purchase_date: String::from("05.05.2026"),
        ..test_bus(7)
    };

    let bus_id: i64 = persistence.create_bus_valued_in(&bus, 2026).unwrap();
    let stored: Bus = persistence.get_bus_by_id(bus_id).unwrap().unwrap();

    assert!((stored.depreciation - 2.0).abs() < 1e-6);
    assert_eq!(stored.registration_number, "А007АА77");
}

#[test]
fn test_depreciation_is_capped() {
    let mut persistence: Persistence = create_test_persistence();
    let bus = NewBus {
        purchase_date: String::from("01.01.1990"),
        ..test_bus(1)
    };

    let bus_id: i64 = persistence.create_bus_valued_in(&bus, 2026).unwrap();
    let stored: Bus = persistence.get_bus_by_id(bus_id).unwrap().unwrap();

    assert!((stored.depreciation - 40.0).abs() < 1e-6);
    assert!((stored.current_value - 600_000.0).abs() < 1e-6);
}

#[test]
fn test_unreadable_purchase_year_uses_fallback() {
    let mut persistence: Persistence = create_test_persistence();
    let bus = NewBus {
        purchase_date: String::from("soon"),
        ..test_bus(2)
    };

    let bus_id: i64 = persistence.create_bus_valued_in(&bus, 2026).unwrap();
    let stored: Bus = persistence.get_bus_by_id(bus_id).unwrap().unwrap();

    assert!((stored.depreciation - 6.0).abs() < 1e-6);
}

#[test]
fn test_duplicate_bus_number_is_rejected_and_not_persisted() {
    let mut persistence: Persistence = create_test_persistence();
    create_test_bus(&mut persistence, 101);

    let duplicate = NewBus {
        model: String::from("ЛиАЗ-5292"),
        ..test_bus(101)
    };
    let result: Result<i64, PersistenceError> = persistence.create_bus(&duplicate);

    assert!(matches!(result, Err(PersistenceError::DuplicateKey(_))));
    assert_eq!(persistence.count_buses().unwrap(), 1);
    assert_eq!(
        persistence.get_bus_by_number(101).unwrap().unwrap().model,
        "ПАЗ-3205"
    );
}

#[test]
fn test_invalid_price_or_mileage_is_rejected() {
    let mut persistence: Persistence = create_test_persistence();

    let free = NewBus {
        initial_price: 0.0,
        ..test_bus(1)
    };
    let result: Result<i64, PersistenceError> = persistence.create_bus(&free);
    assert!(matches!(result, Err(PersistenceError::ConstraintViolation(_))));

    let rewound = NewBus {
        mileage: -5,
        ..test_bus(2)
    };
    let result: Result<i64, PersistenceError> = persistence.create_bus(&rewound);
    assert!(matches!(result, Err(PersistenceError::ConstraintViolation(_))));

    assert_eq!(persistence.count_buses().unwrap(), 0);
}

#[test]
fn test_list_buses_is_ordered_by_number() {
    let mut persistence: Persistence = create_test_persistence();
    create_test_bus(&mut persistence, 300);
    create_test_bus(&mut persistence, 5);
    create_test_bus(&mut persistence, 42);

    let numbers: Vec<i32> = persistence
        .list_buses()
        .unwrap()
        .into_iter()
        .map(|bus| bus.bus_number)
        .collect();
    assert_eq!(numbers, vec![5, 42, 300]);
}

#[test]
fn test_buses_by_condition_and_counts() {
    let mut persistence: Persistence = create_test_persistence();
    create_test_bus(&mut persistence, 1);
    persistence
        .create_bus(&NewBus {
            condition: BusCondition::Poor,
            ..test_bus(2)
        })
        .unwrap();

    let poor: Vec<Bus> = persistence
        .get_buses_by_condition(BusCondition::Poor)
        .unwrap();
    assert_eq!(poor.len(), 1);
    assert_eq!(poor[0].bus_number, 2);
    assert_eq!(
        persistence
            .count_buses_by_condition(BusCondition::Good)
            .unwrap(),
        1
    );
    assert_eq!(
        persistence
            .count_buses_by_condition(BusCondition::Excellent)
            .unwrap(),
        0
    );
}

#[test]
fn test_total_fleet_value() {
    let mut persistence: Persistence = create_test_persistence();
    assert!(persistence.total_fleet_value().unwrap().abs() < 1e-6);

    let first: i64 = persistence.create_bus_valued_in(&test_bus(1), 2026).unwrap();
    let second: i64 = persistence.create_bus_valued_in(&test_bus(2), 2026).unwrap();
    let expected: f64 = [first, second]
        .into_iter()
        .map(|id| persistence.get_bus_by_id(id).unwrap().unwrap().current_value)
        .sum();

    assert!((persistence.total_fleet_value().unwrap() - expected).abs() < 1e-6);
}

#[test]
fn test_unassigned_buses_excludes_buses_with_a_driver() {
    let mut persistence: Persistence = create_test_persistence();
    let bus_a: i64 = create_test_bus(&mut persistence, 1);
    create_test_bus(&mut persistence, 2);
    let driver: i64 = create_test_driver(&mut persistence, "driver1");

    persistence.assign_bus_to_driver(bus_a, driver).unwrap();

    let unassigned: Vec<i32> = persistence
        .list_unassigned_buses()
        .unwrap()
        .into_iter()
        .map(|bus| bus.bus_number)
        .collect();
    assert_eq!(unassigned, vec![2]);
}

#[test]
fn test_update_bus_keeps_valuation() {
    let mut persistence: Persistence = create_test_persistence();
    let bus_id: i64 = persistence.create_bus_valued_in(&test_bus(1), 2026).unwrap();

    let update = BusUpdate {
        condition: Some(BusCondition::Average),
        mileage: Some(5000),
        ..BusUpdate::default()
    };
    persistence.update_bus(bus_id, &update).unwrap();

    let stored: Bus = persistence.get_bus_by_id(bus_id).unwrap().unwrap();
    assert_eq!(stored.condition, BusCondition::Average);
    assert_eq!(stored.mileage, 5000);
    assert_eq!(stored.model, "ПАЗ-3205");
    assert!((stored.depreciation - 10.0).abs() < 1e-6);
}

#[test]
fn test_update_bus_rejects_negative_mileage_and_missing_bus() {
    let mut persistence: Persistence = create_test_persistence();
    let bus_id: i64 = create_test_bus(&mut persistence, 1);

    let update = BusUpdate {
        mileage: Some(-1),
        ..BusUpdate::default()
    };
    let result: Result<(), PersistenceError> = persistence.update_bus(bus_id, &update);
    assert!(matches!(result, Err(PersistenceError::ConstraintViolation(_))));

    let result: Result<(), PersistenceError> =
        persistence.update_bus(bus_id + 100, &BusUpdate::default());
    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_delete_bus_removes_driver_link() {
    let mut persistence: Persistence = create_test_persistence();
    let bus_id: i64 = create_test_bus(&mut persistence, 1);
    let driver: i64 = create_test_driver(&mut persistence, "driver1");
    persistence.assign_bus_to_driver(bus_id, driver).unwrap();

    persistence.delete_bus(bus_id).unwrap();

    assert!(persistence.get_bus_by_id(bus_id).unwrap().is_none());
    assert!(persistence.get_bus_for_driver(driver).unwrap().is_none());
    assert_eq!(persistence.count_bus_driver_links().unwrap(), 0);

    let result: Result<(), PersistenceError> = persistence.delete_bus(bus_id);
    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}
