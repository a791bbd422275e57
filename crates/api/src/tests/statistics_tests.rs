// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use fleet_domain::{BusCondition, BusUpdate, ConditionCounts, MaintenanceRecommendation};
use fleet_persistence::{Persistence, PersistenceError};

use crate::handlers::{degrade, drivers_by_route, fleet_statistics};
use crate::tests::helpers::{create_seeded_persistence, create_test_persistence};
use crate::{FleetStatistics, RouteOverview};

#[test]
fn test_seeded_fleet_statistics() {
    let mut persistence: Persistence = create_seeded_persistence();

    let stats: FleetStatistics = fleet_statistics(&mut persistence);

    assert_eq!(stats.total_buses, Some(4));
    assert_eq!(stats.total_drivers, Some(2));
    assert_eq!(stats.total_routes, Some(2));
    assert!((stats.total_value.unwrap() - 8_416_000.0).abs() < 1e-3);
    assert_eq!(
        stats.conditions,
        Some(ConditionCounts {
            excellent: 0,
            good: 3,
            average: 0,
            poor: 1,
        })
    );
    assert_eq!(
        stats.recommendations,
        vec![
            MaintenanceRecommendation::Repair { buses: 1 },
            MaintenanceRecommendation::FleetHealthy,
        ]
    );
}

#[test]
fn test_fleet_needing_renewal() {
    let mut persistence: Persistence = create_seeded_persistence();
    let bus_id: i64 = persistence.get_bus_by_number(101).unwrap().unwrap().bus_id;
    persistence
        .update_bus(
            bus_id,
            &BusUpdate {
                condition: Some(BusCondition::Average),
                ..BusUpdate::default()
            },
        )
        .unwrap();

    let stats: FleetStatistics = fleet_statistics(&mut persistence);

    assert_eq!(
        stats.recommendations.last(),
        Some(&MaintenanceRecommendation::FleetRenewalNeeded)
    );
}

#[test]
fn test_empty_fleet_statistics() {
    let mut persistence: Persistence = create_test_persistence();

    let stats: FleetStatistics = fleet_statistics(&mut persistence);

    assert_eq!(stats.total_buses, Some(0));
    assert_eq!(stats.total_value, Some(0.0));
    assert_eq!(stats.conditions, Some(ConditionCounts::default()));
    assert_eq!(
        stats.recommendations,
        vec![MaintenanceRecommendation::FleetRenewalNeeded]
    );
}

#[test]
fn test_total_value_sums_current_values() {
    let mut persistence: Persistence = create_seeded_persistence();

    let expected: f64 = persistence
        .list_buses()
        .unwrap()
        .iter()
        .map(|bus| bus.current_value)
        .sum();
    let stats: FleetStatistics = fleet_statistics(&mut persistence);

    assert!((stats.total_value.unwrap() - expected).abs() < 1e-3);
}

#[test]
fn test_failed_figure_degrades_to_none() {
    let failed: Result<i64, PersistenceError> =
        Err(PersistenceError::StorageFailure(String::from("disk gone")));

    assert_eq!(degrade("total_buses", failed), None);
    assert_eq!(degrade("total_buses", Ok::<i64, PersistenceError>(3)), Some(3));
}

#[test]
fn test_drivers_by_route_on_seeded_store() {
    let mut persistence: Persistence = create_seeded_persistence();

    let overview: Vec<RouteOverview> = drivers_by_route(&mut persistence).unwrap();

    assert_eq!(overview.len(), 2);
    assert_eq!(overview[0].route.route_number, "101");
    let first: Vec<(String, Option<i32>)> = overview[0]
        .drivers
        .iter()
        .map(|entry| {
            (
                entry.driver.login.clone(),
                entry.bus.as_ref().map(|bus| bus.bus_number),
            )
        })
        .collect();
    assert_eq!(
        first,
        vec![
            (String::from("driver1"), Some(101)),
            (String::from("driver2"), Some(102)),
        ]
    );
    assert_eq!(overview[1].route.route_number, "202");
    assert_eq!(overview[1].drivers.len(), 1);
}

#[test]
fn test_drivers_by_route_without_drivers() {
    let mut persistence: Persistence = create_test_persistence();
    persistence
        .create_route(&crate::tests::helpers::form_route("9"))
        .unwrap();

    let overview: Vec<RouteOverview> = drivers_by_route(&mut persistence).unwrap();

    assert_eq!(overview.len(), 1);
    assert!(overview[0].drivers.is_empty());
}
