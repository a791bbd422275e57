// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use fleet_domain::{Bus, Role, Route, User};
use fleet_persistence::SeedOutcome;

use crate::tests::helpers::{
    TEST_HASH_COST, create_empty_store, create_seeded_store, form_bus, form_route, login_request,
};
use crate::{ApiError, FleetStore, StoreConfig};

#[tokio::test]
async fn test_open_seeds_a_fresh_store() {
    let store: FleetStore = create_seeded_store().await;

    assert_eq!(store.list_buses().await.unwrap().len(), 4);
    assert_eq!(store.list_drivers().await.unwrap().len(), 2);
    assert_eq!(
        store.seed_if_empty().await.unwrap(),
        SeedOutcome::AlreadySeeded
    );

    let bus: Bus = store.get_bus_for_driver(2).await.unwrap().unwrap();
    assert_eq!(bus.bus_number, 101);
}

#[tokio::test]
async fn test_open_without_seed_leaves_store_empty() {
    let store: FleetStore = create_empty_store().await;

    assert!(store.list_buses().await.unwrap().is_empty());
    assert!(store.search_routes(String::new()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_open_rejects_invalid_config() {
    let result: Result<FleetStore, ApiError> =
        FleetStore::open(StoreConfig::in_memory().with_bcrypt_cost(2)).await;

    assert!(matches!(result, Err(ApiError::Configuration { .. })));
}

#[tokio::test]
async fn test_file_store_keeps_data_between_opens() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fleet.db");
    let config: StoreConfig = StoreConfig::file(&path).with_bcrypt_cost(TEST_HASH_COST);

    {
        let store: FleetStore = FleetStore::open(config.clone()).await.unwrap();
        store.add_route(form_route("303")).await.unwrap();
    }

    let store: FleetStore = FleetStore::open(config).await.unwrap();
    let routes: Vec<Route> = store.search_routes(String::from("3")).await.unwrap();
    assert_eq!(routes.len(), 1);
    assert_eq!(store.list_routes().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_assignment_flow_through_the_store() {
    let store: FleetStore = create_empty_store().await;
    let bus: Bus = store.add_bus(form_bus(7)).await.unwrap();
    let route: Route = store.add_route(form_route("7")).await.unwrap();
    let d1: i64 = store
        .register_or_login(login_request("d1", "pass", Role::Driver))
        .await
        .unwrap()
        .session
        .user_id;
    let d2: i64 = store
        .register_or_login(login_request("d2", "pass", Role::Driver))
        .await
        .unwrap()
        .session
        .user_id;

    assert_eq!(store.assign_bus_to_driver(bus.bus_id, d1).await.unwrap(), None);
    assert_eq!(
        store.assign_bus_to_driver(bus.bus_id, d2).await.unwrap(),
        Some(d1)
    );
    assert!(store.assign_driver_to_route(d1, route.route_id).await.unwrap());

    let driver: User = store.get_driver_for_bus(bus.bus_id).await.unwrap().unwrap();
    assert_eq!(driver.user_id, d2);
    assert!(store.get_bus_for_driver(d1).await.unwrap().is_none());

    store.delete_user(d1).await.unwrap();
    assert!(
        store
            .get_drivers_for_route(route.route_id)
            .await
            .unwrap()
            .is_empty()
    );

    let result: Result<Option<i64>, ApiError> = store.assign_bus_to_driver(bus.bus_id, d1).await;
    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[tokio::test]
async fn test_concurrent_registrations_all_land() {
    let store: FleetStore = create_empty_store().await;

    let mut handles = Vec::new();
    for i in 0..8 {
        let store: FleetStore = store.clone();
        handles.push(tokio::spawn(async move {
            store
                .register_or_login(login_request(&format!("driver{i}"), "pass", Role::Driver))
                .await
        }));
    }
    for handle in handles {
        assert!(handle.await.unwrap().unwrap().registered);
    }

    assert_eq!(store.list_drivers().await.unwrap().len(), 8);
}

#[tokio::test]
async fn test_aborted_caller_leaves_store_usable() {
    let store: FleetStore = create_empty_store().await;
    store.create_route(form_route("404")).await.unwrap();

    let background: FleetStore = store.clone();
    let abandoned = tokio::spawn(async move { background.add_bus(form_bus(9)).await });
    abandoned.abort();
    let _ = abandoned.await;

    // The insert either never started or ran to completion.
    let buses: Vec<Bus> = store.list_buses().await.unwrap();
    assert!(buses.len() <= 1);
    assert!(store.get_route_by_id(1).await.unwrap().is_some());
}

#[tokio::test]
async fn test_duplicate_surfaces_as_api_error() {
    let store: FleetStore = create_seeded_store().await;

    let result: Result<Bus, ApiError> = store.add_bus(form_bus(101)).await;
    assert!(matches!(result, Err(ApiError::Duplicate { .. })));

    let result: Result<Route, ApiError> = store.add_route(form_route("202")).await;
    assert!(matches!(result, Err(ApiError::Duplicate { .. })));
}

#[tokio::test]
async fn test_statistics_and_overview_through_the_store() {
    let store: FleetStore = create_seeded_store().await;

    let stats = store.fleet_statistics().await.unwrap();
    assert_eq!(stats.total_buses, Some(4));

    let overview = store.drivers_by_route().await.unwrap();
    assert_eq!(overview.len(), 2);
}
