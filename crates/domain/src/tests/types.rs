// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::str::FromStr;

use crate::{BusCondition, DomainError, NewUser, Role};

#[test]
fn test_role_round_trips_through_str() {
    for role in Role::ALL {
        assert_eq!(Role::from_str(role.as_str()), Ok(role));
    }
}

#[test]
fn test_role_rejects_unknown_value() {
    assert_eq!(
        Role::from_str("admin"),
        Err(DomainError::InvalidRole(String::from("admin")))
    );
}

#[test]
fn test_role_is_case_sensitive() {
    assert!(Role::from_str("Driver").is_err());
}

#[test]
fn test_condition_round_trips_through_str() {
    for condition in BusCondition::ALL {
        assert_eq!(BusCondition::from_str(condition.as_str()), Ok(condition));
    }
}

#[test]
fn test_condition_rejects_unknown_value() {
    assert!(matches!(
        BusCondition::from_str("broken"),
        Err(DomainError::InvalidCondition(_))
    ));
}

#[test]
fn test_role_serializes_lowercase() {
    let json: String = serde_json::to_string(&Role::Dispatcher).unwrap();
    assert_eq!(json, "\"dispatcher\"");

    let condition: BusCondition = serde_json::from_str("\"average\"").unwrap();
    assert_eq!(condition, BusCondition::Average);
}

#[test]
fn test_new_user_defaults_to_zero_bonus() {
    let user: NewUser = NewUser::new("Ann", "ann@mail.com", "ann", "secret", Role::Passenger);
    assert!(user.salary_bonus.abs() < f64::EPSILON);

    let driver: NewUser =
        NewUser::new("Bob", "bob@mail.com", "bob", "secret", Role::Driver).with_salary_bonus(100.0);
    assert!((driver.salary_bonus - 100.0).abs() < f64::EPSILON);
}
