// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use fleet_domain::{Role, User};

use crate::{
    SESSION_IS_LOGGED_IN, SESSION_USER_EMAIL, SESSION_USER_ID, SESSION_USER_NAME,
    SESSION_USER_ROLE, SessionIdentity,
};

fn test_user() -> User {
    User {
        user_id: 2,
        name: String::from("Петр Петров"),
        email: String::from("petrov@mail.com"),
        login: String::from("driver1"),
        role: Role::Driver,
        salary_bonus: 5200.0,
    }
}

#[test]
fn test_identity_from_user() {
    let identity: SessionIdentity = SessionIdentity::from(&test_user());

    assert_eq!(identity.user_id, 2);
    assert_eq!(identity.name, "Петр Петров");
    assert_eq!(identity.role, Role::Driver);
}

#[test]
fn test_session_entries_use_fixed_keys() {
    let entries: Vec<(&str, String)> = SessionIdentity::from(&test_user()).entries();

    assert_eq!(
        entries,
        vec![
            (SESSION_USER_NAME, String::from("Петр Петров")),
            (SESSION_USER_EMAIL, String::from("petrov@mail.com")),
            (SESSION_USER_ROLE, String::from("driver")),
            (SESSION_IS_LOGGED_IN, String::from("true")),
            (SESSION_USER_ID, String::from("2")),
        ]
    );
    assert_eq!(SESSION_USER_ID, "user_id");
    assert_eq!(SESSION_IS_LOGGED_IN, "is_logged_in");
}

#[test]
fn test_identity_serializes_role_lowercase() {
    let json: serde_json::Value =
        serde_json::to_value(SessionIdentity::from(&test_user())).unwrap();

    assert_eq!(json["role"], "driver");
    assert_eq!(json["user_id"], 2);
}
