// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session identity handed to the external key-value session store.

use fleet_domain::{Role, User};
use serde::{Deserialize, Serialize};

pub const SESSION_USER_NAME: &str = "user_name";
pub const SESSION_USER_EMAIL: &str = "user_email";
pub const SESSION_USER_ROLE: &str = "user_role";
pub const SESSION_USER_ID: &str = "user_id";
pub const SESSION_IS_LOGGED_IN: &str = "is_logged_in";

/// The logged-in user, as remembered between screens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionIdentity {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl SessionIdentity {
    /// The key/value pairs to write into the session store.
    ///
    /// Always includes `is_logged_in = "true"`.
    #[must_use]
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            (SESSION_USER_NAME, self.name.clone()),
            (SESSION_USER_EMAIL, self.email.clone()),
            (SESSION_USER_ROLE, self.role.to_string()),
            (SESSION_IS_LOGGED_IN, String::from("true")),
            (SESSION_USER_ID, self.user_id.to_string()),
        ]
    }
}

impl From<&User> for SessionIdentity {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.user_id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}
