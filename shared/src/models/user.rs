//! User models

use serde::{Deserialize, Serialize};

/// The logged-in identity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub email: String,
    pub name: String,
}

/// An entry of the login allow-list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthorizedUser {
    pub email: String,
    pub pin: String,
    pub name: String,
}

impl AuthorizedUser {
    pub fn matches(&self, email: &str, pin: &str) -> bool {
        self.email == email && self.pin == pin
    }

    pub fn to_user(&self) -> User {
        User {
            email: self.email.clone(),
            name: self.name.clone(),
        }
    }
}

/// Allow-list used when the configuration does not provide one
pub fn default_users() -> Vec<AuthorizedUser> {
    vec![
        AuthorizedUser {
            email: "admin@boomart.com".to_string(),
            pin: "1234".to_string(),
            name: "Administrador".to_string(),
        },
        AuthorizedUser {
            email: "ventas@boomart.com".to_string(),
            pin: "0000".to_string(),
            name: "Vendedor".to_string(),
        },
    ]
}
