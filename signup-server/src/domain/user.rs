use serde::{Deserialize, Serialize};

/// A registered account as persisted in the record store.
///
/// The hash is written under the `password` key to keep the file layout of
/// `{name, email, password}` objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
    #[serde(rename = "password")]
    pub password_hash: String,
}

impl User {
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        Self {
            name,
            email,
            password_hash,
        }
    }
}
