use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Public view of a registered account.
///
/// The password digest lives next to this record inside the identity
/// registry and is never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: u64,

    pub name: String,

    /// Normalized phone in `+7XXXXXXXXXX` form
    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    /// Favorite restaurant ids, serialized in ascending order
    #[serde(default)]
    pub favorites: BTreeSet<u64>,
}

impl Account {
    /// Create an account with no favorites
    pub fn new(id: u64, name: String, phone: Option<String>, email: Option<String>) -> Self {
        Self {
            id,
            name,
            phone,
            email,
            favorites: BTreeSet::new(),
        }
    }

    /// Identifier shown to the user as their login
    pub fn login(&self) -> Option<&str> {
        self.email.as_deref().or(self.phone.as_deref())
    }
}
