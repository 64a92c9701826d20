//! Favorites Index
//!
//! Favorites live on the account record itself, so a toggle made through
//! either login identifier is visible through the other.

use crate::identity::IdentityRegistry;
use reserve_common::{Error, Result};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::info;

/// Outcome of a favorite toggle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FavoriteToggle {
    /// True when the restaurant was added, false when removed
    pub added: bool,
    pub favorites: BTreeSet<u64>,
}

impl IdentityRegistry {
    /// Flip membership of a restaurant in an account's favorites
    pub fn toggle_favorite(&mut self, account_id: u64, restaurant_id: u64) -> Result<FavoriteToggle> {
        let account = self
            .account_mut(account_id)
            .ok_or_else(|| Error::NotFound("User".to_string()))?;

        let added = if account.favorites.remove(&restaurant_id) {
            false
        } else {
            account.favorites.insert(restaurant_id);
            true
        };

        info!(
            "Account {} {} restaurant {} favorites",
            account_id,
            if added { "added" } else { "removed" },
            restaurant_id
        );

        Ok(FavoriteToggle {
            added,
            favorites: account.favorites.clone(),
        })
    }

    pub fn favorites(&self, account_id: u64) -> Result<&BTreeSet<u64>> {
        self.account(account_id)
            .map(|a| &a.favorites)
            .ok_or_else(|| Error::NotFound("User".to_string()))
    }
}
