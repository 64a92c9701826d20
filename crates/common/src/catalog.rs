//! Restaurant reference data

use serde::{Deserialize, Serialize};

/// A dish or drink on a restaurant menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: u64,
    pub name: String,
    pub category: String,

    /// Unit price in tenge
    pub price: u64,

    pub description: String,

    #[serde(default)]
    pub image_url: String,
}

/// A physical location of a restaurant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub id: u64,
    pub address: String,
    pub district: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub branches: Vec<Branch>,
    pub cuisine: Vec<String>,

    /// Opening hours, e.g. `09:00-23:00`
    pub schedule: String,

    pub capacity: u32,

    #[serde(default)]
    pub image_url: String,

    #[serde(default = "default_floors")]
    pub floors: u32,

    #[serde(default)]
    pub menu: Vec<MenuItem>,

    #[serde(default)]
    pub has_vip_cabins: bool,
}

fn default_floors() -> u32 {
    1
}

impl Restaurant {
    /// Find a branch of this restaurant by id
    pub fn branch(&self, branch_id: u64) -> Option<&Branch> {
        self.branches.iter().find(|b| b.id == branch_id)
    }

    /// Find a menu item of this restaurant by id
    pub fn menu_item(&self, item_id: u64) -> Option<&MenuItem> {
        self.menu.iter().find(|m| m.id == item_id)
    }
}

impl MenuItem {
    /// Price of `quantity` units, `None` on overflow
    pub fn line_total(&self, quantity: u32) -> Option<u64> {
        self.price.checked_mul(u64::from(quantity))
    }
}
