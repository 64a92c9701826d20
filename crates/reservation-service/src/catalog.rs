//! Catalog Store: read-only restaurant reference data

use anyhow::{Context, Result};
use reserve_common::{Branch, MenuItem, Restaurant};
use std::path::Path;
use tracing::info;

/// In-memory restaurant catalog, seeded once at startup
#[derive(Debug, Clone)]
pub struct Catalog {
    restaurants: Vec<Restaurant>,
}

impl Catalog {
    pub fn new(restaurants: Vec<Restaurant>) -> Self {
        Self { restaurants }
    }

    /// Load restaurants from a JSON array on disk
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;

        let restaurants: Vec<Restaurant> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse catalog file: {}", path.display()))?;

        info!("Loaded {} restaurants from {}", restaurants.len(), path.display());
        Ok(Self::new(restaurants))
    }

    /// Built-in catalog
    pub fn seeded() -> Self {
        Self::new(vec![zevra_coffee(), coffee_bum(), okadzaka()])
    }

    pub fn list(&self) -> &[Restaurant] {
        &self.restaurants
    }

    pub fn get(&self, restaurant_id: u64) -> Option<&Restaurant> {
        self.restaurants.iter().find(|r| r.id == restaurant_id)
    }

    /// Resolve a restaurant and one of its branches, either may be missing
    pub fn locate(
        &self,
        restaurant_id: u64,
        branch_id: u64,
    ) -> (Option<&Restaurant>, Option<&Branch>) {
        let restaurant = self.get(restaurant_id);
        let branch = restaurant.and_then(|r| r.branch(branch_id));
        (restaurant, branch)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::seeded()
    }
}

fn item(id: u64, name: &str, category: &str, price: u64, description: &str, image: &str) -> MenuItem {
    MenuItem {
        id,
        name: name.to_string(),
        category: category.to_string(),
        price,
        description: description.to_string(),
        image_url: format!("https://images.unsplash.com/{}?w=400", image),
    }
}

fn branch(id: u64, address: &str, district: &str) -> Branch {
    Branch {
        id,
        address: address.to_string(),
        district: district.to_string(),
    }
}

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn zevra_coffee() -> Restaurant {
    Restaurant {
        id: 1,
        name: "Zevra Coffee".to_string(),
        description: "Уютная кофейня с панорамными окнами и авторским кофе.".to_string(),
        branches: vec![
            branch(1, "Мангілік Ел, 35", "Expo"),
            branch(2, "Сығанақ, 77", "Expo"),
        ],
        cuisine: tags(&["Кафе", "Европейская"]),
        schedule: "09:00-23:00".to_string(),
        capacity: 40,
        image_url: "https://images.unsplash.com/photo-1445116572660-236099ec97a0?w=800&h=600&fit=crop"
            .to_string(),
        floors: 2,
        menu: vec![
            item(1, "Капучино", "Напитки", 1200, "Классический итальянский кофе с молочной пеной", "photo-1572442388796-11668a67e53d"),
            item(2, "Латте", "Напитки", 1300, "Нежный кофе с молоком", "photo-1561882468-9110e03e0f78"),
            item(3, "Американо", "Напитки", 900, "Крепкий эспрессо с водой", "photo-1514432324607-a09d9b4aefdd"),
            item(4, "Круассан с шоколадом", "Выпечка", 1500, "Свежий французский круассан", "photo-1555507036-ab1f4038808a"),
            item(5, "Чизкейк Нью-Йорк", "Десерты", 2500, "Классический американский чизкейк", "photo-1533134242820-b6f7a4ff6adb"),
            item(6, "Панини с ветчиной", "Закуски", 2800, "Горячий сэндвич с сыром и ветчиной", "photo-1509722747041-616f39b57569"),
        ],
        has_vip_cabins: false,
    }
}

fn coffee_bum() -> Restaurant {
    Restaurant {
        id: 2,
        name: "Coffee Bum".to_string(),
        description: "Современный ресторан с европейской кухней и изысканным интерьером.".to_string(),
        branches: vec![
            branch(1, "Кабанбай батыр, 10", "Keruen"),
            branch(2, "Ақмешіт, 38", "Keruen"),
        ],
        cuisine: tags(&["Европейская", "Итальянская"]),
        schedule: "10:00-22:00".to_string(),
        capacity: 50,
        image_url: "https://images.unsplash.com/photo-1517248135467-4c7edcad34c4?w=800&h=600&fit=crop"
            .to_string(),
        floors: 2,
        menu: vec![
            item(7, "Стейк Рибай", "Основные блюда", 8900, "Мраморная говядина 300г с овощами гриль", "photo-1546833999-b9f581a1996d"),
            item(8, "Паста Карбонара", "Основные блюда", 3500, "Классическая итальянская паста с беконом", "photo-1612874742237-6526221588e3"),
            item(9, "Салат Цезарь", "Салаты", 2900, "С курицей, пармезаном и соусом", "photo-1546793665-c74683f339c1"),
            item(10, "Ризотто с грибами", "Основные блюда", 4200, "Кремовое ризотто с белыми грибами", "photo-1476124369491-c4e285d8e1c2"),
            item(11, "Тирамису", "Десерты", 2200, "Итальянский десерт с маскарпоне", "photo-1571877227200-a0d98ea607e9"),
            item(12, "Брускетта", "Закуски", 1800, "Хрустящий хлеб с томатами и базиликом", "photo-1572695157366-5e585ab2b69f"),
        ],
        has_vip_cabins: true,
    }
}

fn okadzaka() -> Restaurant {
    Restaurant {
        id: 3,
        name: "Okadzaka".to_string(),
        description: "Аутентичная японская кухня от шеф-повара из Токио.".to_string(),
        branches: vec![
            branch(1, "Мангілік Ел, 55", "Expo"),
            branch(2, "Керуен молл, 1 этаж", "Keruen"),
            branch(3, "Думан, 12", "Keruen City"),
        ],
        cuisine: tags(&["Японская", "Азиатская"]),
        schedule: "11:00-23:00".to_string(),
        capacity: 35,
        image_url: "https://images.unsplash.com/photo-1579584425555-c3ce17fd4351?w=800&h=600&fit=crop"
            .to_string(),
        floors: 1,
        menu: vec![
            item(13, "Филадельфия", "Роллы", 3200, "Лосось, сыр филадельфия, огурец", "photo-1579584425555-c3ce17fd4351"),
            item(14, "Калифорния", "Роллы", 2800, "Краб, авокадо, огурец, икра тобико", "photo-1617196034796-73dfa7b1fd56"),
            item(15, "Сашими сет", "Сашими", 6500, "Ассорти из свежей рыбы", "photo-1580822184713-fc5400e7fe10"),
            item(16, "Рамен", "Супы", 3800, "Японский суп с лапшой и свининой", "photo-1569718212165-3a8278d5f624"),
            item(17, "Темпура", "Закуски", 3200, "Креветки и овощи в кляре", "photo-1534422298391-e4f8c172dddb"),
            item(18, "Мочи", "Десерты", 1500, "Японские рисовые пирожные", "photo-1563805042-7684c019e1cb"),
        ],
        has_vip_cabins: true,
    }
}
