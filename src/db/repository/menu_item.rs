//! Menu Item Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{MenuCategory, MenuItem, MenuItemCreate, MenuItemUpdate};
use crate::utils::now_millis;
use serde::Deserialize;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "menu_item";

#[derive(Clone)]
pub struct MenuItemRepository {
    base: BaseRepository,
}

impl MenuItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find menu items, optionally filtered by category / availability
    pub async fn find_all(
        &self,
        category: Option<MenuCategory>,
        only_available: bool,
    ) -> RepoResult<Vec<MenuItem>> {
        let mut clauses = Vec::new();
        if only_available {
            clauses.push("is_available = true");
        }
        if category.is_some() {
            clauses.push("category = $category");
        }
        let where_clause = if clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", clauses.join(" AND "))
        };
        let sql = format!("SELECT * FROM menu_item{where_clause} ORDER BY category, name");

        let mut query = self.base.db().query(sql);
        if let Some(category) = category {
            query = query.bind(("category", category));
        }
        let items: Vec<MenuItem> = query.await?.take(0)?;
        Ok(items)
    }

    /// Find menu item by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<MenuItem>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let item: Option<MenuItem> = self.base.db().select(thing).await?;
        Ok(item)
    }

    /// Distinct categories currently present on the menu
    pub async fn list_categories(&self) -> RepoResult<Vec<MenuCategory>> {
        #[derive(Deserialize)]
        struct CategoryRow {
            category: MenuCategory,
        }
        let rows: Vec<CategoryRow> = self
            .base
            .db()
            .query("SELECT category FROM menu_item GROUP BY category")
            .await?
            .take(0)?;
        let mut categories: Vec<MenuCategory> = rows.into_iter().map(|r| r.category).collect();
        categories.sort();
        Ok(categories)
    }

    /// Create a new menu item
    pub async fn create(&self, created_by: &str, data: MenuItemCreate) -> RepoResult<MenuItem> {
        if !data.price.is_finite() || data.price < 0.0 {
            return Err(RepoError::Validation(format!(
                "Price must be non-negative, got {}",
                data.price
            )));
        }
        if data.name.trim().is_empty() {
            return Err(RepoError::Validation("Name must not be empty".into()));
        }

        let now = now_millis();
        let item = MenuItem {
            id: None,
            name: data.name,
            description: data.description,
            category: data.category,
            price: data.price,
            image: data.image.unwrap_or_default(),
            ingredients: data.ingredients.unwrap_or_default(),
            allergens: data.allergens.unwrap_or_default(),
            is_vegetarian: data.is_vegetarian.unwrap_or(false),
            is_vegan: data.is_vegan.unwrap_or(false),
            is_available: true,
            preparation_time: data.preparation_time.unwrap_or(15),
            created_by: created_by.to_string(),
            created_at: now,
            updated_at: now,
        };

        let created: Option<MenuItem> = self.base.db().create(TABLE).content(item).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create menu item".to_string()))
    }

    /// Update a menu item
    ///
    /// 只改菜品文档本身；历史订单行持有价格快照，不受影响。
    pub async fn update(&self, id: &str, data: MenuItemUpdate) -> RepoResult<MenuItem> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Menu item {} not found", id)))?;

        if let Some(price) = data.price
            && (!price.is_finite() || price < 0.0)
        {
            return Err(RepoError::Validation(format!(
                "Price must be non-negative, got {}",
                price
            )));
        }

        let merged = MenuItem {
            id: None,
            name: data.name.unwrap_or(existing.name),
            description: data.description.unwrap_or(existing.description),
            category: data.category.unwrap_or(existing.category),
            price: data.price.unwrap_or(existing.price),
            image: data.image.unwrap_or(existing.image),
            ingredients: data.ingredients.unwrap_or(existing.ingredients),
            allergens: data.allergens.unwrap_or(existing.allergens),
            is_vegetarian: data.is_vegetarian.unwrap_or(existing.is_vegetarian),
            is_vegan: data.is_vegan.unwrap_or(existing.is_vegan),
            is_available: data.is_available.unwrap_or(existing.is_available),
            preparation_time: data.preparation_time.unwrap_or(existing.preparation_time),
            created_by: existing.created_by,
            created_at: existing.created_at,
            updated_at: now_millis(),
        };

        let updated: Option<MenuItem> = self.base.db().update(thing).content(merged).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Menu item {} not found", id)))
    }
}
