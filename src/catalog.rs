//! Menu Catalog
//!
//! 读多写少的菜品目录。写操作（创建/编辑/下架）由管理员门禁保护。
//! 被订单引用过的菜品通过可用标记软下架，历史订单行不受任何编辑影响。

use crate::auth::{Actor, require_admin};
use crate::db::models::{MenuCategory, MenuItem, MenuItemCreate, MenuItemUpdate};
use crate::db::repository::MenuItemRepository;
use crate::utils::{AppError, AppResult};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct MenuCatalog {
    repo: MenuItemRepository,
}

impl MenuCatalog {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            repo: MenuItemRepository::new(db),
        }
    }

    /// List items, optionally filtered by category / availability
    pub async fn list(
        &self,
        category: Option<MenuCategory>,
        only_available: bool,
    ) -> AppResult<Vec<MenuItem>> {
        Ok(self.repo.find_all(category, only_available).await?)
    }

    /// Fetch by identity
    pub async fn get(&self, id: &str) -> AppResult<MenuItem> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Menu item {} not found", id)))
    }

    /// Distinct categories present on the menu
    pub async fn categories(&self) -> AppResult<Vec<MenuCategory>> {
        Ok(self.repo.list_categories().await?)
    }

    /// Create a menu item (administrator only)
    pub async fn create(&self, actor: &Actor, data: MenuItemCreate) -> AppResult<MenuItem> {
        require_admin(actor)?;
        let item = self.repo.create(&actor.id, data).await?;
        tracing::info!(name = %item.name, by = %actor.id, "Menu item created");
        Ok(item)
    }

    /// Update a menu item (administrator only)
    pub async fn update(
        &self,
        actor: &Actor,
        id: &str,
        data: MenuItemUpdate,
    ) -> AppResult<MenuItem> {
        require_admin(actor)?;
        let item = self.repo.update(id, data).await?;
        tracing::info!(name = %item.name, by = %actor.id, "Menu item updated");
        Ok(item)
    }

    /// Soft-disable an item instead of deleting it (administrator only)
    pub async fn disable(&self, actor: &Actor, id: &str) -> AppResult<MenuItem> {
        self.update(
            actor,
            id,
            MenuItemUpdate {
                is_available: Some(false),
                ..Default::default()
            },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::models::Allergen;

    async fn catalog() -> MenuCatalog {
        let db = DbService::memory().await.unwrap();
        MenuCatalog::new(db.db())
    }

    fn sample_item(name: &str, category: MenuCategory, price: f64) -> MenuItemCreate {
        MenuItemCreate {
            name: name.to_string(),
            description: format!("{name} description"),
            category,
            price,
            image: None,
            ingredients: None,
            allergens: Some(vec![Allergen::Gluten]),
            is_vegetarian: Some(true),
            is_vegan: None,
            preparation_time: Some(10),
        }
    }

    #[tokio::test]
    async fn create_requires_admin() {
        let catalog = catalog().await;
        let student = Actor::student("stu-1");

        let err = catalog
            .create(&student, sample_item("Dosa", MenuCategory::Breakfast, 40.0))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn list_filters_by_category_and_availability() {
        let catalog = catalog().await;
        let admin = Actor::admin("admin-1");

        let dosa = catalog
            .create(&admin, sample_item("Dosa", MenuCategory::Breakfast, 40.0))
            .await
            .unwrap();
        catalog
            .create(&admin, sample_item("Coffee", MenuCategory::Beverages, 20.0))
            .await
            .unwrap();

        let breakfast = catalog
            .list(Some(MenuCategory::Breakfast), true)
            .await
            .unwrap();
        assert_eq!(breakfast.len(), 1);
        assert_eq!(breakfast[0].name, "Dosa");

        // 下架后从可用列表消失，但仍可按 id 取到
        let dosa_id = dosa.id.unwrap().to_string();
        catalog.disable(&admin, &dosa_id).await.unwrap();
        let breakfast = catalog
            .list(Some(MenuCategory::Breakfast), true)
            .await
            .unwrap();
        assert!(breakfast.is_empty());
        let fetched = catalog.get(&dosa_id).await.unwrap();
        assert!(!fetched.is_available);
    }

    #[tokio::test]
    async fn get_unknown_item_is_not_found() {
        let catalog = catalog().await;
        let err = catalog.get("menu_item:missing").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn negative_price_is_rejected() {
        let catalog = catalog().await;
        let admin = Actor::admin("admin-1");
        let err = catalog
            .create(&admin, sample_item("Broken", MenuCategory::Snacks, -1.0))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn categories_are_distinct_and_sorted() {
        let catalog = catalog().await;
        let admin = Actor::admin("admin-1");
        for (name, cat) in [
            ("Idli", MenuCategory::Breakfast),
            ("Dosa", MenuCategory::Breakfast),
            ("Tea", MenuCategory::Beverages),
        ] {
            catalog.create(&admin, sample_item(name, cat, 25.0)).await.unwrap();
        }
        let categories = catalog.categories().await.unwrap();
        assert_eq!(
            categories,
            vec![MenuCategory::Breakfast, MenuCategory::Beverages]
        );
    }
}
