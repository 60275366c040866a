//! End-to-end flow through the assembled service:
//! 建菜单 → 下单占桌 → 推进到完成 → 桌台释放，旁路排队状态更新。

use cafeteria_engine::db::models::{
    DiningTableCreate, MenuCategory, MenuItemCreate, OrderCreate, OrderLineInput, OrderStatus,
    TableStatus,
};
use cafeteria_engine::orders::TableReservation;
use cafeteria_engine::{Actor, CafeteriaService, Config};

async fn service() -> CafeteriaService {
    CafeteriaService::memory(&Config::default()).await.unwrap()
}

fn item(name: &str, price: f64) -> MenuItemCreate {
    MenuItemCreate {
        name: name.to_string(),
        description: format!("{name} description"),
        category: MenuCategory::Lunch,
        price,
        image: None,
        ingredients: None,
        allergens: None,
        is_vegetarian: None,
        is_vegan: None,
        preparation_time: Some(12),
    }
}

#[tokio::test]
async fn full_order_lifecycle_with_table() {
    let service = service().await;
    let admin = Actor::admin("admin-1");
    let student = Actor::student("stu-1");

    // Admin sets up menu and tables
    let thali = service.catalog.create(&admin, item("Thali", 50.0)).await.unwrap();
    let lassi = service.catalog.create(&admin, item("Lassi", 30.0)).await.unwrap();
    service
        .tables
        .create(
            &admin,
            DiningTableCreate {
                table_number: "T1".into(),
                capacity: Some(4),
                zone: None,
            },
        )
        .await
        .unwrap();

    // Student places a two-line order at T1
    let placed = service
        .place_order(
            &student,
            OrderCreate {
                lines: vec![
                    OrderLineInput {
                        menu_item: thali.id.unwrap().to_string(),
                        quantity: 2,
                        special_instructions: Some("Less spicy".into()),
                    },
                    OrderLineInput {
                        menu_item: lassi.id.unwrap().to_string(),
                        quantity: 1,
                        special_instructions: None,
                    },
                ],
                table_number: Some("T1".into()),
                is_takeaway: false,
                special_requests: None,
                payment_method: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(placed.order.total_amount, 130.0);
    assert_eq!(placed.table, TableReservation::Reserved);
    assert!(service.list_available_tables().await.unwrap().is_empty());

    // Kitchen advances the order to completion
    let order_id = placed.order.id.unwrap().to_string();
    for status in [
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Completed,
    ] {
        service.advance_order(&admin, &order_id, status).await.unwrap();
    }

    let order = service.get_order(&order_id, &student).await.unwrap();
    assert_eq!(order.status, OrderStatus::Completed);
    assert!(order.completed_at.is_some());

    // Table is back in rotation with the link cleared
    let tables = service.list_available_tables().await.unwrap();
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].status, TableStatus::Available);
    assert!(tables[0].current_order.is_none());

    // Student history shows the completed order
    let orders = service.list_orders(&student).await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].order_number, order.order_number);
}

#[tokio::test]
async fn engine_opens_an_on_disk_database() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        data_dir: dir.path().to_string_lossy().into_owned(),
        ..Config::default()
    };
    let service = CafeteriaService::open(&config).await.unwrap();
    let admin = Actor::admin("admin-1");

    service.catalog.create(&admin, item("Poha", 20.0)).await.unwrap();

    let items = service.catalog.list(None, true).await.unwrap();
    assert_eq!(items.len(), 1);
    assert!(dir.path().join("cafeteria.db").exists());
}

#[tokio::test]
async fn queue_status_flows_through_the_facade() {
    let service = service().await;
    let admin = Actor::admin("admin-1");

    // 懒创建的默认单例
    let status = service.get_queue_status().await.unwrap();
    assert_eq!(status.current_count, 0);
    assert_eq!(status.max_capacity, 100);

    // Sensor feed
    let status = service.update_queue_status(66, 100).await.unwrap();
    assert_eq!(status.estimated_wait_minutes, 30);
    assert_eq!(status.color, "red");
    assert!(!status.is_manual_override);

    // Admin override
    let status = service
        .override_queue_status(&admin, 10, 100, "Counter closed for cleaning")
        .await
        .unwrap();
    assert!(status.is_manual_override);
    assert_eq!(status.override_by.as_deref(), Some("admin-1"));

    // Students cannot override
    let student = Actor::student("stu-1");
    assert!(
        service
            .override_queue_status(&student, 10, 100, "nope")
            .await
            .is_err()
    );
}
