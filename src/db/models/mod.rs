//! Database Models
//!
//! SurrealDB document entities plus their Create/Update payloads.

pub mod dining_table;
pub mod menu_item;
pub mod order;
pub mod queue_status;
pub mod serde_helpers;

pub use dining_table::{DiningTable, DiningTableCreate, DiningTableUpdate, TableStatus, TableZone};
pub use menu_item::{Allergen, MenuCategory, MenuItem, MenuItemCreate, MenuItemUpdate};
pub use order::{
    Order, OrderCreate, OrderLine, OrderLineInput, OrderStats, OrderStatus, PaymentMethod,
    PaymentStatus,
};
pub use queue_status::{QueueOverride, QueueSample, QueueStatus};
