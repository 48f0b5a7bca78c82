pub mod audit_log;
pub mod category;
pub mod order;
pub mod product;
pub mod review;
pub mod role;
pub mod user;

pub use audit_log::AuditLog;
pub use category::Category;
pub use order::{Order, OrderItem, OrderStatus};
pub use product::Product;
pub use review::Review;
pub use role::Role;
pub use user::User;
