pub mod audit;
pub mod categories;
pub mod orders;
pub mod products;
pub mod reviews;
pub mod roles;
pub mod users;
