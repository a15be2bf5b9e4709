pub mod cities;
pub mod connection;
pub mod dashboard;
pub mod users;

pub use connection::{init_db, Database};
