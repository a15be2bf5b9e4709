pub mod account;
pub mod password;

