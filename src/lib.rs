//! City catalog and bulk CSV import behind a small astra server.
//!
//! `router::respond` is the request entry point. The account, dashboard and
//! single-city operations live in `auth`, `db` and `domain::catalog` for
//! callers that bring their own `Geocoder` / `WeatherSource`.

pub mod auth;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod import;
pub mod responses;
pub mod router;
pub mod state;

#[cfg(test)]
mod tests;
