//! API module - gateway endpoints, models, and router assembly

pub mod handlers;
pub mod models;
pub mod routes;
