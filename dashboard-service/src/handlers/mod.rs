pub mod admin;
pub mod analytics;
pub mod auth;
pub mod categories;
pub mod content;
pub mod products;
pub mod stats;
pub mod users;
pub mod websites;
