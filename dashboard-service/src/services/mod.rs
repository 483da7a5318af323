pub mod database;
pub mod jwt;

pub use database::{ContentFilter, Database, ProductFilter, UserFilter};
pub use jwt::{AccessTokenClaims, JwtService, TokenResponse};
