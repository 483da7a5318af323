pub mod auth;
pub mod tenant;

pub use auth::{auth_middleware, CurrentUser};
pub use tenant::{superadmin_middleware, website_access_middleware, TenantContext, WebsitePath};
