pub mod access;
pub mod category;
pub mod content;
pub mod product;
pub mod profile;
pub mod stats;
pub mod user;
pub mod website;

pub use access::{WebsiteAccess, WebsiteUser, WebsiteUserResponse};
pub use category::{Category, CategoryResponse};
pub use content::{Content, ContentResponse, ContentUpdate};
pub use product::{Product, ProductResponse, ProductUpdate};
pub use profile::{Profile, ProfileResponse};
pub use stats::DashboardStats;
pub use user::User;
pub use website::{AdminWebsiteResponse, Website, WebsiteResponse, WebsiteWithOwner};
