pub mod password;
pub mod validation;

pub use password::{Password, PasswordHashString};
pub use validation::{not_blank, ValidatedJson};
