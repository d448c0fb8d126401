pub mod health;
pub mod reset_password;

pub use health::*;
pub use reset_password::*;
