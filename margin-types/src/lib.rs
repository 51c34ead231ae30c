pub mod account;
pub mod enums;
pub mod models;

pub use account::*;
pub use enums::*;
pub use models::*;
