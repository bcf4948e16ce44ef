pub mod card;
pub mod deck;
pub mod meta;
pub mod set;
pub mod user;

pub use card::*;
pub use deck::*;
pub use meta::*;
pub use set::*;
pub use user::*;
