pub mod blog;
pub mod session;
pub mod user;

pub use blog::*;
pub use session::*;
pub use user::*;
