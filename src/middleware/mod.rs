pub mod auth;
pub mod method_override;
pub mod security_headers;
pub mod session;

pub use auth::LoggedIn;
pub use method_override::MethodOverride;
pub use security_headers::SecurityHeaders;
pub use session::{Session, SessionMiddleware};
