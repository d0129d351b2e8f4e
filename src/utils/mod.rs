// Utility functions
pub mod error;
pub mod crypto;
pub mod thread_pool;  // Dedicated pool for bcrypt

pub use error::*;
pub use crypto::*;
