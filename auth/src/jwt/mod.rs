pub mod claims;
pub mod errors;
pub mod handler;

pub use claims::Claims;
pub use errors::JwtError;
pub use handler::JwtHandler;
pub use handler::DEFAULT_TOKEN_LIFETIME_HOURS;
