pub mod argon2;
pub mod errors;

pub(crate) use argon2::DUMMY_HASH;
pub use argon2::PasswordHasher;
pub use errors::PasswordError;
