//! Authentication utilities library
//!
//! Provides the authentication core of the profile service:
//! - Password hashing (Argon2id)
//! - JWT token issuance and verification at an explicit instant
//! - `Authorization: Bearer` extraction
//! - Authentication coordination (credential check, per-request gate)
//!
//! Nothing in this crate performs I/O or keeps mutable state; the signing
//! secret is injected at construction.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::JwtHandler;
//! use chrono::Utc;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let now = Utc::now();
//! let token = handler.issue(42, now).unwrap();
//! let subject: i64 = handler.verify(&token, now).unwrap();
//! assert_eq!(subject, 42);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//! use chrono::Utc;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and generate token
//! auth.verify_credentials("password123", Some(&hash)).unwrap();
//! let token = auth.issue_token(42, Utc::now()).unwrap();
//!
//! // Later request: run the gate on the Authorization header
//! let header = format!("Bearer {}", token);
//! let user_id: i64 = auth.authorize(Some(&header), Utc::now()).unwrap();
//! assert_eq!(user_id, 42);
//! ```

pub mod authenticator;
pub mod bearer;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use bearer::extract_bearer;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
