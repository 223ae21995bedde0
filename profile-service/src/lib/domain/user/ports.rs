use async_trait::async_trait;

use crate::domain::user::models::AuthenticatedSession;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::Profile;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserChanges;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user with validated credentials.
    ///
    /// # Arguments
    /// * `command` - Validated command containing email, password, and name
    ///
    /// # Returns
    /// Profile of the created user
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Hashing` - Password hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: CreateUserCommand) -> Result<Profile, UserError>;

    /// Check credentials and mint a token for the matching user.
    ///
    /// # Arguments
    /// * `email` - Claimed email address, as supplied
    /// * `password` - Plaintext password, as supplied
    ///
    /// # Returns
    /// Profile and signed bearer token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password (not distinguished)
    /// * `Hashing` - Stored hash is malformed
    /// * `Token` - Token signing failed
    /// * `DatabaseError` - Database operation failed
    async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedSession, UserError>;

    /// Retrieve a user profile by identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_profile(&self, id: &UserId) -> Result<Profile, UserError>;

    /// Update the given user with optional fields.
    ///
    /// `id` must be the identity admitted by the auth gate; the service does
    /// not check it again.
    ///
    /// # Errors
    /// * `EmptyUpdate` - Command carries no fields
    /// * `NotFound` - User does not exist
    /// * `EmailAlreadyExists` - New email is already registered
    /// * `Hashing` - Password hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn update_profile(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<Profile, UserError>;

    /// Delete the given user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist (including a repeated delete)
    /// * `DatabaseError` - Database operation failed
    async fn delete_profile(&self, id: &UserId) -> Result<(), UserError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Returns
    /// Created user entity with its storage-assigned id
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: NewUser) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;

    /// Apply column changes to an existing user.
    ///
    /// # Returns
    /// Updated user entity
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `EmailAlreadyExists` - New email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, id: &UserId, changes: UserChanges) -> Result<User, UserError>;

    /// Remove user from storage.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &UserId) -> Result<(), UserError>;
}
