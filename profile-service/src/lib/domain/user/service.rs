use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::user::models::AuthenticatedSession;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::Profile;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::UserChanges;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
/// Holds no mutable state: the repository and the authenticator are shared
/// read-only between requests.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and token issuance, bound to the signing secret
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: CreateUserCommand) -> Result<Profile, UserError> {
        let password_hash = self
            .authenticator
            .hash_password(command.password.expose())?;

        let new_user = NewUser {
            email: command.email,
            name: command.name,
            password_hash,
        };

        let created_user = self.repository.create(new_user).await?;
        tracing::info!(user_id = %created_user.id, "User registered");

        Ok(created_user.into())
    }

    async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedSession, UserError> {
        // A malformed email cannot match a stored user; it still goes through
        // password verification below so the response costs the same.
        let user = match EmailAddress::new(email.to_string()) {
            Ok(email) => self.repository.find_by_email(&email).await?,
            Err(_) => None,
        };

        self.authenticator.verify_credentials(
            password,
            user.as_ref().map(|user| user.password_hash.as_str()),
        )?;

        let user = user.ok_or(UserError::InvalidCredentials)?;
        let token = self.authenticator.issue_token(user.id, Utc::now())?;
        tracing::info!(user_id = %user.id, "User authenticated");

        Ok(AuthenticatedSession {
            profile: user.into(),
            token,
        })
    }

    async fn get_profile(&self, id: &UserId) -> Result<Profile, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .map(Profile::from)
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn update_profile(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<Profile, UserError> {
        if command.is_empty() {
            return Err(UserError::EmptyUpdate);
        }

        let password_hash = command
            .password
            .map(|password| self.authenticator.hash_password(password.expose()))
            .transpose()?;

        let changes = UserChanges {
            email: command.email,
            name: command.name,
            password_hash,
        };

        let updated_user = self.repository.update(id, changes).await?;
        tracing::info!(user_id = %id, "User updated");

        Ok(updated_user.into())
    }

    async fn delete_profile(&self, id: &UserId) -> Result<(), UserError> {
        self.repository.delete(id).await?;
        tracing::info!(user_id = %id, "User deleted");

        Ok(())
    }
}
