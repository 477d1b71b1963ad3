//! Account lifecycle: registration, login, profile lookup and erasure.

use tracing::{info, warn};
use trainlog_core::error::{TrainlogError, TrainlogResult};
use trainlog_core::models::user::{CreateUser, User};
use trainlog_core::repository::UserRepository;
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::password;
use crate::token;

const MAX_NAME_LENGTH: usize = 100;

#[derive(Debug)]
pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub name: String,
    /// Height in centimetres.
    pub height: Option<f64>,
}

#[derive(Debug)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Successful registration or login.
#[derive(Debug)]
pub struct LoginOutput {
    /// Signed bearer token.
    pub access_token: String,
    /// Token lifetime in seconds.
    pub expires_in: u64,
    pub user: User,
}

/// Authentication service.
///
/// Generic over the user repository so that the auth layer has no
/// dependency on the database crate.
pub struct AuthService<U: UserRepository> {
    user_repo: U,
    config: AuthConfig,
}

impl<U: UserRepository> AuthService<U> {
    pub fn new(user_repo: U, config: AuthConfig) -> Self {
        Self { user_repo, config }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Create an account and sign the new user in.
    ///
    /// Fails `Conflict` when the email is already registered.
    pub async fn register(&self, input: RegisterInput) -> TrainlogResult<LoginOutput> {
        let email = normalize_email(&input.email)?;
        let name = input.name.trim().to_string();
        if name.is_empty() || name.chars().count() > MAX_NAME_LENGTH {
            return Err(TrainlogError::validation(format!(
                "name must be 1-{MAX_NAME_LENGTH} characters"
            )));
        }
        if input.password.chars().count() < self.config.min_password_length {
            return Err(TrainlogError::validation(format!(
                "password must be at least {} characters",
                self.config.min_password_length
            )));
        }
        if input
            .height
            .is_some_and(|h| !(h.is_finite() && h > 0.0 && h < 300.0))
        {
            return Err(TrainlogError::validation("height must be between 0 and 300"));
        }

        if self.user_repo.exists_by_email(&email).await? {
            return Err(TrainlogError::conflict("email is already registered"));
        }

        let password_hash = password::hash_password(&input.password, self.config.pepper.as_deref())?;
        let user = self
            .user_repo
            .create(CreateUser {
                email,
                password_hash,
                name,
                height: input.height,
            })
            .await?;

        info!(user_id = %user.id, "Registered user");
        self.sign_in(user)
    }

    /// Exchange email + password for a bearer token.
    ///
    /// Unknown email and wrong password are indistinguishable.
    pub async fn login(&self, input: LoginInput) -> TrainlogResult<LoginOutput> {
        let email = normalize_email(&input.email).map_err(|_| AuthError::InvalidCredentials)?;

        let user = match self.user_repo.get_by_email(&email).await {
            Ok(u) => u,
            Err(TrainlogError::NotFound { .. }) => {
                warn!("Login attempt for unknown email");
                return Err(AuthError::InvalidCredentials.into());
            }
            Err(e) => return Err(e),
        };

        let valid = password::verify_password(
            &input.password,
            &user.password_hash,
            self.config.pepper.as_deref(),
        )?;
        if !valid {
            warn!(user_id = %user.id, "Login rejected: wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        self.sign_in(user)
    }

    pub async fn current_user(&self, user_id: Uuid) -> TrainlogResult<User> {
        self.user_repo.get_by_id(user_id).await
    }

    /// Erase the account and everything it owns in one transaction.
    pub async fn delete_account(&self, user_id: Uuid) -> TrainlogResult<()> {
        self.user_repo.get_by_id(user_id).await?;
        self.user_repo.delete_with_all_data(user_id).await?;
        info!(user_id = %user_id, "Deleted account");
        Ok(())
    }

    fn sign_in(&self, user: User) -> TrainlogResult<LoginOutput> {
        let access_token = token::issue_access_token(user.id, &user.email, &self.config)?;
        Ok(LoginOutput {
            access_token,
            expires_in: self.config.token_lifetime_secs,
            user,
        })
    }
}

fn normalize_email(raw: &str) -> TrainlogResult<String> {
    let email = raw.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(email),
        _ => Err(TrainlogError::validation(format!("invalid email: {raw:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emails_are_normalized() {
        assert_eq!(
            normalize_email("  Alice@Example.COM ").unwrap(),
            "alice@example.com"
        );
        assert!(normalize_email("no-at-sign").is_err());
        assert!(normalize_email("@example.com").is_err());
        assert!(normalize_email("a@localhost").is_err());
    }
}
