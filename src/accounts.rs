//! Account signup and login.
//!
//! Plaintext passwords never reach a [`UserStore`]: [`Accounts::create`]
//! hashes before inserting, and [`Accounts::verify`] compares against the
//! stored hash. Login failures are deliberately uniform: an unknown email and
//! a wrong password both return [`ServiceError::InvalidCredential`], and both
//! pay for one Argon2 verification.

use std::sync::Arc;

use crate::error::ServiceError;
use crate::models::{NewUser, User};
use crate::password::{hash_password, verify_dummy, verify_password};
use crate::store::UserStore;

#[derive(Clone)]
pub struct Accounts {
    store: Arc<dyn UserStore>,
}

impl Accounts {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Register a new account.
    ///
    /// Fails with `Validation` if any field is blank and with
    /// `DuplicateCredential` if the username or email is taken.
    pub async fn create(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, ServiceError> {
        let username = username.trim();
        let email = email.trim();
        if username.is_empty() || email.is_empty() || password.is_empty() {
            return Err(ServiceError::validation("All fields are required!"));
        }

        let user = self
            .store
            .insert_user(NewUser {
                username: username.to_string(),
                email: email.to_string(),
                password_hash: hash_password(password)?,
            })
            .await?;

        tracing::info!(username = %user.username, "user registered");
        Ok(user)
    }

    /// Check an email/password pair and return the matching account.
    pub async fn verify(&self, email: &str, password: &str) -> Result<User, ServiceError> {
        let Some(user) = self.store.find_user_by_email(email.trim()).await? else {
            verify_dummy(password);
            tracing::debug!("login rejected: unknown email");
            return Err(ServiceError::InvalidCredential);
        };

        match verify_password(password, &user.password_hash) {
            Ok(true) => Ok(user),
            Ok(false) => {
                tracing::debug!(username = %user.username, "login rejected: wrong password");
                Err(ServiceError::InvalidCredential)
            }
            Err(e) => {
                tracing::warn!(username = %user.username, error = %e, "stored password hash is unreadable");
                Err(ServiceError::InvalidCredential)
            }
        }
    }
}
