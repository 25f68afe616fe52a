use argon2::{
    password_hash::SaltString, Algorithm, Argon2, Params, PasswordHash, PasswordHasher,
    PasswordVerifier, Version,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::types::db::user::{self, Entity as User};
use crate::types::internal::complaint::Role;

/// CredentialStore manages user accounts and password verification
pub struct CredentialStore {
    db: DatabaseConnection,
    password_pepper: String,
}

impl CredentialStore {
    /// Create a new CredentialStore with the given database connection and
    /// password pepper (secret key mixed into every hash)
    pub fn new(db: DatabaseConnection, password_pepper: String) -> Self {
        Self {
            db,
            password_pepper,
        }
    }

    fn argon2(&self) -> Result<Argon2<'_>, InternalError> {
        Argon2::new_with_secret(
            self.password_pepper.as_bytes(),
            Algorithm::Argon2id,
            Version::V0x13,
            Params::default(),
        )
        .map_err(|e| InternalError::crypto("argon2_init", e.to_string()))
    }

    /// Add a new user with the given role
    ///
    /// # Returns
    /// * `Ok(String)` - The user_id (UUID) of the created user
    /// * `Err(InternalError::DuplicateUsername)` if the username is taken
    pub async fn add_user(
        &self,
        username: String,
        password: String,
        role: Role,
    ) -> Result<String, InternalError> {
        let existing = User::find()
            .filter(user::Column::Username.eq(&username))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_user_by_username", e))?;
        if existing.is_some() {
            return Err(InternalError::DuplicateUsername(username));
        }

        let user_id = Uuid::new_v4().to_string();
        let salt = SaltString::generate(&mut rand_core::OsRng);
        let password_hash = self
            .argon2()?
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| InternalError::crypto("hash_password", e.to_string()))?
            .to_string();

        let new_user = user::ActiveModel {
            id: Set(user_id.clone()),
            username: Set(username.clone()),
            password_hash: Set(password_hash),
            role: Set(role.as_str().to_string()),
            created_at: Set(Utc::now().timestamp()),
        };
        new_user.insert(&self.db).await.map_err(|e| {
            // Unique constraint race between the existence check and insert
            if e.to_string().contains("UNIQUE") {
                InternalError::DuplicateUsername(username)
            } else {
                InternalError::database("insert_user", e)
            }
        })?;

        Ok(user_id)
    }

    /// Verify user credentials and return (user_id, role) on success
    ///
    /// Lookup failure and password mismatch are indistinguishable to the
    /// caller; both report `InvalidCredentials`.
    pub async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(String, Role), InternalError> {
        let user = User::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_user_by_username", e))?
            .ok_or(InternalError::InvalidCredentials)?;

        let parsed_hash = PasswordHash::new(&user.password_hash)
            .map_err(|_| InternalError::InvalidCredentials)?;
        self.argon2()?
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| InternalError::InvalidCredentials)?;

        let role = Role::parse(&user.role)?;
        Ok((user.id, role))
    }

    /// Fetch a user by id
    pub async fn find_by_id(&self, id: &str) -> Result<Option<user::Model>, InternalError> {
        User::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_user", e))
    }
}
