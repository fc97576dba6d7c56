use argon2::password_hash::{PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use rand::rngs::OsRng;

use super::dto::{LoginRequest, RegistrationRequest};
use super::model::{NewUser, User};
use crate::error::AppError;
use crate::routes::middleware_auth::{SessionKeys, SessionToken};
use crate::routes::tasks::model::TaskCategoryDetail;
use crate::store::Store;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, AppError> {
    let parsed = PasswordHash::new(password_hash)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

pub async fn register(store: &dyn Store, payload: RegistrationRequest) -> Result<User, AppError> {
    let password_hash = hash_password(&payload.password)?;

    store
        .create_user(&NewUser {
            fullname: payload.fullname,
            email: payload.email,
            password_hash,
        })
        .await
}

/// Checks the credentials and mints a session token for the user's email.
pub async fn login(
    store: &dyn Store,
    keys: &SessionKeys,
    payload: &LoginRequest,
) -> Result<SessionToken, AppError> {
    let user = store
        .get_user_by_email(&payload.email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !verify_password(&payload.password, &user.password_hash)? {
        return Err(AppError::InvalidCredentials);
    }

    keys.issue(&user.email)
}

pub async fn task_categories(store: &dyn Store) -> Result<Vec<TaskCategoryDetail>, AppError> {
    store.list_task_categories().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{MemoryStore, TEST_SECRET};

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("hunter22").unwrap();
        assert_ne!(hash, "hunter22");
        assert!(verify_password("hunter22", &hash).unwrap());
        assert!(!verify_password("hunter23", &hash).unwrap());
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let store = MemoryStore::default();
        let keys = SessionKeys::new(TEST_SECRET);

        let user = register(
            &store,
            RegistrationRequest {
                fullname: "Ada Lovelace".to_string(),
                email: "ada@example.com".to_string(),
                password: "engine".to_string(),
            },
        )
        .await
        .unwrap();
        assert_ne!(user.password_hash, "engine");

        let token = login(
            &store,
            &keys,
            &LoginRequest {
                email: "ada@example.com".to_string(),
                password: "engine".to_string(),
            },
        )
        .await
        .unwrap();

        let claims = keys.verify(&token.value).unwrap();
        assert_eq!(claims.email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_login_unknown_user() {
        let store = MemoryStore::default();
        let keys = SessionKeys::new(TEST_SECRET);

        let err = login(
            &store,
            &keys,
            &LoginRequest {
                email: "nobody@example.com".to_string(),
                password: "x".to_string(),
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let store = MemoryStore::default();
        let request = || RegistrationRequest {
            fullname: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "engine".to_string(),
        };

        register(&store, request()).await.unwrap();
        let err = register(&store, request()).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }
}
