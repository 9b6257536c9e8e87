//! User service for registration, login and account management
//!
//! Password hashing and verification run on the blocking thread pool.

use crate::auth::{JwtService, PasswordService};
use crate::error::ApiError;
use crate::repositories::{NewUser, UserChanges, UserRecord, UserRepository};
use blog_api_shared::{
    AuthError, LoginRequest, LoginResponse, RegisterUserRequest, UpdateUserRequest, UserResponse,
};
use tracing::info;

/// User service
pub struct UserService;

impl UserService {
    /// Register a new user
    pub async fn register<R: UserRepository + ?Sized>(
        repo: &R,
        req: RegisterUserRequest,
    ) -> Result<UserResponse, ApiError> {
        if repo.find_user_by_email(&req.email).await?.is_some() {
            return Err(ApiError::Conflict("Email already registered".to_string()));
        }

        let password_hash = PasswordService::hash_async(req.password).await?;

        // The unique index still guards against a concurrent registration
        let user = repo
            .create_user(NewUser {
                name: req.name,
                email: req.email,
                password_hash,
            })
            .await?;

        info!(user_id = user.id, "User registered");
        Ok(user.into())
    }

    /// Exchange email and password for a token
    ///
    /// An unknown email and a wrong password produce the same error.
    pub async fn login<R: UserRepository + ?Sized>(
        repo: &R,
        jwt: &JwtService,
        req: LoginRequest,
    ) -> Result<LoginResponse, ApiError> {
        let Some(user) = repo.find_user_by_email(&req.email).await? else {
            // Pay for a bcrypt comparison anyway so timing matches a wrong password
            PasswordService::verify_missing_async(req.password).await?;
            return Err(AuthError::InvalidCredentials.into());
        };

        let valid = PasswordService::verify_async(req.password, user.password_hash.clone()).await?;
        if !valid {
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = jwt.issue(user.id)?;

        info!(user_id = user.id, "User logged in");
        Ok(LoginResponse {
            token,
            user: user.into(),
        })
    }

    pub async fn list<R: UserRepository + ?Sized>(repo: &R) -> Result<Vec<UserResponse>, ApiError> {
        let users = repo.list_users().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    pub async fn get<R: UserRepository + ?Sized>(repo: &R, id: i64) -> Result<UserResponse, ApiError> {
        Ok(Self::find(repo, id).await?.into())
    }

    /// Update the caller's own account
    pub async fn update<R: UserRepository + ?Sized>(
        repo: &R,
        actor: i64,
        id: i64,
        req: UpdateUserRequest,
    ) -> Result<UserResponse, ApiError> {
        Self::find_owned(repo, actor, id).await?;

        if let Some(email) = &req.email {
            if let Some(existing) = repo.find_user_by_email(email).await? {
                if existing.id != id {
                    return Err(ApiError::Conflict("Email already registered".to_string()));
                }
            }
        }

        let password_hash = match req.password {
            Some(password) => Some(PasswordService::hash_async(password).await?),
            None => None,
        };

        let changes = UserChanges {
            name: req.name,
            email: req.email,
            password_hash,
        };
        let user = repo
            .update_user(id, changes)
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        info!(user_id = id, "User updated");
        Ok(user.into())
    }

    /// Delete the caller's own account
    pub async fn delete<R: UserRepository + ?Sized>(
        repo: &R,
        actor: i64,
        id: i64,
    ) -> Result<(), ApiError> {
        Self::find_owned(repo, actor, id).await?;

        if !repo.delete_user(id).await? {
            return Err(ApiError::NotFound("User not found".to_string()));
        }

        info!(user_id = id, "User deleted");
        Ok(())
    }

    async fn find<R: UserRepository + ?Sized>(repo: &R, id: i64) -> Result<UserRecord, ApiError> {
        repo.find_user_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))
    }

    async fn find_owned<R: UserRepository + ?Sized>(
        repo: &R,
        actor: i64,
        id: i64,
    ) -> Result<UserRecord, ApiError> {
        let user = Self::find(repo, id).await?;
        if user.id != actor {
            return Err(ApiError::Forbidden(
                "You can only modify your own account".to_string(),
            ));
        }
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::LocalRepository;
    use std::time::Instant;

    fn register_request(email: &str, password: &str) -> RegisterUserRequest {
        RegisterUserRequest {
            name: "Ada Lovelace".to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    fn login_request(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_stores_hash_not_plaintext() {
        let repo = LocalRepository::new();
        let user = UserService::register(&repo, register_request("ada@example.com", "pw"))
            .await
            .unwrap();

        let stored = repo.find_user_by_id(user.id).await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "pw");
        assert!(PasswordService::verify("pw", &stored.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_register_duplicate_email_conflicts() {
        let repo = LocalRepository::new();
        UserService::register(&repo, register_request("ada@example.com", "pw"))
            .await
            .unwrap();
        let result = UserService::register(&repo, register_request("ada@example.com", "pw")).await;
        assert!(matches!(result, Err(ApiError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_login_flow() {
        let repo = LocalRepository::new();
        let jwt = JwtService::new("service-secret", 3600);
        let registered = UserService::register(&repo, register_request("ada@example.com", "pw"))
            .await
            .unwrap();

        let response = UserService::login(&repo, &jwt, login_request("ada@example.com", "pw"))
            .await
            .unwrap();
        assert_eq!(response.user, registered);
        assert_eq!(jwt.verify(&response.token), Ok(registered.id));
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let repo = LocalRepository::new();
        let jwt = JwtService::new("service-secret", 3600);
        UserService::register(&repo, register_request("ada@example.com", "pw"))
            .await
            .unwrap();

        let unknown = UserService::login(&repo, &jwt, login_request("bob@example.com", "pw"))
            .await
            .unwrap_err();
        let wrong = UserService::login(&repo, &jwt, login_request("ada@example.com", "nope"))
            .await
            .unwrap_err();

        assert_eq!(unknown.to_string(), wrong.to_string());
        assert!(matches!(unknown, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_unknown_email_costs_a_bcrypt_comparison() {
        let repo = LocalRepository::new();
        let jwt = JwtService::new("service-secret", 3600);
        UserService::register(&repo, register_request("ada@example.com", "pw"))
            .await
            .unwrap();
        // First unknown-email login also builds the dummy hash
        let _ = UserService::login(&repo, &jwt, login_request("warm@example.com", "pw")).await;

        let started = Instant::now();
        let _ = UserService::login(&repo, &jwt, login_request("ada@example.com", "nope")).await;
        let wrong_password = started.elapsed();

        let started = Instant::now();
        let _ = UserService::login(&repo, &jwt, login_request("bob@example.com", "pw")).await;
        let unknown_email = started.elapsed();

        assert!(
            unknown_email * 4 >= wrong_password,
            "unknown email {:?} vs wrong password {:?}",
            unknown_email,
            wrong_password
        );
    }

    #[tokio::test]
    async fn test_login_with_corrupt_hash_is_internal_error() {
        let repo = LocalRepository::new();
        let jwt = JwtService::new("service-secret", 3600);
        repo.create_user(NewUser {
            name: "Broken".to_string(),
            email: "broken@example.com".to_string(),
            password_hash: "not-a-hash".to_string(),
        })
        .await
        .unwrap();

        let result = UserService::login(&repo, &jwt, login_request("broken@example.com", "pw")).await;
        assert!(matches!(result, Err(ApiError::Internal(_))));
    }

    #[tokio::test]
    async fn test_update_other_account_forbidden() {
        let repo = LocalRepository::new();
        let ada = UserService::register(&repo, register_request("ada@example.com", "pw"))
            .await
            .unwrap();
        let bob = UserService::register(&repo, register_request("bob@example.com", "pw"))
            .await
            .unwrap();

        let result = UserService::update(&repo, bob.id, ada.id, UpdateUserRequest::default()).await;
        assert!(matches!(result, Err(ApiError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_update_to_taken_email_conflicts() {
        let repo = LocalRepository::new();
        let ada = UserService::register(&repo, register_request("ada@example.com", "pw"))
            .await
            .unwrap();
        UserService::register(&repo, register_request("bob@example.com", "pw"))
            .await
            .unwrap();

        let req = UpdateUserRequest {
            email: Some("bob@example.com".to_string()),
            ..Default::default()
        };
        let result = UserService::update(&repo, ada.id, ada.id, req).await;
        assert!(matches!(result, Err(ApiError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_update_password_allows_new_login() {
        let repo = LocalRepository::new();
        let jwt = JwtService::new("service-secret", 3600);
        let ada = UserService::register(&repo, register_request("ada@example.com", "old"))
            .await
            .unwrap();

        let req = UpdateUserRequest {
            password: Some("new".to_string()),
            ..Default::default()
        };
        UserService::update(&repo, ada.id, ada.id, req).await.unwrap();

        assert!(UserService::login(&repo, &jwt, login_request("ada@example.com", "old"))
            .await
            .is_err());
        assert!(UserService::login(&repo, &jwt, login_request("ada@example.com", "new"))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_delete_missing_user_is_not_found() {
        let repo = LocalRepository::new();
        let result = UserService::delete(&repo, 1, 1).await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }
}
