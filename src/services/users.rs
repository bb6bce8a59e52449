/*
 * Responsibility
 * - signup / login (password 検証 → token 発行)
 * - 自分自身の user レコードの取得/更新/削除 (他人の id は NotFound)
 * - bcrypt は CPU を食うので spawn_blocking に逃がす
 */
use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::repos::RepoError;
use crate::repos::user_repo::{NewUser, UserChanges, UserRepo, UserRow};
use crate::services::auth::{Identity, IssuedToken, PasswordHasher, TokenService};
use crate::services::error::{DomainError, Resource, ServiceError, ServiceResult};
use crate::services::ownership::OwnershipGuard;
use crate::services::validation;

const USER_GUARD: OwnershipGuard = OwnershipGuard::new(Resource::User);

const BAD_CREDENTIALS: DomainError = DomainError::Unauthorized("invalid email or password");

// Verified against on unknown emails so both login failures cost one bcrypt check.
const DECOY_PASSWORD: &str = "decoy password for unknown accounts";

#[derive(Debug, Clone)]
pub struct SignupInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// A user together with a freshly issued bearer token.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: UserRow,
    pub token: IssuedToken,
}

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepo>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<TokenService>,
    decoy_hash: Arc<OnceCell<String>>,
}

impl std::fmt::Debug for UserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService")
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}

fn identity_of(user: &UserRow) -> Identity {
    Identity {
        id: user.id,
        name: user.name.clone(),
        email: user.email.clone(),
    }
}

fn duplicate_email(e: RepoError) -> ServiceError {
    match e {
        RepoError::Conflict => DomainError::Duplicate("email").into(),
        other => other.into(),
    }
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepo>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
            decoy_hash: Arc::new(OnceCell::new()),
        }
    }

    pub async fn signup(&self, input: SignupInput) -> ServiceResult<Session> {
        let name = validation::name(&input.name)?;
        let email = validation::email(&input.email)?;
        validation::password(&input.password)?;

        if self.users.fetch_by_email(&email).await?.is_some() {
            return Err(DomainError::Duplicate("email").into());
        }

        let password_hash = self.hash_password(input.password).await?;
        let user_id = self
            .users
            .insert(NewUser {
                name,
                email,
                password_hash,
            })
            .await
            .map_err(duplicate_email)?;
        tracing::info!(user_id, "user signed up");

        let user = self.get(user_id, user_id).await?;
        self.session(user)
    }

    pub async fn login(&self, email: &str, password: &str) -> ServiceResult<Session> {
        // Unknown email and wrong password are indistinguishable to the caller.
        let Ok(email) = validation::email(email) else {
            return Err(BAD_CREDENTIALS.into());
        };
        let Some(user) = self.users.fetch_by_email(&email).await? else {
            tracing::debug!("login for unknown email");
            let decoy = self.decoy_hash().await?;
            self.verify_password(password.to_string(), decoy).await?;
            return Err(BAD_CREDENTIALS.into());
        };

        if !self
            .verify_password(password.to_string(), user.password_hash.clone())
            .await?
        {
            tracing::debug!(user_id = user.id, "login with wrong password");
            return Err(BAD_CREDENTIALS.into());
        }

        self.session(user)
    }

    pub async fn get(&self, caller_id: i64, user_id: i64) -> ServiceResult<UserRow> {
        USER_GUARD
            .fetch(caller_id, user_id, |id| self.users.fetch(id))
            .await
    }

    pub async fn update(
        &self,
        caller_id: i64,
        user_id: i64,
        patch: UserPatch,
    ) -> ServiceResult<UserRow> {
        if patch.name.is_none() && patch.email.is_none() && patch.password.is_none() {
            return Err(DomainError::InvalidInput("nothing to update").into());
        }

        let name = patch.name.as_deref().map(validation::name).transpose()?;
        let email = patch.email.as_deref().map(validation::email).transpose()?;
        if let Some(password) = &patch.password {
            validation::password(password)?;
        }

        self.get(caller_id, user_id).await?;

        let password_hash = match patch.password {
            Some(password) => Some(self.hash_password(password).await?),
            None => None,
        };

        let affected = self
            .users
            .update_fields(
                user_id,
                UserChanges {
                    name,
                    email,
                    password_hash,
                },
            )
            .await
            .map_err(duplicate_email)?;
        USER_GUARD.affected(affected)?;

        self.get(caller_id, user_id).await
    }

    pub async fn delete(&self, caller_id: i64, user_id: i64) -> ServiceResult<()> {
        self.get(caller_id, user_id).await?;

        let affected = self.users.delete(user_id).await?;
        USER_GUARD.affected(affected)?;
        tracing::info!(user_id, "user deleted");
        Ok(())
    }

    fn session(&self, user: UserRow) -> ServiceResult<Session> {
        let token = self
            .tokens
            .issue_for(&identity_of(&user))
            .map_err(|e| ServiceError::internal("token issuance failed", e))?;

        Ok(Session { user, token })
    }

    async fn decoy_hash(&self) -> ServiceResult<String> {
        self.decoy_hash
            .get_or_try_init(|| self.hash_password(DECOY_PASSWORD.to_string()))
            .await
            .cloned()
    }

    async fn hash_password(&self, password: String) -> ServiceResult<String> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| ServiceError::internal("password hashing task failed", e))?
            .map_err(|e| ServiceError::internal("password hashing failed", e))
    }

    async fn verify_password(&self, password: String, hash: String) -> ServiceResult<bool> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| ServiceError::internal("password verification task failed", e))?
            .map_err(|e| ServiceError::internal("password verification failed", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::memory::MemoryStore;
    use crate::services::auth::BcryptHasher;
    use crate::services::auth::password::PasswordHashError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use chrono::Duration;

    fn service(store: &MemoryStore) -> UserService {
        UserService::new(
            Arc::new(store.clone()),
            Arc::new(BcryptHasher::new(4)),
            Arc::new(TokenService::new("user-service-test-secret", Duration::hours(1)).unwrap()),
        )
    }

    fn signup_input(email: &str) -> SignupInput {
        SignupInput {
            name: "Alice".to_string(),
            email: email.to_string(),
            password: "correct horse".to_string(),
        }
    }

    fn domain<T: std::fmt::Debug>(result: ServiceResult<T>) -> DomainError {
        match result {
            Err(ServiceError::Domain(e)) => e,
            other => panic!("expected a domain error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn signup_issues_a_token_for_the_new_user() {
        let store = MemoryStore::new();
        let users = service(&store);

        let session = users.signup(signup_input("Alice@Example.com")).await.unwrap();
        assert_eq!(session.user.email, "alice@example.com");
        assert_ne!(session.user.password_hash, "correct horse");

        let claims = users.tokens.verify(&session.token.token).unwrap();
        assert_eq!(claims.user_id, session.user.id);
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.name, "Alice");
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let store = MemoryStore::new();
        let users = service(&store);
        users.signup(signup_input("alice@example.com")).await.unwrap();

        let again = users.signup(signup_input(" ALICE@example.com")).await;
        assert_eq!(domain(again), DomainError::Duplicate("email"));
    }

    #[tokio::test]
    async fn login_checks_the_password() {
        let store = MemoryStore::new();
        let users = service(&store);
        let created = users.signup(signup_input("alice@example.com")).await.unwrap();

        let session = users
            .login("alice@example.com", "correct horse")
            .await
            .unwrap();
        assert_eq!(session.user.id, created.user.id);

        let wrong = domain(users.login("alice@example.com", "battery staple").await);
        let unknown = domain(users.login("nobody@example.com", "correct horse").await);
        assert_eq!(wrong, BAD_CREDENTIALS);
        assert_eq!(wrong, unknown);
    }

    #[derive(Default)]
    struct CountingHasher {
        verifications: AtomicUsize,
    }

    impl PasswordHasher for CountingHasher {
        fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
            BcryptHasher::new(4).hash(password)
        }

        fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHashError> {
            self.verifications.fetch_add(1, Ordering::SeqCst);
            BcryptHasher::new(4).verify(password, hash)
        }
    }

    #[tokio::test]
    async fn unknown_email_costs_the_same_password_check_as_a_wrong_password() {
        let hasher = Arc::new(CountingHasher::default());
        let users = UserService::new(
            Arc::new(MemoryStore::new()),
            hasher.clone(),
            Arc::new(TokenService::new("user-service-test-secret", Duration::hours(1)).unwrap()),
        );
        users.signup(signup_input("alice@example.com")).await.unwrap();
        let count = || hasher.verifications.load(Ordering::SeqCst);

        let before = count();
        let wrong = domain(users.login("alice@example.com", "battery staple").await);
        assert_eq!(count() - before, 1);

        for _ in 0..2 {
            let before = count();
            let unknown = domain(users.login("nobody@example.com", "battery staple").await);
            assert_eq!(count() - before, 1);
            assert_eq!(unknown, wrong);
        }
    }

    #[tokio::test]
    async fn users_only_reach_their_own_record() {
        let store = MemoryStore::new();
        let users = service(&store);
        let alice = users.signup(signup_input("alice@example.com")).await.unwrap().user;
        let bob = users.signup(signup_input("bob@example.com")).await.unwrap().user;

        assert_eq!(
            domain(users.get(bob.id, alice.id).await),
            DomainError::NotFound(Resource::User)
        );
        assert_eq!(
            domain(
                users
                    .update(
                        bob.id,
                        alice.id,
                        UserPatch {
                            name: Some("Mallory".to_string()),
                            ..Default::default()
                        }
                    )
                    .await
            ),
            DomainError::NotFound(Resource::User)
        );
        assert_eq!(
            domain(users.delete(bob.id, alice.id).await),
            DomainError::NotFound(Resource::User)
        );
        assert_eq!(users.get(alice.id, alice.id).await.unwrap().name, "Alice");
    }

    #[tokio::test]
    async fn update_changes_password_and_rejects_taken_email() {
        let store = MemoryStore::new();
        let users = service(&store);
        let alice = users.signup(signup_input("alice@example.com")).await.unwrap().user;
        users.signup(signup_input("bob@example.com")).await.unwrap();

        let taken = users
            .update(
                alice.id,
                alice.id,
                UserPatch {
                    email: Some("bob@example.com".to_string()),
                    ..Default::default()
                },
            )
            .await;
        assert_eq!(domain(taken), DomainError::Duplicate("email"));

        users
            .update(
                alice.id,
                alice.id,
                UserPatch {
                    password: Some("a brand new secret".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(users.login("alice@example.com", "correct horse").await.is_err());
        assert!(
            users
                .login("alice@example.com", "a brand new secret")
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn delete_removes_the_account() {
        let store = MemoryStore::new();
        let users = service(&store);
        let alice = users.signup(signup_input("alice@example.com")).await.unwrap().user;

        users.delete(alice.id, alice.id).await.unwrap();
        assert_eq!(
            domain(users.get(alice.id, alice.id).await),
            DomainError::NotFound(Resource::User)
        );
        assert!(users.login("alice@example.com", "correct horse").await.is_err());
    }
}
