use crate::models::User;
use crate::repositories::UserRepository;
use crate::utils::{hash_password, verify_password, AppError};

/// Outcome of a login attempt
#[derive(Debug)]
pub enum LoginOutcome {
    Authenticated(User),
    UnknownEmail,
    WrongPassword,
}

/// Hashes the password and stores a new user
///
/// A taken email surfaces as `AppError::Conflict`.
pub async fn register(
    users: &dyn UserRepository,
    email: &str,
    password: &str,
    cost: u32,
) -> Result<User, AppError> {
    let hashed = hash_password(password, cost).await?;
    let user = users.create(email, &hashed).await?;

    log::info!("✅ User registered: {} ({})", user.email, user.id_hex());
    Ok(user)
}

/// Checks an email/password pair against the stored bcrypt hash
pub async fn login(
    users: &dyn UserRepository,
    email: &str,
    password: &str,
) -> Result<LoginOutcome, AppError> {
    let user = match users.find_by_email(email).await? {
        Some(user) => user,
        None => return Ok(LoginOutcome::UnknownEmail),
    };

    if verify_password(password, &user.password).await? {
        Ok(LoginOutcome::Authenticated(user))
    } else {
        Ok(LoginOutcome::WrongPassword)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::memory::MemoryUserRepository;

    #[tokio::test]
    async fn register_stores_hash_not_plaintext() {
        let users = MemoryUserRepository::default();

        let user = register(&users, "ana@example.com", "s3cret", 4).await.unwrap();
        assert_ne!(user.password, "s3cret");
        assert!(bcrypt::verify("s3cret", &user.password).unwrap());

        let stored = users.all();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].email, "ana@example.com");
        assert_ne!(stored[0].password, "s3cret");
    }

    #[tokio::test]
    async fn register_twice_is_conflict() {
        let users = MemoryUserRepository::default();
        register(&users, "ana@example.com", "one", 4).await.unwrap();

        let again = register(&users, "ana@example.com", "two", 4).await;
        assert!(matches!(again, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn login_outcomes() {
        let users = MemoryUserRepository::default();
        register(&users, "ana@example.com", "s3cret", 4).await.unwrap();

        assert!(matches!(
            login(&users, "ana@example.com", "s3cret").await.unwrap(),
            LoginOutcome::Authenticated(u) if u.email == "ana@example.com"
        ));
        assert!(matches!(
            login(&users, "ana@example.com", "wrong").await.unwrap(),
            LoginOutcome::WrongPassword
        ));
        assert!(matches!(
            login(&users, "bob@example.com", "s3cret").await.unwrap(),
            LoginOutcome::UnknownEmail
        ));
    }
}
