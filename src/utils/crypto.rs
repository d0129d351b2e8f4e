use super::error::AppError;
use super::thread_pool::spawn_hash_blocking;

/// Hashes a password with bcrypt on the hash pool
pub async fn hash_password(plain: &str, cost: u32) -> Result<String, AppError> {
    let plain = plain.to_string();
    spawn_hash_blocking(move || bcrypt::hash(plain, cost))
        .await
        .map_err(|e| AppError::HashingError(format!("hash task failed: {}", e)))?
        .map_err(AppError::from)
}

/// Checks a password against a stored bcrypt hash
pub async fn verify_password(plain: &str, hashed: &str) -> Result<bool, AppError> {
    let plain = plain.to_string();
    let hashed = hashed.to_string();
    spawn_hash_blocking(move || bcrypt::verify(plain, &hashed))
        .await
        .map_err(|e| AppError::HashingError(format!("verify task failed: {}", e)))?
        .map_err(AppError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_is_not_plaintext_and_verifies() {
        let hashed = hash_password("hunter2", 4).await.unwrap();
        assert_ne!(hashed, "hunter2");
        assert!(hashed.starts_with("$2"));

        assert!(verify_password("hunter2", &hashed).await.unwrap());
        assert!(!verify_password("hunter3", &hashed).await.unwrap());
    }

    #[tokio::test]
    async fn verify_rejects_malformed_hash() {
        let result = verify_password("hunter2", "not-a-bcrypt-hash").await;
        assert!(matches!(result, Err(AppError::HashingError(_))));
    }
}
