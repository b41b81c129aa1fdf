use crate::error::BoardError;
use uuid::Uuid;

/// Hash a competitor password into an argon2 encoded string with a fresh
/// random salt. Runs on the blocking pool.
pub async fn hash_password(password: String) -> Result<String, BoardError> {
    let hashed = tokio::task::spawn_blocking(move || {
        let salt = Uuid::new_v4();
        let config = argon2::Config::default();
        argon2::hash_encoded(password.as_bytes(), salt.as_bytes(), &config)
    })
    .await??;
    Ok(hashed)
}
