// API-key authentication.
//
// Clients send `X-API-Key: <key_id>.<secret>`. The key id locates the row
// in `api_keys`; the secret is verified against its argon2 hash. Only the
// hash is ever stored.

use crate::core::AppError;
use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use argon2::{Argon2, PasswordHash, PasswordVerifier};
use futures_util::future::LocalBoxFuture;
use sqlx::MySqlPool;
use std::future::{ready, Ready};
use std::rc::Rc;

/// API key authentication middleware
pub struct ApiKeyAuth {
    pool: MySqlPool,
}

impl ApiKeyAuth {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ApiKeyAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = ApiKeyAuthMiddleware<S>;
    type Future = Ready<std::result::Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ApiKeyAuthMiddleware {
            service: Rc::new(service),
            pool: self.pool.clone(),
        }))
    }
}

pub struct ApiKeyAuthMiddleware<S> {
    service: Rc<S>,
    pool: MySqlPool,
}

impl<S, B> Service<ServiceRequest> for ApiKeyAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, std::result::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let svc = self.service.clone();
        let pool = self.pool.clone();

        Box::pin(async move {
            // The liveness probe stays open
            if req.path() == "/health" || req.path() == "/" {
                return svc.call(req).await;
            }

            let api_key = req
                .headers()
                .get("X-API-Key")
                .and_then(|h| h.to_str().ok())
                .ok_or_else(|| Error::from(AppError::unauthorized("Missing X-API-Key header")))?;

            let record = authenticate(&pool, api_key).await.map_err(Error::from)?;

            tracing::debug!(key_id = %record.id, label = %record.label, "authenticated");
            req.extensions_mut().insert(record);

            svc.call(req).await
        })
    }
}

/// The `api_keys` row an authenticated request ran under
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ApiKeyRecord {
    pub id: String,
    /// Who the key was issued to (a counter staff member or the front office app)
    pub label: String,
    pub key_hash: String,
    pub is_active: bool,
}

async fn authenticate(pool: &MySqlPool, api_key: &str) -> crate::core::Result<ApiKeyRecord> {
    let (key_id, secret) = api_key
        .split_once('.')
        .ok_or_else(|| AppError::unauthorized("Malformed API key"))?;

    let record = sqlx::query_as::<_, ApiKeyRecord>(
        r#"
        SELECT id, label, key_hash, is_active
        FROM api_keys
        WHERE id = ?
        LIMIT 1
        "#,
    )
    .bind(key_id)
    .fetch_optional(pool)
    .await
    .map_err(AppError::Database)?
    .ok_or_else(|| AppError::unauthorized("Invalid API key"))?;

    if !record.is_active {
        return Err(AppError::unauthorized("API key is inactive"));
    }

    if !verify_api_key(secret, &record.key_hash)? {
        return Err(AppError::unauthorized("Invalid API key"));
    }

    // Update last_used_at timestamp (fire and forget)
    let _ = sqlx::query("UPDATE api_keys SET last_used_at = NOW() WHERE id = ?")
        .bind(&record.id)
        .execute(pool)
        .await;

    Ok(record)
}

/// Hash an API key secret for storage, used when issuing keys
pub fn hash_api_key(secret: &str) -> crate::core::Result<String> {
    use argon2::password_hash::{rand_core::OsRng, PasswordHasher, SaltString};

    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(secret.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::internal(format!("Failed to hash API key: {}", e)))
}

/// Verify an API key secret against its stored hash
pub fn verify_api_key(secret: &str, hash: &str) -> crate::core::Result<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::internal(format!("Invalid hash format: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(secret.as_bytes(), &parsed_hash)
        .is_ok())
}
