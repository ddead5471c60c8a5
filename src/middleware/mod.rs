pub mod auth;
pub mod request_id;

pub use auth::{hash_api_key, verify_api_key, ApiKeyAuth, ApiKeyRecord};
pub use request_id::RequestId;
