pub mod hashmap_session_store;
pub mod hashmap_user_store;
pub mod hashmap_verification_code_store;
pub mod password_hash;
pub mod postgres_session_store;
pub mod postgres_user_store;
pub mod postgres_verification_code_store;
