//! Session blobs in the key-value store.
//!
//! Sessions have no expiry: they persist until evicted by the store itself.

use tracing::debug;

use crate::customer::model::CustomerRecord;
use crate::error::{require_non_empty, ShopError, ShopResult};
use crate::store::SessionStore;

/// Arbitrary JSON session payload.
pub type SessionBlob = serde_json::Value;

/// Get a session by key. A missing key is `Ok(None)`.
pub async fn get_session(store: &dyn SessionStore, key: &str) -> ShopResult<Option<SessionBlob>> {
    require_non_empty("key", key)?;
    store.get(key).await
}

/// Save a session blob under a key.
pub async fn save_session(store: &dyn SessionStore, key: &str, blob: &SessionBlob) -> ShopResult<()> {
    require_non_empty("key", key)?;
    if blob.is_null() {
        return Err(ShopError::validation("No session data provided"));
    }

    store.set(key, blob).await?;
    debug!(key, "Session saved");
    Ok(())
}

/// Save the customer record as the session for their name.
pub async fn start_customer_session(store: &dyn SessionStore, customer: &CustomerRecord) -> ShopResult<()> {
    let blob = serde_json::to_value(customer)?;
    save_session(store, &customer.name, &blob).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemorySessionStore;
    use serde_json::json;

    #[tokio::test]
    async fn test_missing_session_is_none() {
        let store = InMemorySessionStore::new();
        assert!(get_session(&store, "nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_then_get() {
        let store = InMemorySessionStore::new();
        let blob = json!({ "cart": ["Widget"], "theme": "dark" });

        save_session(&store, "alice", &blob).await.unwrap();
        assert_eq!(get_session(&store, "alice").await.unwrap(), Some(blob));
    }

    #[tokio::test]
    async fn test_null_blob_rejected() {
        let store = InMemorySessionStore::new();
        let err = save_session(&store, "alice", &SessionBlob::Null).await.unwrap_err();
        assert!(matches!(err, ShopError::Validation(_)));
        assert!(get_session(&store, "alice").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_customer_session_has_no_password() {
        let store = InMemorySessionStore::new();
        let customer = CustomerRecord {
            id: 7,
            name: "alice".to_string(),
            address: "1 Main St".to_string(),
        };

        start_customer_session(&store, &customer).await.unwrap();

        let blob = get_session(&store, "alice").await.unwrap().unwrap();
        assert_eq!(blob["id"], 7);
        assert!(blob.get("password_hash").is_none());
    }
}
