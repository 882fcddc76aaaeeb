//! Session queries over Redis strings.
//!
//! Keys are written without a TTL.

use crate::client::{RedisPool, RedisResult};
use redis::AsyncCommands;

pub(crate) fn session_key(key: &str) -> String {
    format!("shop:session:{}", key)
}

pub async fn get_session(pool: &RedisPool, key: &str) -> RedisResult<Option<serde_json::Value>> {
    let mut conn = pool.clone();
    let json: Option<String> = conn.get(session_key(key)).await?;
    match json {
        Some(j) => Ok(Some(serde_json::from_str(&j)?)),
        None => Ok(None),
    }
}

pub async fn set_session(pool: &RedisPool, key: &str, blob: &serde_json::Value) -> RedisResult<()> {
    let mut conn = pool.clone();
    conn.set::<_, _, ()>(session_key(key), serde_json::to_string(blob)?).await?;
    Ok(())
}
