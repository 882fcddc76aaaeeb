//! `CustomerAccounts` backed by the SQLite customer table.

use async_trait::async_trait;
use shop_core::customer::model::CustomerRecord;
use shop_core::{CustomerAccounts, ShopError, ShopResult};

use crate::pool::{DbError, DbPool, DbResult};
use crate::queries::customers::{self as queries, CustomerRow};

impl From<DbError> for ShopError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::Conflict(msg) => ShopError::Conflict(msg),
            DbError::NotFound(msg) => ShopError::NotFound(msg),
            e => ShopError::storage(e),
        }
    }
}

fn to_record(row: CustomerRow) -> CustomerRecord {
    CustomerRecord {
        id: row.id,
        name: row.name,
        address: row.address,
    }
}

/// Customer accounts stored in SQLite.
#[derive(Clone)]
pub struct SqliteCustomerAccounts {
    pool: DbPool,
}

impl SqliteCustomerAccounts {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Run a query on the blocking thread pool; the connection mutex is
    /// never taken on a runtime worker.
    async fn blocking<T, F>(&self, f: F) -> ShopResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&DbPool) -> DbResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        let result = tokio::task::spawn_blocking(move || f(&pool))
            .await
            .map_err(ShopError::storage)?;
        Ok(result?)
    }
}

#[async_trait]
impl CustomerAccounts for SqliteCustomerAccounts {
    async fn insert(&self, name: &str, address: &str, password_hash: &str) -> ShopResult<CustomerRecord> {
        let (name, address, password_hash) =
            (name.to_string(), address.to_string(), password_hash.to_string());

        let row = self
            .blocking(move |pool| {
                let id = queries::create_customer(pool, &name, &address, &password_hash)?;
                queries::get_customer(pool, id)
            })
            .await?;
        Ok(to_record(row))
    }

    async fn find_with_hash(&self, name: &str) -> ShopResult<Option<(CustomerRecord, String)>> {
        let name = name.to_string();
        let row = self
            .blocking(move |pool| queries::find_customer_by_name(pool, &name))
            .await?;
        Ok(row.map(|r| {
            let hash = r.password_hash.clone();
            (to_record(r), hash)
        }))
    }

    async fn list(&self, limit: usize) -> ShopResult<Vec<CustomerRecord>> {
        let rows = self
            .blocking(move |pool| queries::list_customers(pool, limit))
            .await?;
        Ok(rows.into_iter().map(to_record).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrations::run_migrations;
    use shop_core::customer;

    fn accounts() -> SqliteCustomerAccounts {
        let pool = DbPool::in_memory().unwrap();
        run_migrations(&pool).unwrap();
        SqliteCustomerAccounts::new(pool)
    }

    #[tokio::test]
    async fn test_register_and_authenticate() {
        let accounts = accounts();
        let alice = customer::register(&accounts, "alice", "1 Main St", "pw1").await.unwrap();

        assert_eq!(customer::authenticate(&accounts, "alice", "pw1").await.unwrap(), Some(alice));
        assert!(customer::authenticate(&accounts, "alice", "wrongpass").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_second_register_conflicts() {
        let accounts = accounts();
        customer::register(&accounts, "alice", "1 Main St", "pw1").await.unwrap();

        let err = customer::register(&accounts, "alice", "elsewhere", "pw2").await.unwrap_err();
        assert!(matches!(err, ShopError::Conflict(_)));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_held_connection_does_not_stall_runtime() {
        let accounts = accounts();
        let pool = accounts.pool.clone();
        let (locked_tx, locked_rx) = std::sync::mpsc::channel();

        // Hold the connection mutex from another thread for a while.
        let holder = std::thread::spawn(move || {
            pool.with_conn(|_| {
                let _ = locked_tx.send(());
                std::thread::sleep(std::time::Duration::from_millis(200));
                Ok(())
            })
        });
        locked_rx.recv().unwrap();

        let ticks = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let ticker = {
            let ticks = ticks.clone();
            tokio::spawn(async move {
                loop {
                    ticks.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                    tokio::time::sleep(std::time::Duration::from_millis(1)).await;
                }
            })
        };

        assert!(accounts.list(10).await.unwrap().is_empty());
        ticker.abort();
        holder.join().unwrap().unwrap();

        assert!(ticks.load(std::sync::atomic::Ordering::SeqCst) > 0);
    }

    #[tokio::test]
    async fn test_unknown_customer_login_is_none() {
        let accounts = accounts();
        customer::register(&accounts, "alice", "1 Main St", "pw1").await.unwrap();

        assert!(customer::authenticate(&accounts, "nobody", "pw1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_password_is_not_stored_in_plaintext() {
        let accounts = accounts();
        customer::register(&accounts, "alice", "", "hunter2").await.unwrap();

        let (_, hash) = accounts.find_with_hash("alice").await.unwrap().unwrap();
        assert_ne!(hash, "hunter2");
        assert!(hash.starts_with("$argon2id$"));
    }
}
