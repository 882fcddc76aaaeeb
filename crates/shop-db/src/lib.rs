//! Shop Database Layer
//!
//! SQLite-backed customer accounts. The customer table is the only
//! relational data in the system; names are unique.

pub mod accounts;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use accounts::SqliteCustomerAccounts;
pub use pool::{DbError, DbPool, DbResult};

/// Open the database at `path` and bring the schema up to date.
pub fn init_pool(path: &std::path::Path) -> DbResult<DbPool> {
    let pool = DbPool::open(path)?;
    migrations::run_migrations(&pool)?;
    Ok(pool)
}
