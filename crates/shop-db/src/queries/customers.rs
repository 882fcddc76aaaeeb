//! Customer-related database queries.

use crate::pool::{DbError, DbPool, DbResult};
use rusqlite::{params, ErrorCode, OptionalExtension};

/// Customer row from database.
#[derive(Debug, Clone)]
pub struct CustomerRow {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub password_hash: String,
    pub created_at: String,
}

fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<CustomerRow> {
    Ok(CustomerRow {
        id: row.get(0)?,
        name: row.get(1)?,
        address: row.get(2)?,
        password_hash: row.get(3)?,
        created_at: row.get(4)?,
    })
}

/// Insert a customer and return its id.
///
/// A duplicate name yields `DbError::Conflict`.
pub fn create_customer(pool: &DbPool, name: &str, address: &str, password_hash: &str) -> DbResult<i64> {
    pool.with_conn(|conn| {
        conn.execute(
            "INSERT INTO customers (name, address, password_hash) VALUES (?1, ?2, ?3)",
            params![name, address, password_hash],
        )
        .map_err(|e| match e {
            rusqlite::Error::SqliteFailure(err, _) if err.code == ErrorCode::ConstraintViolation => {
                DbError::Conflict(format!("Customer already exists: {}", name))
            }
            e => DbError::Connection(e),
        })?;
        Ok(conn.last_insert_rowid())
    })
}

/// Get a customer by ID.
pub fn get_customer(pool: &DbPool, id: i64) -> DbResult<CustomerRow> {
    pool.with_conn(|conn| {
        conn.query_row(
            "SELECT id, name, address, password_hash, created_at FROM customers WHERE id = ?1",
            params![id],
            map_row,
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => DbError::NotFound(format!("Customer: {}", id)),
            e => DbError::Connection(e),
        })
    })
}

/// Find a customer by unique name.
pub fn find_customer_by_name(pool: &DbPool, name: &str) -> DbResult<Option<CustomerRow>> {
    pool.with_conn(|conn| {
        conn.query_row(
            "SELECT id, name, address, password_hash, created_at FROM customers WHERE name = ?1",
            params![name],
            map_row,
        )
        .optional()
        .map_err(DbError::from)
    })
}

/// List customers ordered by id.
pub fn list_customers(pool: &DbPool, limit: usize) -> DbResult<Vec<CustomerRow>> {
    pool.with_conn(|conn| {
        let mut stmt = conn.prepare(
            "SELECT id, name, address, password_hash, created_at
             FROM customers ORDER BY id LIMIT ?1",
        )?;

        let rows = stmt.query_map(params![limit as i64], map_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrations::run_migrations;

    fn pool() -> DbPool {
        let pool = DbPool::in_memory().unwrap();
        run_migrations(&pool).unwrap();
        pool
    }

    #[test]
    fn test_create_and_find() {
        let pool = pool();
        let id = create_customer(&pool, "alice", "1 Main St", "$argon2id$fake").unwrap();

        let row = find_customer_by_name(&pool, "alice").unwrap().unwrap();
        assert_eq!(row.id, id);
        assert_eq!(row.address, "1 Main St");
        assert_eq!(row.password_hash, "$argon2id$fake");
        assert!(!row.created_at.is_empty());

        assert_eq!(get_customer(&pool, id).unwrap().name, "alice");
    }

    #[test]
    fn test_duplicate_name_is_conflict() {
        let pool = pool();
        create_customer(&pool, "alice", "a", "h").unwrap();

        let err = create_customer(&pool, "alice", "b", "h").unwrap_err();
        assert!(matches!(err, DbError::Conflict(_)), "got {:?}", err);
    }

    #[test]
    fn test_missing_customer() {
        let pool = pool();
        assert!(find_customer_by_name(&pool, "ghost").unwrap().is_none());
        assert!(matches!(get_customer(&pool, 42), Err(DbError::NotFound(_))));
    }

    #[test]
    fn test_list_respects_limit_and_order() {
        let pool = pool();
        for name in ["c", "a", "b"] {
            create_customer(&pool, name, "", "h").unwrap();
        }

        let rows = list_customers(&pool, 2).unwrap();
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["c", "a"]);
    }
}
