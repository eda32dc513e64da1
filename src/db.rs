use std::path::Path;

use chrono::NaiveDate;
use rusqlite::Connection;

use crate::error::Result;
use crate::models::{NormalizedTransaction, User};
use crate::store::{ConstraintKind, InsertError, TransactionStore};

pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT UNIQUE,
    created_at TEXT DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS transactions (
    id INTEGER PRIMARY KEY,
    user_id INTEGER NOT NULL,
    date TEXT NOT NULL,
    amount REAL NOT NULL,
    merchant TEXT NOT NULL CHECK (length(merchant) <= 100),
    category TEXT NOT NULL CHECK (length(category) <= 80),
    description TEXT NOT NULL CHECK (length(description) <= 1000),
    import_id TEXT NOT NULL UNIQUE CHECK (length(import_id) <= 128),
    created_at TEXT DEFAULT (datetime('now')),
    FOREIGN KEY (user_id) REFERENCES users(id)
);
";

pub fn get_connection(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

pub fn add_user(conn: &Connection, name: &str, email: Option<&str>) -> Result<i64> {
    conn.execute(
        "INSERT INTO users (name, email) VALUES (?1, ?2)",
        rusqlite::params![name, email],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn list_users(conn: &Connection) -> Result<Vec<User>> {
    let mut stmt = conn.prepare("SELECT id, name, email FROM users ORDER BY id")?;
    let users = stmt
        .query_map([], |row| {
            Ok(User {
                id: row.get(0)?,
                name: row.get(1)?,
                email: row.get(2)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(users)
}

/// SQLite-backed implementation of the store contract.
pub struct SqliteStore<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

fn classify(err: rusqlite::Error) -> InsertError {
    if let rusqlite::Error::SqliteFailure(e, _) = &err {
        if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE {
            return InsertError::Constraint(ConstraintKind::Uniqueness, err.to_string());
        }
        if e.code == rusqlite::ErrorCode::ConstraintViolation {
            return InsertError::Constraint(ConstraintKind::Other, err.to_string());
        }
    }
    InsertError::Rejected(err.to_string())
}

impl TransactionStore for SqliteStore<'_> {
    fn insert_transaction(
        &self,
        txn: &NormalizedTransaction,
        fingerprint: &str,
    ) -> std::result::Result<(), InsertError> {
        // SQLite stores any text in a date column; enforce the date contract
        // here so malformed dates are rejected at the storage boundary.
        if NaiveDate::parse_from_str(&txn.date, "%Y-%m-%d").is_err() {
            return Err(InsertError::Rejected(format!(
                "malformed date: {:?}",
                txn.date
            )));
        }

        self.conn
            .prepare_cached(
                "INSERT INTO transactions (user_id, date, amount, merchant, category, description, import_id) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )
            .map_err(classify)?
            .execute(rusqlite::params![
                txn.user_id,
                txn.date,
                txn.amount,
                txn.merchant,
                txn.category,
                txn.description,
                fingerprint,
            ])
            .map_err(classify)?;
        Ok(())
    }

    fn lowest_user_id(&self) -> Result<Option<i64>> {
        let id = self
            .conn
            .query_row("SELECT min(id) FROM users", [], |row| row.get(0))?;
        Ok(id)
    }
}
