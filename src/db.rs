use std::path::Path;

use rusqlite::{Connection, OptionalExtension};

use crate::error::Result;
use crate::models::Category;

pub const DB_FILE: &str = "kopeyka.db";

pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY,
    external_id INTEGER NOT NULL UNIQUE,
    created_at TEXT DEFAULT (datetime('now', 'localtime'))
);

CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    name_key TEXT NOT NULL UNIQUE,
    sort_order INTEGER DEFAULT 999
);

CREATE TABLE IF NOT EXISTS transactions (
    id INTEGER PRIMARY KEY,
    user_id INTEGER NOT NULL,
    amount REAL NOT NULL,
    description TEXT NOT NULL,
    kind TEXT NOT NULL CHECK (kind IN ('income', 'expense')),
    category_id INTEGER,
    created_at TEXT NOT NULL,
    FOREIGN KEY (user_id) REFERENCES users(id),
    FOREIGN KEY (category_id) REFERENCES categories(id)
);

CREATE INDEX IF NOT EXISTS idx_transactions_user_created
    ON transactions (user_id, created_at);
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

/// SQLite's NOCASE only folds ASCII, so lookups go through a Rust-lowercased key.
pub fn category_key(name: &str) -> String {
    name.trim().to_lowercase()
}

pub fn find_category(conn: &Connection, name: &str) -> Result<Option<i64>> {
    let id = conn
        .query_row(
            "SELECT id FROM categories WHERE name_key = ?1",
            [category_key(name)],
            |row| row.get(0),
        )
        .optional()?;
    Ok(id)
}

/// Insert the classifier's categories in order so listings follow table priority.
pub fn seed_categories(conn: &Connection, names: &[&str]) -> Result<()> {
    for (order, name) in names.iter().enumerate() {
        conn.execute(
            "INSERT INTO categories (name, name_key, sort_order) VALUES (?1, ?2, ?3) \
             ON CONFLICT(name_key) DO UPDATE SET sort_order = excluded.sort_order",
            rusqlite::params![name.trim(), category_key(name), order as i64],
        )?;
    }
    Ok(())
}

pub fn list_categories(conn: &Connection) -> Result<Vec<Category>> {
    let mut stmt =
        conn.prepare("SELECT id, name, sort_order FROM categories ORDER BY sort_order, name")?;
    let rows = stmt
        .query_map([], |row| {
            Ok(Category {
                id: row.get(0)?,
                name: row.get(1)?,
                sort_order: row.get(2)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_db() -> (tempfile::TempDir, Connection) {
        let dir = tempfile::tempdir().unwrap();
        let conn = get_connection(&dir.path().join("test.db")).unwrap();
        init_db(&conn).unwrap();
        (dir, conn)
    }

    #[test]
    fn test_init_db_creates_tables() {
        let (_dir, conn) = test_db();
        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap();
        for expected in &["users", "categories", "transactions"] {
            assert!(tables.contains(&expected.to_string()), "missing table: {expected}");
        }
    }

    #[test]
    fn test_init_db_is_idempotent() {
        let (_dir, conn) = test_db();
        init_db(&conn).unwrap();
    }

    #[test]
    fn test_seed_categories_keeps_order_and_dedupes() {
        let (_dir, conn) = test_db();
        seed_categories(&conn, &["Продукты", "Быт", "Без категории"]).unwrap();
        seed_categories(&conn, &["Быт", "продукты"]).unwrap();
        let names: Vec<String> = list_categories(&conn).unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Быт", "Продукты", "Без категории"]);
    }

    #[test]
    fn test_find_category_ignores_case() {
        let (_dir, conn) = test_db();
        seed_categories(&conn, &["Транспорт"]).unwrap();
        assert!(find_category(&conn, "ТРАНСПОРТ").unwrap().is_some());
        assert!(find_category(&conn, "Досуг").unwrap().is_none());
    }

    #[test]
    fn test_name_key_is_unique_and_first_spelling_wins() {
        let (_dir, conn) = test_db();
        seed_categories(&conn, &["Транспорт"]).unwrap();
        seed_categories(&conn, &["ТРАНСПОРТ"]).unwrap();
        let dup = conn.execute(
            "INSERT INTO categories (name, name_key) VALUES ('транспорт', 'транспорт')",
            [],
        );
        assert!(dup.is_err());
        let names: Vec<String> = list_categories(&conn)
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Транспорт"]);
    }

    #[test]
    fn test_kind_is_constrained() {
        let (_dir, conn) = test_db();
        conn.execute("INSERT INTO users (external_id) VALUES (1)", []).unwrap();
        let bad = conn.execute(
            "INSERT INTO transactions (user_id, amount, description, kind, created_at) \
             VALUES (1, 10.0, 'x', 'transfer', '2025-01-01 00:00:00')",
            [],
        );
        assert!(bad.is_err());
    }
}
