//! Storage side of the message pipeline: parse, classify, then persist.

use chrono::NaiveDateTime;
use rusqlite::{Connection, OptionalExtension};
use tracing::{debug, info, warn};

use crate::classifier::CategoryClassifier;
use crate::db::{category_key, find_category};
use crate::error::Result;
use crate::models::format_timestamp;
use crate::parser::{MessageParser, ParseError, ParsedTransaction, TransactionKind};

#[derive(Debug, Clone)]
pub struct SavedTransaction {
    pub id: i64,
    pub amount: f64,
    pub description: String,
    pub kind: TransactionKind,
    pub category: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub enum Outcome {
    /// Not a transaction line; nothing to say.
    Ignored,
    /// Looked like a transaction but needs correcting.
    Rejected(ParseError),
    Saved(SavedTransaction),
}

pub fn find_user(conn: &Connection, external_id: i64) -> Result<Option<i64>> {
    let id = conn
        .query_row(
            "SELECT id FROM users WHERE external_id = ?1",
            [external_id],
            |row| row.get(0),
        )
        .optional()?;
    Ok(id)
}

pub fn get_or_create_user(conn: &Connection, external_id: i64) -> Result<i64> {
    if let Some(id) = find_user(conn, external_id)? {
        return Ok(id);
    }
    conn.execute("INSERT INTO users (external_id) VALUES (?1)", [external_id])?;
    Ok(conn.last_insert_rowid())
}

pub fn get_or_create_category(conn: &Connection, name: &str) -> Result<i64> {
    if let Some(id) = find_category(conn, name)? {
        return Ok(id);
    }
    conn.execute(
        "INSERT INTO categories (name, name_key) VALUES (?1, ?2)",
        rusqlite::params![name.trim(), category_key(name)],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_transaction(
    conn: &Connection,
    user_id: i64,
    txn: &ParsedTransaction,
    category_id: i64,
    at: &NaiveDateTime,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO transactions (user_id, amount, description, kind, category_id, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        rusqlite::params![
            user_id,
            txn.amount,
            txn.description,
            txn.kind().as_str(),
            category_id,
            format_timestamp(at),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn record_message(
    conn: &Connection,
    parser: &MessageParser,
    classifier: &CategoryClassifier,
    external_id: i64,
    text: &str,
) -> Result<Outcome> {
    let now = chrono::Local::now().naive_local();
    record_message_at(conn, parser, classifier, external_id, text, &now)
}

pub fn record_message_at(
    conn: &Connection,
    parser: &MessageParser,
    classifier: &CategoryClassifier,
    external_id: i64,
    text: &str,
    at: &NaiveDateTime,
) -> Result<Outcome> {
    let txn = match parser.parse(text) {
        Ok(Some(txn)) => txn,
        Ok(None) => {
            debug!(user = external_id, "ignoring non-transaction line");
            return Ok(Outcome::Ignored);
        }
        Err(e) => {
            warn!(user = external_id, error = %e, "rejected transaction line");
            return Ok(Outcome::Rejected(e));
        }
    };

    let category = classifier.classify(&txn.description).to_string();
    debug!(description = %txn.description, category = %category, "classified");

    let tx = conn.unchecked_transaction()?;
    let user_id = get_or_create_user(&tx, external_id)?;
    let category_id = get_or_create_category(&tx, &category)?;
    let id = insert_transaction(&tx, user_id, &txn, category_id, at)?;
    tx.commit()?;

    info!(
        user = external_id,
        id,
        amount = txn.amount,
        kind = txn.kind().as_str(),
        category = %category,
        "saved transaction"
    );

    Ok(Outcome::Saved(SavedTransaction {
        id,
        amount: txn.amount,
        kind: txn.kind(),
        description: txn.description,
        category,
        created_at: *at,
    }))
}
