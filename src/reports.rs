use chrono::{Duration, NaiveDateTime};
use rusqlite::Connection;

use crate::error::{KopeykaError, Result};
use crate::models::{format_timestamp, parse_timestamp, TransactionRecord};
use crate::parser::TransactionKind;
use crate::period::Period;

/// Rows shown by `history` when no period is given.
pub const HISTORY_DEFAULT_LIMIT: i64 = 10;

/// Window covered by `stats`.
pub const STATS_WINDOW_DAYS: i64 = 30;

// ---------------------------------------------------------------------------
// Balance
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Balance {
    pub income: f64,
    pub expenses: f64,
    pub balance: f64,
}

pub fn get_balance(conn: &Connection, external_id: i64) -> Result<Balance> {
    let (income, expenses): (f64, f64) = conn.query_row(
        "SELECT \
            COALESCE(SUM(CASE WHEN t.kind = 'income' THEN t.amount END), 0), \
            COALESCE(SUM(CASE WHEN t.kind = 'expense' THEN t.amount END), 0) \
         FROM transactions t JOIN users u ON t.user_id = u.id \
         WHERE u.external_id = ?1",
        [external_id],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;
    Ok(Balance {
        income,
        expenses,
        balance: income - expenses,
    })
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct History {
    pub transactions: Vec<TransactionRecord>,
    pub total_income: f64,
    pub total_expenses: f64,
    pub balance: f64,
}

/// Newest first. Without a period only the latest few rows are returned.
pub fn get_history(
    conn: &Connection,
    external_id: i64,
    period: Option<&Period>,
) -> Result<History> {
    let base = "SELECT t.id, t.amount, t.description, t.kind, c.name, t.created_at \
                FROM transactions t \
                JOIN users u ON t.user_id = u.id \
                LEFT JOIN categories c ON t.category_id = c.id \
                WHERE u.external_id = ?1";

    let transactions = match period {
        Some(p) => {
            let sql = format!(
                "{base} AND t.created_at BETWEEN ?2 AND ?3 ORDER BY t.created_at DESC, t.id DESC"
            );
            query_records(
                conn,
                &sql,
                rusqlite::params![external_id, format_timestamp(&p.start), format_timestamp(&p.end)],
            )?
        }
        None => {
            let sql = format!("{base} ORDER BY t.created_at DESC, t.id DESC LIMIT ?2");
            query_records(conn, &sql, rusqlite::params![external_id, HISTORY_DEFAULT_LIMIT])?
        }
    };

    let total_income = sum_kind(&transactions, TransactionKind::Income);
    let total_expenses = sum_kind(&transactions, TransactionKind::Expense);
    Ok(History {
        transactions,
        total_income,
        total_expenses,
        balance: total_income - total_expenses,
    })
}

fn sum_kind(records: &[TransactionRecord], kind: TransactionKind) -> f64 {
    records
        .iter()
        .filter(|r| r.kind == kind)
        .map(|r| r.amount)
        .sum()
}

fn query_records(
    conn: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
) -> Result<Vec<TransactionRecord>> {
    let mut stmt = conn.prepare(sql)?;
    let rows: Vec<(i64, f64, String, String, Option<String>, String)> = stmt
        .query_map(params, |row| {
            Ok((
                row.get(0)?,
                row.get(1)?,
                row.get(2)?,
                row.get(3)?,
                row.get(4)?,
                row.get(5)?,
            ))
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    rows.into_iter()
        .map(|(id, amount, description, kind, category, created_at)| {
            let kind = TransactionKind::from_db(&kind).ok_or_else(|| {
                KopeykaError::Other(format!("Transaction {id} has unknown kind '{kind}'"))
            })?;
            let created_at = parse_timestamp(&created_at).ok_or_else(|| {
                KopeykaError::Other(format!("Transaction {id} has bad timestamp '{created_at}'"))
            })?;
            Ok(TransactionRecord {
                id,
                amount,
                description,
                kind,
                category: category.unwrap_or_default(),
                created_at,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub name: String,
    pub total: f64,
    pub count: i64,
}

#[derive(Debug, Clone)]
pub struct Stats {
    pub since: NaiveDateTime,
    pub expenses: Vec<CategoryTotal>,
    pub incomes: Vec<CategoryTotal>,
}

impl Stats {
    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty() && self.incomes.is_empty()
    }
}

pub fn get_stats(conn: &Connection, external_id: i64, now: NaiveDateTime) -> Result<Stats> {
    let since = now - Duration::days(STATS_WINDOW_DAYS);
    Ok(Stats {
        since,
        expenses: category_totals(conn, external_id, TransactionKind::Expense, &since)?,
        incomes: category_totals(conn, external_id, TransactionKind::Income, &since)?,
    })
}

fn category_totals(
    conn: &Connection,
    external_id: i64,
    kind: TransactionKind,
    since: &NaiveDateTime,
) -> Result<Vec<CategoryTotal>> {
    let mut stmt = conn.prepare(
        "SELECT c.name, SUM(t.amount) AS total, COUNT(*) \
         FROM transactions t \
         JOIN users u ON t.user_id = u.id \
         JOIN categories c ON t.category_id = c.id \
         WHERE u.external_id = ?1 AND t.kind = ?2 AND t.created_at >= ?3 \
         GROUP BY c.id ORDER BY total DESC, c.sort_order",
    )?;
    let rows = stmt
        .query_map(
            rusqlite::params![external_id, kind.as_str(), format_timestamp(since)],
            |row| {
                Ok(CategoryTotal {
                    name: row.get(0)?,
                    total: row.get(1)?,
                    count: row.get(2)?,
                })
            },
        )?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::CategoryClassifier;
    use crate::db::{get_connection, init_db};
    use crate::ledger::record_message_at;
    use crate::parser::MessageParser;
    use chrono::NaiveDate;

    fn test_db() -> (tempfile::TempDir, Connection) {
        let dir = tempfile::tempdir().unwrap();
        let conn = get_connection(&dir.path().join("test.db")).unwrap();
        init_db(&conn).unwrap();
        (dir, conn)
    }

    fn day(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn add(conn: &Connection, user: i64, text: &str, at: NaiveDateTime) {
        record_message_at(
            conn,
            &MessageParser::default(),
            &CategoryClassifier::default(),
            user,
            text,
            &at,
        )
        .unwrap();
    }

    #[test]
    fn test_balance_for_unknown_user_is_zero() {
        let (_dir, conn) = test_db();
        let b = get_balance(&conn, 1).unwrap();
        assert_eq!(b, Balance { income: 0.0, expenses: 0.0, balance: 0.0 });
    }

    #[test]
    fn test_balance_sums_per_user() {
        let (_dir, conn) = test_db();
        add(&conn, 1, "+5000 зарплата", day(1, 10));
        add(&conn, 1, "-1 200,50 продукты", day(2, 10));
        add(&conn, 1, "-300 такси", day(3, 10));
        add(&conn, 2, "-999 кино", day(3, 10));
        let b = get_balance(&conn, 1).unwrap();
        assert_eq!(b.income, 5000.0);
        assert_eq!(b.expenses, 1500.5);
        assert_eq!(b.balance, 3499.5);
    }

    #[test]
    fn test_history_defaults_to_latest_rows() {
        let (_dir, conn) = test_db();
        for i in 1..=12 {
            add(&conn, 1, &format!("-{i} кофе"), day(i, 9));
        }
        let h = get_history(&conn, 1, None).unwrap();
        assert_eq!(h.transactions.len(), HISTORY_DEFAULT_LIMIT as usize);
        assert_eq!(h.transactions[0].amount, 12.0);
        assert_eq!(h.transactions[0].category, "Продукты");
        assert_eq!(h.total_income, 0.0);
        // 3 + 4 + ... + 12
        assert_eq!(h.total_expenses, 75.0);
    }

    #[test]
    fn test_history_filters_by_period() {
        let (_dir, conn) = test_db();
        add(&conn, 1, "-100 такси", day(1, 9));
        add(&conn, 1, "-200 метро", day(5, 9));
        add(&conn, 1, "+50 кэшбэк", day(6, 9));
        let period = Period::parse("3", day(6, 12)).unwrap();
        let h = get_history(&conn, 1, Some(&period)).unwrap();
        let amounts: Vec<f64> = h.transactions.iter().map(|t| t.amount).collect();
        assert_eq!(amounts, vec![50.0, 200.0]);
        assert_eq!(h.balance, -150.0);
        assert_eq!(h.transactions[0].kind, TransactionKind::Income);
    }

    #[test]
    fn test_stats_groups_recent_by_category() {
        let (_dir, conn) = test_db();
        let now = day(31, 12);
        add(&conn, 1, "-100 такси", day(1, 9)); // outside the window
        add(&conn, 1, "-300 такси", day(20, 9));
        add(&conn, 1, "-150 метро", day(21, 9));
        add(&conn, 1, "-500 продукты", day(22, 9));
        add(&conn, 1, "+7000 зарплата", day(23, 9));
        let stats = get_stats(&conn, 1, now).unwrap();
        assert_eq!(
            stats.expenses,
            vec![
                CategoryTotal { name: "Продукты".to_string(), total: 500.0, count: 1 },
                CategoryTotal { name: "Транспорт".to_string(), total: 450.0, count: 2 },
            ]
        );
        assert_eq!(stats.incomes.len(), 1);
        assert_eq!(stats.incomes[0].name, "Без категории");
        assert!(!stats.is_empty());
        assert!(get_stats(&conn, 2, now).unwrap().is_empty());
    }
}
