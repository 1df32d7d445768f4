use colored::Colorize;
use comfy_table::{Cell, Table};

use kopeyka::error::{KopeykaError, Result};
use kopeyka::fmt::{rub, signed};
use kopeyka::parser::TransactionKind;
use kopeyka::period::Period;
use kopeyka::reports::{self, CategoryTotal, STATS_WINDOW_DAYS};
use kopeyka::settings::load_settings;

use crate::cli::{open_db, resolve_user};

pub fn balance(user: Option<i64>) -> Result<()> {
    let settings = load_settings();
    let conn = open_db(&settings)?;
    let b = reports::get_balance(&conn, resolve_user(&settings, user))?;

    println!("Доходы:   {}", format!("+{}", rub(b.income)).green());
    println!("Расходы:  {}", format!("-{}", rub(b.expenses)).red());
    println!("Баланс:   {}", rub(b.balance).bold());
    Ok(())
}

pub fn history(user: Option<i64>, period_arg: &str) -> Result<()> {
    let settings = load_settings();
    let conn = open_db(&settings)?;

    let period = if period_arg.trim().is_empty() {
        None
    } else {
        let now = chrono::Local::now().naive_local();
        Some(Period::parse(period_arg, now).ok_or_else(|| {
            KopeykaError::Other(format!(
                "Unknown period '{period_arg}'. Try: сегодня, вчера, неделя, месяц, год, 4, 2-5"
            ))
        })?)
    };

    let h = reports::get_history(&conn, resolve_user(&settings, user), period.as_ref())?;
    let arg = period_arg.trim();
    let suffix = match period {
        None => String::new(),
        Some(_) if arg.to_lowercase().starts_with("за ") => format!(" {arg}"),
        Some(_) => format!(" за {arg}"),
    };

    if h.transactions.is_empty() {
        println!("Нет транзакций{suffix}");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Date", "Amount", "Description", "Category"]);
    for t in &h.transactions {
        let amount = signed(t.kind, t.amount);
        let amount = match t.kind {
            TransactionKind::Income => amount.green(),
            TransactionKind::Expense => amount.red(),
        };
        table.add_row(vec![
            Cell::new(t.created_at.format("%d.%m.%Y %H:%M")),
            Cell::new(amount),
            Cell::new(&t.description),
            Cell::new(&t.category),
        ]);
    }
    println!("История{suffix}\n{table}");
    println!(
        "Доход: +{} | Расход: -{} | Баланс: {}",
        rub(h.total_income),
        rub(h.total_expenses),
        rub(h.balance)
    );
    Ok(())
}

pub fn stats(user: Option<i64>) -> Result<()> {
    let settings = load_settings();
    let conn = open_db(&settings)?;
    let now = chrono::Local::now().naive_local();
    let s = reports::get_stats(&conn, resolve_user(&settings, user), now)?;

    if s.is_empty() {
        println!("Нет данных за последние {STATS_WINDOW_DAYS} дней.");
        return Ok(());
    }

    println!("Статистика за {STATS_WINDOW_DAYS} дней");
    if !s.expenses.is_empty() {
        println!("{}\n{}", "Расходы по категориям".red().bold(), totals_table(&s.expenses));
    }
    if !s.incomes.is_empty() {
        println!("{}\n{}", "Доходы по категориям".green().bold(), totals_table(&s.incomes));
    }
    Ok(())
}

fn totals_table(items: &[CategoryTotal]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Category", "Count", "Total"]);
    for item in items {
        table.add_row(vec![
            Cell::new(&item.name),
            Cell::new(item.count),
            Cell::new(rub(item.total)),
        ]);
    }
    table
}
