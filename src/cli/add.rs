use colored::Colorize;

use kopeyka::error::Result;
use kopeyka::fmt::reply_amount;
use kopeyka::ledger::{record_message, Outcome};
use kopeyka::settings::load_settings;

use crate::cli::{open_db, resolve_user};

pub fn run(user: Option<i64>, message: &str) -> Result<()> {
    let settings = load_settings();
    let conn = open_db(&settings)?;
    let outcome = record_message(
        &conn,
        &settings.parser(),
        &settings.classifier()?,
        resolve_user(&settings, user),
        message,
    )?;
    if let Some(text) = reply(&outcome) {
        println!("{text}");
    }
    Ok(())
}

/// What the chat would answer. Non-transaction lines get no reply.
pub fn reply(outcome: &Outcome) -> Option<String> {
    match outcome {
        Outcome::Ignored => None,
        Outcome::Rejected(e) => Some(e.prompt().yellow().to_string()),
        Outcome::Saved(saved) => Some(format!(
            "Сохранено: {} - {} ({})",
            reply_amount(saved.kind, saved.amount),
            saved.description,
            saved.category.bold()
        )),
    }
}
