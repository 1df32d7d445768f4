use std::io::BufRead;

use kopeyka::error::Result;
use kopeyka::ledger::{record_message, Outcome};
use kopeyka::settings::load_settings;

use crate::cli::add::reply;
use crate::cli::{open_db, resolve_user};

pub fn run(user: Option<i64>) -> Result<()> {
    let settings = load_settings();
    let conn = open_db(&settings)?;
    let parser = settings.parser();
    let classifier = settings.classifier()?;
    let user = resolve_user(&settings, user);

    let (mut saved, mut rejected, mut ignored) = (0usize, 0usize, 0usize);
    for (n, chunk) in std::io::stdin().lock().split(b'\n').enumerate() {
        let bytes = chunk?;
        // A line that is not UTF-8 is bad input, not a failed run.
        let line = match String::from_utf8(bytes) {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!(line = n + 1, error = %e, "skipping undecodable line");
                rejected += 1;
                continue;
            }
        };
        let line = line.trim_end_matches('\r');

        let outcome = record_message(&conn, &parser, &classifier, user, line)?;
        match outcome {
            Outcome::Saved(_) => saved += 1,
            Outcome::Rejected(_) => rejected += 1,
            Outcome::Ignored => ignored += 1,
        }
        if let Some(text) = reply(&outcome) {
            println!("{text}");
        }
    }

    println!("{saved} saved, {rejected} rejected, {ignored} ignored");
    Ok(())
}
