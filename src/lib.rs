//! Expense and income tracking from free-form chat lines.
//!
//! The pure core is [`parser`] (line → amount, description, sign) and
//! [`classifier`] (description → category). The other modules persist and
//! report on the results.

pub mod classifier;
pub mod db;
pub mod error;
pub mod fmt;
pub mod keywords;
pub mod ledger;
pub mod models;
pub mod parser;
pub mod period;
pub mod reports;
pub mod settings;

pub use classifier::{classify_description, CategoryClassifier, ClassifierConfig};
pub use parser::{parse_transaction_message, MessageParser, ParseError, ParsedTransaction};
