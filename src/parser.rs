//! Turns a chat line such as `-1 234,50 руб. аренда` into an amount,
//! a description and a sign.
//!
//! A line is only a transaction candidate when it starts with `-` (expense)
//! or `+` (income). After the sign, leading tokens that carry a digit or are
//! a currency unit form the amount; the first token that is neither starts
//! the description. The amount run is greedy: `-100 2 часа такси` reads as
//! `1002` with the description `часа такси`.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CURRENCY_UNITS: &[&str] = &["руб", "руб.", "р.", "рублей"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    pub fn from_db(value: &str) -> Option<Self> {
        match value {
            "income" => Some(TransactionKind::Income),
            "expense" => Some(TransactionKind::Expense),
            _ => None,
        }
    }

    pub fn sign(self) -> char {
        match self {
            TransactionKind::Income => '+',
            TransactionKind::Expense => '-',
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTransaction {
    /// Always positive; the sign lives in `is_expense`.
    pub amount: f64,
    pub description: String,
    pub is_expense: bool,
}

impl ParsedTransaction {
    pub fn kind(&self) -> TransactionKind {
        if self.is_expense {
            TransactionKind::Expense
        } else {
            TransactionKind::Income
        }
    }
}

/// Problems with a line that did look like a transaction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("transaction has no description")]
    EmptyDescription,

    #[error("cannot read an amount from '{0}'")]
    InvalidAmount(String),
}

impl ParseError {
    /// Corrective prompt shown to the user.
    pub fn prompt(&self) -> &'static str {
        match self {
            ParseError::EmptyDescription => {
                "Пожалуйста, укажите описание транзакции. Например:\n-100 такси\n+500 зарплата"
            }
            ParseError::InvalidAmount(_) => {
                "Не удалось распознать сумму. Пожалуйста, проверьте формат."
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    pub currency_units: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            currency_units: DEFAULT_CURRENCY_UNITS.iter().map(|u| u.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MessageParser {
    currency_units: Vec<String>,
}

impl Default for MessageParser {
    fn default() -> Self {
        Self::new(&ParserConfig::default())
    }
}

impl MessageParser {
    pub fn new(config: &ParserConfig) -> Self {
        let currency_units = config
            .currency_units
            .iter()
            .map(|u| u.trim().to_lowercase())
            .filter(|u| !u.is_empty())
            .collect();
        Self { currency_units }
    }

    pub fn currency_units(&self) -> &[String] {
        &self.currency_units
    }

    /// `Ok(None)` means the line is not a transaction and should be ignored.
    pub fn parse(&self, raw: &str) -> Result<Option<ParsedTransaction>, ParseError> {
        let message = raw.trim();
        let is_expense = match message.chars().next() {
            Some('-') => true,
            Some('+') => false,
            _ => return Ok(None),
        };

        // Both signs are one byte wide.
        let (amount_raw, description) = self.split(message[1..].trim());
        if description.is_empty() {
            return Err(ParseError::EmptyDescription);
        }
        let amount = normalize_amount(&amount_raw)?;

        Ok(Some(ParsedTransaction {
            amount,
            description,
            is_expense,
        }))
    }

    /// Split an unsigned message body into the amount run and the description.
    pub fn split(&self, body: &str) -> (String, String) {
        let tokens: Vec<&str> = body.split_whitespace().collect();
        let run = tokens
            .iter()
            .take_while(|token| self.is_amount_token(token))
            .count();
        (tokens[..run].join(" "), tokens[run..].join(" "))
    }

    fn is_amount_token(&self, token: &str) -> bool {
        if token.chars().any(|c| c.is_ascii_digit()) {
            return true;
        }
        let lower = token.to_lowercase();
        self.currency_units.iter().any(|unit| *unit == lower)
    }
}

/// Keep digits and separators, drop grouping spaces, read `,` as the decimal point.
pub fn normalize_amount(raw: &str) -> Result<f64, ParseError> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | ','))
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    let amount: f64 = cleaned
        .parse()
        .map_err(|_| ParseError::InvalidAmount(raw.to_string()))?;
    if !amount.is_finite() || amount <= 0.0 {
        return Err(ParseError::InvalidAmount(raw.to_string()));
    }
    Ok(amount)
}

/// Parse with the stock currency units.
pub fn parse_transaction_message(raw: &str) -> Result<Option<ParsedTransaction>, ParseError> {
    static PARSER: OnceLock<MessageParser> = OnceLock::new();
    PARSER.get_or_init(MessageParser::default).parse(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(msg: &str) -> (f64, String, bool) {
        let txn = parse_transaction_message(msg).unwrap().unwrap();
        (txn.amount, txn.description, txn.is_expense)
    }

    #[test]
    fn test_lines_without_sign_are_ignored() {
        for msg in ["", "   ", "привет", "500 такси", "*500 такси", "=100 кофе", "/balance"] {
            assert_eq!(parse_transaction_message(msg), Ok(None), "{msg:?}");
        }
    }

    #[test]
    fn test_expense_messages() {
        let cases: &[(&str, f64, &str)] = &[
            ("-500 продукты", 500.0, "продукты"),
            ("-1000.50 такси", 1000.5, "такси"),
            ("-1 234 567 аренда квартиры", 1234567.0, "аренда квартиры"),
            ("-100руб. кофе", 100.0, "кофе"),
            ("-50р. проезд", 50.0, "проезд"),
            ("-42.50 рублей обед", 42.5, "обед"),
            ("-15 320 на счетах", 15320.0, "на счетах"),
            ("-357 за такси", 357.0, "за такси"),
            ("-302 вкусно и точка", 302.0, "вкусно и точка"),
        ];
        for (msg, amount, description) in cases {
            assert_eq!(parsed(msg), (*amount, description.to_string(), true), "{msg}");
        }
    }

    #[test]
    fn test_income_messages() {
        let cases: &[(&str, f64, &str)] = &[
            ("+5000 зарплата", 5000.0, "зарплата"),
            ("+1000.50 фриланс", 1000.5, "фриланс"),
            ("+1 234 567 продажа", 1234567.0, "продажа"),
            ("+50р. кэшбэк", 50.0, "кэшбэк"),
            ("+15 320 на счетах банков", 15320.0, "на счетах банков"),
        ];
        for (msg, amount, description) in cases {
            assert_eq!(parsed(msg), (*amount, description.to_string(), false), "{msg}");
        }
    }

    #[test]
    fn test_decimal_comma() {
        assert_eq!(parsed("-1000,50 такси"), (1000.5, "такси".to_string(), true));
    }

    #[test]
    fn test_greedy_amount_run_absorbs_digit_tokens() {
        assert_eq!(parsed("-100 2 часа такси"), (1002.0, "часа такси".to_string(), true));
    }

    #[test]
    fn test_units_match_whole_tokens_case_insensitively() {
        assert_eq!(parsed("-100 РУБ. кофе"), (100.0, "кофе".to_string(), true));
        assert_eq!(parsed("-100 Рублей кофе"), (100.0, "кофе".to_string(), true));
        assert_eq!(
            parsed("-100 рублейки кофе"),
            (100.0, "рублейки кофе".to_string(), true)
        );
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        assert_eq!(parsed("  -  75   кофе   с собой "), (75.0, "кофе с собой".to_string(), true));
    }

    #[test]
    fn test_empty_description() {
        assert_eq!(parse_transaction_message("-500"), Err(ParseError::EmptyDescription));
        assert_eq!(parse_transaction_message("-"), Err(ParseError::EmptyDescription));
        assert_eq!(parse_transaction_message("+ 1 000 руб."), Err(ParseError::EmptyDescription));
    }

    #[test]
    fn test_invalid_amount() {
        assert_eq!(
            parse_transaction_message("- такси"),
            Err(ParseError::InvalidAmount(String::new()))
        );
        assert_eq!(
            parse_transaction_message("-руб кофе"),
            Err(ParseError::InvalidAmount("руб".to_string()))
        );
        assert!(matches!(
            parse_transaction_message("-1.2.3 кофе"),
            Err(ParseError::InvalidAmount(_))
        ));
        assert!(matches!(
            parse_transaction_message("-0 кофе"),
            Err(ParseError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_overflowing_amount_is_invalid() {
        let digits = "9".repeat(400);
        assert_eq!(
            parse_transaction_message(&format!("-{digits} x")),
            Err(ParseError::InvalidAmount(digits.clone()))
        );
        assert!(matches!(normalize_amount(&digits), Err(ParseError::InvalidAmount(_))));
    }

    #[test]
    fn test_custom_currency_units() {
        let parser = MessageParser::new(&ParserConfig {
            currency_units: vec!["EUR".to_string(), " € ".to_string()],
        });
        let txn = parser.parse("-12,5 eur lunch").unwrap().unwrap();
        assert_eq!(txn.amount, 12.5);
        assert_eq!(txn.description, "lunch");
        let txn = parser.parse("+3 € refund").unwrap().unwrap();
        assert_eq!(txn.kind(), TransactionKind::Income);
        // stock units are not implied
        let txn = parser.parse("-100 руб кофе").unwrap().unwrap();
        assert_eq!(txn.description, "руб кофе");
    }

    #[test]
    fn test_parse_is_pure() {
        let parser = MessageParser::default();
        let first = parser.parse("-1 234,5 аренда").unwrap();
        let second = parser.parse("-1 234,5 аренда").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_kind_round_trip_through_db_text() {
        for kind in [TransactionKind::Income, TransactionKind::Expense] {
            assert_eq!(TransactionKind::from_db(kind.as_str()), Some(kind));
        }
        assert_eq!(TransactionKind::from_db("transfer"), None);
    }
}
