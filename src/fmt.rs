use crate::parser::TransactionKind;

/// Format an amount in rubles with space-grouped thousands: 1 234 567.50 руб.
pub fn rub(val: f64) -> String {
    let negative = val < 0.0;
    let fixed = format!("{:.2}", val.abs());
    let (int_part, dec_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }
    let grouped: String = grouped.chars().rev().collect();

    if negative {
        format!("-{grouped}.{dec_part} руб.")
    } else {
        format!("{grouped}.{dec_part} руб.")
    }
}

/// Amount prefixed with the transaction sign: -500.00 руб.
pub fn signed(kind: TransactionKind, amount: f64) -> String {
    format!("{}{}", kind.sign(), rub(amount.abs()))
}

/// Amount as the chat confirmation shows it, ungrouped: -1234567.00 руб.
pub fn reply_amount(kind: TransactionKind, amount: f64) -> String {
    format!("{}{:.2} руб.", kind.sign(), amount.abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rub_formatting() {
        assert_eq!(rub(1234.56), "1 234.56 руб.");
        assert_eq!(rub(-500.0), "-500.00 руб.");
        assert_eq!(rub(0.0), "0.00 руб.");
        assert_eq!(rub(1000000.99), "1 000 000.99 руб.");
        assert_eq!(rub(42.1), "42.10 руб.");
    }

    #[test]
    fn test_signed() {
        assert_eq!(signed(TransactionKind::Expense, 500.0), "-500.00 руб.");
        assert_eq!(signed(TransactionKind::Income, 1234567.0), "+1 234 567.00 руб.");
    }

    #[test]
    fn test_reply_amount_is_not_grouped() {
        assert_eq!(reply_amount(TransactionKind::Expense, 1234567.0), "-1234567.00 руб.");
        assert_eq!(reply_amount(TransactionKind::Income, 5000.5), "+5000.50 руб.");
        assert_eq!(reply_amount(TransactionKind::Expense, 0.1), "-0.10 руб.");
    }

    #[test]
    fn test_signed_output_parses_back() {
        let line = format!("{} такси", signed(TransactionKind::Expense, 1234.5));
        let txn = crate::parser::parse_transaction_message(&line).unwrap().unwrap();
        assert_eq!(txn.amount, 1234.5);
        assert_eq!(txn.description, "такси");
    }
}
