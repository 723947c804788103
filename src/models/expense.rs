use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One tracked expense. The serialized field layout is the on-disk format
/// and must stay stable:
/// `{"id": number, "amount": string, "date": string, "note": string}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    /// Amount exactly as the user typed it. Parsed only for display.
    pub amount: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    pub note: String,
}

impl Expense {
    /// Numeric value of `amount` for display purposes. Unparseable text
    /// counts as zero; the stored string is left as entered.
    pub fn amount_value(&self) -> Decimal {
        Decimal::from_str(self.amount.trim()).unwrap_or_default()
    }
}
