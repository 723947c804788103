use super::Expense;

/// The staged, not-yet-committed form values: an [`Expense`] without an id.
/// Transient and never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub amount: String,
    pub date: String,
    pub note: String,
}

impl Draft {
    pub fn from_expense(expense: &Expense) -> Self {
        Self {
            amount: expense.amount.clone(),
            date: expense.date.clone(),
            note: expense.note.clone(),
        }
    }

    /// Names of required fields that are still empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.amount.is_empty() {
            missing.push("amount");
        }
        if self.date.is_empty() {
            missing.push("date");
        }
        if self.note.is_empty() {
            missing.push("note");
        }
        missing
    }

    pub fn clear(&mut self) {
        self.amount.clear();
        self.date.clear();
        self.note.clear();
    }
}
