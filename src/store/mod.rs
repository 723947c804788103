use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::errors::StoreError;
use crate::models::{Draft, Expense};
use crate::storage::Storage;

/// Fixed key the expense collection is persisted under.
pub(crate) const STORAGE_KEY: &str = "expenses";

/// Owns the ordered expense collection (newest first), the active edit
/// session, and the staged form draft, and mediates all persistence.
///
/// Every successful mutation re-persists the full collection. Persistence
/// failures are logged and swallowed; the in-memory state is authoritative
/// for the running session.
pub(crate) struct ExpenseStore<S: Storage> {
    storage: S,
    expenses: Vec<Expense>,
    editing: Option<i64>,
    pub(crate) draft: Draft,
}

impl<S: Storage> ExpenseStore<S> {
    pub(crate) fn new(storage: S) -> Self {
        Self {
            storage,
            expenses: Vec::new(),
            editing: None,
            draft: Draft::default(),
        }
    }

    /// Hydrate the collection from storage. Runs once at startup, before any
    /// user-triggered mutation. Missing or malformed data leaves the
    /// collection empty.
    pub(crate) fn load(&mut self) {
        self.expenses = match self.storage.read(STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(expenses) => expenses,
                Err(e) => {
                    warn!("stored expense data is unreadable, starting empty: {e}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("{e}; starting empty");
                Vec::new()
            }
        };
        debug!("loaded {} expense(s)", self.expenses.len());
    }

    /// Serialize the full collection and write it out. Best-effort: a failed
    /// write is logged and the in-memory mutation stands.
    fn save(&mut self) {
        let raw = match serde_json::to_string(&self.expenses) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("could not serialize expenses: {e}");
                return;
            }
        };
        if let Err(e) = self.storage.write(STORAGE_KEY, &raw) {
            warn!("{e}; keeping in-memory state");
        }
    }

    pub(crate) fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub(crate) fn len(&self) -> usize {
        self.expenses.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub(crate) fn get(&self, id: i64) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    /// Id of the record currently being edited, if any.
    pub(crate) fn editing(&self) -> Option<i64> {
        self.editing
    }

    /// Sum of all amounts as displayed (unparseable entries count as zero).
    pub(crate) fn total(&self) -> Decimal {
        self.expenses.iter().map(Expense::amount_value).sum()
    }

    /// Start editing `id`, copying its fields into the draft. Returns false
    /// (and changes nothing) when the id is unknown.
    pub(crate) fn begin_edit(&mut self, id: i64) -> bool {
        match self.get(id) {
            Some(expense) => {
                self.draft = Draft::from_expense(expense);
                self.editing = Some(id);
                true
            }
            None => false,
        }
    }

    /// Drop the edit session and reset the draft. Idempotent.
    pub(crate) fn cancel_edit(&mut self) {
        self.editing = None;
        self.draft.clear();
    }

    /// Commit the draft: prepend a new record in add-mode, replace the edited
    /// record's fields in edit-mode (id and position preserved). An empty
    /// required field aborts with a validation error and changes nothing.
    /// Returns the id of the affected record.
    pub(crate) fn submit(&mut self) -> Result<i64, StoreError> {
        let missing = self.draft.missing_fields();
        if !missing.is_empty() {
            return Err(StoreError::Validation(missing));
        }

        let id = match self.editing {
            Some(id) => {
                if let Some(expense) = self.expenses.iter_mut().find(|e| e.id == id) {
                    expense.amount = self.draft.amount.clone();
                    expense.date = self.draft.date.clone();
                    expense.note = self.draft.note.clone();
                }
                id
            }
            None => {
                let id = self.next_id();
                self.expenses.insert(
                    0,
                    Expense {
                        id,
                        amount: self.draft.amount.clone(),
                        date: self.draft.date.clone(),
                        note: self.draft.note.clone(),
                    },
                );
                id
            }
        };

        self.save();
        self.cancel_edit();
        Ok(id)
    }

    /// Remove `id` if present; absent ids are a silent no-op. Confirmation is
    /// the caller's concern, removal here is unconditional. Deleting the
    /// record an edit session points at also drops the session.
    pub(crate) fn delete(&mut self, id: i64) {
        let before = self.expenses.len();
        self.expenses.retain(|e| e.id != id);
        if self.expenses.len() == before {
            return;
        }
        if self.editing == Some(id) {
            self.cancel_edit();
        }
        self.save();
    }

    /// Creation-time id in milliseconds, bumped past any taken id so rapid
    /// successive submits within the same millisecond stay unique.
    fn next_id(&self) -> i64 {
        let mut id = Utc::now().timestamp_millis();
        while self.expenses.iter().any(|e| e.id == id) {
            id += 1;
        }
        id
    }
}

#[cfg(test)]
mod tests;
