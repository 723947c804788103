use crate::models::Draft;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Editing,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Editing => write!(f, "EDIT"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Which form field keystrokes go to while editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormField {
    Amount,
    Date,
    Note,
}

impl FormField {
    pub(crate) fn all() -> &'static [FormField] {
        &[Self::Amount, Self::Date, Self::Note]
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Amount => "Amount",
            Self::Date => "Date (YYYY-MM-DD)",
            Self::Note => "Note",
        }
    }

    pub(crate) fn next(self) -> Self {
        match self {
            Self::Amount => Self::Date,
            Self::Date => Self::Note,
            Self::Note => Self::Amount,
        }
    }

    pub(crate) fn prev(self) -> Self {
        match self {
            Self::Amount => Self::Note,
            Self::Date => Self::Amount,
            Self::Note => Self::Date,
        }
    }

    pub(crate) fn value(self, draft: &Draft) -> &str {
        match self {
            Self::Amount => &draft.amount,
            Self::Date => &draft.date,
            Self::Note => &draft.note,
        }
    }

    pub(crate) fn value_mut(self, draft: &mut Draft) -> &mut String {
        match self {
            Self::Amount => &mut draft.amount,
            Self::Date => &mut draft.date,
            Self::Note => &mut draft.note,
        }
    }
}

/// Deletion staged behind the confirm gate.
#[derive(Debug, Clone)]
pub(crate) struct PendingDelete {
    pub(crate) id: i64,
    pub(crate) note: String,
}

/// Transient view state. The expense data itself lives in the store; the
/// app only tracks how it is being looked at and what the user is doing.
pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) input_mode: InputMode,
    pub(crate) focus: FormField,
    pub(crate) cursor: usize,
    pub(crate) scroll: usize,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    pub(crate) pending_delete: Option<PendingDelete>,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new() -> Self {
        Self {
            running: true,
            input_mode: InputMode::Normal,
            focus: FormField::Amount,
            cursor: 0,
            scroll: 0,
            status_message: String::new(),
            show_help: false,
            pending_delete: None,
            visible_rows: 20,
        }
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    /// Move the list cursor down one row, keeping it inside the visible page.
    pub(crate) fn move_down(&mut self, len: usize) {
        if self.cursor + 1 < len {
            self.cursor += 1;
            let page = self.visible_rows.max(1);
            if self.cursor >= self.scroll + page {
                self.scroll = self.cursor + 1 - page;
            }
        }
    }

    pub(crate) fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        }
    }

    pub(crate) fn jump_top(&mut self) {
        self.cursor = 0;
        self.scroll = 0;
    }

    pub(crate) fn jump_bottom(&mut self, len: usize) {
        if len > 0 {
            self.cursor = len - 1;
            let page = self.visible_rows.max(1);
            self.scroll = self.cursor.saturating_sub(page - 1);
        }
    }

    /// Pull the cursor back inside the list after it shrank.
    pub(crate) fn clamp_cursor(&mut self, len: usize) {
        if len == 0 {
            self.jump_top();
        } else if self.cursor >= len {
            self.cursor = len - 1;
            if self.scroll > self.cursor {
                self.scroll = self.cursor;
            }
        }
    }
}
