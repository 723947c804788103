use anyhow::Result;
use chrono::Local;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::storage::Storage;
use crate::store::ExpenseStore;
use crate::ui::app::{App, FormField, InputMode, PendingDelete};

pub(crate) fn as_tui<S: Storage>(store: &mut ExpenseStore<S>) -> Result<()> {
    let mut app = App::new();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, store);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app<S: Storage>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    store: &mut ExpenseStore<S>,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // Header, status bar, list borders and table header eat 5 rows.
            let content_height = f.area().height.saturating_sub(5) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app, store);
        })?;

        if let Event::Key(key) = event::read()? {
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, store),
                InputMode::Editing => handle_editing_input(key, app, store),
                InputMode::Confirm => handle_confirm_input(key, app, store),
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input<S: Storage>(
    key: event::KeyEvent,
    app: &mut App,
    store: &mut ExpenseStore<S>,
) {
    match key.code {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
        }
        KeyCode::Char('j') | KeyCode::Down => app.move_down(store.len()),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('g') => app.jump_top(),
        KeyCode::Char('G') => app.jump_bottom(store.len()),
        KeyCode::Char('a') => {
            store.cancel_edit();
            // Prefill today's date; everything else starts blank.
            store.draft.date = Local::now().format("%Y-%m-%d").to_string();
            app.focus = FormField::Amount;
            app.input_mode = InputMode::Editing;
            app.set_status("New expense");
        }
        KeyCode::Char('e') | KeyCode::Enter => {
            if let Some(expense) = store.expenses().get(app.cursor) {
                let id = expense.id;
                let note = expense.note.clone();
                if store.begin_edit(id) {
                    app.focus = FormField::Amount;
                    app.input_mode = InputMode::Editing;
                    app.set_status(format!("Editing: {note}"));
                }
            }
        }
        KeyCode::Char('d') => {
            if let Some(expense) = store.expenses().get(app.cursor) {
                app.pending_delete = Some(PendingDelete {
                    id: expense.id,
                    note: expense.note.clone(),
                });
                app.input_mode = InputMode::Confirm;
            }
        }
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Esc => app.status_message.clear(),
        _ => {}
    }
}

fn handle_editing_input<S: Storage>(
    key: event::KeyEvent,
    app: &mut App,
    store: &mut ExpenseStore<S>,
) {
    match key.code {
        KeyCode::Enter => {
            let was_edit = store.editing().is_some();
            match store.submit() {
                Ok(_) => {
                    app.input_mode = InputMode::Normal;
                    if was_edit {
                        app.set_status("Updated");
                    } else {
                        // The new record sits at the front of the list.
                        app.jump_top();
                        app.set_status("Added");
                    }
                }
                Err(e) => app.set_status(e.to_string()),
            }
        }
        KeyCode::Esc => {
            store.cancel_edit();
            app.input_mode = InputMode::Normal;
            app.set_status("Edit cancelled");
        }
        KeyCode::Tab | KeyCode::Down => app.focus = app.focus.next(),
        KeyCode::BackTab | KeyCode::Up => app.focus = app.focus.prev(),
        KeyCode::Backspace => {
            app.focus.value_mut(&mut store.draft).pop();
        }
        KeyCode::Char(c) => app.focus.value_mut(&mut store.draft).push(c),
        _ => {}
    }
}

fn handle_confirm_input<S: Storage>(
    key: event::KeyEvent,
    app: &mut App,
    store: &mut ExpenseStore<S>,
) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if let Some(pending) = app.pending_delete.take() {
                store.delete(pending.id);
                app.clamp_cursor(store.len());
                app.set_status(format!("Deleted: {}", pending.note));
            }
            app.input_mode = InputMode::Normal;
        }
        _ => {
            // Any other key = cancel
            app.pending_delete = None;
            app.input_mode = InputMode::Normal;
            app.set_status("Cancelled");
        }
    }
}
