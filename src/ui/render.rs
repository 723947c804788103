use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame,
};

use super::app::{App, FormField, InputMode};
use super::theme;
use super::util::{format_amount, format_decimal, truncate};
use crate::storage::Storage;
use crate::store::ExpenseStore;

pub(crate) fn render<S: Storage>(f: &mut Frame, app: &App, store: &ExpenseStore<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(5),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    render_header(f, chunks[0], store);

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(34), Constraint::Min(24)])
        .split(chunks[1]);

    render_form(f, content[0], app, store);
    render_list(f, content[1], app, store);
    render_status_bar(f, chunks[2], app);

    if app.show_help {
        render_help_overlay(f, f.area());
    }
}

fn render_header<S: Storage>(f: &mut Frame, area: Rect, store: &ExpenseStore<S>) {
    let summary = format!(
        " {} expense{} · {} total ",
        store.len(),
        if store.len() == 1 { "" } else { "s" },
        format_decimal(store.total()),
    );
    let title = " SpendTUI ";

    let fill = (area.width as usize).saturating_sub(title.len() + summary.len());
    let line = Line::from(vec![
        Span::styled(title, header_accent()),
        Span::styled(" ".repeat(fill), theme::header_style()),
        Span::styled(summary, theme::header_style()),
    ]);
    f.render_widget(Paragraph::new(line).style(theme::header_style()), area);
}

fn header_accent() -> Style {
    Style::default()
        .fg(theme::ACCENT)
        .bg(theme::BG)
        .add_modifier(Modifier::BOLD)
}

fn render_form<S: Storage>(f: &mut Frame, area: Rect, app: &App, store: &ExpenseStore<S>) {
    let editing = app.input_mode == InputMode::Editing;
    let title = if store.editing().is_some() {
        " Edit expense "
    } else {
        " Add expense "
    };

    let mut lines: Vec<Line> = Vec::new();
    for &field in FormField::all() {
        lines.push(Line::from(Span::styled(field.label(), theme::dim_style())));

        let value = field.value(&store.draft);
        let focused = editing && app.focus == field;
        let text = if focused {
            format!("{value}\u{2588}")
        } else if value.is_empty() {
            "·".to_string()
        } else {
            value.to_string()
        };
        let style = if focused {
            theme::focused_field_style()
        } else if value.is_empty() {
            theme::dim_style()
        } else {
            theme::normal_style()
        };
        lines.push(Line::from(Span::styled(text, style)));
        lines.push(Line::from(""));
    }

    if !editing {
        lines.push(Line::from(Span::styled(
            "Press a to start a new expense",
            theme::dim_style(),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if editing {
            theme::YELLOW
        } else {
            theme::SURFACE
        }))
        .title(Span::styled(
            title,
            Style::default()
                .fg(if editing { theme::YELLOW } else { theme::TEXT_DIM })
                .add_modifier(Modifier::BOLD),
        ));
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_list<S: Storage>(f: &mut Frame, area: Rect, app: &App, store: &ExpenseStore<S>) {
    let title = format!(" Expenses ({}) ", store.len());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::SURFACE))
        .title(Span::styled(
            title,
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    if store.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled("No expenses yet", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Press a to add your first one",
                theme::dim_style(),
            )),
        ];
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header_cells = ["Date", "Note", "Amount"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let note_width = area.width.saturating_sub(4 + 12 + 12) as usize;
    let rows: Vec<Row> = store
        .expenses()
        .iter()
        .enumerate()
        .skip(app.scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, expense)| {
            let is_cursor = i == app.cursor && app.input_mode != InputMode::Editing;
            let row_style = if is_cursor {
                theme::selected_style()
            } else {
                theme::normal_style()
            };
            let amount_cell = if is_cursor {
                Cell::from(Line::from(format_amount(&expense.amount)).right_aligned())
            } else {
                Cell::from(
                    Line::from(Span::styled(
                        format_amount(&expense.amount),
                        theme::amount_style(),
                    ))
                    .right_aligned(),
                )
            };
            Row::new(vec![
                Cell::from(expense.date.clone()),
                Cell::from(truncate(&expense.note, note_width)),
                amount_cell,
            ])
            .style(row_style)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Min(10),
            Constraint::Length(12),
        ],
    )
    .header(header)
    .block(block);
    f.render_widget(table, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mode_label = format!(" {} ", app.input_mode);
    let mode_style = match app.input_mode {
        InputMode::Normal => Style::default()
            .fg(theme::BG)
            .bg(theme::ACCENT)
            .add_modifier(Modifier::BOLD),
        InputMode::Editing => Style::default()
            .fg(theme::BG)
            .bg(theme::GREEN)
            .add_modifier(Modifier::BOLD),
        InputMode::Confirm => Style::default()
            .fg(theme::BG)
            .bg(theme::RED)
            .add_modifier(Modifier::BOLD),
    };

    let message = match (&app.input_mode, &app.pending_delete) {
        (InputMode::Confirm, Some(pending)) => {
            format!(" Delete '{}'?", truncate(&pending.note, 40))
        }
        _ => format!(" {}", app.status_message),
    };

    let hints = match app.input_mode {
        InputMode::Normal => " a add | e edit | d delete | q quit | ? help ",
        InputMode::Editing => " Tab next field | Enter save | Esc cancel ",
        InputMode::Confirm => " y delete | any other key cancels ",
    };

    let fill = (area.width as usize).saturating_sub(mode_label.len() + message.len() + hints.len());
    let line = Line::from(vec![
        Span::styled(mode_label, mode_style),
        Span::styled(message, theme::status_bar_style()),
        Span::styled(" ".repeat(fill), theme::status_bar_style()),
        Span::styled(hints, theme::status_bar_style()),
    ]);
    f.render_widget(Paragraph::new(line).style(theme::status_bar_style()), area);
}

fn render_help_overlay(f: &mut Frame, area: Rect) {
    let popup = centered_rect(44, 14, area);
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("  j/k, ↓/↑    move", theme::normal_style())),
        Line::from(Span::styled("  g/G         top / bottom", theme::normal_style())),
        Line::from(Span::styled("  a           add expense", theme::normal_style())),
        Line::from(Span::styled("  e, Enter    edit selected", theme::normal_style())),
        Line::from(Span::styled("  d           delete selected", theme::normal_style())),
        Line::from(Span::styled("  Tab         next form field", theme::normal_style())),
        Line::from(Span::styled("  Esc         cancel edit", theme::normal_style())),
        Line::from(Span::styled("  q, Ctrl-c   quit", theme::normal_style())),
        Line::from(""),
        Line::from(Span::styled("  any key to close", theme::dim_style())),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::ACCENT))
        .title(Span::styled(
            " Keys ",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        ));
    f.render_widget(Clear, popup);
    f.render_widget(Paragraph::new(lines).block(block), popup);
}

fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let w = width.min(r.width);
    let h = height.min(r.height);
    Rect {
        x: r.x + (r.width - w) / 2,
        y: r.y + (r.height - h) / 2,
        width: w,
        height: h,
    }
}
