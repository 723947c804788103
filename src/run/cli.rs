use anyhow::Result;

use crate::storage::Storage;
use crate::store::ExpenseStore;
use crate::ui::util::{format_amount, format_decimal};

pub(crate) fn as_cli<S: Storage>(args: &[String], store: &mut ExpenseStore<S>) -> Result<()> {
    match args[1].as_str() {
        "list" | "ls" => cli_list(store),
        "add" => cli_add(&args[2..], store),
        "export" => cli_export(&args[2..], store),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("spendtui {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("SpendTUI — local-only expense tracker");
    println!();
    println!("Usage: spendtui [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  list                          Print all expenses");
    println!("  add <amount> <date> <note>    Record an expense (date: YYYY-MM-DD)");
    println!("  export [path]                 Export expenses to CSV");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
}

fn cli_list<S: Storage>(store: &mut ExpenseStore<S>) -> Result<()> {
    if store.is_empty() {
        println!("No expenses recorded");
        return Ok(());
    }

    println!("{:<12} {:>12}  Note", "Date", "Amount");
    println!("{}", "─".repeat(50));
    for expense in store.expenses() {
        println!(
            "{:<12} {:>12}  {}",
            expense.date,
            format_amount(&expense.amount),
            expense.note,
        );
    }
    println!("{}", "─".repeat(50));
    println!("{:<12} {:>12}", "Total", format_decimal(store.total()));
    Ok(())
}

fn cli_add<S: Storage>(args: &[String], store: &mut ExpenseStore<S>) -> Result<()> {
    if args.len() < 3 {
        anyhow::bail!("Usage: spendtui add <amount> <date> <note...>");
    }

    store.draft.amount = args[0].clone();
    store.draft.date = args[1].clone();
    store.draft.note = args[2..].join(" ");

    let id = store.submit()?;
    println!("Added expense {id}");
    Ok(())
}

fn cli_export<S: Storage>(args: &[String], store: &mut ExpenseStore<S>) -> Result<()> {
    // Output path is the first non-flag argument
    let output_path = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .map(|a| shellexpand(a))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            format!("{home}/spendtui-export.csv")
        });

    let count = export_to_csv(store, &output_path)?;
    if count == 0 {
        println!("No expenses to export");
    } else {
        println!("Exported {count} expenses to {output_path}");
    }
    Ok(())
}

fn export_to_csv<S: Storage>(store: &ExpenseStore<S>, path: &str) -> Result<usize> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["id", "amount", "date", "note"])?;
    for expense in store.expenses() {
        writer.write_record([
            expense.id.to_string(),
            expense.amount.clone(),
            expense.date.clone(),
            expense.note.clone(),
        ])?;
    }
    writer.flush()?;
    Ok(store.len())
}

fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}
