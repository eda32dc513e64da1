use comfy_table::{Cell, Table};

use crate::db::{get_connection, SqliteStore};
use crate::error::Result;
use crate::importer::resolve_user_id;
use crate::reports::{get_cashflow, get_summary};
use crate::settings::{get_data_dir, load_settings};

fn resolve_user(conn: &rusqlite::Connection, user: Option<i64>) -> Result<i64> {
    let store = SqliteStore::new(conn);
    resolve_user_id(&store, user.or(load_settings().default_user_id))
}

pub fn summary(from: Option<String>, to: Option<String>, user: Option<i64>) -> Result<()> {
    let conn = get_connection(&get_data_dir().join("penny.db"))?;
    let user_id = resolve_user(&conn, user)?;
    let report = get_summary(&conn, user_id, from.as_deref(), to.as_deref())?;

    println!("Summary for user {user_id}, {} to {}", report.from, report.to);

    let mut table = Table::new();
    table.set_header(vec!["", "Amount"]);
    table.add_row(vec![
        Cell::new("Income"),
        Cell::new(format!("{:.2}", report.totals.income)),
    ]);
    table.add_row(vec![
        Cell::new("Expenses"),
        Cell::new(format!("{:.2}", report.totals.expenses)),
    ]);
    table.add_row(vec![
        Cell::new("Net"),
        Cell::new(format!("{:.2}", report.totals.net)),
    ]);
    println!("{table}");

    let mut by_cat = Table::new();
    by_cat.set_header(vec!["Category", "Total"]);
    for item in &report.by_category {
        by_cat.add_row(vec![
            Cell::new(&item.category),
            Cell::new(format!("{:.2}", item.total)),
        ]);
    }
    println!("By category\n{by_cat}");

    Ok(())
}

pub fn cashflow(year: Option<i32>, user: Option<i64>) -> Result<()> {
    let conn = get_connection(&get_data_dir().join("penny.db"))?;
    let user_id = resolve_user(&conn, user)?;
    let months = get_cashflow(&conn, user_id, year)?;

    let mut table = Table::new();
    table.set_header(vec!["Month", "Income", "Expenses", "Net"]);
    for m in &months {
        table.add_row(vec![
            Cell::new(&m.month),
            Cell::new(format!("{:.2}", m.income)),
            Cell::new(format!("{:.2}", m.expenses)),
            Cell::new(format!("{:.2}", m.net)),
        ]);
    }
    println!("Cashflow\n{table}");

    Ok(())
}
