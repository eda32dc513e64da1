use chrono::Datelike;
use rusqlite::Connection;

use crate::error::Result;

// ---------------------------------------------------------------------------
// Period summary
// ---------------------------------------------------------------------------

#[derive(Debug, Default, PartialEq)]
pub struct SummaryTotals {
    /// Sum of positive amounts in the period.
    pub income: f64,
    /// Sum of negative amounts in the period (itself negative or zero).
    pub expenses: f64,
    pub net: f64,
}

#[derive(Debug, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

pub struct SummaryReport {
    pub from: String,
    pub to: String,
    pub totals: SummaryTotals,
    pub by_category: Vec<CategoryTotal>,
}

/// Resolve the reporting period: both bounds, or year-to-date when neither is
/// given; a lone `--from` runs through today, a lone `--to` from January 1 of
/// its own year.
fn resolve_period(from: Option<&str>, to: Option<&str>) -> (String, String) {
    let today = chrono::Local::now().date_naive();
    match (from, to) {
        (Some(f), Some(t)) => (f.to_string(), t.to_string()),
        (Some(f), None) => (f.to_string(), today.format("%Y-%m-%d").to_string()),
        (None, Some(t)) => (format!("{}-01-01", &t[..4.min(t.len())]), t.to_string()),
        (None, None) => (
            format!("{}-01-01", today.year()),
            today.format("%Y-%m-%d").to_string(),
        ),
    }
}

/// Income/expense/net plus per-category totals for a user over a date range,
/// both bounds inclusive. Sign of the amount decides income vs expense.
pub fn get_summary(
    conn: &Connection,
    user_id: i64,
    from: Option<&str>,
    to: Option<&str>,
) -> Result<SummaryReport> {
    let (from, to) = resolve_period(from, to);

    let totals = conn.query_row(
        "SELECT
            COALESCE(SUM(CASE WHEN amount > 0 THEN amount ELSE 0 END), 0),
            COALESCE(SUM(CASE WHEN amount < 0 THEN amount ELSE 0 END), 0),
            COALESCE(SUM(amount), 0)
         FROM transactions
         WHERE user_id = ?1 AND date >= ?2 AND date <= ?3",
        rusqlite::params![user_id, from, to],
        |row| {
            Ok(SummaryTotals {
                income: row.get(0)?,
                expenses: row.get(1)?,
                net: row.get(2)?,
            })
        },
    )?;

    let mut stmt = conn.prepare(
        "SELECT category, SUM(amount) as total
         FROM transactions
         WHERE user_id = ?1 AND date >= ?2 AND date <= ?3
         GROUP BY category ORDER BY total DESC",
    )?;
    let by_category = stmt
        .query_map(rusqlite::params![user_id, from, to], |row| {
            Ok(CategoryTotal {
                category: row.get(0)?,
                total: row.get(1)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(SummaryReport {
        from,
        to,
        totals,
        by_category,
    })
}

// ---------------------------------------------------------------------------
// Monthly cashflow
// ---------------------------------------------------------------------------

#[derive(Debug, PartialEq)]
pub struct CashflowMonth {
    /// YYYY-MM
    pub month: String,
    pub income: f64,
    pub expenses: f64,
    pub net: f64,
}

/// Per-month income/expenses/net for one calendar year, all twelve months
/// present with months that saw no transactions zero-filled.
pub fn get_cashflow(conn: &Connection, user_id: i64, year: Option<i32>) -> Result<Vec<CashflowMonth>> {
    let year = year.unwrap_or_else(|| chrono::Local::now().year());

    let mut months: Vec<CashflowMonth> = (1..=12)
        .map(|m| CashflowMonth {
            month: format!("{year:04}-{m:02}"),
            income: 0.0,
            expenses: 0.0,
            net: 0.0,
        })
        .collect();

    let mut stmt = conn.prepare(
        "SELECT substr(date, 1, 7) as month,
            SUM(CASE WHEN amount > 0 THEN amount ELSE 0 END),
            SUM(CASE WHEN amount < 0 THEN amount ELSE 0 END)
         FROM transactions
         WHERE user_id = ?1 AND date LIKE ?2
         GROUP BY month ORDER BY month",
    )?;
    let rows: Vec<(String, f64, f64)> = stmt
        .query_map(rusqlite::params![user_id, format!("{year:04}-%")], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?))
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    for (month, income, expenses) in rows {
        if let Some(slot) = months.iter_mut().find(|m| m.month == month) {
            slot.income = income;
            slot.expenses = expenses;
            slot.net = income + expenses;
        }
    }

    Ok(months)
}
