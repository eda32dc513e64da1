use std::path::Path;

use crate::categorizer::Categorizer;
use crate::error::{PennyError, Result};
use crate::fingerprint::fingerprint;
use crate::models::{ImportOutcome, RawRow};
use crate::normalizer::normalize;
use crate::store::{ConstraintKind, InsertError, TransactionStore};

/// Diagnostic for one failed row, kept for operator output.
#[derive(Debug, Clone)]
pub struct RowFailure {
    /// 1-based position in the source file.
    pub row: usize,
    pub merchant: String,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct ImportSummary {
    pub parsed: usize,
    pub inserted: usize,
    pub skipped: usize,
    pub failed: usize,
    pub failures: Vec<RowFailure>,
}

/// Read all records from a headered CSV file. Parsing is delegated entirely
/// to the csv crate; rows come back in file order.
pub fn parse_csv(path: &Path) -> Result<Vec<RawRow>> {
    let file = std::fs::File::open(path)?;
    let mut rdr = csv::Reader::from_reader(std::io::BufReader::new(file));
    let mut rows = Vec::new();
    for record in rdr.deserialize() {
        rows.push(record?);
    }
    Ok(rows)
}

/// Resolve the user to import against: an explicit override wins, otherwise
/// the lowest existing user id. No users at all aborts the run before any
/// row is touched.
pub fn resolve_user_id(store: &dyn TransactionStore, explicit: Option<i64>) -> Result<i64> {
    if let Some(id) = explicit {
        return Ok(id);
    }
    store.lowest_user_id()?.ok_or(PennyError::NoUsers)
}

fn classify_row(
    store: &dyn TransactionStore,
    categorizer: &Categorizer,
    user_id: i64,
    row: &RawRow,
) -> ImportOutcome {
    let mut txn = match normalize(row, user_id) {
        Ok(txn) => txn,
        Err(e) => return ImportOutcome::Failed(e.to_string()),
    };
    txn.category = categorizer.resolve(&txn.merchant, &txn.category);
    let import_id = fingerprint(&txn);

    match store.insert_transaction(&txn, &import_id) {
        Ok(()) => ImportOutcome::Inserted,
        Err(InsertError::Constraint(ConstraintKind::Uniqueness, _)) => {
            ImportOutcome::SkippedDuplicate
        }
        Err(InsertError::Constraint(ConstraintKind::Other, reason)) => {
            ImportOutcome::Failed(reason)
        }
        Err(InsertError::Rejected(reason)) => ImportOutcome::Failed(reason),
    }
}

/// Run the import pipeline over a batch of raw rows, one row at a time in
/// input order. A row failure never aborts the batch; duplicates are an
/// expected outcome, counted but not treated as errors.
pub fn import_rows(
    store: &dyn TransactionStore,
    categorizer: &Categorizer,
    user_id: i64,
    rows: &[RawRow],
) -> ImportSummary {
    let mut summary = ImportSummary {
        parsed: rows.len(),
        ..ImportSummary::default()
    };

    for (i, row) in rows.iter().enumerate() {
        match classify_row(store, categorizer, user_id, row) {
            ImportOutcome::Inserted => summary.inserted += 1,
            ImportOutcome::SkippedDuplicate => summary.skipped += 1,
            ImportOutcome::Failed(reason) => {
                summary.failed += 1;
                summary.failures.push(RowFailure {
                    row: i + 1,
                    merchant: row.merchant.as_deref().unwrap_or("").trim().to_string(),
                    reason,
                });
            }
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{add_user, get_connection, init_db, SqliteStore};
    use rusqlite::Connection;

    fn test_db() -> (tempfile::TempDir, Connection) {
        let dir = tempfile::tempdir().unwrap();
        let conn = get_connection(&dir.path().join("test.db")).unwrap();
        init_db(&conn).unwrap();
        (dir, conn)
    }

    fn raw(date: &str, amount: &str, merchant: &str, category: &str, desc: &str) -> RawRow {
        RawRow {
            date: Some(date.to_string()),
            amount: Some(amount.to_string()),
            merchant: Some(merchant.to_string()),
            category: Some(category.to_string()),
            description: Some(desc.to_string()),
        }
    }

    fn sample_rows() -> Vec<RawRow> {
        vec![
            raw("2025-01-15", "4.75", "STARBUCKS #4521", "", "latte"),
            raw("2025-01-16", "23.10", "UBER TRIP 8842", "", "airport"),
            raw("2025-01-17", "61.03", "WHOLE FOODS MKT", "", "groceries"),
        ]
    }

    #[test]
    fn test_import_inserts_and_categorizes() {
        let (_dir, conn) = test_db();
        let user = add_user(&conn, "Alice", None).unwrap();
        let store = SqliteStore::new(&conn);
        let summary = import_rows(&store, &Categorizer::default(), user, &sample_rows());
        assert_eq!(summary.parsed, 3);
        assert_eq!(summary.inserted, 3);
        assert_eq!(summary.skipped, 0);
        assert_eq!(summary.failed, 0);

        let coffee: String = conn
            .query_row(
                "SELECT category FROM transactions WHERE merchant = 'STARBUCKS #4521'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(coffee, "Coffee");
    }

    #[test]
    fn test_second_run_skips_everything() {
        let (_dir, conn) = test_db();
        let user = add_user(&conn, "Alice", None).unwrap();
        let store = SqliteStore::new(&conn);
        let rows = sample_rows();
        let first = import_rows(&store, &Categorizer::default(), user, &rows);
        assert_eq!(first.inserted, 3);

        let second = import_rows(&store, &Categorizer::default(), user, &rows);
        assert_eq!(second.inserted, 0);
        assert_eq!(second.skipped, first.inserted);
        assert_eq!(second.failed, 0);
    }

    #[test]
    fn test_rerun_after_partial_import_fills_in_the_rest() {
        let (_dir, conn) = test_db();
        let user = add_user(&conn, "Alice", None).unwrap();
        let store = SqliteStore::new(&conn);
        let rows = sample_rows();
        import_rows(&store, &Categorizer::default(), user, &rows[..2]);

        let summary = import_rows(&store, &Categorizer::default(), user, &rows);
        assert_eq!(summary.inserted, 1);
        assert_eq!(summary.skipped, 2);
    }

    #[test]
    fn test_bad_row_does_not_abort_the_batch() {
        let (_dir, conn) = test_db();
        let user = add_user(&conn, "Alice", None).unwrap();
        let store = SqliteStore::new(&conn);
        let mut rows = sample_rows();
        rows.insert(2, raw("2025-01-16", "twelve dollars", "CORNER DELI", "", ""));
        rows.push(raw("2025-01-18", "9.99", "NETFLIX.COM", "", ""));

        let summary = import_rows(&store, &Categorizer::default(), user, &rows);
        assert_eq!(summary.parsed, 5);
        assert_eq!(summary.inserted, 4);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].row, 3);
        assert_eq!(summary.failures[0].merchant, "CORNER DELI");
        assert!(summary.failures[0].reason.contains("amount"));
    }

    #[test]
    fn test_malformed_date_counts_as_failed() {
        let (_dir, conn) = test_db();
        let user = add_user(&conn, "Alice", None).unwrap();
        let store = SqliteStore::new(&conn);
        let rows = vec![raw("01/15/2025", "5.00", "SHELL OIL", "", "")];
        let summary = import_rows(&store, &Categorizer::default(), user, &rows);
        assert_eq!(summary.failed, 1);
        assert!(summary.failures[0].reason.contains("date"));
    }

    #[test]
    fn test_explicit_category_survives_import() {
        let (_dir, conn) = test_db();
        let user = add_user(&conn, "Alice", None).unwrap();
        let store = SqliteStore::new(&conn);
        let rows = vec![raw("2025-01-15", "89.00", "Uber", "Travel", "conference")];
        import_rows(&store, &Categorizer::default(), user, &rows);
        let category: String = conn
            .query_row("SELECT category FROM transactions", [], |r| r.get(0))
            .unwrap();
        assert_eq!(category, "Travel");
    }

    #[test]
    fn test_resolve_user_prefers_override() {
        let (_dir, conn) = test_db();
        add_user(&conn, "Alice", None).unwrap();
        let store = SqliteStore::new(&conn);
        assert_eq!(resolve_user_id(&store, Some(42)).unwrap(), 42);
    }

    #[test]
    fn test_resolve_user_falls_back_to_lowest() {
        let (_dir, conn) = test_db();
        let first = add_user(&conn, "Alice", None).unwrap();
        add_user(&conn, "Bob", None).unwrap();
        let store = SqliteStore::new(&conn);
        assert_eq!(resolve_user_id(&store, None).unwrap(), first);
    }

    #[test]
    fn test_resolve_user_fails_when_table_empty() {
        let (_dir, conn) = test_db();
        let store = SqliteStore::new(&conn);
        assert!(matches!(
            resolve_user_id(&store, None),
            Err(PennyError::NoUsers)
        ));
    }

    #[test]
    fn test_parse_csv_reads_headered_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.csv");
        std::fs::write(
            &path,
            "date,amount,merchant,category,description\n\
             2025-01-15,4.75,STARBUCKS #4521,,latte\n\
             2025-01-16,23.10,UBER TRIP 8842,Travel,airport\n",
        )
        .unwrap();
        let rows = parse_csv(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].merchant.as_deref(), Some("STARBUCKS #4521"));
        // Empty CSV fields come back as None; the normalizer turns them into
        // empty strings.
        assert_eq!(rows[0].category, None);
        assert_eq!(rows[1].category.as_deref(), Some("Travel"));
    }
}
