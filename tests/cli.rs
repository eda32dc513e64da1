use assert_cmd::Command;
use predicates::prelude::*;

fn penny(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("penny").unwrap();
    cmd.env("HOME", home);
    cmd
}

const SAMPLE_CSV: &str = "\
date,amount,merchant,category,description
2025-01-15,4.75,STARBUCKS #4521,,latte
2025-01-16,23.10,UBER TRIP 8842,,airport run
2025-01-17,61.03,WHOLE FOODS MKT,Groceries,weekly shop
";

fn setup(home: &std::path::Path) {
    let data_dir = home.join("data");
    penny(home)
        .args(["init", "--data-dir"])
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized penny"));
    penny(home)
        .args(["users", "add", "Alice", "--email", "alice@example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added user Alice"));
}

#[test]
fn import_then_rerun_is_idempotent() {
    let home = tempfile::tempdir().unwrap();
    setup(home.path());
    let csv = home.path().join("txns.csv");
    std::fs::write(&csv, SAMPLE_CSV).unwrap();

    penny(home.path())
        .arg("import")
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("Parsed 3 rows"))
        .stdout(predicate::str::contains("Using user_id=1"))
        .stdout(predicate::str::contains("Skipped (dupes): 0"));

    penny(home.path())
        .arg("import")
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipped (dupes): 3"));
}

#[test]
fn bad_rows_fail_without_failing_the_run() {
    let home = tempfile::tempdir().unwrap();
    setup(home.path());
    let csv = home.path().join("txns.csv");
    std::fs::write(
        &csv,
        "date,amount,merchant,category,description\n\
         2025-01-15,4.75,STARBUCKS #4521,,latte\n\
         2025-01-16,not-a-number,CORNER DELI,,lunch\n",
    )
    .unwrap();

    penny(home.path())
        .arg("import")
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("Failed: 1"))
        .stderr(predicate::str::contains("CORNER DELI"));
}

#[test]
fn import_without_users_is_fatal() {
    let home = tempfile::tempdir().unwrap();
    let data_dir = home.path().join("data");
    penny(home.path())
        .args(["init", "--data-dir"])
        .arg(&data_dir)
        .assert()
        .success();
    let csv = home.path().join("txns.csv");
    std::fs::write(&csv, SAMPLE_CSV).unwrap();

    penny(home.path())
        .arg("import")
        .arg(&csv)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No users found"));
}

#[test]
fn users_list_shows_added_users() {
    let home = tempfile::tempdir().unwrap();
    setup(home.path());
    penny(home.path())
        .args(["users", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alice"))
        .stdout(predicate::str::contains("alice@example.com"));
}

#[test]
fn report_summary_shows_totals_and_categories() {
    let home = tempfile::tempdir().unwrap();
    setup(home.path());
    let csv = home.path().join("txns.csv");
    std::fs::write(
        &csv,
        "date,amount,merchant,category,description\n\
         2025-01-10,2500.00,ACME PAYROLL,Income,salary\n\
         2025-01-15,-4.75,STARBUCKS #4521,,latte\n\
         2025-01-16,-61.03,WHOLE FOODS MKT,,groceries\n",
    )
    .unwrap();
    penny(home.path()).arg("import").arg(&csv).assert().success();

    penny(home.path())
        .args(["report", "summary", "--from", "2025-01-01", "--to", "2025-12-31"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Income"))
        .stdout(predicate::str::contains("2500.00"))
        .stdout(predicate::str::contains("-65.78"))
        .stdout(predicate::str::contains("Coffee"))
        .stdout(predicate::str::contains("Groceries"));

    penny(home.path())
        .args(["report", "cashflow", "--year", "2025"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2025-01"))
        .stdout(predicate::str::contains("2025-12"))
        .stdout(predicate::str::contains("2434.22"));
}

#[test]
fn status_reports_counts() {
    let home = tempfile::tempdir().unwrap();
    setup(home.path());
    penny(home.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Users:          1"))
        .stdout(predicate::str::contains("Transactions:   0"));
}
