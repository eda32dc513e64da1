use crate::db::get_connection;
use crate::error::Result;
use crate::settings::load_settings;

pub fn run() -> Result<()> {
    let settings = load_settings();
    let data_dir = std::path::PathBuf::from(&settings.data_dir);
    let db_path = data_dir.join("penny.db");

    println!("Data dir:   {}", data_dir.display());
    println!("Database:   {}", db_path.display());

    if db_path.exists() {
        let conn = get_connection(&db_path)?;
        let users: i64 = conn.query_row("SELECT count(*) FROM users", [], |r| r.get(0))?;
        let transactions: i64 =
            conn.query_row("SELECT count(*) FROM transactions", [], |r| r.get(0))?;
        let uncategorized: i64 = conn.query_row(
            "SELECT count(*) FROM transactions WHERE category = 'Uncategorized'",
            [],
            |r| r.get(0),
        )?;

        println!();
        println!("Users:          {users}");
        println!("Transactions:   {transactions}");
        println!("Uncategorized:  {uncategorized}");
    } else {
        println!();
        println!("Database not found. Run `penny init` to set up.");
    }

    Ok(())
}
