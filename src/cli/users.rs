use comfy_table::{Cell, Table};

use crate::db::{add_user, get_connection, list_users};
use crate::error::Result;
use crate::settings::get_data_dir;

pub fn add(name: &str, email: Option<&str>) -> Result<()> {
    let conn = get_connection(&get_data_dir().join("penny.db"))?;
    let id = add_user(&conn, name, email)?;
    println!("Added user {name} (id={id})");
    Ok(())
}

pub fn list() -> Result<()> {
    let conn = get_connection(&get_data_dir().join("penny.db"))?;
    let users = list_users(&conn)?;

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Email"]);
    for user in users {
        table.add_row(vec![
            Cell::new(user.id),
            Cell::new(user.name),
            Cell::new(user.email.unwrap_or_default()),
        ]);
    }
    println!("Users\n{table}");
    Ok(())
}
