use comfy_table::{Cell, Table};

use crate::cli::confirm::confirm;
use crate::error::Result;

pub fn add(name: &str) -> Result<()> {
    let store = super::open_store()?;
    let person = store.add_salesperson(name)?;
    println!("Added staff member: {}", person.name);
    Ok(())
}

pub fn list(search: Option<&str>) -> Result<()> {
    let store = super::open_store()?;
    let term = search.unwrap_or("").trim().to_lowercase();
    let mut table = Table::new();
    table.set_header(vec!["ID", "Name"]);
    for s in store.salespersons()? {
        if !term.is_empty() && !s.name.to_lowercase().contains(&term) {
            continue;
        }
        table.add_row(vec![Cell::new(s.id), Cell::new(&s.name)]);
    }
    println!("Staff\n{table}");
    Ok(())
}

pub fn update(id: i64, name: &str) -> Result<()> {
    let store = super::open_store()?;
    let person = store.update_salesperson(id, name)?;
    println!("Updated staff member: {}", person.name);
    Ok(())
}

pub fn delete(id: i64, yes: bool) -> Result<()> {
    let store = super::open_store()?;
    let person = store.get_salesperson(id)?;
    if !confirm(&format!("Delete staff member '{}'?", person.name), yes)? {
        println!("Cancelled.");
        return Ok(());
    }
    store.delete_salesperson(id)?;
    println!("Deleted staff member: {}", person.name);
    Ok(())
}
