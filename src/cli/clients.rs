use comfy_table::{Cell, Table};

use crate::cli::confirm::confirm;
use crate::error::Result;

pub fn add(name: &str, phone: &str, local: &str, modalidad: &str) -> Result<()> {
    let store = super::open_store()?;
    let modalidad = super::parse_modalidad(modalidad)?;
    let client = store.add_client(name, phone, local, modalidad)?;
    println!("Added client: {} ({})", client.name, client.modalidad);
    Ok(())
}

pub fn list(search: Option<&str>) -> Result<()> {
    let store = super::open_store()?;
    let term = search.unwrap_or("").trim().to_lowercase();
    let clients: Vec<_> = store
        .clients()?
        .into_iter()
        .filter(|c| {
            term.is_empty()
                || c.name.to_lowercase().contains(&term)
                || c.phone.to_lowercase().contains(&term)
                || c.local.to_lowercase().contains(&term)
        })
        .collect();

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Phone", "Location", "Modality"]);
    for c in &clients {
        table.add_row(vec![
            Cell::new(c.id),
            Cell::new(&c.name),
            Cell::new(&c.phone),
            Cell::new(&c.local),
            Cell::new(&c.modalidad),
        ]);
    }
    println!("Clients\n{table}");
    Ok(())
}

pub fn update(
    id: i64,
    name: Option<&str>,
    phone: Option<&str>,
    local: Option<&str>,
    modalidad: Option<&str>,
) -> Result<()> {
    let store = super::open_store()?;
    let modalidad = modalidad.map(super::parse_modalidad).transpose()?;
    let client = store.update_client(id, name, phone, local, modalidad)?;
    println!("Updated client: {} ({})", client.name, client.modalidad);
    Ok(())
}

pub fn delete(id: i64, yes: bool) -> Result<()> {
    let store = super::open_store()?;
    let client = store.get_client(id)?;
    if !confirm(&format!("Delete client '{}'?", client.name), yes)? {
        println!("Cancelled.");
        return Ok(());
    }
    store.delete_client(id)?;
    println!("Deleted client: {}", client.name);
    Ok(())
}
