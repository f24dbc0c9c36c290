use comfy_table::{Cell, Table};

use crate::cli::confirm::confirm;
use crate::error::Result;
use crate::fmt::money;

pub fn add(name: &str, category: &str, price: f64) -> Result<()> {
    let store = super::open_store()?;
    let product = store.add_product(name, category, price)?;
    println!("Added product: {} at {}", product.name, money(product.price));
    Ok(())
}

pub fn list(search: Option<&str>) -> Result<()> {
    let store = super::open_store()?;
    let term = search.unwrap_or("").trim().to_lowercase();
    let products: Vec<_> = store
        .products()?
        .into_iter()
        .filter(|p| {
            term.is_empty()
                || p.name.to_lowercase().contains(&term)
                || p.category.to_lowercase().contains(&term)
        })
        .collect();

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Category", "Price"]);
    for p in &products {
        table.add_row(vec![
            Cell::new(p.id),
            Cell::new(&p.name),
            Cell::new(&p.category),
            Cell::new(money(p.price)),
        ]);
    }
    println!("Products\n{table}");
    Ok(())
}

pub fn update(id: i64, name: Option<&str>, category: Option<&str>, price: Option<f64>) -> Result<()> {
    let store = super::open_store()?;
    let product = store.update_product(id, name, category, price)?;
    println!("Updated product: {} at {}", product.name, money(product.price));
    Ok(())
}

pub fn delete(id: i64, yes: bool) -> Result<()> {
    let store = super::open_store()?;
    let product = store.get_product(id)?;
    if !confirm(&format!("Delete product '{}'?", product.name), yes)? {
        println!("Cancelled.");
        return Ok(());
    }
    store.delete_product(id)?;
    println!("Deleted product: {}", product.name);
    Ok(())
}
