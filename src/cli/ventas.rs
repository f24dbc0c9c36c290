use comfy_table::{Cell, Table};

use crate::cli::confirm::confirm;
use crate::error::{LibretaError, Result};
use crate::fmt::{money, time_of};
use crate::ventas;

pub fn add(client: &str, product: &str, staff: &str, quantity: i64) -> Result<()> {
    let store = super::open_store()?;
    let client = store
        .find_client(client)?
        .ok_or_else(|| LibretaError::UnknownClient(client.to_string()))?;
    let product = store
        .find_product(product)?
        .ok_or_else(|| LibretaError::UnknownProduct(product.to_string()))?;
    let staff = store
        .find_salesperson(staff)?
        .ok_or_else(|| LibretaError::UnknownSalesperson(staff.to_string()))?;

    let venta = ventas::record_venta(&store, client.id, product.id, staff.id, quantity)?;
    println!(
        "Recorded sale #{}: {}x {} for {} ({})",
        venta.id,
        venta.quantity,
        product.name,
        client.name,
        money(venta.total_amount)
    );
    Ok(())
}

pub fn list(date: Option<&str>) -> Result<()> {
    let store = super::open_store()?;
    let date = date.map(str::to_string).unwrap_or_else(super::today);
    let rows = ventas::ventas_on(&store, &date)?;
    let total: f64 = rows.iter().map(|v| v.total_amount).sum();

    let mut table = Table::new();
    table.set_header(vec!["ID", "Time", "Client", "Product", "Staff", "Qty", "Amount"]);
    for v in &rows {
        table.add_row(vec![
            Cell::new(v.id),
            Cell::new(time_of(&v.date)),
            Cell::new(&v.client_name),
            Cell::new(&v.product_name),
            Cell::new(&v.salesperson_name),
            Cell::new(v.quantity),
            Cell::new(money(v.total_amount)),
        ]);
    }
    println!("Ventas {date}\n{table}");
    println!("Total: {}", money(total));
    Ok(())
}

pub fn delete(id: i64, yes: bool) -> Result<()> {
    let store = super::open_store()?;
    if !confirm(&format!("Delete sale #{id}?"), yes)? {
        println!("Cancelled.");
        return Ok(());
    }
    ventas::remove_venta(&store, id)?;
    println!("Deleted sale #{id}");
    Ok(())
}
