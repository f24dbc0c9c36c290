use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::caja;
use crate::cli::confirm::confirm;
use crate::error::Result;
use crate::fmt::{money, time_of};
use crate::models::CajaKind;

pub fn add(description: &str, amount: f64, kind: &str) -> Result<()> {
    let store = super::open_store()?;
    let kind = super::parse_kind(kind)?;
    let tx = caja::record_transaction(&store, description, amount, kind)?;
    println!(
        "Recorded {} #{}: {} ({})",
        tx.kind.as_str(),
        tx.id,
        tx.description,
        money(tx.amount)
    );
    println!("Balance: {}", money(caja::balance(&store)?));
    Ok(())
}

pub fn list(date: Option<&str>) -> Result<()> {
    let store = super::open_store()?;
    let rows = match date {
        Some(d) => caja::transactions_on(&store, d)?,
        None => caja::all_transactions(&store)?,
    };

    let mut table = Table::new();
    table.set_header(vec!["ID", "Date", "Time", "Description", "Amount"]);
    for t in &rows {
        let amount = match t.kind {
            CajaKind::Entrada => money(t.amount).green(),
            CajaKind::Salida => format!("-{}", money(t.amount)).red(),
        };
        table.add_row(vec![
            Cell::new(t.id),
            Cell::new(&t.date[..10.min(t.date.len())]),
            Cell::new(time_of(&t.date)),
            Cell::new(&t.description),
            Cell::new(amount),
        ]);
    }
    match date {
        Some(d) => println!("Caja {d}\n{table}"),
        None => println!("Caja\n{table}"),
    }
    println!("Balance: {}", money(caja::balance(&store)?));
    Ok(())
}

pub fn balance() -> Result<()> {
    let store = super::open_store()?;
    println!("Balance: {}", money(caja::balance(&store)?));
    Ok(())
}

pub fn delete(id: i64, yes: bool) -> Result<()> {
    let store = super::open_store()?;
    if !confirm(&format!("Delete cash movement #{id}?"), yes)? {
        println!("Cancelled.");
        return Ok(());
    }
    caja::remove_transaction(&store, id)?;
    println!("Deleted cash movement #{id}");
    Ok(())
}
