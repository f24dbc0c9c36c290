use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::closeout;
use crate::error::Result;
use crate::fmt::{money, time_of};
use crate::models::CajaKind;

pub fn run(date: Option<&str>, counted: Option<f64>) -> Result<()> {
    let store = super::open_store()?;
    let date = date.map(str::to_string).unwrap_or_else(super::today);
    let closeout = closeout::daily_closeout(&store, &date)?;

    let mut table = Table::new();
    table.set_header(vec!["", ""]);
    table.add_row(vec!["Total sales".to_string(), money(closeout.total_sales)]);
    table.add_row(vec!["Opening balance".to_string(), money(closeout.opening_balance)]);
    table.add_row(vec!["Cash in".to_string(), money(closeout.cash_in)]);
    table.add_row(vec!["Cash out".to_string(), money(closeout.cash_out)]);
    table.add_row(vec![
        "Expected balance".to_string(),
        money(closeout.expected_balance),
    ]);
    println!("Closeout {date}\n{table}");

    if let Some(actual) = counted {
        let diff = closeout.difference(actual);
        println!("Counted: {}", money(actual));
        if diff == 0.0 {
            println!("{}", "Balanced: counted cash matches the expected balance.".green().bold());
        } else if diff > 0.0 {
            println!("{}", format!("Surplus of {}", money(diff)).yellow().bold());
        } else {
            println!("{}", format!("Shortage of {}", money(-diff)).red().bold());
        }
    }

    if !closeout.ventas.is_empty() {
        let mut vtable = Table::new();
        vtable.set_header(vec!["Time", "Client", "Product", "Staff", "Qty", "Amount"]);
        for v in &closeout.ventas {
            vtable.add_row(vec![
                Cell::new(time_of(&v.date)),
                Cell::new(&v.client_name),
                Cell::new(&v.product_name),
                Cell::new(&v.salesperson_name),
                Cell::new(v.quantity),
                Cell::new(money(v.total_amount)),
            ]);
        }
        println!("\nSales of the day\n{vtable}");
    }

    if !closeout.movements.is_empty() {
        let mut mtable = Table::new();
        mtable.set_header(vec!["Time", "Description", "Amount"]);
        for t in &closeout.movements {
            let amount = match t.kind {
                CajaKind::Entrada => money(t.amount).green(),
                CajaKind::Salida => format!("-{}", money(t.amount)).red(),
            };
            mtable.add_row(vec![
                Cell::new(time_of(&t.date)),
                Cell::new(&t.description),
                Cell::new(amount),
            ]);
        }
        println!("\nCash movements of the day\n{mtable}");
    }
    Ok(())
}
