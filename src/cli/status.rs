use comfy_table::Table;

use crate::caja;
use crate::error::Result;
use crate::fmt::money;
use crate::settings::get_data_dir;

pub fn run() -> Result<()> {
    let store = super::open_store()?;

    let count = |table: &str| -> Result<i64> {
        Ok(store
            .conn
            .query_row(&format!("SELECT count(*) FROM {table}"), [], |r| r.get(0))?)
    };

    let mut table = Table::new();
    table.set_header(vec!["", ""]);
    table.add_row(vec!["Data directory".to_string(), get_data_dir().display().to_string()]);
    table.add_row(vec!["Clients".to_string(), count("clients")?.to_string()]);
    table.add_row(vec!["Staff".to_string(), count("salespersons")?.to_string()]);
    table.add_row(vec!["Products".to_string(), count("products")?.to_string()]);
    table.add_row(vec!["Ventas".to_string(), count("ventas")?.to_string()]);
    table.add_row(vec!["Cash movements".to_string(), count("caja_transactions")?.to_string()]);
    table.add_row(vec!["Cash balance".to_string(), money(caja::balance(&store)?)]);
    println!("libreta status\n{table}");
    Ok(())
}
