use std::path::PathBuf;

use chrono::Local;
use colored::Colorize;

use crate::backup;
use crate::cli::confirm::confirm;
use crate::error::Result;
use crate::settings::get_data_dir;

fn default_backup_path() -> PathBuf {
    let stamp = Local::now().format("%Y%m%d-%H%M%S");
    get_data_dir().join("backups").join(format!("libreta-{stamp}.json"))
}

pub fn backup(output: Option<&str>) -> Result<()> {
    let store = super::open_store()?;
    let path = match output {
        Some(p) => PathBuf::from(p),
        None => default_backup_path(),
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let data = backup::write_backup(&store, &path)?;
    println!("{}", "Backup written.".green().bold());
    println!("File: {}", path.display());
    println!(
        "Contents: {} clients, {} staff, {} products, {} ventas, {} cash movements",
        data.clients.len(),
        data.salespersons.len(),
        data.products.len(),
        data.ventas.len(),
        data.caja_transactions.len()
    );
    Ok(())
}

pub fn restore(file: &str, yes: bool) -> Result<()> {
    let store = super::open_store()?;
    let content = std::fs::read_to_string(file)?;
    let data = backup::parse_backup(&content)?;

    println!(
        "Backup contains {} clients, {} staff, {} products, {} ventas, {} cash movements",
        data.clients.len(),
        data.salespersons.len(),
        data.products.len(),
        data.ventas.len(),
        data.caja_transactions.len()
    );
    if !confirm("Restoring will replace ALL current data. Continue?", yes)? {
        println!("Cancelled.");
        return Ok(());
    }

    backup::restore_backup(&store, &data)?;
    println!("{}", "Restore complete.".green().bold());
    Ok(())
}
