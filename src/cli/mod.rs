pub mod backup;
pub mod caja;
pub mod clients;
pub mod closeout;
pub mod confirm;
pub mod demo;
pub mod init;
pub mod products;
pub mod report;
pub mod staff;
pub mod status;
pub mod ventas;

use clap::{Parser, Subcommand};

use crate::error::{LibretaError, Result};
use crate::models::{CajaKind, Modalidad};
use crate::settings;
use crate::store::Store;

/// Open the database under the configured data directory, creating the
/// directory on first use.
pub(crate) fn open_store() -> Result<Store> {
    std::fs::create_dir_all(settings::get_data_dir())?;
    Store::open(&settings::db_path())
}

/// Today as the UTC calendar date, matching how the ledgers stamp records.
pub(crate) fn today() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}

/// Strict modality parse for user input. Stored data stays lenient; new input
/// does not.
pub(crate) fn parse_modalidad(s: &str) -> Result<Modalidad> {
    match s {
        "diario" => Ok(Modalidad::Diario),
        "semanal" => Ok(Modalidad::Semanal),
        "quincenal" => Ok(Modalidad::Quincenal),
        other => Err(LibretaError::Other(format!(
            "Unknown modality '{other}': expected diario, semanal or quincenal"
        ))),
    }
}

pub(crate) fn parse_kind(s: &str) -> Result<CajaKind> {
    CajaKind::parse(s).ok_or_else(|| {
        LibretaError::Other(format!("Unknown movement type '{s}': expected entrada or salida"))
    })
}

#[derive(Parser)]
#[command(name = "libreta", about = "Sales and cash-box ledger CLI for small restaurants.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up libreta: choose a data directory and initialize the database.
    Init {
        /// Path for libreta data (default: ~/Documents/libreta)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Manage clients.
    Clients {
        #[command(subcommand)]
        command: ClientsCommands,
    },
    /// Manage staff (salespersons).
    Staff {
        #[command(subcommand)]
        command: StaffCommands,
    },
    /// Manage products.
    Products {
        #[command(subcommand)]
        command: ProductsCommands,
    },
    /// Record and browse sales.
    Ventas {
        #[command(subcommand)]
        command: VentasCommands,
    },
    /// Cash-box movements and balance.
    Caja {
        #[command(subcommand)]
        command: CajaCommands,
    },
    /// Daily sales report for one salesperson, filtered by client modality.
    Report {
        /// Report date: YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
        /// Salesperson name
        #[arg(long)]
        staff: String,
        /// Case-insensitive filter on client or product name
        #[arg(long)]
        search: Option<String>,
        /// Write the report as CSV to this path
        #[arg(long)]
        csv: Option<String>,
        /// Settle the report total into the cash box
        #[arg(long)]
        settle: bool,
        /// Ask the AI service for a prose summary
        #[arg(long)]
        summary: bool,
    },
    /// End-of-day cash reconciliation.
    Closeout {
        /// Closeout date: YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
        /// Physically counted cash amount
        #[arg(long)]
        counted: Option<f64>,
    },
    /// Export all data to a JSON backup file.
    Backup {
        /// Output path (default: <data_dir>/backups/libreta-YYYYMMDD-HHMMSS.json)
        #[arg(long)]
        output: Option<String>,
    },
    /// Restore all data from a JSON backup file, replacing current data.
    Restore {
        /// Path to a backup JSON file
        file: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Load sample data (clients, staff, products, sales) to explore libreta.
    Demo,
    /// Show current database and summary statistics.
    Status,
}

#[derive(Subcommand)]
pub enum ClientsCommands {
    /// Add a new client.
    Add {
        /// Client name, e.g. 'Juan Pérez'
        name: String,
        /// Phone number
        #[arg(long, default_value = "")]
        phone: String,
        /// Location label, e.g. 'Mesa 5'
        #[arg(long, default_value = "")]
        local: String,
        /// Billing modality: diario, semanal, quincenal
        #[arg(long, default_value = "diario")]
        modalidad: String,
    },
    /// List clients.
    List {
        /// Filter by name, phone or location
        #[arg(long)]
        search: Option<String>,
    },
    /// Update an existing client.
    Update {
        /// Client ID (shown in `libreta clients list`)
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        local: Option<String>,
        /// diario, semanal, quincenal
        #[arg(long)]
        modalidad: Option<String>,
    },
    /// Delete a client with no recorded sales.
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum StaffCommands {
    /// Add a staff member.
    Add { name: String },
    /// List staff.
    List {
        /// Filter by name
        #[arg(long)]
        search: Option<String>,
    },
    /// Rename a staff member.
    Update { id: i64, name: String },
    /// Delete a staff member with no recorded sales.
    Delete {
        id: i64,
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ProductsCommands {
    /// Add a product.
    Add {
        /// Product name, e.g. 'Bandeja Paisa'
        name: String,
        /// Unit price
        #[arg(long)]
        price: f64,
        /// Category, e.g. 'Platos Fuertes'
        #[arg(long, default_value = "")]
        category: String,
    },
    /// List products.
    List {
        /// Filter by name or category
        #[arg(long)]
        search: Option<String>,
    },
    /// Update an existing product. Price edits never rewrite recorded sales.
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        category: Option<String>,
    },
    /// Delete a product with no recorded sales.
    Delete {
        id: i64,
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum VentasCommands {
    /// Record a sale.
    Add {
        /// Client name
        #[arg(long)]
        client: String,
        /// Product name
        #[arg(long)]
        product: String,
        /// Salesperson name
        #[arg(long)]
        staff: String,
        /// Units sold
        #[arg(long, default_value = "1")]
        quantity: i64,
    },
    /// List one day's sales, newest first.
    List {
        /// Day: YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Delete a sale record.
    Delete {
        id: i64,
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum CajaCommands {
    /// Record a cash movement.
    Add {
        /// What the movement was for
        description: String,
        /// Positive amount
        #[arg(long)]
        amount: f64,
        /// entrada or salida
        #[arg(long, default_value = "entrada")]
        kind: String,
    },
    /// List cash movements, newest first.
    List {
        /// Only this day: YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,
    },
    /// Show the current cash balance.
    Balance,
    /// Delete a cash movement.
    Delete {
        id: i64,
        #[arg(long)]
        yes: bool,
    },
}
