use std::path::Path;

use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::error::{LibretaError, Result};
use crate::fmt::{money, time_of};
use crate::reports::{self, SettleOutcome};
use crate::summary::{GeminiSummaryService, SummaryService};

pub fn run(
    date: Option<&str>,
    staff: &str,
    search: Option<&str>,
    csv: Option<&str>,
    settle: bool,
    summary: bool,
) -> Result<()> {
    let store = super::open_store()?;
    let date = date.map(str::to_string).unwrap_or_else(super::today);
    let salesperson = store
        .find_salesperson(staff)?
        .ok_or_else(|| LibretaError::UnknownSalesperson(staff.to_string()))?;

    let report = reports::daily_report(&store, &date, salesperson.id)?;
    let rows = reports::filter_rows(&report, search.unwrap_or(""));

    let mut table = Table::new();
    table.set_header(vec!["Time", "Client", "Product", "Qty", "Amount"]);
    for v in &rows {
        table.add_row(vec![
            Cell::new(time_of(&v.date)),
            Cell::new(&v.client_name),
            Cell::new(&v.product_name),
            Cell::new(v.quantity),
            Cell::new(money(v.total_amount)),
        ]);
    }
    println!(
        "Sales report: {} on {}\n{table}",
        report.salesperson.name, report.formatted_date
    );
    if let Some(term) = search {
        println!("Filter: '{term}' ({} of {} sales shown)", rows.len(), report.rows.len());
    }
    println!("Total Ventas: {}", money(report.total_sales).bold());

    if let Some(path) = csv {
        let content = reports::report_csv(&report, &rows)?;
        std::fs::write(Path::new(path), content)?;
        println!("CSV written to {path}");
    }

    if settle {
        match reports::settle_report(&store, &report)? {
            SettleOutcome::Settled(tx) => {
                println!(
                    "{} {} ({})",
                    "Settled:".green().bold(),
                    tx.description,
                    money(tx.amount)
                );
            }
            SettleOutcome::AlreadySettled => {
                println!("{}", "This report was already settled; nothing recorded.".yellow());
            }
            SettleOutcome::NothingToSettle => {
                println!("{}", "No billable sales to settle.".yellow());
            }
        }
    }

    if summary {
        match GeminiSummaryService::from_env() {
            Some(service) => match service.summarize(&report.salesperson.name, &report.rows) {
                Ok(text) => println!("\n{text}"),
                // Summary failures are a notice; the report above already
                // printed.
                Err(e) => eprintln!("{}", format!("Summary unavailable: {e}").yellow()),
            },
            None => eprintln!(
                "{}",
                "Summary unavailable: set GEMINI_API_KEY to enable it.".yellow()
            ),
        }
    }
    Ok(())
}
