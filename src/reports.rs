use chrono::{Datelike, NaiveDate, Weekday};

use crate::caja;
use crate::error::{LibretaError, Result};
use crate::fmt::time_of;
use crate::models::{CajaKind, CajaTransaction, Modalidad, Salesperson};
use crate::store::Store;
use crate::ventas::VentaDetail;

// ---------------------------------------------------------------------------
// Report dates
// ---------------------------------------------------------------------------

pub(crate) fn parse_report_date(date: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| LibretaError::Other(format!("Invalid date '{date}': expected YYYY-MM-DD")))
}

/// The `d/m/yyyy` rendering used inside settlement descriptions, without zero
/// padding. This string is part of the idempotency key; do not restyle it.
pub(crate) fn format_report_date(d: NaiveDate) -> String {
    format!("{}/{}/{}", d.day(), d.month(), d.year())
}

/// Whether a client with `modalidad` bills on calendar date `d`. The weekday
/// and day-of-month come from the date string itself, which reproduces the
/// original UTC-midnight anchoring on every device.
fn admits(modalidad: Modalidad, d: NaiveDate) -> bool {
    match modalidad {
        Modalidad::Semanal => d.weekday() == Weekday::Sat,
        Modalidad::Quincenal => d.day() == 15 || d.day() == 30,
        Modalidad::Diario => true,
    }
}

// ---------------------------------------------------------------------------
// Daily sales report
// ---------------------------------------------------------------------------

pub struct SalesReport {
    pub date: String,
    pub formatted_date: String,
    pub salesperson: Salesperson,
    pub rows: Vec<VentaDetail>,
    pub total_sales: f64,
}

/// Build the billable-sales report for one salesperson on one date: the day's
/// sales whose client modality admits the date, newest first.
pub fn daily_report(store: &Store, date: &str, salesperson_id: i64) -> Result<SalesReport> {
    let report_date = parse_report_date(date)?;
    let salesperson = store.get_salesperson(salesperson_id)?;

    let mut stmt = store.conn.prepare(
        "SELECT v.id, v.date, c.name, p.name, s.name, v.quantity, v.total_amount, c.modalidad \
         FROM ventas v \
         JOIN clients c ON v.client_id = c.id \
         JOIN products p ON v.product_id = p.id \
         JOIN salespersons s ON v.salesperson_id = s.id \
         WHERE v.salesperson_id = ?1 AND v.date LIKE ?2 \
         ORDER BY v.date DESC, v.id DESC",
    )?;
    let day_rows: Vec<VentaDetail> = stmt
        .query_map(rusqlite::params![salesperson_id, format!("{date}%")], |row| {
            Ok(VentaDetail {
                id: row.get(0)?,
                date: row.get(1)?,
                client_name: row.get(2)?,
                product_name: row.get(3)?,
                salesperson_name: row.get(4)?,
                quantity: row.get(5)?,
                total_amount: row.get(6)?,
                client_modalidad: row.get(7)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let rows: Vec<VentaDetail> = day_rows
        .into_iter()
        .filter(|v| admits(Modalidad::from_str_lossy(&v.client_modalidad), report_date))
        .collect();
    let total_sales = rows.iter().map(|v| v.total_amount).sum();

    Ok(SalesReport {
        date: date.to_string(),
        formatted_date: format_report_date(report_date),
        salesperson,
        rows,
        total_sales,
    })
}

/// Case-insensitive substring filter over client and product names. Narrows
/// what is displayed or exported; `total_sales` always covers the full report.
pub fn filter_rows<'a>(report: &'a SalesReport, term: &str) -> Vec<&'a VentaDetail> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return report.rows.iter().collect();
    }
    report
        .rows
        .iter()
        .filter(|v| {
            v.client_name.to_lowercase().contains(&term)
                || v.product_name.to_lowercase().contains(&term)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Settlement
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum SettleOutcome {
    Settled(CajaTransaction),
    AlreadySettled,
    NothingToSettle,
}

fn settlement_description(report: &SalesReport) -> String {
    format!(
        "Liquidación de {} - {}",
        report.salesperson.name, report.formatted_date
    )
}

/// Whether this salesperson/date report has already been settled. Exact
/// string equality on the settlement description is the sole dedup mechanism.
pub fn is_settled(store: &Store, report: &SalesReport) -> Result<bool> {
    let count: i64 = store.conn.query_row(
        "SELECT count(*) FROM caja_transactions WHERE description = ?1",
        [settlement_description(report)],
        |r| r.get(0),
    )?;
    Ok(count > 0)
}

/// Record the report total as one cash-in entry, at most once per
/// salesperson/date. Settling an already-settled or empty report is a signal,
/// not an error.
pub fn settle_report(store: &Store, report: &SalesReport) -> Result<SettleOutcome> {
    if report.total_sales <= 0.0 {
        return Ok(SettleOutcome::NothingToSettle);
    }
    if is_settled(store, report)? {
        return Ok(SettleOutcome::AlreadySettled);
    }
    let tx = caja::record_transaction(
        store,
        &settlement_description(report),
        report.total_sales,
        CajaKind::Entrada,
    )?;
    Ok(SettleOutcome::Settled(tx))
}

// ---------------------------------------------------------------------------
// CSV export
// ---------------------------------------------------------------------------

/// Render an amount the way the original serialized JS numbers: integral
/// values without a decimal point.
fn csv_amount(val: f64) -> String {
    if val.fract() == 0.0 {
        format!("{}", val as i64)
    } else {
        format!("{val}")
    }
}

/// The report as delimited text: UTF-8 BOM, `Hora,Cliente,Producto,Cantidad,
/// Monto Total` header, one row per filtered venta (text fields quoted), then
/// a blank line and a `"Total Ventas"` row carrying the unfiltered total.
pub fn report_csv(report: &SalesReport, rows: &[&VentaDetail]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::NonNumeric)
        .from_writer(vec![]);
    writer.write_record(["Hora", "Cliente", "Producto", "Cantidad", "Monto Total"])?;
    for v in rows {
        writer.write_record([
            time_of(&v.date),
            v.client_name.clone(),
            v.product_name.clone(),
            v.quantity.to_string(),
            csv_amount(v.total_amount),
        ])?;
    }
    let body = String::from_utf8(
        writer
            .into_inner()
            .map_err(|e| LibretaError::Other(e.to_string()))?,
    )
    .map_err(|e| LibretaError::Other(e.to_string()))?;

    Ok(format!(
        "\u{feff}{body}\n\"Total Ventas\",{}",
        csv_amount(report.total_sales)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ventas::record_venta_at;

    fn test_store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(&dir.path().join("test.db")).unwrap();
        (dir, store)
    }

    struct Fixture {
        ana: i64,
        daily_client: i64,
        weekly_client: i64,
        biweekly_client: i64,
        product: i64,
    }

    fn seed(store: &Store) -> Fixture {
        let daily = store
            .add_client("Juan Pérez", "555-0101", "Mesa 5", Modalidad::Diario)
            .unwrap();
        let weekly = store
            .add_client("Ana Pérez", "555-0102", "Barra", Modalidad::Semanal)
            .unwrap();
        let biweekly = store
            .add_client("Empresa XYZ", "555-0200", "Para llevar", Modalidad::Quincenal)
            .unwrap();
        let ana = store.add_salesperson("Ana").unwrap();
        let product = store.add_product("Jugo de Naranja", "Bebidas Frias", 6000.0).unwrap();
        Fixture {
            ana: ana.id,
            daily_client: daily.id,
            weekly_client: weekly.id,
            biweekly_client: biweekly.id,
            product: product.id,
        }
    }

    #[test]
    fn test_weekly_client_appears_only_on_saturday() {
        let (_dir, store) = test_store();
        let f = seed(&store);
        // 2024-01-06 is a Saturday, 2024-01-07 a Sunday.
        record_venta_at(&store, f.weekly_client, f.product, f.ana, 2, "2024-01-06T10:00:00.000Z").unwrap();
        record_venta_at(&store, f.weekly_client, f.product, f.ana, 1, "2024-01-07T10:00:00.000Z").unwrap();

        let saturday = daily_report(&store, "2024-01-06", f.ana).unwrap();
        assert_eq!(saturday.rows.len(), 1);
        assert_eq!(saturday.total_sales, 12000.0);

        let sunday = daily_report(&store, "2024-01-07", f.ana).unwrap();
        assert!(sunday.rows.is_empty());
        assert_eq!(sunday.total_sales, 0.0);
    }

    #[test]
    fn test_biweekly_client_appears_on_15th_and_30th_only() {
        let (_dir, store) = test_store();
        let f = seed(&store);
        record_venta_at(&store, f.biweekly_client, f.product, f.ana, 1, "2024-01-15T10:00:00.000Z").unwrap();
        record_venta_at(&store, f.biweekly_client, f.product, f.ana, 1, "2024-01-30T10:00:00.000Z").unwrap();
        record_venta_at(&store, f.biweekly_client, f.product, f.ana, 1, "2024-01-16T10:00:00.000Z").unwrap();

        assert_eq!(daily_report(&store, "2024-01-15", f.ana).unwrap().rows.len(), 1);
        assert_eq!(daily_report(&store, "2024-01-30", f.ana).unwrap().rows.len(), 1);
        assert!(daily_report(&store, "2024-01-16", f.ana).unwrap().rows.is_empty());
    }

    #[test]
    fn test_daily_and_unrecognized_modalities_always_appear() {
        let (_dir, store) = test_store();
        let f = seed(&store);
        record_venta_at(&store, f.daily_client, f.product, f.ana, 1, "2024-01-07T10:00:00.000Z").unwrap();
        // Legacy row with a modality the current code does not know.
        store
            .conn
            .execute("UPDATE clients SET modalidad = 'mensual' WHERE id = ?1", [f.daily_client])
            .unwrap();

        let report = daily_report(&store, "2024-01-07", f.ana).unwrap();
        assert_eq!(report.rows.len(), 1);
    }

    #[test]
    fn test_report_excludes_other_salespersons() {
        let (_dir, store) = test_store();
        let f = seed(&store);
        let luis = store.add_salesperson("Luis").unwrap();
        record_venta_at(&store, f.daily_client, f.product, f.ana, 1, "2024-01-06T10:00:00.000Z").unwrap();
        record_venta_at(&store, f.daily_client, f.product, luis.id, 1, "2024-01-06T11:00:00.000Z").unwrap();

        let report = daily_report(&store, "2024-01-06", f.ana).unwrap();
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].salesperson_name, "Ana");
    }

    #[test]
    fn test_rows_sorted_newest_first() {
        let (_dir, store) = test_store();
        let f = seed(&store);
        record_venta_at(&store, f.daily_client, f.product, f.ana, 1, "2024-01-06T08:00:00.000Z").unwrap();
        record_venta_at(&store, f.daily_client, f.product, f.ana, 1, "2024-01-06T18:00:00.000Z").unwrap();

        let report = daily_report(&store, "2024-01-06", f.ana).unwrap();
        assert!(report.rows[0].date > report.rows[1].date);
    }

    #[test]
    fn test_filter_narrows_rows_but_not_total() {
        let (_dir, store) = test_store();
        let f = seed(&store);
        let cafe = store.add_product("Café Americano", "Bebidas Calientes", 4500.0).unwrap();
        record_venta_at(&store, f.daily_client, f.product, f.ana, 1, "2024-01-07T10:00:00.000Z").unwrap();
        record_venta_at(&store, f.daily_client, cafe.id, f.ana, 1, "2024-01-07T11:00:00.000Z").unwrap();

        let report = daily_report(&store, "2024-01-07", f.ana).unwrap();
        assert_eq!(report.total_sales, 10500.0);

        let filtered = filter_rows(&report, "café");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].product_name, "Café Americano");
        // Total is untouched by the display filter.
        assert_eq!(report.total_sales, 10500.0);

        assert_eq!(filter_rows(&report, "  ").len(), 2);
        assert_eq!(filter_rows(&report, "juan").len(), 2);
    }

    #[test]
    fn test_settlement_is_idempotent_on_description() {
        let (_dir, store) = test_store();
        let f = seed(&store);
        record_venta_at(&store, f.weekly_client, f.product, f.ana, 2, "2024-01-06T10:00:00.000Z").unwrap();
        let report = daily_report(&store, "2024-01-06", f.ana).unwrap();

        let first = settle_report(&store, &report).unwrap();
        match first {
            SettleOutcome::Settled(tx) => {
                assert_eq!(tx.description, "Liquidación de Ana - 6/1/2024");
                assert_eq!(tx.amount, 12000.0);
                assert_eq!(tx.kind, CajaKind::Entrada);
            }
            other => panic!("expected Settled, got {other:?}"),
        }

        let second = settle_report(&store, &report).unwrap();
        assert!(matches!(second, SettleOutcome::AlreadySettled));

        let count: i64 = store
            .conn
            .query_row("SELECT count(*) FROM caja_transactions", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(caja::balance(&store).unwrap(), 12000.0);
    }

    #[test]
    fn test_settling_empty_report_writes_nothing() {
        let (_dir, store) = test_store();
        let f = seed(&store);
        let report = daily_report(&store, "2024-01-06", f.ana).unwrap();
        assert!(matches!(
            settle_report(&store, &report).unwrap(),
            SettleOutcome::NothingToSettle
        ));
        assert_eq!(caja::balance(&store).unwrap(), 0.0);
    }

    #[test]
    fn test_csv_export_format() {
        let (_dir, store) = test_store();
        let f = seed(&store);
        record_venta_at(&store, f.daily_client, f.product, f.ana, 2, "2024-01-07T09:30:00.000Z").unwrap();

        let report = daily_report(&store, "2024-01-07", f.ana).unwrap();
        let rows = filter_rows(&report, "");
        let csv = report_csv(&report, &rows).unwrap();

        assert!(csv.starts_with('\u{feff}'), "missing BOM");
        let body = csv.trim_start_matches('\u{feff}');
        let lines: Vec<&str> = body.split('\n').collect();
        assert_eq!(lines[0], "\"Hora\",\"Cliente\",\"Producto\",\"Cantidad\",\"Monto Total\"");
        assert_eq!(lines[1], "\"09:30:00\",\"Juan Pérez\",\"Jugo de Naranja\",2,12000");
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], "\"Total Ventas\",12000");
    }

    #[test]
    fn test_csv_total_ignores_display_filter() {
        let (_dir, store) = test_store();
        let f = seed(&store);
        let cafe = store.add_product("Café Americano", "Bebidas Calientes", 4500.0).unwrap();
        record_venta_at(&store, f.daily_client, f.product, f.ana, 1, "2024-01-07T10:00:00.000Z").unwrap();
        record_venta_at(&store, f.daily_client, cafe.id, f.ana, 1, "2024-01-07T11:00:00.000Z").unwrap();

        let report = daily_report(&store, "2024-01-07", f.ana).unwrap();
        let filtered = filter_rows(&report, "café");
        let csv = report_csv(&report, &filtered).unwrap();
        // One data row, but the trailing total covers both sales.
        assert!(csv.ends_with("\"Total Ventas\",10500"), "got: {csv}");
    }

    #[test]
    fn test_invalid_report_date_is_rejected() {
        let (_dir, store) = test_store();
        let f = seed(&store);
        assert!(daily_report(&store, "06/01/2024", f.ana).is_err());
        assert!(daily_report(&store, "2024-13-40", f.ana).is_err());
    }
}
