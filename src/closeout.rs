use crate::caja;
use crate::error::Result;
use crate::models::{CajaKind, CajaTransaction};
use crate::reports::parse_report_date;
use crate::store::Store;
use crate::ventas::{self, VentaDetail};

/// End-of-day reconciliation snapshot. Purely derived; building one never
/// mutates the ledgers.
pub struct Closeout {
    pub date: String,
    pub total_sales: f64,
    pub opening_balance: f64,
    pub cash_in: f64,
    pub cash_out: f64,
    pub expected_balance: f64,
    pub ventas: Vec<VentaDetail>,
    pub movements: Vec<CajaTransaction>,
}

impl Closeout {
    /// Signed discrepancy against a physical count. Exactly zero is the
    /// balanced state.
    pub fn difference(&self, actual_counted: f64) -> f64 {
        actual_counted - self.expected_balance
    }
}

pub fn daily_closeout(store: &Store, date: &str) -> Result<Closeout> {
    parse_report_date(date)?;

    let day_ventas = ventas::ventas_on(store, date)?;
    let movements = caja::transactions_on(store, date)?;

    let total_sales = day_ventas.iter().map(|v| v.total_amount).sum();
    let cash_in: f64 = movements
        .iter()
        .filter(|t| t.kind == CajaKind::Entrada)
        .map(|t| t.amount)
        .sum();
    let cash_out: f64 = movements
        .iter()
        .filter(|t| t.kind == CajaKind::Salida)
        .map(|t| t.amount)
        .sum();
    let opening_balance = caja::balance_as_of(store, date)?;

    Ok(Closeout {
        date: date.to_string(),
        total_sales,
        opening_balance,
        cash_in,
        cash_out,
        expected_balance: opening_balance + cash_in - cash_out,
        ventas: day_ventas,
        movements,
    })
}
