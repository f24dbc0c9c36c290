use chrono::{SecondsFormat, Utc};
use rusqlite::params;

use crate::error::{LibretaError, Result};
use crate::models::Venta;
use crate::store::Store;

/// A venta joined with the names the ledgers display. `client_modalidad` rides
/// along so the reporting engine can filter without a second lookup.
#[derive(Debug, Clone)]
pub struct VentaDetail {
    pub id: i64,
    pub date: String,
    pub client_name: String,
    pub product_name: String,
    pub salesperson_name: String,
    pub quantity: i64,
    pub total_amount: f64,
    pub client_modalidad: String,
}

pub(crate) fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Record a sale now. The total amount is `quantity × product.price` at this
/// instant and is never recomputed.
pub fn record_venta(store: &Store, client_id: i64, product_id: i64, salesperson_id: i64, quantity: i64) -> Result<Venta> {
    record_venta_at(store, client_id, product_id, salesperson_id, quantity, &now_iso())
}

pub(crate) fn record_venta_at(
    store: &Store,
    client_id: i64,
    product_id: i64,
    salesperson_id: i64,
    quantity: i64,
    date: &str,
) -> Result<Venta> {
    if quantity < 1 {
        return Err(LibretaError::InvalidAmount(format!(
            "quantity must be a positive integer, got {quantity}"
        )));
    }
    store.get_client(client_id)?;
    store.get_salesperson(salesperson_id)?;
    let product = store.get_product(product_id)?;
    let total_amount = product.price * quantity as f64;

    store.conn.execute(
        "INSERT INTO ventas (date, client_id, product_id, salesperson_id, quantity, total_amount) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![date, client_id, product_id, salesperson_id, quantity, total_amount],
    )?;
    Ok(Venta {
        id: store.conn.last_insert_rowid(),
        date: date.to_string(),
        client_id,
        product_id,
        salesperson_id,
        quantity,
        total_amount,
    })
}

pub fn remove_venta(store: &Store, id: i64) -> Result<()> {
    let affected = store.conn.execute("DELETE FROM ventas WHERE id = ?1", [id])?;
    if affected == 0 {
        return Err(LibretaError::NotFound { entity: "venta", id });
    }
    Ok(())
}

/// All sales filed under the calendar day `date` (a `YYYY-MM-DD` string),
/// newest first. Same-day membership is a string-prefix match on the stored
/// ISO timestamp; a sale that serialized to a different UTC day files under
/// that day. This is the contract, not an accident.
pub fn ventas_on(store: &Store, date: &str) -> Result<Vec<VentaDetail>> {
    let mut stmt = store.conn.prepare(
        "SELECT v.id, v.date, c.name, p.name, s.name, v.quantity, v.total_amount, c.modalidad \
         FROM ventas v \
         JOIN clients c ON v.client_id = c.id \
         JOIN products p ON v.product_id = p.id \
         JOIN salespersons s ON v.salesperson_id = s.id \
         WHERE v.date LIKE ?1 ORDER BY v.date DESC, v.id DESC",
    )?;
    let rows = stmt
        .query_map([format!("{date}%")], |row| {
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
    Ok(rows)
}

pub fn all_ventas(store: &Store) -> Result<Vec<Venta>> {
    let mut stmt = store.conn.prepare(
        "SELECT id, date, client_id, product_id, salesperson_id, quantity, total_amount \
         FROM ventas ORDER BY date DESC, id DESC",
    )?;
    let rows = stmt
        .query_map([], |row| {
            Ok(Venta {
                id: row.get(0)?,
                date: row.get(1)?,
                client_id: row.get(2)?,
                product_id: row.get(3)?,
                salesperson_id: row.get(4)?,
                quantity: row.get(5)?,
                total_amount: row.get(6)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}
