use rusqlite::params;

use crate::error::{LibretaError, Result};
use crate::models::{CajaKind, CajaTransaction};
use crate::store::Store;
use crate::ventas::now_iso;

/// Record a cash-box movement now. `amount` is the positive magnitude; the
/// direction lives in `kind`.
pub fn record_transaction(store: &Store, description: &str, amount: f64, kind: CajaKind) -> Result<CajaTransaction> {
    record_transaction_at(store, description, amount, kind, &now_iso())
}

pub(crate) fn record_transaction_at(
    store: &Store,
    description: &str,
    amount: f64,
    kind: CajaKind,
    date: &str,
) -> Result<CajaTransaction> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(LibretaError::InvalidAmount(format!(
            "caja amount must be a positive number, got {amount}"
        )));
    }
    store.conn.execute(
        "INSERT INTO caja_transactions (date, description, amount, type) VALUES (?1, ?2, ?3, ?4)",
        params![date, description, amount, kind.as_str()],
    )?;
    Ok(CajaTransaction {
        id: store.conn.last_insert_rowid(),
        date: date.to_string(),
        description: description.to_string(),
        amount,
        kind,
    })
}

pub fn remove_transaction(store: &Store, id: i64) -> Result<()> {
    let affected = store
        .conn
        .execute("DELETE FROM caja_transactions WHERE id = ?1", [id])?;
    if affected == 0 {
        return Err(LibretaError::NotFound { entity: "caja transaction", id });
    }
    Ok(())
}

fn query_transactions(store: &Store, where_clause: &str, params: &[&dyn rusqlite::types::ToSql]) -> Result<Vec<CajaTransaction>> {
    let sql = format!(
        "SELECT id, date, description, amount, type FROM caja_transactions \
         {where_clause} ORDER BY date DESC, id DESC"
    );
    let mut stmt = store.conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params, |row| {
            let kind: String = row.get(4)?;
            Ok(CajaTransaction {
                id: row.get(0)?,
                date: row.get(1)?,
                description: row.get(2)?,
                amount: row.get(3)?,
                kind: CajaKind::parse(&kind).unwrap_or(CajaKind::Entrada),
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn all_transactions(store: &Store) -> Result<Vec<CajaTransaction>> {
    query_transactions(store, "", &[])
}

/// The day's movements, newest first. Same string-prefix day matching as the
/// sales ledger.
pub fn transactions_on(store: &Store, date: &str) -> Result<Vec<CajaTransaction>> {
    query_transactions(store, "WHERE date LIKE ?1", &[&format!("{date}%")])
}

/// Current balance: every movement signed by direction.
pub fn balance(store: &Store) -> Result<f64> {
    Ok(store.conn.query_row(
        "SELECT COALESCE(SUM(CASE WHEN type = 'entrada' THEN amount ELSE -amount END), 0) \
         FROM caja_transactions",
        [],
        |r| r.get(0),
    )?)
}

/// Balance from movements whose calendar day is strictly before `date`.
pub fn balance_as_of(store: &Store, date: &str) -> Result<f64> {
    Ok(store.conn.query_row(
        "SELECT COALESCE(SUM(CASE WHEN type = 'entrada' THEN amount ELSE -amount END), 0) \
         FROM caja_transactions WHERE substr(date, 1, 10) < ?1",
        [date],
        |r| r.get(0),
    )?)
}

/// Balance through the end of `date` (day inclusive).
pub fn balance_through(store: &Store, date: &str) -> Result<f64> {
    Ok(store.conn.query_row(
        "SELECT COALESCE(SUM(CASE WHEN type = 'entrada' THEN amount ELSE -amount END), 0) \
         FROM caja_transactions WHERE substr(date, 1, 10) <= ?1",
        [date],
        |r| r.get(0),
    )?)
}
