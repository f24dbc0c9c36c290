use std::path::Path;

use rusqlite::params;
use serde::{Deserialize, Serialize};

use crate::caja;
use crate::error::{LibretaError, Result};
use crate::models::{CajaTransaction, Client, Product, Salesperson, Venta};
use crate::store::Store;
use crate::ventas::{self, now_iso};

pub const BACKUP_VERSION: &str = "2.0.0";

/// The full-state bundle: all five collections plus a schema version tag and
/// creation timestamp, in the field names the original app wrote.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupData {
    pub clients: Vec<Client>,
    pub salespersons: Vec<Salesperson>,
    pub products: Vec<Product>,
    pub ventas: Vec<Venta>,
    pub caja_transactions: Vec<CajaTransaction>,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub created_at: String,
}

pub fn create_backup(store: &Store) -> Result<BackupData> {
    Ok(BackupData {
        clients: store.clients()?,
        salespersons: store.salespersons()?,
        products: store.products()?,
        ventas: ventas::all_ventas(store)?,
        caja_transactions: caja::all_transactions(store)?,
        version: BACKUP_VERSION.to_string(),
        created_at: now_iso(),
    })
}

pub fn write_backup(store: &Store, path: &Path) -> Result<BackupData> {
    let data = create_backup(store)?;
    let json = serde_json::to_string_pretty(&data)?;
    std::fs::write(path, format!("{json}\n"))?;
    Ok(data)
}

const REQUIRED_COLLECTIONS: &[&str] =
    &["clients", "salespersons", "products", "ventas", "cajaTransactions"];

/// Parse and validate a backup file's content. Every expected collection must
/// be present and array-typed before any record is even looked at.
pub fn parse_backup(content: &str) -> Result<BackupData> {
    let raw: serde_json::Value = serde_json::from_str(content)
        .map_err(|e| LibretaError::InvalidBackupFormat(format!("not valid JSON: {e}")))?;

    let obj = raw
        .as_object()
        .ok_or_else(|| LibretaError::InvalidBackupFormat("top level is not an object".to_string()))?;
    for field in REQUIRED_COLLECTIONS {
        match obj.get(*field) {
            Some(v) if v.is_array() => {}
            Some(_) => {
                return Err(LibretaError::InvalidBackupFormat(format!(
                    "field '{field}' is not an array"
                )))
            }
            None => {
                return Err(LibretaError::InvalidBackupFormat(format!(
                    "missing field '{field}'"
                )))
            }
        }
    }

    serde_json::from_value(raw)
        .map_err(|e| LibretaError::InvalidBackupFormat(format!("malformed record: {e}")))
}

/// Wholesale replacement of all five collections, ids preserved. One SQLite
/// transaction so a failed restore leaves the previous state intact.
pub fn restore_backup(store: &Store, data: &BackupData) -> Result<()> {
    store.conn.execute_batch("BEGIN")?;
    let result = restore_inner(store, data);
    if result.is_ok() {
        store.conn.execute_batch("COMMIT")?;
    } else {
        let _ = store.conn.execute_batch("ROLLBACK");
    }
    result
}

fn restore_inner(store: &Store, data: &BackupData) -> Result<()> {
    for table in ["ventas", "caja_transactions", "clients", "salespersons", "products"] {
        store.conn.execute(&format!("DELETE FROM {table}"), [])?;
    }
    for c in &data.clients {
        store.conn.execute(
            "INSERT INTO clients (id, name, phone, local, modalidad) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![c.id, c.name, c.phone, c.local, c.modalidad],
        )?;
    }
    for s in &data.salespersons {
        store.conn.execute(
            "INSERT INTO salespersons (id, name) VALUES (?1, ?2)",
            params![s.id, s.name],
        )?;
    }
    for p in &data.products {
        store.conn.execute(
            "INSERT INTO products (id, name, category, price) VALUES (?1, ?2, ?3, ?4)",
            params![p.id, p.name, p.category, p.price],
        )?;
    }
    for v in &data.ventas {
        store.conn.execute(
            "INSERT INTO ventas (id, date, client_id, product_id, salesperson_id, quantity, total_amount) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![v.id, v.date, v.client_id, v.product_id, v.salesperson_id, v.quantity, v.total_amount],
        )?;
    }
    for t in &data.caja_transactions {
        store.conn.execute(
            "INSERT INTO caja_transactions (id, date, description, amount, type) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![t.id, t.date, t.description, t.amount, t.kind.as_str()],
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caja::record_transaction_at;
    use crate::models::{CajaKind, Modalidad};
    use crate::ventas::record_venta_at;

    fn test_store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(&dir.path().join("test.db")).unwrap();
        (dir, store)
    }

    fn seed(store: &Store) {
        let c = store
            .add_client("Ana Pérez", "555-0102", "Barra", Modalidad::Semanal)
            .unwrap();
        let s = store.add_salesperson("Luis").unwrap();
        let p = store.add_product("Torta de Chocolate", "Postres", 8500.0).unwrap();
        record_venta_at(store, c.id, p.id, s.id, 2, "2024-01-06T10:00:00.000Z").unwrap();
        record_transaction_at(store, "Fondo de caja inicial", 200000.0, CajaKind::Entrada, "2024-01-01T08:00:00.000Z").unwrap();
    }

    #[test]
    fn test_backup_restore_roundtrip_is_deep_equal() {
        let (_dir, store) = test_store();
        seed(&store);
        let before = create_backup(&store).unwrap();
        let json = serde_json::to_string(&before).unwrap();

        // Restore into a fresh store and compare collection by collection.
        let (_dir2, other) = test_store();
        let parsed = parse_backup(&json).unwrap();
        restore_backup(&other, &parsed).unwrap();
        let after = create_backup(&other).unwrap();

        assert_eq!(
            serde_json::to_value(&before.clients).unwrap(),
            serde_json::to_value(&after.clients).unwrap()
        );
        assert_eq!(
            serde_json::to_value(&before.salespersons).unwrap(),
            serde_json::to_value(&after.salespersons).unwrap()
        );
        assert_eq!(
            serde_json::to_value(&before.products).unwrap(),
            serde_json::to_value(&after.products).unwrap()
        );
        assert_eq!(
            serde_json::to_value(&before.ventas).unwrap(),
            serde_json::to_value(&after.ventas).unwrap()
        );
        assert_eq!(
            serde_json::to_value(&before.caja_transactions).unwrap(),
            serde_json::to_value(&after.caja_transactions).unwrap()
        );
    }

    #[test]
    fn test_restore_replaces_existing_data() {
        let (_dir, store) = test_store();
        seed(&store);
        let backup = create_backup(&store).unwrap();

        let (_dir2, other) = test_store();
        other
            .add_client("Cliente Viejo", "555-9999", "Mesa 1", Modalidad::Diario)
            .unwrap();
        restore_backup(&other, &backup).unwrap();

        let clients = other.clients().unwrap();
        assert_eq!(clients.len(), 1);
        assert_eq!(clients[0].name, "Ana Pérez");
    }

    #[test]
    fn test_parse_rejects_missing_collection() {
        let json = r#"{"clients": [], "salespersons": [], "products": [], "ventas": []}"#;
        let err = parse_backup(json).unwrap_err();
        assert!(matches!(err, LibretaError::InvalidBackupFormat(_)));
        assert!(err.to_string().contains("cajaTransactions"), "got: {err}");
    }

    #[test]
    fn test_parse_rejects_non_array_collection() {
        let json = r#"{"clients": {}, "salespersons": [], "products": [], "ventas": [], "cajaTransactions": []}"#;
        assert!(matches!(
            parse_backup(json).unwrap_err(),
            LibretaError::InvalidBackupFormat(_)
        ));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            parse_backup("not json at all").unwrap_err(),
            LibretaError::InvalidBackupFormat(_)
        ));
        assert!(matches!(
            parse_backup("[1, 2, 3]").unwrap_err(),
            LibretaError::InvalidBackupFormat(_)
        ));
    }

    #[test]
    fn test_backup_carries_version_tag() {
        let (_dir, store) = test_store();
        let data = create_backup(&store).unwrap();
        assert_eq!(data.version, "2.0.0");
        assert!(!data.created_at.is_empty());
    }
}
