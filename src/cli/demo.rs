use chrono::{Duration, SecondsFormat, Utc};
use colored::Colorize;

use crate::caja::record_transaction;
use crate::error::{LibretaError, Result};
use crate::models::{CajaKind, Modalidad};
use crate::store::Store;
use crate::ventas::{record_venta, record_venta_at};

struct DemoClient {
    name: &'static str,
    phone: &'static str,
    local: &'static str,
    modalidad: Modalidad,
}

const CLIENTS: &[DemoClient] = &[
    DemoClient { name: "Juan Pérez", phone: "555-0101", local: "Mesa 5", modalidad: Modalidad::Diario },
    DemoClient { name: "Maria García", phone: "555-0102", local: "Barra", modalidad: Modalidad::Semanal },
    DemoClient { name: "Empresa XYZ", phone: "555-0200", local: "Para llevar", modalidad: Modalidad::Quincenal },
];

const STAFF: &[&str] = &["Ana", "Luis"];

const PRODUCTS: &[(&str, &str, f64)] = &[
    ("Café Americano", "Bebidas Calientes", 4500.0),
    ("Jugo de Naranja", "Bebidas Frias", 6000.0),
    ("Bandeja Paisa", "Platos Fuertes", 28000.0),
    ("Ajiaco Santafereño", "Platos Fuertes", 26000.0),
    ("Torta de Chocolate", "Postres", 8500.0),
];

pub fn run() -> Result<()> {
    let store = super::open_store()?;
    let existing: i64 = store
        .conn
        .query_row("SELECT count(*) FROM clients", [], |r| r.get(0))?;
    if existing > 0 {
        return Err(LibretaError::Other(
            "Demo data can only be loaded into an empty database".to_string(),
        ));
    }

    seed(&store)?;

    println!("{}", "Demo data loaded.".green().bold());
    println!("Try:");
    println!("  libreta ventas list");
    println!("  libreta caja balance");
    println!("  libreta report --staff Ana");
    Ok(())
}

fn seed(store: &Store) -> Result<()> {
    let mut clients = Vec::new();
    for c in CLIENTS {
        clients.push(store.add_client(c.name, c.phone, c.local, c.modalidad)?);
    }
    let mut staff = Vec::new();
    for name in STAFF {
        staff.push(store.add_salesperson(name)?);
    }
    let mut products = Vec::new();
    for (name, category, price) in PRODUCTS {
        products.push(store.add_product(name, category, *price)?);
    }

    record_transaction(store, "Fondo de caja inicial", 200000.0, CajaKind::Entrada)?;

    // One sale today, one yesterday, so both the day views and the reports
    // have something to show right away.
    record_venta(store, clients[0].id, products[2].id, staff[0].id, 1)?;
    let yesterday = (Utc::now() - Duration::days(1)).to_rfc3339_opts(SecondsFormat::Millis, true);
    record_venta_at(store, clients[1].id, products[4].id, staff[1].id, 2, &yesterday)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caja;

    #[test]
    fn test_seed_populates_every_collection() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(&dir.path().join("test.db")).unwrap();
        seed(&store).unwrap();

        assert_eq!(store.clients().unwrap().len(), 3);
        assert_eq!(store.salespersons().unwrap().len(), 2);
        assert_eq!(store.products().unwrap().len(), 5);
        assert_eq!(crate::ventas::all_ventas(&store).unwrap().len(), 2);
        assert_eq!(caja::balance(&store).unwrap(), 200000.0);
    }
}
