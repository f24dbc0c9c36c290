use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};

use crate::db::{get_connection, init_db};
use crate::error::{LibretaError, Result};
use crate::models::{Client, Modalidad, Product, Salesperson};

/// Owns the database connection and exposes every collection operation. Built
/// once at the composition root and passed down by reference; never a global.
pub struct Store {
    pub conn: Connection,
}

impl Store {
    pub fn open(db_path: &Path) -> Result<Store> {
        let conn = get_connection(db_path)?;
        init_db(&conn)?;
        Ok(Store { conn })
    }

    // -----------------------------------------------------------------------
    // Shared guards
    // -----------------------------------------------------------------------

    /// Case-insensitive name collision check within one collection.
    /// `exclude_id` skips the record being edited.
    fn name_taken(&self, table: &str, name: &str, exclude_id: Option<i64>) -> Result<bool> {
        let sql = format!(
            "SELECT count(*) FROM {table} WHERE lower(name) = lower(?1) AND id != ?2"
        );
        let count: i64 = self
            .conn
            .query_row(&sql, params![name, exclude_id.unwrap_or(-1)], |r| r.get(0))?;
        Ok(count > 0)
    }

    /// Number of ventas referencing `id` through `column`.
    fn venta_references(&self, column: &str, id: i64) -> Result<i64> {
        let sql = format!("SELECT count(*) FROM ventas WHERE {column} = ?1");
        Ok(self.conn.query_row(&sql, [id], |r| r.get(0))?)
    }

    fn ensure_unique(&self, table: &str, entity: &'static str, name: &str, exclude_id: Option<i64>) -> Result<()> {
        if self.name_taken(table, name, exclude_id)? {
            return Err(LibretaError::DuplicateName {
                entity,
                name: name.to_string(),
            });
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Clients
    // -----------------------------------------------------------------------

    pub fn clients(&self) -> Result<Vec<Client>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, phone, local, modalidad FROM clients ORDER BY name COLLATE NOCASE")?;
        let rows = stmt
            .query_map([], |row| {
                Ok(Client {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    phone: row.get(2)?,
                    local: row.get(3)?,
                    modalidad: row.get(4)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn get_client(&self, id: i64) -> Result<Client> {
        self.conn
            .query_row(
                "SELECT id, name, phone, local, modalidad FROM clients WHERE id = ?1",
                [id],
                |row| {
                    Ok(Client {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        phone: row.get(2)?,
                        local: row.get(3)?,
                        modalidad: row.get(4)?,
                    })
                },
            )
            .optional()?
            .ok_or(LibretaError::NotFound { entity: "client", id })
    }

    pub fn find_client(&self, name: &str) -> Result<Option<Client>> {
        let id: Option<i64> = self
            .conn
            .query_row(
                "SELECT id FROM clients WHERE lower(name) = lower(?1)",
                [name],
                |r| r.get(0),
            )
            .optional()?;
        match id {
            Some(id) => Ok(Some(self.get_client(id)?)),
            None => Ok(None),
        }
    }

    pub fn add_client(&self, name: &str, phone: &str, local: &str, modalidad: Modalidad) -> Result<Client> {
        self.ensure_unique("clients", "client", name, None)?;
        self.conn.execute(
            "INSERT INTO clients (name, phone, local, modalidad) VALUES (?1, ?2, ?3, ?4)",
            params![name, phone, local, modalidad.as_str()],
        )?;
        self.get_client(self.conn.last_insert_rowid())
    }

    pub fn update_client(
        &self,
        id: i64,
        name: Option<&str>,
        phone: Option<&str>,
        local: Option<&str>,
        modalidad: Option<Modalidad>,
    ) -> Result<Client> {
        let current = self.get_client(id)?;
        let name = name.unwrap_or(&current.name);
        self.ensure_unique("clients", "client", name, Some(id))?;
        self.conn.execute(
            "UPDATE clients SET name = ?1, phone = ?2, local = ?3, modalidad = ?4 WHERE id = ?5",
            params![
                name,
                phone.unwrap_or(&current.phone),
                local.unwrap_or(&current.local),
                modalidad.map(|m| m.as_str().to_string()).unwrap_or(current.modalidad),
                id
            ],
        )?;
        self.get_client(id)
    }

    pub fn delete_client(&self, id: i64) -> Result<()> {
        let client = self.get_client(id)?;
        if self.venta_references("client_id", id)? > 0 {
            return Err(LibretaError::ReferentialIntegrity {
                entity: "client",
                name: client.name,
            });
        }
        self.conn.execute("DELETE FROM clients WHERE id = ?1", [id])?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Salespersons
    // -----------------------------------------------------------------------

    pub fn salespersons(&self) -> Result<Vec<Salesperson>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM salespersons ORDER BY name COLLATE NOCASE")?;
        let rows = stmt
            .query_map([], |row| {
                Ok(Salesperson {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn get_salesperson(&self, id: i64) -> Result<Salesperson> {
        self.conn
            .query_row("SELECT id, name FROM salespersons WHERE id = ?1", [id], |row| {
                Ok(Salesperson {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })
            .optional()?
            .ok_or(LibretaError::NotFound { entity: "salesperson", id })
    }

    pub fn find_salesperson(&self, name: &str) -> Result<Option<Salesperson>> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, name FROM salespersons WHERE lower(name) = lower(?1)",
                [name],
                |row| {
                    Ok(Salesperson {
                        id: row.get(0)?,
                        name: row.get(1)?,
                    })
                },
            )
            .optional()?)
    }

    pub fn add_salesperson(&self, name: &str) -> Result<Salesperson> {
        self.ensure_unique("salespersons", "salesperson", name, None)?;
        self.conn
            .execute("INSERT INTO salespersons (name) VALUES (?1)", [name])?;
        self.get_salesperson(self.conn.last_insert_rowid())
    }

    pub fn update_salesperson(&self, id: i64, name: &str) -> Result<Salesperson> {
        self.get_salesperson(id)?;
        self.ensure_unique("salespersons", "salesperson", name, Some(id))?;
        self.conn
            .execute("UPDATE salespersons SET name = ?1 WHERE id = ?2", params![name, id])?;
        self.get_salesperson(id)
    }

    pub fn delete_salesperson(&self, id: i64) -> Result<()> {
        let person = self.get_salesperson(id)?;
        if self.venta_references("salesperson_id", id)? > 0 {
            return Err(LibretaError::ReferentialIntegrity {
                entity: "salesperson",
                name: person.name,
            });
        }
        self.conn.execute("DELETE FROM salespersons WHERE id = ?1", [id])?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Products
    // -----------------------------------------------------------------------

    pub fn products(&self) -> Result<Vec<Product>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, category, price FROM products ORDER BY name COLLATE NOCASE")?;
        let rows = stmt
            .query_map([], |row| {
                Ok(Product {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    category: row.get(2)?,
                    price: row.get(3)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn get_product(&self, id: i64) -> Result<Product> {
        self.conn
            .query_row(
                "SELECT id, name, category, price FROM products WHERE id = ?1",
                [id],
                |row| {
                    Ok(Product {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        category: row.get(2)?,
                        price: row.get(3)?,
                    })
                },
            )
            .optional()?
            .ok_or(LibretaError::NotFound { entity: "product", id })
    }

    pub fn find_product(&self, name: &str) -> Result<Option<Product>> {
        let id: Option<i64> = self
            .conn
            .query_row(
                "SELECT id FROM products WHERE lower(name) = lower(?1)",
                [name],
                |r| r.get(0),
            )
            .optional()?;
        match id {
            Some(id) => Ok(Some(self.get_product(id)?)),
            None => Ok(None),
        }
    }

    pub fn add_product(&self, name: &str, category: &str, price: f64) -> Result<Product> {
        if !price.is_finite() || price < 0.0 {
            return Err(LibretaError::InvalidAmount(format!(
                "product price must be a non-negative number, got {price}"
            )));
        }
        self.ensure_unique("products", "product", name, None)?;
        self.conn.execute(
            "INSERT INTO products (name, category, price) VALUES (?1, ?2, ?3)",
            params![name, category, price],
        )?;
        self.get_product(self.conn.last_insert_rowid())
    }

    pub fn update_product(
        &self,
        id: i64,
        name: Option<&str>,
        category: Option<&str>,
        price: Option<f64>,
    ) -> Result<Product> {
        let current = self.get_product(id)?;
        if let Some(p) = price {
            if !p.is_finite() || p < 0.0 {
                return Err(LibretaError::InvalidAmount(format!(
                    "product price must be a non-negative number, got {p}"
                )));
            }
        }
        let name = name.unwrap_or(&current.name);
        self.ensure_unique("products", "product", name, Some(id))?;
        self.conn.execute(
            "UPDATE products SET name = ?1, category = ?2, price = ?3 WHERE id = ?4",
            params![
                name,
                category.unwrap_or(&current.category),
                price.unwrap_or(current.price),
                id
            ],
        )?;
        self.get_product(id)
    }

    pub fn delete_product(&self, id: i64) -> Result<()> {
        let product = self.get_product(id)?;
        if self.venta_references("product_id", id)? > 0 {
            return Err(LibretaError::ReferentialIntegrity {
                entity: "product",
                name: product.name,
            });
        }
        self.conn.execute("DELETE FROM products WHERE id = ?1", [id])?;
        Ok(())
    }
}
