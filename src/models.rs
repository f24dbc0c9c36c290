use serde::{Deserialize, Serialize};

/// A client's billing cadence. Unrecognized values stored in older data fall
/// back to `Diario` at report time, never at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modalidad {
    Diario,
    Semanal,
    Quincenal,
}

impl Modalidad {
    pub fn as_str(&self) -> &'static str {
        match self {
            Modalidad::Diario => "diario",
            Modalidad::Semanal => "semanal",
            Modalidad::Quincenal => "quincenal",
        }
    }

    /// Lenient parse: anything unrecognized reports as daily.
    pub fn from_str_lossy(s: &str) -> Modalidad {
        match s {
            "semanal" => Modalidad::Semanal,
            "quincenal" => Modalidad::Quincenal,
            _ => Modalidad::Diario,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub local: String,
    pub modalidad: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Salesperson {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub price: f64,
}

/// A recorded sale. `total_amount` is frozen at recording time; later product
/// price edits never rewrite it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venta {
    pub id: i64,
    pub date: String,
    pub client_id: i64,
    pub product_id: i64,
    pub salesperson_id: i64,
    pub quantity: i64,
    pub total_amount: f64,
}

/// Cash-box movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CajaKind {
    Entrada,
    Salida,
}

impl CajaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CajaKind::Entrada => "entrada",
            CajaKind::Salida => "salida",
        }
    }

    pub fn parse(s: &str) -> Option<CajaKind> {
        match s {
            "entrada" => Some(CajaKind::Entrada),
            "salida" => Some(CajaKind::Salida),
            _ => None,
        }
    }
}

/// Cash-box movement. `amount` is always a positive magnitude; `kind` carries
/// the sign.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CajaTransaction {
    pub id: i64,
    pub date: String,
    pub description: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: CajaKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modalidad_lossy_parse_defaults_to_diario() {
        assert_eq!(Modalidad::from_str_lossy("semanal"), Modalidad::Semanal);
        assert_eq!(Modalidad::from_str_lossy("quincenal"), Modalidad::Quincenal);
        assert_eq!(Modalidad::from_str_lossy("diario"), Modalidad::Diario);
        assert_eq!(Modalidad::from_str_lossy(""), Modalidad::Diario);
        assert_eq!(Modalidad::from_str_lossy("mensual"), Modalidad::Diario);
    }

    #[test]
    fn test_caja_kind_serializes_as_type_field() {
        let t = CajaTransaction {
            id: 1,
            date: "2024-01-01T08:00:00.000Z".to_string(),
            description: "Fondo de caja inicial".to_string(),
            amount: 200000.0,
            kind: CajaKind::Entrada,
        };
        let json = serde_json::to_string(&t).unwrap();
        assert!(json.contains("\"type\":\"entrada\""), "got: {json}");
        let back: CajaTransaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back.kind, CajaKind::Entrada);
    }

    #[test]
    fn test_venta_uses_camel_case_fields() {
        let v = Venta {
            id: 1,
            date: "2024-01-06T10:00:00.000Z".to_string(),
            client_id: 2,
            product_id: 3,
            salesperson_id: 4,
            quantity: 2,
            total_amount: 12000.0,
        };
        let json = serde_json::to_string(&v).unwrap();
        assert!(json.contains("\"clientId\":2"), "got: {json}");
        assert!(json.contains("\"totalAmount\":12000.0"), "got: {json}");
    }
}
