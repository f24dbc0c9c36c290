use std::time::Duration;

use serde_json::{json, Value};

use crate::error::{LibretaError, Result};
use crate::fmt::money;
use crate::ventas::VentaDetail;

/// Narrow capability seam for the AI report summary. Best-effort: a failing
/// or unconfigured service must never touch stored state, and callers treat
/// errors as a notice, not a fault.
pub trait SummaryService {
    fn summarize(&self, salesperson_name: &str, rows: &[VentaDetail]) -> Result<String>;
}

const GEMINI_MODEL: &str = "gemini-2.5-flash";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct GeminiSummaryService {
    api_key: String,
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl GeminiSummaryService {
    /// Reads `GEMINI_API_KEY`; `None` when the service is unconfigured.
    pub fn from_env() -> Option<GeminiSummaryService> {
        let api_key = std::env::var("GEMINI_API_KEY").ok()?;
        if api_key.is_empty() {
            return None;
        }
        Some(GeminiSummaryService {
            api_key,
            endpoint: format!(
                "https://generativelanguage.googleapis.com/v1beta/models/{GEMINI_MODEL}:generateContent"
            ),
            client: reqwest::blocking::Client::new(),
        })
    }
}

pub(crate) fn build_prompt(salesperson_name: &str, rows: &[VentaDetail]) -> String {
    let sales_list = rows
        .iter()
        .map(|v| {
            format!(
                "- Cliente: {}, Producto: {}x {}, Total: {}",
                v.client_name,
                v.quantity,
                v.product_name,
                money(v.total_amount)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Eres un asistente de gerencia en un restaurante de lujo. Tu tarea es generar un resumen \
         conciso, profesional y amigable del rendimiento de ventas diario de un vendedor para el \
         gerente general.\n\
         El resumen debe ser breve (máximo 3 frases cortas), destacar el total de ventas del día y \
         mencionar el producto más vendido o la venta de mayor valor si es relevante.\n\
         Usa un tono positivo y enfocado en los resultados. No uses markdown. Comienza siempre con \
         el nombre del vendedor.\n\n\
         Aquí están los datos del día:\n\
         Vendedor: {salesperson_name}\n\
         Ventas:\n{sales_list}\n\n\
         Genera el resumen del día para {salesperson_name}."
    )
}

impl SummaryService for GeminiSummaryService {
    fn summarize(&self, salesperson_name: &str, rows: &[VentaDetail]) -> Result<String> {
        // An empty report needs no model call.
        if rows.is_empty() {
            return Ok(format!(
                "No hubo ventas registradas para {salesperson_name} en este día."
            ));
        }

        let body = json!({
            "contents": [{ "parts": [{ "text": build_prompt(salesperson_name, rows) }] }]
        });

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .timeout(REQUEST_TIMEOUT)
            .json(&body)
            .send()
            .map_err(|e| LibretaError::Summary(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(LibretaError::Summary(format!(
                "service returned HTTP {}",
                response.status()
            )));
        }

        let payload: Value = response
            .json()
            .map_err(|e| LibretaError::Summary(format!("unreadable response: {e}")))?;
        payload["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(|s| s.trim().to_string())
            .ok_or_else(|| LibretaError::Summary("response carried no text".to_string()))
    }
}
