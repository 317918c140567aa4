//! Contract context assembly from property and prospect records.
//!
//! Produces the tree used by contract templates:
//!
//! ```text
//! propiedad.{titulo, direccion, ciudad, canon_mensual, moneda, dia_pago}
//! prospecto.{nombre, doc, telefono, email}
//! fecha.hoy
//! empresa.nombre
//! ```
//!
//! Fields absent from the records are left out of the tree so the renderer
//! marks them as unresolved.

use std::path::Path;

use chrono::{Datelike, Local, NaiveDate};
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::context::{is_yaml_path, Context};
use crate::error::TokenResult;

/// Company name used when none is configured.
pub const DEFAULT_COMPANY: &str = "Rentoso";

const MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// A rental property.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Propiedad {
    pub titulo: String,
    pub direccion: Option<String>,
    pub ciudad: Option<String>,
    pub canon_mensual: Option<f64>,
    pub moneda: Option<String>,
    /// Day of the month rent is due. Integral floats such as `5.0` are accepted.
    #[serde(default, deserialize_with = "deserialize_day")]
    pub dia_pago: Option<u32>,
}

/// A prospective tenant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Prospecto {
    pub nombre: String,
    pub doc: Option<String>,
    pub telefono: Option<String>,
    pub email: Option<String>,
}

/// Builder for the context of a rental contract.
#[derive(Debug, Clone)]
pub struct ContractContext {
    propiedad: Propiedad,
    prospecto: Prospecto,
    company: String,
    date: NaiveDate,
}

impl ContractContext {
    pub fn new(propiedad: &Propiedad, prospecto: &Prospecto) -> Self {
        Self {
            propiedad: propiedad.clone(),
            prospecto: prospecto.clone(),
            company: DEFAULT_COMPANY.to_string(),
            date: Local::now().date_naive(),
        }
    }

    pub fn company(mut self, name: impl Into<String>) -> Self {
        self.company = name.into();
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    /// Assemble the context tree.
    pub fn build(&self) -> Context {
        let p = &self.propiedad;
        let mut propiedad = Map::new();
        propiedad.insert("titulo".into(), Value::from(p.titulo.as_str()));
        insert_opt(&mut propiedad, "direccion", p.direccion.as_deref());
        insert_opt(&mut propiedad, "ciudad", p.ciudad.as_deref());
        insert_opt(&mut propiedad, "canon_mensual", p.canon_mensual);
        insert_opt(&mut propiedad, "moneda", p.moneda.as_deref());
        insert_opt(&mut propiedad, "dia_pago", p.dia_pago);

        let q = &self.prospecto;
        let mut prospecto = Map::new();
        prospecto.insert("nombre".into(), Value::from(q.nombre.as_str()));
        insert_opt(&mut prospecto, "doc", q.doc.as_deref());
        insert_opt(&mut prospecto, "telefono", q.telefono.as_deref());
        insert_opt(&mut prospecto, "email", q.email.as_deref());

        debug!(
            propiedad = %p.titulo,
            prospecto = %q.nombre,
            "Built contract context"
        );

        Context::new()
            .with("propiedad", propiedad)
            .with("prospecto", prospecto)
            .with("fecha", serde_json::json!({ "hoy": long_date_es(self.date) }))
            .with("empresa", serde_json::json!({ "nombre": self.company }))
    }
}

fn deserialize_day<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<f64>::deserialize(deserializer)? {
        None => Ok(None),
        Some(day) if day.fract() == 0.0 && (0.0..=u32::MAX as f64).contains(&day) => {
            Ok(Some(day as u32))
        }
        Some(day) => Err(D::Error::custom(format!(
            "dia_pago must be a whole non-negative number, got {day}"
        ))),
    }
}

fn insert_opt<T: Into<Value>>(map: &mut Map<String, Value>, key: &str, value: Option<T>) {
    if let Some(value) = value {
        map.insert(key.to_string(), value.into());
    }
}

/// Format a date as `05 de marzo de 2026`.
pub fn long_date_es(date: NaiveDate) -> String {
    format!(
        "{:02} de {} de {}",
        date.day(),
        MONTHS[date.month0() as usize],
        date.year()
    )
}

/// Load a record from a JSON or YAML file.
pub fn load_record<T: DeserializeOwned>(path: &Path) -> TokenResult<T> {
    let content = std::fs::read_to_string(path)?;
    parse_record(&content, path)
}

/// Parse record content, picking the format from the file extension.
pub fn parse_record<T: DeserializeOwned>(content: &str, path: &Path) -> TokenResult<T> {
    if is_yaml_path(path) {
        Ok(serde_yaml::from_str(content)?)
    } else {
        Ok(serde_json::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::{has_unresolved, unresolved_paths};
    use crate::renderer::render;

    fn propiedad() -> Propiedad {
        Propiedad {
            titulo: "Apartamento Chapinero".into(),
            direccion: Some("Calle 60 # 9-30".into()),
            ciudad: Some("Bogotá".into()),
            canon_mensual: Some(2_500_000.0),
            moneda: Some("COP".into()),
            dia_pago: Some(5),
        }
    }

    fn prospecto() -> Prospecto {
        Prospecto {
            nombre: "Juan Pérez".into(),
            doc: Some("12.345.678-9".into()),
            telefono: None,
            email: None,
        }
    }

    #[test]
    fn test_long_date_es() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
        assert_eq!(long_date_es(date), "05 de marzo de 2026");
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(long_date_es(date), "19 de octubre de 2026");
    }

    #[test]
    fn test_build_contract_context() {
        let ctx = ContractContext::new(&propiedad(), &prospecto())
            .company("Arriendos SAS")
            .date(NaiveDate::from_ymd_opt(2026, 1, 31).unwrap())
            .build();

        let rendered = render(
            "{{empresa.nombre}} / {{prospecto.nombre}} / {{propiedad.moneda}} {{propiedad.canon_mensual}} / día {{propiedad.dia_pago}} / {{fecha.hoy}}",
            &ctx,
        );
        assert_eq!(
            rendered,
            "Arriendos SAS / Juan Pérez / COP 2500000 / día 5 / 31 de enero de 2026"
        );
        assert!(!has_unresolved(&rendered));
    }

    #[test]
    fn test_absent_fields_render_as_markers() {
        let ctx = ContractContext::new(&propiedad(), &prospecto()).build();
        let rendered = render("{{prospecto.telefono}} {{prospecto.email}} {{empresa.nombre}}", &ctx);

        assert_eq!(rendered, "[[prospecto.telefono]] [[prospecto.email]] Rentoso");
        let missing: Vec<_> = unresolved_paths(&rendered).into_iter().collect();
        assert_eq!(missing, vec!["prospecto.email", "prospecto.telefono"]);
    }

    #[test]
    fn test_dia_pago_accepts_integral_numbers() {
        let p: Propiedad = serde_json::from_str(r#"{"titulo": "Casa", "dia_pago": 5.0}"#).unwrap();
        assert_eq!(p.dia_pago, Some(5));

        let p: Propiedad = serde_json::from_str(r#"{"titulo": "Casa", "dia_pago": 10}"#).unwrap();
        assert_eq!(p.dia_pago, Some(10));

        let p: Propiedad = serde_yaml::from_str("titulo: Casa\ndia_pago: 15\n").unwrap();
        assert_eq!(p.dia_pago, Some(15));

        let p: Propiedad = serde_json::from_str(r#"{"titulo": "Casa", "dia_pago": null}"#).unwrap();
        assert_eq!(p.dia_pago, None);

        let p: Propiedad = serde_json::from_str(r#"{"titulo": "Casa"}"#).unwrap();
        assert_eq!(p.dia_pago, None);

        assert!(serde_json::from_str::<Propiedad>(r#"{"titulo": "Casa", "dia_pago": 5.5}"#).is_err());
        assert!(serde_json::from_str::<Propiedad>(r#"{"titulo": "Casa", "dia_pago": -1}"#).is_err());

        let ctx = ContractContext::new(&p, &prospecto()).build();
        assert_eq!(render("{{propiedad.dia_pago}}", &ctx), "[[propiedad.dia_pago]]");
    }
}
