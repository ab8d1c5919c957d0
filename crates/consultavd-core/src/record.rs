//! Records returned by the `ConsultaVD` backend.
//!
//! Store rows are kept as untyped JSON objects: different endpoints spell the
//! same column differently, so typed access goes through
//! [`resolve_field`](crate::resolve::resolve_field). Only the store-search
//! candidate list has a stable shape and gets a typed struct.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::resolve::{resolve_field, LogicalField};

/// An immutable snapshot of one flat backend row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

/// A store row. Stores share the untyped representation of every other row.
pub type StoreRecord = Record;

impl Record {
    #[must_use]
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Wraps a JSON value, returning `None` unless it is an object.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self(fields)),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    #[must_use]
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// Raw value under an exact key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Resolved text of a logical field, or the empty placeholder.
    #[must_use]
    pub fn resolve(&self, field: LogicalField) -> String {
        resolve_field(&self.0, field)
    }

    #[must_use]
    pub fn name(&self) -> String {
        self.resolve(LogicalField::Name)
    }

    #[must_use]
    pub fn code(&self) -> String {
        self.resolve(LogicalField::Code)
    }

    #[must_use]
    pub fn city(&self) -> String {
        self.resolve(LogicalField::City)
    }

    #[must_use]
    pub fn status(&self) -> String {
        self.resolve(LogicalField::Status)
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// One row of the free-text store search used to seed the cascade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreCandidate {
    /// Store identifier; the backend sends either a number or a string.
    #[serde(deserialize_with = "text_or_number")]
    pub id: String,
    /// `PEOP` code of the store.
    #[serde(rename = "codigo", default, deserialize_with = "optional_text_or_number")]
    pub code: Option<String>,
    #[serde(rename = "nome", default)]
    pub name: Option<String>,
    #[serde(rename = "endereco", default)]
    pub address: Option<String>,
    #[serde(rename = "cidade", default)]
    pub city: Option<String>,
    #[serde(rename = "uf", default)]
    pub state: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Aggregate returned by every search endpoint.
///
/// Replaced wholesale on each search; absent lists decode as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(rename = "lojas", default)]
    pub stores: Vec<StoreRecord>,
    #[serde(rename = "circuitos", default)]
    pub circuits: Vec<Record>,
    #[serde(rename = "inventario", default)]
    pub inventory: Vec<Record>,
}

impl SearchResult {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty() && self.circuits.is_empty() && self.inventory.is_empty()
    }
}

fn scalar_text<E: serde::de::Error>(value: Value) -> Result<Option<String>, E> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(E::custom(format!("expected a string or number, got {other}"))),
    }
}

/// Deserializes a JSON string or number into its text form.
///
/// # Errors
///
/// Fails on null, booleans, arrays and objects.
pub fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    scalar_text::<D::Error>(value)?
        .ok_or_else(|| serde::de::Error::custom("expected a string or number, got null"))
}

/// Like [`text_or_number`] but maps null to `None`.
///
/// # Errors
///
/// Fails on booleans, arrays and objects.
pub fn optional_text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    scalar_text::<D::Error>(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn candidate_accepts_numeric_id() {
        let candidate: StoreCandidate = serde_json::from_value(json!({
            "id": 1234,
            "codigo": "P1234",
            "nome": "VD SHOPPING IBIRAPUERA",
            "endereco": "AV IBIRAPUERA 3103",
            "cidade": "SAO PAULO",
            "uf": "SP",
            "status": "ATIVA"
        }))
        .expect("candidate should decode");
        assert_eq!(candidate.id, "1234");
        assert_eq!(candidate.code.as_deref(), Some("P1234"));
        assert_eq!(candidate.state.as_deref(), Some("SP"));
    }

    #[test]
    fn candidate_tolerates_missing_and_null_columns() {
        let candidate: StoreCandidate =
            serde_json::from_value(json!({ "id": "77", "codigo": null, "nome": null }))
                .expect("candidate should decode");
        assert_eq!(candidate.id, "77");
        assert!(candidate.code.is_none());
        assert!(candidate.name.is_none());
        assert!(candidate.city.is_none());
    }

    #[test]
    fn candidate_rejects_null_id() {
        let result = serde_json::from_value::<StoreCandidate>(json!({ "id": null }));
        assert!(result.is_err());
    }

    #[test]
    fn search_result_defaults_missing_lists() {
        let result: SearchResult = serde_json::from_value(json!({
            "lojas": [{ "LOJAS": "VD CENTRO", "CODIGO": 10 }]
        }))
        .expect("result should decode");
        assert_eq!(result.stores.len(), 1);
        assert!(result.circuits.is_empty());
        assert!(result.inventory.is_empty());
        assert_eq!(result.stores[0].name(), "VD CENTRO");
        assert_eq!(result.stores[0].code(), "10");
    }

    #[test]
    fn record_from_value_requires_object() {
        assert!(Record::from_value(json!([1, 2])).is_none());
        assert!(Record::from_value(json!({ "a": 1 })).is_some());
    }
}
