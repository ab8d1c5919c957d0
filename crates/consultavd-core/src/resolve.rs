//! Tolerant field resolution over loosely-keyed JSON records.
//!
//! The backend emits the same logical attribute under different keys
//! depending on which query produced the row: the store search returns
//! `nome`/`cidade`, the combined store-carrier-circuit search returns the raw
//! spreadsheet headers `LOJAS`/`CIDADE`. Each [`LogicalField`] carries the
//! ordered list of spellings to try, and the first present, non-null,
//! non-empty value wins.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Value reported for a logical field that no key spelling provides.
pub const PLACEHOLDER: &str = "";

/// A logical attribute of a store row, independent of key spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicalField {
    Name,
    Code,
    City,
    Status,
    State,
    Address,
    PeopleCode,
    GglManager,
    GrManager,
    Email,
    Phone,
}

impl LogicalField {
    /// Key spellings tried for this field, in priority order.
    #[must_use]
    pub const fn keys(self) -> &'static [&'static str] {
        match self {
            Self::Name => &["nome", "NOME", "LOJAS", "loja_nome"],
            Self::Code => &["id", "codigo", "CODIGO"],
            Self::City => &["cidade", "CIDADE"],
            Self::Status => &["status", "STATUS", "Status_Loja", "loja_status"],
            Self::State => &["uf", "UF"],
            Self::Address => &["endereco", "ENDEREÇO", "ENDERECO"],
            Self::PeopleCode => &["people_code", "peop_code", "People/PEOP", "PEOP"],
            Self::GglManager => &["ggl", "NOME_GGL", "nome_ggl"],
            Self::GrManager => &["gr", "NOME_GR", "nome_gr"],
            Self::Email => &["email", "E_MAIL"],
            Self::Phone => &["telefone1", "TELEFONE1", "celular", "CELULAR"],
        }
    }
}

/// Resolves `field` against `record`, falling back to [`PLACEHOLDER`].
///
/// Never fails: a record with none of the field's keys, or with only null or
/// empty values under them, resolves to the empty string.
#[must_use]
pub fn resolve_field(record: &Map<String, Value>, field: LogicalField) -> String {
    resolve_keys(record, field.keys()).unwrap_or_else(|| PLACEHOLDER.to_owned())
}

/// Returns the text of the first key in `keys` holding a usable value.
#[must_use]
pub fn resolve_keys(record: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| record.get(*key))
        .find_map(value_text)
}

/// Renders a JSON scalar as display text; null and `""` count as absent.
fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected an object, got {other}"),
        }
    }

    #[test]
    fn primary_key_wins() {
        let rec = record(json!({ "nome": "Loja Centro", "LOJAS": "LOJA CENTRO" }));
        assert_eq!(resolve_field(&rec, LogicalField::Name), "Loja Centro");
    }

    #[test]
    fn alternate_spelling_resolves_when_primary_missing() {
        let rec = record(json!({ "LOJAS": "VD PINHEIROS", "CIDADE": "SAO PAULO" }));
        assert_eq!(resolve_field(&rec, LogicalField::Name), "VD PINHEIROS");
        assert_eq!(resolve_field(&rec, LogicalField::City), "SAO PAULO");
    }

    #[test]
    fn null_and_empty_values_fall_through() {
        let rec = record(json!({ "nome": null, "NOME": "", "LOJAS": "Fallback" }));
        assert_eq!(resolve_field(&rec, LogicalField::Name), "Fallback");
    }

    #[test]
    fn missing_everywhere_yields_placeholder() {
        let rec = record(json!({ "unrelated": "x" }));
        assert_eq!(resolve_field(&rec, LogicalField::Name), PLACEHOLDER);
        assert_eq!(resolve_field(&rec, LogicalField::Status), "");
    }

    #[test]
    fn numeric_code_is_rendered_as_text() {
        let rec = record(json!({ "id": 1042 }));
        assert_eq!(resolve_field(&rec, LogicalField::Code), "1042");
    }

    #[test]
    fn zero_is_a_present_value() {
        let rec = record(json!({ "id": 0, "codigo": "999" }));
        assert_eq!(resolve_field(&rec, LogicalField::Code), "0");
    }

    #[test]
    fn status_reads_spreadsheet_header() {
        let rec = record(json!({ "Status_Loja": "ATIVA" }));
        assert_eq!(resolve_field(&rec, LogicalField::Status), "ATIVA");
    }

    #[test]
    fn resolve_keys_reports_absence() {
        let rec = record(json!({ "a": null }));
        assert_eq!(resolve_keys(&rec, &["a", "b"]), None);
    }
}
