//! Audit-log entries and the client-side filter applied to a fetched page.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::record::optional_text_or_number;

/// One change recorded by the backend editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// ISO-8601 timestamp as written by the backend.
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub table: String,
    #[serde(default, deserialize_with = "optional_text_or_number")]
    pub record_id: Option<String>,
    #[serde(default)]
    pub old_value: Option<Map<String, Value>>,
    #[serde(default)]
    pub new_value: Option<Map<String, Value>>,
}

impl AuditEntry {
    /// One-line description, e.g. `"UPDATE em lojas"`.
    #[must_use]
    pub fn summary(&self) -> String {
        format!("{} em {}", self.action, self.table)
    }

    /// Parses [`timestamp`](Self::timestamp), accepting RFC 3339 and naive
    /// ISO forms with either `T` or a space separator.
    #[must_use]
    pub fn parsed_timestamp(&self) -> Option<NaiveDateTime> {
        let raw = self.timestamp.trim();
        if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
            return Some(with_offset.naive_local());
        }
        ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
            .or_else(|| {
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
            })
    }

    /// Keys of `new_value` whose value differs from `old_value`.
    ///
    /// Without a previous value every new key counts as changed.
    #[must_use]
    pub fn changed_fields(&self) -> Vec<String> {
        let Some(new_value) = &self.new_value else {
            return Vec::new();
        };
        new_value
            .iter()
            .filter(|(key, value)| {
                self.old_value
                    .as_ref()
                    .is_none_or(|old| old.get(key.as_str()) != Some(*value))
            })
            .map(|(key, _)| key.clone())
            .collect()
    }
}

/// Filters applied to a page of audit entries. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditFilter {
    pub user: Option<String>,
    pub action: Option<String>,
    pub table: Option<String>,
    /// Case-insensitive substring of [`AuditEntry::summary`].
    pub search: Option<String>,
    /// Inclusive lower bound on the entry's calendar date.
    pub from: Option<NaiveDate>,
    /// Inclusive upper bound on the entry's calendar date.
    pub to: Option<NaiveDate>,
}

impl AuditFilter {
    #[must_use]
    pub fn matches(&self, entry: &AuditEntry) -> bool {
        exact(self.user.as_deref(), entry.user.as_deref().unwrap_or_default())
            && exact(self.action.as_deref(), &entry.action)
            && exact(self.table.as_deref(), &entry.table)
            && self.matches_search(entry)
            && self.matches_window(entry)
    }

    /// Entries of `entries` passing [`matches`](Self::matches), in order.
    #[must_use]
    pub fn apply<'a>(&self, entries: &'a [AuditEntry]) -> Vec<&'a AuditEntry> {
        entries.iter().filter(|entry| self.matches(entry)).collect()
    }

    fn matches_search(&self, entry: &AuditEntry) -> bool {
        match self.search.as_deref() {
            None | Some("") => true,
            Some(needle) => entry
                .summary()
                .to_lowercase()
                .contains(&needle.to_lowercase()),
        }
    }

    fn matches_window(&self, entry: &AuditEntry) -> bool {
        if self.from.is_none() && self.to.is_none() {
            return true;
        }
        // A bounded window cannot place an unparsable timestamp.
        let Some(date) = entry.parsed_timestamp().map(|ts| ts.date()) else {
            return false;
        };
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }
}

fn exact(wanted: Option<&str>, actual: &str) -> bool {
    match wanted {
        None | Some("") => true,
        Some(wanted) => wanted == actual,
    }
}
