//! Summary figures shown above a refined store list.

use crate::record::Record;
use crate::resolve::LogicalField;

/// Label used when a record has no status or city.
const MISSING: &str = "-";

/// How many cities [`summarize`] reports.
const TOP_CITIES: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultStats {
    pub total: usize,
    /// Count per resolved status, in first-seen order.
    pub by_status: Vec<(String, usize)>,
    /// Most frequent upper-cased cities, count descending; ties keep first-seen order.
    pub top_cities: Vec<(String, usize)>,
}

/// Computes totals, status counts and the busiest cities of `records`.
#[must_use]
pub fn summarize<'a, I>(records: I) -> ResultStats
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut total = 0;
    let mut by_status = Vec::new();
    let mut cities = Vec::new();

    for record in records {
        total += 1;
        bump(&mut by_status, or_missing(record.resolve(LogicalField::Status)));
        bump(
            &mut cities,
            or_missing(record.resolve(LogicalField::City)).to_uppercase(),
        );
    }

    cities.sort_by(|(_, a), (_, b)| b.cmp(a));
    cities.truncate(TOP_CITIES);

    ResultStats {
        total,
        by_status,
        top_cities: cities,
    }
}

fn or_missing(value: String) -> String {
    if value.is_empty() {
        MISSING.to_owned()
    } else {
        value
    }
}

fn bump(counts: &mut Vec<(String, usize)>, key: String) {
    match counts.iter_mut().find(|(existing, _)| *existing == key) {
        Some((_, count)) => *count += 1,
        None => counts.push((key, 1)),
    }
}
