//! Plain-text tables for terminal output.

use consultavd_core::{
    refine, LogicalField, Pagination, Record, RefinerParams, ResultStats, SearchResult,
    StoreCandidate,
};
use serde_json::{Map, Value};

use crate::search::RefineArgs;

const MISSING: &str = "-";
const NAME_WIDTH: usize = 36;

/// Truncates `text` to `max` characters, marking the cut with `...`.
pub(crate) fn clip(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let kept: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        text.to_owned()
    }
}

fn or_missing(value: String) -> String {
    if value.is_empty() {
        MISSING.to_owned()
    } else {
        value
    }
}

pub(crate) fn print_candidates(candidates: &[StoreCandidate]) {
    if candidates.is_empty() {
        println!("no stores matched");
        return;
    }
    println!(
        "{:<10}{:<10}{:<38}{:<22}{:<4}STATUS",
        "ID", "PEOP", "NAME", "CITY", "UF"
    );
    for store in candidates {
        println!(
            "{:<10}{:<10}{:<38}{:<22}{:<4}{}",
            store.id,
            store.code.as_deref().unwrap_or(MISSING),
            clip(store.name.as_deref().unwrap_or(MISSING), NAME_WIDTH),
            clip(store.city.as_deref().unwrap_or(MISSING), 20),
            store.state.as_deref().unwrap_or(MISSING),
            store.status.as_deref().unwrap_or(MISSING),
        );
    }
}

pub(crate) fn print_names(label: &str, names: &[String]) {
    if names.is_empty() {
        println!("no {label} found");
        return;
    }
    for name in names {
        println!("{name}");
    }
}

pub(crate) fn print_records(records: &[&Record]) {
    println!(
        "{:<10}{:<38}{:<22}{:<4}{:<10}GGL",
        "CODE", "NAME", "CITY", "UF", "STATUS"
    );
    for record in records {
        println!(
            "{:<10}{:<38}{:<22}{:<4}{:<10}{}",
            or_missing(record.code()),
            clip(&or_missing(record.name()), NAME_WIDTH),
            clip(&or_missing(record.city()), 20),
            or_missing(record.resolve(LogicalField::State)),
            or_missing(record.status()),
            or_missing(record.resolve(LogicalField::GglManager)),
        );
    }
}

/// Cell text of a raw value: strings unquoted, null empty.
fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Tab-separated rows under a header, in `columns` order.
pub(crate) fn print_grid(columns: &[String], rows: &[&Map<String, Value>]) {
    println!("{}", columns.join("\t"));
    for row in rows {
        let cells: Vec<String> = columns.iter().map(|column| cell(row.get(column))).collect();
        println!("{}", cells.join("\t"));
    }
}

/// One `column: value` line per field, in backend order.
pub(crate) fn print_fields(record: &Record) {
    let width = record.as_map().keys().map(|k| k.chars().count()).max().unwrap_or(0);
    for (column, value) in record.as_map() {
        println!("{column:<width$}  {}", or_missing(cell(Some(value))));
    }
}

pub(crate) fn print_stats(stats: &ResultStats) {
    let statuses: Vec<String> = stats
        .by_status
        .iter()
        .map(|(status, count)| format!("{status}={count}"))
        .collect();
    let cities: Vec<String> = stats
        .top_cities
        .iter()
        .map(|(city, count)| format!("{city} ({count})"))
        .collect();
    println!("total: {}", stats.total);
    if !statuses.is_empty() {
        println!("by status: {}", statuses.join(", "));
    }
    if !cities.is_empty() {
        println!("top cities: {}", cities.join(", "));
    }
}

/// Refines the store list of `result`, then prints stats, the visible page
/// and the sizes of the other lists.
pub(crate) fn print_search_result(
    result: &SearchResult,
    args: &RefineArgs,
    default_page_size: usize,
) {
    let params = args.to_params(default_page_size);
    print_refined_stores(&result.stores, &params);
    println!();
    println!(
        "circuits: {}  inventory rows: {}",
        result.circuits.len(),
        result.inventory.len()
    );
}

pub(crate) fn print_refined_stores(stores: &[Record], params: &RefinerParams) {
    let refined = refine(stores, params);
    if refined.total() == 0 {
        println!("no stores match the current filters");
        return;
    }

    print_stats(&consultavd_core::summarize(refined.all.iter().copied()));
    println!();
    print_records(refined.visible());
    if let Some(page) = refined.page {
        print_page_footer(page, refined.total());
    }
}

fn print_page_footer(page: Pagination, total: usize) {
    let first = page.offset() + 1;
    let last = (page.offset() + page.page_size()).min(total);
    println!(
        "page {}/{} (rows {first}-{last} of {total})",
        page.page(),
        page.total_pages(total)
    );
}
