//! Interactive store -> carrier -> circuit picker on stdin.
//!
//! Plain lines are store-search input and go through the debouncer; lines
//! starting with `/` drive the cascade directly.

use consultavd_client::{debounced, ApiClient, CascadingResolver, SearchError};
use consultavd_core::{AppConfig, ResolverState};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::output;
use crate::search::RefineArgs;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum BrowseCommand {
    Query(String),
    Store(String),
    Carrier(String),
    Circuit(String),
    Search,
    Show,
    Reset,
    Help,
    Quit,
    Unknown(String),
}

pub(crate) fn parse_command(line: &str) -> BrowseCommand {
    let line = line.trim();
    let Some(rest) = line.strip_prefix('/') else {
        return BrowseCommand::Query(line.to_owned());
    };
    let (name, arg) = rest
        .split_once(char::is_whitespace)
        .map_or((rest, ""), |(name, arg)| (name, arg.trim()));
    match name {
        "store" | "loja" => BrowseCommand::Store(arg.to_owned()),
        "carrier" | "operadora" => BrowseCommand::Carrier(arg.to_owned()),
        "circuit" | "circuito" => BrowseCommand::Circuit(arg.to_owned()),
        "search" => BrowseCommand::Search,
        "show" => BrowseCommand::Show,
        "reset" => BrowseCommand::Reset,
        "help" => BrowseCommand::Help,
        "quit" | "exit" => BrowseCommand::Quit,
        other => BrowseCommand::Unknown(other.to_owned()),
    }
}

fn print_help() {
    println!("type to search stores; commands:");
    println!("  /store <id>       select a store (no id clears it)");
    println!("  /carrier <name>   select a carrier");
    println!("  /circuit <name>   select a circuit");
    println!("  /search           run the combined search");
    println!("  /show             print the current selection");
    println!("  /reset            clear everything");
    println!("  /quit");
}

fn print_state(state: &ResolverState) {
    let show = |value: &str| {
        if value.is_empty() {
            "-".to_owned()
        } else {
            value.to_owned()
        }
    };
    println!(
        "store: {}  carrier: {}  circuit: {}",
        show(state.store()),
        show(state.carrier()),
        show(state.circuit())
    );
}

/// Run the picker until `/quit` or end of input.
///
/// # Errors
///
/// Returns an error if stdin cannot be read.
pub(crate) async fn run_browse(client: ApiClient, config: &AppConfig) -> anyhow::Result<()> {
    let resolver =
        CascadingResolver::new(client).with_min_query_chars(config.store_search_min_chars);
    let (tx, mut input) = debounced(config.store_search_debounce());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print_help();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_command(&line) {
                    BrowseCommand::Query(query) => {
                        // The receiver lives until this loop ends.
                        let _ = tx.send(query);
                    }
                    BrowseCommand::Store(id) => {
                        resolver.select_store(&id).await;
                        output::print_names("carriers", resolver.snapshot().carriers());
                    }
                    BrowseCommand::Carrier(name) => match resolver.select_carrier(&name).await {
                        Ok(()) => output::print_names("circuits", resolver.snapshot().circuits()),
                        Err(e) => eprintln!("{e}"),
                    },
                    BrowseCommand::Circuit(name) => {
                        if let Err(e) = resolver.select_circuit(&name) {
                            eprintln!("{e}");
                        }
                    }
                    BrowseCommand::Search => match resolver.search().await {
                        Ok(result) => output::print_search_result(
                            &result,
                            &RefineArgs::default(),
                            config.page_size,
                        ),
                        Err(SearchError::Selection(e)) => eprintln!("{e}"),
                        Err(e) => {
                            tracing::warn!(error = %e, "search failed");
                            eprintln!("search failed; try again");
                        }
                    },
                    BrowseCommand::Show => print_state(&resolver.snapshot()),
                    BrowseCommand::Reset => {
                        resolver.reset();
                        println!("selection cleared");
                    }
                    BrowseCommand::Help => print_help(),
                    BrowseCommand::Quit => break,
                    BrowseCommand::Unknown(name) => eprintln!("unknown command /{name}; try /help"),
                }
            }
            Some(query) = input.next() => {
                if resolver.search_stores(&query).await {
                    output::print_candidates(resolver.snapshot().store_candidates());
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_lines_are_queries() {
        assert_eq!(
            parse_command("  shopping eldorado \n"),
            BrowseCommand::Query("shopping eldorado".to_owned())
        );
    }

    #[test]
    fn commands_take_trimmed_arguments() {
        assert_eq!(
            parse_command("/store  1501 "),
            BrowseCommand::Store("1501".to_owned())
        );
        assert_eq!(
            parse_command("/carrier VIVO FIBRA"),
            BrowseCommand::Carrier("VIVO FIBRA".to_owned())
        );
        assert_eq!(
            parse_command("/circuito SPO-IP-1"),
            BrowseCommand::Circuit("SPO-IP-1".to_owned())
        );
    }

    #[test]
    fn bare_store_command_clears() {
        assert_eq!(parse_command("/store"), BrowseCommand::Store(String::new()));
    }

    #[test]
    fn unknown_commands_are_reported() {
        assert_eq!(
            parse_command("/export csv"),
            BrowseCommand::Unknown("export".to_owned())
        );
        assert_eq!(parse_command("/exit"), BrowseCommand::Quit);
    }
}
