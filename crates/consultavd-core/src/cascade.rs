//! Pure state machine behind the store -> carrier -> circuit selector.
//!
//! [`ResolverState`] holds the selection triple, the candidate list of each
//! level and the last search result. Every transition that needs data from
//! the backend returns a [`Fetch`] stamped with the slot's generation; the
//! matching `apply_*` method accepts the response only while that generation
//! is still current. Any later transition touching the slot bumps its
//! generation, so responses that arrive out of order are dropped instead of
//! overwriting newer state.

use std::fmt;

use thiserror::Error;

use crate::record::{SearchResult, StoreCandidate};

/// Independent request slots tracked by the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    StoreSearch,
    Carriers,
    Circuits,
    Search,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::StoreSearch => write!(f, "store_search"),
            Slot::Carriers => write!(f, "carriers"),
            Slot::Circuits => write!(f, "circuits"),
            Slot::Search => write!(f, "search"),
        }
    }
}

/// How far down the chain the current selection reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CascadeStage {
    Empty,
    StoreChosen,
    CarrierChosen,
    CircuitChosen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CascadeError {
    #[error("select a store before choosing a carrier")]
    StoreNotSelected,

    #[error("select a carrier before choosing a circuit")]
    CarrierNotSelected,

    #[error("store, carrier and circuit must all be selected before searching")]
    IncompleteSelection,
}

/// A complete (store, carrier, circuit) triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SelectionKey {
    pub store: String,
    pub carrier: String,
    pub circuit: String,
}

/// A request the caller must perform, stamped with its slot generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetch<P> {
    slot: Slot,
    generation: u64,
    params: P,
}

impl<P> Fetch<P> {
    #[must_use]
    pub fn slot(&self) -> Slot {
        self.slot
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn params(&self) -> &P {
        &self.params
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Generations {
    store_search: u64,
    carriers: u64,
    circuits: u64,
    search: u64,
}

impl Generations {
    fn get(&self, slot: Slot) -> u64 {
        match slot {
            Slot::StoreSearch => self.store_search,
            Slot::Carriers => self.carriers,
            Slot::Circuits => self.circuits,
            Slot::Search => self.search,
        }
    }

    fn bump(&mut self, slot: Slot) -> u64 {
        let counter = match slot {
            Slot::StoreSearch => &mut self.store_search,
            Slot::Carriers => &mut self.carriers,
            Slot::Circuits => &mut self.circuits,
            Slot::Search => &mut self.search,
        };
        *counter = counter.wrapping_add(1);
        *counter
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolverState {
    store_query: String,
    store_candidates: Vec<StoreCandidate>,
    store: String,
    carrier: String,
    circuit: String,
    carriers: Vec<String>,
    circuits: Vec<String>,
    result: Option<SearchResult>,
    generations: Generations,
}

impl ResolverState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn store_query(&self) -> &str {
        &self.store_query
    }

    #[must_use]
    pub fn store_candidates(&self) -> &[StoreCandidate] {
        &self.store_candidates
    }

    #[must_use]
    pub fn store(&self) -> &str {
        &self.store
    }

    #[must_use]
    pub fn carrier(&self) -> &str {
        &self.carrier
    }

    #[must_use]
    pub fn circuit(&self) -> &str {
        &self.circuit
    }

    #[must_use]
    pub fn carriers(&self) -> &[String] {
        &self.carriers
    }

    #[must_use]
    pub fn circuits(&self) -> &[String] {
        &self.circuits
    }

    #[must_use]
    pub fn result(&self) -> Option<&SearchResult> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn stage(&self) -> CascadeStage {
        if self.store.is_empty() {
            CascadeStage::Empty
        } else if self.carrier.is_empty() {
            CascadeStage::StoreChosen
        } else if self.circuit.is_empty() {
            CascadeStage::CarrierChosen
        } else {
            CascadeStage::CircuitChosen
        }
    }

    /// The full triple, once every level is chosen.
    #[must_use]
    pub fn selection(&self) -> Option<SelectionKey> {
        (self.stage() == CascadeStage::CircuitChosen).then(|| SelectionKey {
            store: self.store.clone(),
            carrier: self.carrier.clone(),
            circuit: self.circuit.clone(),
        })
    }

    /// Records new store-search input.
    ///
    /// Queries shorter than `min_chars` characters clear the candidate list
    /// and need no fetch.
    pub fn begin_store_search(&mut self, query: &str, min_chars: usize) -> Option<Fetch<String>> {
        query.clone_into(&mut self.store_query);
        let generation = self.generations.bump(Slot::StoreSearch);
        if query.chars().count() < min_chars {
            self.store_candidates.clear();
            return None;
        }
        Some(Fetch {
            slot: Slot::StoreSearch,
            generation,
            params: query.to_owned(),
        })
    }

    /// Installs store candidates if `fetch` is still the latest search.
    pub fn apply_store_candidates(
        &mut self,
        fetch: &Fetch<String>,
        candidates: Vec<StoreCandidate>,
    ) -> bool {
        if !self.is_current(fetch) || self.store_query != fetch.params {
            return false;
        }
        self.store_candidates = candidates;
        true
    }

    /// Selects (or clears, with `""`) the store, resetting everything below.
    pub fn select_store(&mut self, id: &str) -> Option<Fetch<String>> {
        id.clone_into(&mut self.store);
        self.carrier.clear();
        self.circuit.clear();
        self.carriers.clear();
        self.circuits.clear();
        let generation = self.generations.bump(Slot::Carriers);
        self.generations.bump(Slot::Circuits);
        self.generations.bump(Slot::Search);
        (!id.is_empty()).then(|| Fetch {
            slot: Slot::Carriers,
            generation,
            params: id.to_owned(),
        })
    }

    /// Installs the carrier list if `fetch` still matches the selected store.
    pub fn apply_carriers(&mut self, fetch: &Fetch<String>, carriers: Vec<String>) -> bool {
        if !self.is_current(fetch) || self.store != fetch.params {
            return false;
        }
        self.carriers = carriers;
        true
    }

    /// Selects (or clears, with `""`) the carrier, resetting the circuit level.
    ///
    /// # Errors
    ///
    /// Returns [`CascadeError::StoreNotSelected`] when choosing a non-empty
    /// carrier with no store selected. State is left untouched.
    pub fn select_carrier(
        &mut self,
        name: &str,
    ) -> Result<Option<Fetch<(String, String)>>, CascadeError> {
        if !name.is_empty() && self.store.is_empty() {
            return Err(CascadeError::StoreNotSelected);
        }
        name.clone_into(&mut self.carrier);
        self.circuit.clear();
        self.circuits.clear();
        let generation = self.generations.bump(Slot::Circuits);
        self.generations.bump(Slot::Search);
        Ok((!name.is_empty()).then(|| Fetch {
            slot: Slot::Circuits,
            generation,
            params: (self.store.clone(), name.to_owned()),
        }))
    }

    /// Installs the circuit list if `fetch` still matches store and carrier.
    pub fn apply_circuits(
        &mut self,
        fetch: &Fetch<(String, String)>,
        circuits: Vec<String>,
    ) -> bool {
        let (store, carrier) = &fetch.params;
        if !self.is_current(fetch) || &self.store != store || &self.carrier != carrier {
            return false;
        }
        self.circuits = circuits;
        true
    }

    /// Selects (or clears, with `""`) the circuit.
    ///
    /// # Errors
    ///
    /// Returns [`CascadeError::CarrierNotSelected`] when choosing a non-empty
    /// circuit with no carrier selected. State is left untouched.
    pub fn select_circuit(&mut self, name: &str) -> Result<(), CascadeError> {
        if !name.is_empty() && self.carrier.is_empty() {
            return Err(CascadeError::CarrierNotSelected);
        }
        name.clone_into(&mut self.circuit);
        self.generations.bump(Slot::Search);
        Ok(())
    }

    /// Starts the combined search for the current triple.
    ///
    /// # Errors
    ///
    /// Returns [`CascadeError::IncompleteSelection`] unless store, carrier and
    /// circuit are all selected.
    pub fn begin_search(&mut self) -> Result<Fetch<SelectionKey>, CascadeError> {
        let key = self.selection().ok_or(CascadeError::IncompleteSelection)?;
        let generation = self.generations.bump(Slot::Search);
        Ok(Fetch {
            slot: Slot::Search,
            generation,
            params: key,
        })
    }

    /// Replaces the search result if `fetch` is still the latest search.
    ///
    /// `None` records a failed search.
    pub fn apply_search(
        &mut self,
        fetch: &Fetch<SelectionKey>,
        result: Option<SearchResult>,
    ) -> bool {
        if !self.is_current(fetch) || self.selection().as_ref() != Some(&fetch.params) {
            return false;
        }
        self.result = result;
        true
    }

    /// Clears every selection, candidate list and result, and invalidates
    /// all in-flight requests.
    pub fn reset(&mut self) {
        let mut generations = self.generations;
        for slot in [Slot::StoreSearch, Slot::Carriers, Slot::Circuits, Slot::Search] {
            generations.bump(slot);
        }
        *self = Self {
            generations,
            ..Self::default()
        };
    }

    fn is_current<P>(&self, fetch: &Fetch<P>) -> bool {
        self.generations.get(fetch.slot) == fetch.generation
    }
}
