//! Async driver for the store -> carrier -> circuit selector.
//!
//! [`CascadingResolver`] owns a [`ResolverState`] behind a mutex and a
//! [`StoreDirectory`] to fetch from. Each operation performs its transition
//! under the lock, releases it, awaits the lookup, then re-locks to apply the
//! response only if its fetch ticket is still current. Lookup failures inside
//! the chain go through [`degrade_to_empty`]; only [`CascadingResolver::search`]
//! reports errors to the caller.

use std::sync::{Mutex, MutexGuard, PoisonError};

use consultavd_core::{CascadeError, Fetch, ResolverState, SearchResult, Slot};
use thiserror::Error;

use crate::debounce::Debounced;
use crate::directory::StoreDirectory;
use crate::fallback::degrade_to_empty;

/// Minimum store-search query length, in characters.
pub const DEFAULT_MIN_QUERY_CHARS: usize = 2;

#[derive(Debug, Error)]
pub enum SearchError<E>
where
    E: std::error::Error + 'static,
{
    #[error(transparent)]
    Selection(#[from] CascadeError),

    #[error("search failed: {0}")]
    Lookup(#[source] E),

    /// The selection changed while the search was in flight; the response
    /// was discarded.
    #[error("selection changed while the search was in flight")]
    Superseded,
}

pub struct CascadingResolver<D> {
    directory: D,
    min_query_chars: usize,
    state: Mutex<ResolverState>,
}

impl<D: StoreDirectory> CascadingResolver<D> {
    #[must_use]
    pub fn new(directory: D) -> Self {
        Self {
            directory,
            min_query_chars: DEFAULT_MIN_QUERY_CHARS,
            state: Mutex::new(ResolverState::new()),
        }
    }

    #[must_use]
    pub fn with_min_query_chars(mut self, min_query_chars: usize) -> Self {
        self.min_query_chars = min_query_chars;
        self
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> ResolverState {
        self.lock().clone()
    }

    /// Runs one store search for `query`.
    ///
    /// Queries shorter than the minimum clear the candidate list without a
    /// fetch. Returns whether fresh candidates were installed.
    pub async fn search_stores(&self, query: &str) -> bool {
        let fetch = self.lock().begin_store_search(query, self.min_query_chars);
        let Some(fetch) = fetch else {
            return false;
        };

        let result = self.directory.stores_matching(fetch.params()).await;
        let candidates = degrade_to_empty(Slot::StoreSearch, result);
        let applied = self.lock().apply_store_candidates(&fetch, candidates);
        note_discarded(&fetch, applied);
        applied
    }

    /// Feeds every settled value of `input` to [`search_stores`](Self::search_stores)
    /// until the input closes.
    pub async fn run_store_search(&self, input: &mut Debounced<String>) {
        while let Some(query) = input.next().await {
            self.search_stores(&query).await;
        }
    }

    /// Selects a store (or clears it with `""`) and loads its carriers.
    ///
    /// A failed carrier lookup leaves the store selected with no carriers.
    pub async fn select_store(&self, id: &str) {
        let fetch = self.lock().select_store(id);
        let Some(fetch) = fetch else {
            return;
        };

        tracing::debug!(store = id, "loading carriers");
        let result = self.directory.carriers_for(fetch.params()).await;
        let carriers = degrade_to_empty(Slot::Carriers, result);
        let applied = self.lock().apply_carriers(&fetch, carriers);
        note_discarded(&fetch, applied);
    }

    /// Selects a carrier (or clears it with `""`) and loads its circuits.
    ///
    /// # Errors
    ///
    /// Returns [`CascadeError::StoreNotSelected`] when no store is selected.
    pub async fn select_carrier(&self, name: &str) -> Result<(), CascadeError> {
        let fetch = self.lock().select_carrier(name)?;
        let Some(fetch) = fetch else {
            return Ok(());
        };

        let (store, carrier) = fetch.params();
        tracing::debug!(store = %store, carrier = %carrier, "loading circuits");
        let result = self.directory.circuits_for(store, carrier).await;
        let circuits = degrade_to_empty(Slot::Circuits, result);
        let applied = self.lock().apply_circuits(&fetch, circuits);
        note_discarded(&fetch, applied);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`CascadeError::CarrierNotSelected`] when no carrier is selected.
    pub fn select_circuit(&self, name: &str) -> Result<(), CascadeError> {
        self.lock().select_circuit(name)
    }

    /// Clears every selection, list and result.
    pub fn reset(&self) {
        self.lock().reset();
    }

    /// Runs the combined search for the selected triple and stores the result.
    ///
    /// # Errors
    ///
    /// - [`SearchError::Selection`] if the triple is incomplete.
    /// - [`SearchError::Lookup`] if the backend call fails; the stored
    ///   result is cleared.
    /// - [`SearchError::Superseded`] if the selection changed before the
    ///   response arrived.
    pub async fn search(&self) -> Result<SearchResult, SearchError<D::Error>> {
        let fetch = self.lock().begin_search()?;
        let key = fetch.params();

        tracing::info!(
            store = %key.store,
            carrier = %key.carrier,
            circuit = %key.circuit,
            "searching store/carrier/circuit"
        );
        match self
            .directory
            .search_triple(&key.store, &key.carrier, &key.circuit)
            .await
        {
            Ok(result) => {
                let applied = self.lock().apply_search(&fetch, Some(result.clone()));
                note_discarded(&fetch, applied);
                if applied {
                    Ok(result)
                } else {
                    Err(SearchError::Superseded)
                }
            }
            Err(error) => {
                tracing::warn!(error = %error, "store/carrier/circuit search failed");
                self.lock().apply_search(&fetch, None);
                Err(SearchError::Lookup(error))
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, ResolverState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn note_discarded<P>(fetch: &Fetch<P>, applied: bool) {
    if !applied {
        tracing::debug!(
            slot = %fetch.slot(),
            generation = fetch.generation(),
            "discarding superseded response"
        );
    }
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;
