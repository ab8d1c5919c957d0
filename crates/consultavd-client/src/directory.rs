//! The four backend lookups the cascading resolver depends on.

use std::future::Future;

use consultavd_core::{SearchResult, StoreCandidate};

use crate::client::ApiClient;
use crate::error::ClientError;

/// Source of store candidates, carriers, circuits and triple searches.
///
/// [`ApiClient`] is the production implementation; tests substitute an
/// in-memory directory to control response ordering.
pub trait StoreDirectory {
    type Error: std::error::Error + Send + Sync + 'static;

    fn stores_matching(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<StoreCandidate>, Self::Error>> + Send;

    fn carriers_for(
        &self,
        store_id: &str,
    ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send;

    fn circuits_for(
        &self,
        store_id: &str,
        carrier: &str,
    ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send;

    fn search_triple(
        &self,
        store_id: &str,
        carrier: &str,
        circuit: &str,
    ) -> impl Future<Output = Result<SearchResult, Self::Error>> + Send;
}

impl StoreDirectory for ApiClient {
    type Error = ClientError;

    async fn stores_matching(&self, query: &str) -> Result<Vec<StoreCandidate>, ClientError> {
        self.search_stores(query).await
    }

    async fn carriers_for(&self, store_id: &str) -> Result<Vec<String>, ClientError> {
        self.get_carriers(store_id).await
    }

    async fn circuits_for(
        &self,
        store_id: &str,
        carrier: &str,
    ) -> Result<Vec<String>, ClientError> {
        self.get_circuits(store_id, carrier).await
    }

    async fn search_triple(
        &self,
        store_id: &str,
        carrier: &str,
        circuit: &str,
    ) -> Result<SearchResult, ClientError> {
        self.search_by_store_carrier_circuit(store_id, carrier, circuit)
            .await
    }
}
