//! Store, carrier, circuit and search endpoints.

use consultavd_core::{Record, SearchResult, StoreCandidate};

use crate::client::ApiClient;
use crate::error::ClientError;
use crate::types::{ApiResponse, FieldSearch, Page, PaginatedResponse, StoreFilters};

impl ApiClient {
    /// Free-text store lookup backing the cascade's store picker
    /// (`GET /api/search/lojas?q=`).
    ///
    /// # Errors
    ///
    /// - [`ClientError::Api`] if the envelope reports failure.
    /// - [`ClientError::Http`] or [`ClientError::UnexpectedStatus`] on
    ///   transport failure or a non-2xx status.
    /// - [`ClientError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn search_stores(&self, query: &str) -> Result<Vec<StoreCandidate>, ClientError> {
        let context = format!("search_stores(q={query})");
        let url = self.endpoint_with_query(&["api", "search", "lojas"], &[("q", query)])?;
        let envelope: ApiResponse<Vec<StoreCandidate>> =
            self.execute(self.get(url), &context).await?;
        // An empty match list may arrive without `data`.
        envelope.check()?;
        Ok(envelope.data.unwrap_or_default())
    }

    /// Carriers serving a store (`GET /api/lojas/{id}/operadoras`).
    ///
    /// # Errors
    ///
    /// See [`ApiClient::search_stores`].
    pub async fn get_carriers(&self, store_id: &str) -> Result<Vec<String>, ClientError> {
        let context = format!("get_carriers(loja={store_id})");
        let url = self.endpoint(&["api", "lojas", store_id, "operadoras"])?;
        let envelope: ApiResponse<Vec<Option<String>>> =
            self.execute(self.get(url), &context).await?;
        non_null_names(envelope)
    }

    /// Circuits of a (store, carrier) pair
    /// (`GET /api/lojas/{id}/operadoras/{carrier}/circuitos`).
    ///
    /// # Errors
    ///
    /// See [`ApiClient::search_stores`].
    pub async fn get_circuits(
        &self,
        store_id: &str,
        carrier: &str,
    ) -> Result<Vec<String>, ClientError> {
        let context = format!("get_circuits(loja={store_id}, operadora={carrier})");
        let url = self.endpoint(&["api", "lojas", store_id, "operadoras", carrier, "circuitos"])?;
        let envelope: ApiResponse<Vec<Option<String>>> =
            self.execute(self.get(url), &context).await?;
        non_null_names(envelope)
    }

    /// Combined lookup for a full selection triple
    /// (`GET /api/search/loja-operadora-circuito`).
    ///
    /// # Errors
    ///
    /// See [`ApiClient::search_stores`]; additionally
    /// [`ClientError::MissingData`] if a successful envelope has no payload.
    pub async fn search_by_store_carrier_circuit(
        &self,
        store_id: &str,
        carrier: &str,
        circuit: &str,
    ) -> Result<SearchResult, ClientError> {
        let context =
            format!("search_triple(loja={store_id}, operadora={carrier}, circuito={circuit})");
        let url = self.endpoint_with_query(
            &["api", "search", "loja-operadora-circuito"],
            &[
                ("loja_id", store_id),
                ("operadora", carrier),
                ("circuito", circuit),
            ],
        )?;
        self.search_payload(url, &context).await
    }

    /// Search across stores, circuits and inventory (`GET /api/search/unified?q=`).
    ///
    /// # Errors
    ///
    /// See [`ApiClient::search_by_store_carrier_circuit`].
    pub async fn unified_search(&self, term: &str) -> Result<SearchResult, ClientError> {
        let context = format!("unified_search(q={term})");
        let url = self.endpoint_with_query(&["api", "search", "unified"], &[("q", term)])?;
        self.search_payload(url, &context).await
    }

    /// Single-field search (people code, designation, address, Vivo id, GGL/GR).
    ///
    /// # Errors
    ///
    /// See [`ApiClient::search_by_store_carrier_circuit`].
    pub async fn search_by_field(
        &self,
        field: FieldSearch,
        term: &str,
    ) -> Result<SearchResult, ClientError> {
        let context = format!("search_by_field({}={term})", field.param());
        let url = self.endpoint_with_query(
            &["api", "search", field.path()],
            &[(field.param(), term)],
        )?;
        self.search_payload(url, &context).await
    }

    /// One page of the store table (`GET /api/lojas`).
    ///
    /// # Errors
    ///
    /// See [`ApiClient::search_stores`].
    pub async fn list_stores(
        &self,
        filters: &StoreFilters,
        page: u32,
        limit: u32,
    ) -> Result<Page<Record>, ClientError> {
        let page_text = page.to_string();
        let limit_text = limit.to_string();
        let mut query = vec![("page", page_text.as_str()), ("limit", limit_text.as_str())];
        query.extend(filters.pairs());

        let url = self.endpoint_with_query(&["api", "lojas"], &query)?;
        let response: PaginatedResponse<Record> = self
            .execute(self.get(url), &format!("list_stores(page={page})"))
            .await?;
        response.into_page()
    }

    async fn search_payload(
        &self,
        url: reqwest::Url,
        context: &str,
    ) -> Result<SearchResult, ClientError> {
        let envelope: ApiResponse<SearchResult> = self.execute(self.get(url), context).await?;
        envelope.into_data(context)
    }
}

/// Carrier and circuit lists come from `SELECT DISTINCT` over nullable
/// inventory columns; null entries are dropped.
fn non_null_names(envelope: ApiResponse<Vec<Option<String>>>) -> Result<Vec<String>, ClientError> {
    envelope.check()?;
    Ok(envelope.data.unwrap_or_default().into_iter().flatten().collect())
}
