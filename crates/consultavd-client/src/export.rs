//! CSV and spreadsheet downloads.

use crate::client::ApiClient;
use crate::error::ClientError;
use crate::types::{Entity, Export, ExportFormat, SearchExport};

impl ApiClient {
    /// Downloads a whole entity table (`GET /api/export/{table}`).
    ///
    /// # Errors
    ///
    /// [`ClientError::Http`] on network failure, or
    /// [`ClientError::UnexpectedStatus`] when the backend cannot build the
    /// file.
    pub async fn export_table(
        &self,
        entity: Entity,
        format: ExportFormat,
    ) -> Result<Export, ClientError> {
        let url = self.endpoint_with_query(
            &["api", "export", entity.path()],
            &[("format", format.as_str())],
        )?;
        self.download(self.get(url), &format!("export_table({entity})")).await
    }

    /// Turns a result set into a CSV with a metadata first row
    /// (`POST /api/export/search-results`).
    ///
    /// # Errors
    ///
    /// See [`ApiClient::export_table`]. The backend rejects an empty
    /// `results` list.
    pub async fn export_search_results(
        &self,
        export: &SearchExport,
    ) -> Result<Export, ClientError> {
        let url = self.endpoint(&["api", "export", "search-results"])?;
        self.download(self.post(url).json(export), "export_search_results").await
    }
}
