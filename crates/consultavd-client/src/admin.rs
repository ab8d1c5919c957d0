//! Health, dashboard, audit, cache, template and SQL console endpoints.

use consultavd_core::AuditEntry;
use serde_json::Value;

use crate::client::ApiClient;
use crate::error::ClientError;
use crate::types::{
    ApiResponse, CacheStats, DashboardStats, Health, NewTemplate, Page, PaginatedResponse,
    SqlResult, Template, TemplateKind,
};

impl ApiClient {
    /// `GET /api/health`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] or [`ClientError::UnexpectedStatus`]
    /// when the backend is unreachable or unhealthy.
    pub async fn health(&self) -> Result<Health, ClientError> {
        let url = self.endpoint(&["api", "health"])?;
        self.execute(self.get(url), "health").await
    }

    /// Dashboard counters (`GET /api/dashboard/stats`).
    ///
    /// # Errors
    ///
    /// See [`ApiClient::audit_logs`]; additionally [`ClientError::MissingData`]
    /// if a successful envelope has no payload.
    pub async fn dashboard_stats(&self) -> Result<DashboardStats, ClientError> {
        let url = self.endpoint(&["api", "dashboard", "stats"])?;
        let envelope: ApiResponse<DashboardStats> =
            self.execute(self.get(url), "dashboard_stats").await?;
        envelope.into_data("dashboard_stats")
    }

    /// One page of the audit log (`GET /api/audit/logs`).
    ///
    /// # Errors
    ///
    /// - [`ClientError::Api`] if the envelope reports failure.
    /// - [`ClientError::Http`], [`ClientError::UnexpectedStatus`] or
    ///   [`ClientError::Deserialize`] on transport or decoding failure.
    pub async fn audit_logs(
        &self,
        page: u32,
        limit: u32,
    ) -> Result<Page<AuditEntry>, ClientError> {
        let page_text = page.to_string();
        let limit_text = limit.to_string();
        let url = self.endpoint_with_query(
            &["api", "audit", "logs"],
            &[("page", page_text.as_str()), ("limit", limit_text.as_str())],
        )?;
        let response: PaginatedResponse<AuditEntry> = self
            .execute(self.get(url), &format!("audit_logs(page={page})"))
            .await?;
        response.into_page()
    }

    /// Backend cache counters (`GET /api/cache/stats`).
    ///
    /// # Errors
    ///
    /// See [`ApiClient::audit_logs`]; additionally [`ClientError::MissingData`]
    /// if a successful envelope has no payload.
    pub async fn cache_stats(&self) -> Result<CacheStats, ClientError> {
        let url = self.endpoint(&["api", "cache", "stats"])?;
        let envelope: ApiResponse<CacheStats> = self.execute(self.get(url), "cache_stats").await?;
        envelope.into_data("cache_stats")
    }

    /// Empties the backend cache (`POST /api/cache/clear`) and returns the
    /// backend's confirmation message.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::audit_logs`].
    pub async fn clear_cache(&self) -> Result<Option<String>, ClientError> {
        let url = self.endpoint(&["api", "cache", "clear"])?;
        let envelope: ApiResponse<Value> = self.execute(self.post(url), "clear_cache").await?;
        envelope.check()?;
        Ok(envelope.message)
    }

    /// Saved templates, newest first, optionally of one kind (`GET /api/templates`).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`], [`ClientError::UnexpectedStatus`] or
    /// [`ClientError::Deserialize`] on transport or decoding failure.
    pub async fn templates(
        &self,
        kind: Option<TemplateKind>,
    ) -> Result<Vec<Template>, ClientError> {
        let query: Vec<(&str, &str)> = kind.map(|k| ("tipo", k.as_str())).into_iter().collect();
        let url = self.endpoint_with_query(&["api", "templates"], &query)?;
        self.execute(self.get(url), "templates").await
    }

    /// Stores a new template (`POST /api/templates`).
    ///
    /// # Errors
    ///
    /// See [`ApiClient::templates`].
    pub async fn create_template(&self, template: &NewTemplate) -> Result<Template, ClientError> {
        let url = self.endpoint(&["api", "templates"])?;
        self.execute(self.post(url).json(template), "create_template").await
    }

    /// Deletes a template (`DELETE /api/templates/{id}`).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::UnexpectedStatus`] with status 404 when the
    /// template does not exist; otherwise see [`ApiClient::templates`].
    pub async fn delete_template(&self, id: i64) -> Result<(), ClientError> {
        let id_text = id.to_string();
        let url = self.endpoint(&["api", "templates", id_text.as_str()])?;
        let envelope: ApiResponse<Value> = self
            .execute(self.delete(url), &format!("delete_template(id={id})"))
            .await?;
        envelope.check()
    }

    /// Runs a read-only query on the SQL console (`POST /api/sql/execute`).
    ///
    /// The backend accepts only statements starting with `SELECT`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::UnexpectedStatus`] with the backend's `detail`
    /// when the query is rejected; otherwise see [`ApiClient::templates`].
    pub async fn execute_sql(&self, query: &str) -> Result<SqlResult, ClientError> {
        let url = self.endpoint(&["api", "sql", "execute"])?;
        let body = serde_json::json!({ "query": query });
        self.execute(self.post(url).json(&body), "execute_sql").await
    }
}
