//! Record editing: per-entity CRUD and the generic table browser.

use consultavd_core::Record;
use serde::Deserialize;
use serde_json::Value;

use crate::client::ApiClient;
use crate::error::ClientError;
use crate::types::{ApiResponse, Entity, TableData, TableQuery};

#[derive(Debug, Deserialize)]
struct InsertedRow {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct UpdatedRows {
    updated: u64,
}

#[derive(Debug, Deserialize)]
struct DeletedRows {
    deleted: u64,
}

impl ApiClient {
    /// One store row by id (`GET /api/lojas/{id}`).
    ///
    /// # Errors
    ///
    /// - [`ClientError::UnexpectedStatus`] with status 404 when the store
    ///   does not exist.
    /// - [`ClientError::Api`] or [`ClientError::MissingData`] on a failed
    ///   or empty envelope.
    pub async fn store(&self, id: i64) -> Result<Record, ClientError> {
        let context = format!("store(id={id})");
        let id_text = id.to_string();
        let url = self.endpoint(&["api", "lojas", id_text.as_str()])?;
        let envelope: ApiResponse<Record> = self.execute(self.get(url), &context).await?;
        envelope.into_data(&context)
    }

    /// Creates a row (`POST /api/{entity}`) and returns it as stored.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::store`]. The backend answers 422 when a required
    /// column is missing.
    pub async fn create_record(
        &self,
        entity: Entity,
        fields: &Record,
    ) -> Result<Record, ClientError> {
        let context = format!("create_record({entity})");
        let url = self.endpoint(&["api", entity.path()])?;
        let envelope: ApiResponse<Record> =
            self.execute(self.post(url).json(fields), &context).await?;
        envelope.into_data(&context)
    }

    /// Updates the given columns of a row (`PUT /api/{entity}/{id}`).
    ///
    /// # Errors
    ///
    /// See [`ApiClient::create_record`].
    pub async fn update_record(
        &self,
        entity: Entity,
        id: i64,
        fields: &Record,
    ) -> Result<Record, ClientError> {
        let context = format!("update_record({entity}, id={id})");
        let id_text = id.to_string();
        let url = self.endpoint(&["api", entity.path(), id_text.as_str()])?;
        let envelope: ApiResponse<Record> =
            self.execute(self.put(url).json(fields), &context).await?;
        envelope.into_data(&context)
    }

    /// Deletes a row (`DELETE /api/{entity}/{id}`) and returns the backend's
    /// confirmation message.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::store`].
    pub async fn delete_record(
        &self,
        entity: Entity,
        id: i64,
    ) -> Result<Option<String>, ClientError> {
        let context = format!("delete_record({entity}, id={id})");
        let id_text = id.to_string();
        let url = self.endpoint(&["api", entity.path(), id_text.as_str()])?;
        let envelope: ApiResponse<Value> = self.execute(self.delete(url), &context).await?;
        envelope.check()?;
        Ok(envelope.message)
    }

    /// Names of every table in the backend database (`GET /api/tables`).
    ///
    /// # Errors
    ///
    /// See [`ApiClient::store`].
    pub async fn tables(&self) -> Result<Vec<String>, ClientError> {
        let url = self.endpoint(&["api", "tables"])?;
        let envelope: ApiResponse<Vec<String>> = self.execute(self.get(url), "tables").await?;
        envelope.into_data("tables")
    }

    /// A window of raw rows (`GET /api/table/{name}`).
    ///
    /// # Errors
    ///
    /// See [`ApiClient::store`]. An unknown table surfaces as
    /// [`ClientError::UnexpectedStatus`] with status 500.
    pub async fn table_rows(
        &self,
        table: &str,
        query: &TableQuery,
    ) -> Result<TableData, ClientError> {
        let context = format!("table_rows({table})");
        let owned = query.pairs();
        let pairs: Vec<(&str, &str)> = owned.iter().map(|(k, v)| (*k, v.as_str())).collect();
        let url = self.endpoint_with_query(&["api", "table", table], &pairs)?;
        let envelope: ApiResponse<TableData> = self.execute(self.get(url), &context).await?;
        envelope.into_data(&context)
    }

    /// Inserts a raw row (`POST /api/table/{name}`) and returns its row id.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::table_rows`].
    pub async fn insert_row(&self, table: &str, fields: &Record) -> Result<i64, ClientError> {
        let context = format!("insert_row({table})");
        let url = self.endpoint(&["api", "table", table])?;
        let envelope: ApiResponse<InsertedRow> =
            self.execute(self.post(url).json(fields), &context).await?;
        Ok(envelope.into_data(&context)?.id)
    }

    /// Updates a raw row by primary key (`PUT /api/table/{name}/{id}`) and
    /// returns the number of rows changed.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::table_rows`].
    pub async fn update_row(
        &self,
        table: &str,
        id: i64,
        fields: &Record,
    ) -> Result<u64, ClientError> {
        let context = format!("update_row({table}, id={id})");
        let id_text = id.to_string();
        let url = self.endpoint(&["api", "table", table, id_text.as_str()])?;
        let envelope: ApiResponse<UpdatedRows> =
            self.execute(self.put(url).json(fields), &context).await?;
        Ok(envelope.into_data(&context)?.updated)
    }

    /// Deletes a raw row by primary key (`DELETE /api/table/{name}/{id}`)
    /// and returns the number of rows removed.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::table_rows`].
    pub async fn delete_row(&self, table: &str, id: i64) -> Result<u64, ClientError> {
        let context = format!("delete_row({table}, id={id})");
        let id_text = id.to_string();
        let url = self.endpoint(&["api", "table", table, id_text.as_str()])?;
        let envelope: ApiResponse<DeletedRows> = self.execute(self.delete(url), &context).await?;
        Ok(envelope.into_data(&context)?.deleted)
    }
}
