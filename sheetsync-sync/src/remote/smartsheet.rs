//! Smartsheet storage implementation.
//!
//! Uses Smartsheet API 2.0 for sheet and report reads and row mutations.
//! The access token is injected through [`SmartsheetConfig`]; acquiring or
//! refreshing it is the caller's business. No call is retried.

use super::{RemotePage, RemoteSheets, Source};
use crate::error::{SyncError, SyncResult};
use crate::plan::{CellWrite, NewRow, RowUpdate};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use sheetsync_types::{CellValue, Column, ColumnId, ColumnKind, Row, RowId, SheetId, SourceSheet};
use std::time::Duration;
use tracing::{debug, info};

/// Smartsheet specific configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct SmartsheetConfig {
    /// API access token.
    pub access_token: String,
    /// Base URL for the API (e.g. `https://api.smartsheet.com/2.0`).
    pub api_base_url: String,
    /// Per-request timeout.
    pub timeout_secs: u64,
}

impl Default for SmartsheetConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            api_base_url: "https://api.smartsheet.com/2.0".to_string(),
            timeout_secs: 60,
        }
    }
}

impl std::fmt::Debug for SmartsheetConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmartsheetConfig")
            .field("access_token", &"<redacted>")
            .field("api_base_url", &self.api_base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Smartsheet API response structures.
///
/// Sheets and reports share a shape, except that report columns and cells
/// are addressed by virtual ids.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiTable {
    #[serde(default)]
    name: String,
    total_row_count: Option<usize>,
    #[serde(default)]
    columns: Vec<ApiColumn>,
    #[serde(default)]
    rows: Vec<ApiRow>,
    #[serde(default)]
    source_sheets: Vec<SourceSheet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiColumn {
    id: Option<i64>,
    virtual_id: Option<i64>,
    title: String,
    #[serde(rename = "type")]
    column_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiRow {
    id: i64,
    #[serde(default)]
    cells: Vec<ApiCell>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiCell {
    column_id: Option<i64>,
    virtual_column_id: Option<i64>,
    value: Option<CellValue>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiCellWrite<'a> {
    column_id: ColumnId,
    value: &'a CellValue,
}

#[derive(Debug, Serialize)]
struct ApiRowUpdate<'a> {
    id: RowId,
    cells: Vec<ApiCellWrite<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiNewRow<'a> {
    to_bottom: bool,
    cells: Vec<ApiCellWrite<'a>>,
}

fn cells_to_api(cells: &[CellWrite]) -> Vec<ApiCellWrite<'_>> {
    cells
        .iter()
        .map(|c| ApiCellWrite {
            column_id: c.column_id,
            value: &c.value,
        })
        .collect()
}

impl ApiTable {
    fn into_page(self, source: Source) -> SyncResult<RemotePage> {
        let columns = self
            .columns
            .into_iter()
            .map(|c| {
                let id = if source.is_aggregate_view {
                    c.virtual_id.or(c.id)
                } else {
                    c.id
                };
                let id = id.ok_or_else(|| {
                    SyncError::Protocol(format!("column {:?} has no id", c.title))
                })?;
                let kind = c
                    .column_type
                    .as_deref()
                    .map_or(ColumnKind::Unknown, ColumnKind::from_api_type);
                Ok(Column::new(ColumnId::new(id), c.title, kind))
            })
            .collect::<SyncResult<Vec<_>>>()?;

        let rows = self
            .rows
            .into_iter()
            .map(|r| {
                let mut row = Row::with_id(RowId::new(r.id));
                for cell in r.cells {
                    let column = if source.is_aggregate_view {
                        cell.virtual_column_id.or(cell.column_id)
                    } else {
                        cell.column_id
                    };
                    if let (Some(column), Some(value)) = (column, cell.value) {
                        row.set(ColumnId::new(column), value);
                    }
                }
                row
            })
            .collect();

        Ok(RemotePage {
            rows,
            columns,
            total_row_count: self.total_row_count,
            source_name: self.name,
            source_sheets: self.source_sheets,
        })
    }
}

/// Smartsheet storage implementation.
pub struct SmartsheetClient {
    config: SmartsheetConfig,
    client: Client,
}

impl SmartsheetClient {
    /// Creates a client. Fails if no access token is configured.
    pub fn new(config: SmartsheetConfig) -> SyncResult<Self> {
        if config.access_token.is_empty() {
            return Err(SyncError::Configuration(
                "Smartsheet access token is not set".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SyncError::Configuration(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &SmartsheetConfig {
        &self.config
    }

    fn rows_url(&self, sheet_id: SheetId) -> String {
        format!("{}/sheets/{}/rows", self.config.api_base_url, sheet_id)
    }

    async fn send(&self, request: RequestBuilder, what: &str) -> SyncResult<Response> {
        let response = request
            .bearer_auth(&self.config.access_token)
            .send()
            .await
            .map_err(|e| SyncError::RemoteUnavailable(format!("{what} failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error = response.text().await.unwrap_or_default();
            return Err(SyncError::RemoteUnavailable(format!(
                "{what} failed: {status} {error}"
            )));
        }

        Ok(response)
    }
}

#[async_trait]
impl RemoteSheets for SmartsheetClient {
    fn provider_name(&self) -> &'static str {
        "Smartsheet"
    }

    async fn fetch_page(
        &self,
        source: Source,
        page_size: usize,
        page_number: usize,
    ) -> SyncResult<RemotePage> {
        let page_size = page_size.to_string();
        let page = page_number.to_string();
        let request = if source.is_aggregate_view {
            self.client
                .get(format!("{}/reports/{}", self.config.api_base_url, source.id))
                .query(&[
                    ("pageSize", page_size.as_str()),
                    ("page", page.as_str()),
                    ("include", "sourceSheets"),
                ])
        } else {
            self.client
                .get(format!("{}/sheets/{}", self.config.api_base_url, source.id))
                .query(&[("pageSize", page_size.as_str()), ("page", page.as_str())])
        };

        debug!("Fetching page {} of {} (size {})", page, source.id, page_size);
        let response = self.send(request, "fetch page").await?;
        let table: ApiTable = response
            .json()
            .await
            .map_err(|e| SyncError::Protocol(format!("failed to parse page: {e}")))?;

        table.into_page(source)
    }

    async fn delete_rows(&self, sheet_id: SheetId, row_ids: &[RowId]) -> SyncResult<()> {
        let ids = row_ids
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");

        let request = self
            .client
            .delete(self.rows_url(sheet_id))
            .query(&[("ids", ids.as_str())]);
        self.send(request, "delete rows").await?;

        info!("Deleted {} rows from {}", row_ids.len(), sheet_id);
        Ok(())
    }

    async fn update_rows(&self, sheet_id: SheetId, rows: &[RowUpdate]) -> SyncResult<()> {
        let body: Vec<ApiRowUpdate<'_>> = rows
            .iter()
            .map(|r| ApiRowUpdate {
                id: r.id,
                cells: cells_to_api(&r.cells),
            })
            .collect();

        let request = self.client.put(self.rows_url(sheet_id)).json(&body);
        self.send(request, "update rows").await?;

        info!("Updated {} rows in {}", rows.len(), sheet_id);
        Ok(())
    }

    async fn add_rows(&self, sheet_id: SheetId, rows: &[NewRow]) -> SyncResult<()> {
        let body: Vec<ApiNewRow<'_>> = rows
            .iter()
            .map(|r| ApiNewRow {
                to_bottom: true,
                cells: cells_to_api(&r.cells),
            })
            .collect();

        let request = self.client.post(self.rows_url(sheet_id)).json(&body);
        self.send(request, "add rows").await?;

        info!("Added {} rows to {}", rows.len(), sheet_id);
        Ok(())
    }
}
