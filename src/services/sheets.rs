//! Google Sheets service implementation
//!
//! Appends log rows to the configured worksheet through the Sheets v4
//! `values:append` endpoint.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use crate::config::SheetsConfig;
use crate::utils::errors::{PersistenceError, PersistenceResult, Result, ShedLogError};
use super::google_auth::GoogleAuth;

/// Request body for `values:append`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange<'a> {
    pub major_dimension: &'static str,
    pub values: Vec<&'a [String]>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendResponse {
    pub spreadsheet_id: Option<String>,
    pub table_range: Option<String>,
    pub updates: Option<UpdateValuesResponse>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateValuesResponse {
    pub updated_range: Option<String>,
    pub updated_rows: Option<u32>,
    pub updated_cells: Option<u32>,
}

/// Sheets client bound to one worksheet
#[derive(Clone)]
pub struct SheetsService {
    config: SheetsConfig,
    http_client: reqwest::Client,
    auth: GoogleAuth,
}

impl SheetsService {
    /// Create a new SheetsService instance
    pub fn new(config: SheetsConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .user_agent("ShedLog-Bot/1.0")
            .build()
            .map_err(ShedLogError::Http)?;

        let auth = GoogleAuth::from_config(&config, http_client.clone())?;

        Ok(Self {
            config,
            http_client,
            auth,
        })
    }

    /// `values:append` URL for the worksheet, with the sheet name quoted as an A1 range
    pub fn append_url(&self) -> String {
        let range = format!("'{}'!A1", self.config.worksheet_name.replace('\'', "''"));
        format!(
            "{}/v4/spreadsheets/{}/values/{}:append",
            self.config.api_base_url.trim_end_matches('/'),
            urlencoding::encode(&self.config.spreadsheet_id),
            urlencoding::encode(&range),
        )
    }

    /// Append a single row; returns the range the API reports as updated
    pub async fn append_row(&self, row: &[String]) -> PersistenceResult<Option<String>> {
        let token = self.auth.access_token().await?;
        let body = ValueRange {
            major_dimension: "ROWS",
            values: vec![row],
        };

        debug!(worksheet = %self.config.worksheet_name, cells = row.len(), "Appending row to sheet");

        let response = self
            .http_client
            .post(self.append_url())
            .query(&[("valueInputOption", "RAW"), ("insertDataOption", "INSERT_ROWS")])
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(|e| PersistenceError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            self.auth.invalidate().await;
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Sheets API refused credentials");
            return Err(PersistenceError::AuthenticationFailed(format!("{}: {}", status, body)));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PersistenceError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: AppendResponse = response
            .json()
            .await
            .map_err(|e| PersistenceError::InvalidResponse(e.to_string()))?;

        let updated_range = parsed.updates.and_then(|u| u.updated_range);
        info!(updated_range = ?updated_range, "Row appended to sheet");

        Ok(updated_range)
    }
}
