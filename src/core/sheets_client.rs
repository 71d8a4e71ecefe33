// src/core/sheets_client.rs
//! Append-only worksheet logging through the Google Sheets and Drive APIs

use anyhow::{Context, Result};
use reqwest::{RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info, trace};

use crate::core::google_auth::{ServiceAccountAuth, ServiceAccountKey};
use crate::types::records::{JobPostRecord, ResearchRecord};
use crate::types::response::Notice;
use crate::utils::a1_sheet_range;

pub const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4";
pub const DRIVE_API_BASE: &str = "https://www.googleapis.com/drive/v3";
const SPREADSHEET_MIME_TYPE: &str = "application/vnd.google-apps.spreadsheet";

const NEW_WORKSHEET_ROWS: u32 = 1000;
const NEW_WORKSHEET_COLS: u32 = 10;

pub const NOT_CONFIGURED_WARNING: &str =
    "Google Sheets не настроен. Проверьте gcp_service_account в secrets и доступ к таблице.";
pub const JOB_POST_SAVED: &str = "✅ Объявление сохранено в Google Sheets (JobPosts).";
pub const RESEARCH_SAVED: &str = "✅ Инсайты сохранены в Google Sheets (ResearchInsights).";

#[rocket::async_trait]
pub trait SheetStore: Send + Sync {
    /// Append one row at the end of the worksheet, creating the worksheet
    /// first if the spreadsheet does not have it yet.
    async fn append_row(&self, worksheet: &str, row: Vec<String>) -> Result<()>;

    fn spreadsheet_name(&self) -> &str;
}

#[derive(Debug, Deserialize)]
struct DriveFile {
    id: String,
}

#[derive(Debug, Deserialize)]
struct DriveFileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    title: String,
}

#[derive(Debug, Deserialize)]
struct Sheet {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<Sheet>,
}

impl SpreadsheetMeta {
    fn has_worksheet(&self, title: &str) -> bool {
        self.sheets.iter().any(|s| s.properties.title == title)
    }
}

/// Base URLs of the two Google APIs
#[derive(Debug, Clone, PartialEq)]
pub struct GoogleApiEndpoints {
    pub sheets: String,
    pub drive: String,
}

impl Default for GoogleApiEndpoints {
    fn default() -> Self {
        Self {
            sheets: SHEETS_API_BASE.to_string(),
            drive: DRIVE_API_BASE.to_string(),
        }
    }
}

pub struct GoogleSheetsClient {
    client: reqwest::Client,
    auth: ServiceAccountAuth,
    spreadsheet_name: String,
    endpoints: GoogleApiEndpoints,
}

impl GoogleSheetsClient {
    pub fn new(
        key: ServiceAccountKey,
        spreadsheet_name: String,
        timeout_seconds: u64,
    ) -> Result<Self> {
        Self::with_endpoints(
            key,
            spreadsheet_name,
            timeout_seconds,
            GoogleApiEndpoints::default(),
        )
    }

    pub fn with_endpoints(
        key: ServiceAccountKey,
        spreadsheet_name: String,
        timeout_seconds: u64,
        endpoints: GoogleApiEndpoints,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        let auth = ServiceAccountAuth::new(key, client.clone())?;

        Ok(Self {
            client,
            auth,
            spreadsheet_name,
            endpoints: GoogleApiEndpoints {
                sheets: endpoints.sheets.trim_end_matches('/').to_string(),
                drive: endpoints.drive.trim_end_matches('/').to_string(),
            },
        })
    }

    pub fn service_account(&self) -> &str {
        self.auth.client_email()
    }

    /// Authorized request returning parsed JSON
    async fn execute<R>(&self, request: RequestBuilder, what: &str) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let token = self.auth.access_token().await?;

        let response = request
            .bearer_auth(token)
            .send()
            .await
            .with_context(|| format!("Failed to {}", what))?;

        let status = response.status();
        if status.is_success() {
            response
                .json::<R>()
                .await
                .with_context(|| format!("Failed to parse response to {}", what))
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!("Failed to {}: HTTP {}: {}", what, status, error_text)
        }
    }

    async fn find_spreadsheet_id(&self) -> Result<String> {
        let url = format!("{}/files", self.endpoints.drive);
        let query = drive_name_query(&self.spreadsheet_name);

        trace!("Looking up spreadsheet '{}'", self.spreadsheet_name);

        let request = self.client.get(&url).query(&[
            ("q", query.as_str()),
            ("fields", "files(id,name)"),
            ("pageSize", "1"),
            ("supportsAllDrives", "true"),
            ("includeItemsFromAllDrives", "true"),
        ]);

        let list: DriveFileList = self.execute(request, "look up spreadsheet").await?;

        list.files
            .into_iter()
            .next()
            .map(|file| file.id)
            .with_context(|| {
                format!(
                    "Spreadsheet '{}' not found or not shared with {}",
                    self.spreadsheet_name,
                    self.auth.client_email()
                )
            })
    }

    async fn spreadsheet_meta(&self, spreadsheet_id: &str) -> Result<SpreadsheetMeta> {
        let url = format!("{}/spreadsheets/{}", self.endpoints.sheets, spreadsheet_id);
        let request = self
            .client
            .get(&url)
            .query(&[("fields", "sheets.properties.title")]);

        self.execute(request, "read spreadsheet metadata").await
    }

    async fn add_worksheet(&self, spreadsheet_id: &str, title: &str) -> Result<()> {
        let url = format!(
            "{}/spreadsheets/{}:batchUpdate",
            self.endpoints.sheets, spreadsheet_id
        );
        let payload = json!({
            "requests": [{
                "addSheet": {
                    "properties": {
                        "title": title,
                        "gridProperties": {
                            "rowCount": NEW_WORKSHEET_ROWS,
                            "columnCount": NEW_WORKSHEET_COLS
                        }
                    }
                }
            }]
        });

        let _: serde_json::Value = self
            .execute(self.client.post(&url).json(&payload), "create worksheet")
            .await?;

        info!(
            "Created worksheet '{}' in spreadsheet '{}'",
            title, self.spreadsheet_name
        );
        Ok(())
    }

    async fn append_values(
        &self,
        spreadsheet_id: &str,
        worksheet: &str,
        row: Vec<String>,
    ) -> Result<()> {
        let range = a1_sheet_range(worksheet);
        let url = append_url(&self.endpoints.sheets, spreadsheet_id, &range)?;
        let payload = json!({
            "range": range,
            "majorDimension": "ROWS",
            "values": [row],
        });

        let request = self
            .client
            .post(url)
            .query(&[
                ("valueInputOption", "RAW"),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .json(&payload);

        let _: serde_json::Value = self.execute(request, "append row").await?;
        Ok(())
    }
}

#[rocket::async_trait]
impl SheetStore for GoogleSheetsClient {
    async fn append_row(&self, worksheet: &str, row: Vec<String>) -> Result<()> {
        let spreadsheet_id = self.find_spreadsheet_id().await?;

        let meta = self.spreadsheet_meta(&spreadsheet_id).await?;
        if !meta.has_worksheet(worksheet) {
            self.add_worksheet(&spreadsheet_id, worksheet).await?;
        }

        self.append_values(&spreadsheet_id, worksheet, row).await?;

        info!(
            "Appended row to '{}' / '{}'",
            self.spreadsheet_name, worksheet
        );
        Ok(())
    }

    fn spreadsheet_name(&self) -> &str {
        &self.spreadsheet_name
    }
}

/// Drive search expression matching a non-trashed spreadsheet by exact name
fn drive_name_query(name: &str) -> String {
    let escaped = name.replace('\\', "\\\\").replace('\'', "\\'");
    format!(
        "name = '{}' and mimeType = '{}' and trashed = false",
        escaped, SPREADSHEET_MIME_TYPE
    )
}

fn append_url(sheets_base: &str, spreadsheet_id: &str, range: &str) -> Result<Url> {
    let mut url = Url::parse(&format!(
        "{}/spreadsheets/{}/values",
        sheets_base, spreadsheet_id
    ))
    .context("Invalid Sheets API URL")?;

    url.path_segments_mut()
        .map_err(|_| anyhow::anyhow!("Sheets API URL cannot be a base"))?
        .push(&format!("{}:append", range));

    Ok(url)
}

async fn append_with_notice(
    store: Option<&dyn SheetStore>,
    worksheet: &str,
    row: Vec<String>,
    success_message: &str,
) -> Notice {
    let Some(store) = store else {
        return Notice::warning(NOT_CONFIGURED_WARNING);
    };

    match store.append_row(worksheet, row).await {
        Ok(()) => Notice::success(success_message),
        Err(e) => {
            error!(
                "Failed to append to '{}' / '{}': {:#}",
                store.spreadsheet_name(),
                worksheet,
                e
            );
            Notice::error(format!("Ошибка при записи в Google Sheets: {:#}", e))
        }
    }
}

/// Save a generated job post; without a store nothing is written
pub async fn append_job_post(
    store: Option<&dyn SheetStore>,
    worksheet: &str,
    record: &JobPostRecord,
) -> Notice {
    append_with_notice(store, worksheet, record.to_row(), JOB_POST_SAVED).await
}

/// Save research insights; without a store nothing is written
pub async fn append_research(
    store: Option<&dyn SheetStore>,
    worksheet: &str,
    record: &ResearchRecord,
) -> Notice {
    append_with_notice(store, worksheet, record.to_row(), RESEARCH_SAVED).await
}
