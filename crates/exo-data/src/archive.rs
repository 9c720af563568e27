//! NASA Exoplanet Archive ingestion (TAP sync queries)

use crate::catalog::read_csv;
use crate::error::{CatalogError, CatalogResult};
use crate::schema::REQUIRED_COLUMNS;
use crate::table::Table;

use exo_core::constants::{ARCHIVE_TABLE, ARCHIVE_TAP_URL};
use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Url;
use std::time::Duration;

/// Column-selection query against one archive table
#[derive(Clone, Debug, PartialEq)]
pub struct ArchiveQuery {
    pub endpoint: String,
    pub table: String,
    pub columns: Vec<String>,
}

impl Default for ArchiveQuery {
    fn default() -> Self {
        Self {
            endpoint: ARCHIVE_TAP_URL.to_string(),
            table: ARCHIVE_TABLE.to_string(),
            columns: REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl ArchiveQuery {
    pub fn for_table(table: impl Into<String>) -> Self {
        Self { table: table.into(), ..Self::default() }
    }

    /// ADQL text, e.g. `select ra,dec from ps`
    pub fn adql(&self) -> String {
        format!("select {} from {}", self.columns.join(","), self.table)
    }

    /// Full request URL asking for CSV output
    pub fn url(&self) -> CatalogResult<Url> {
        Url::parse_with_params(&self.endpoint, &[("query", self.adql().as_str()), ("format", "csv")])
            .map_err(|e| CatalogError::Query(format!("invalid endpoint {}: {}", self.endpoint, e)))
    }

    /// Run the query and parse the response into a catalog table.
    /// No retries; any transport or status failure is returned.
    pub async fn fetch(&self) -> CatalogResult<Table> {
        let url = self.url()?;
        tracing::info!("Querying archive: {}", self.adql());

        let client = reqwest::Client::new();
        let response = client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(CatalogError::Query(format!("archive returned status {}", response.status())));
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {bytes} ({bytes_per_sec})")
            .expect("template error"));
        pb.enable_steady_tick(Duration::from_millis(100));

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            body.extend_from_slice(&chunk);
            pb.inc(chunk.len() as u64);
        }
        pb.finish_with_message("Download complete");

        let table = read_csv(body.as_slice())?;
        tracing::info!("Archive returned {} rows", table.num_rows());
        Ok(table)
    }
}
