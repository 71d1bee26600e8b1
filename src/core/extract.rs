//! Paginated extraction orchestrator
//!
//! [`Extractor`] pulls one page of day records per call:
//!
//! 1. Ask the paginator for the window at the cursor's index
//! 2. Issue exactly one fetch for that window
//! 3. Parse the JSON array and project each record in response order
//! 4. Advance the cursor, then return the rows
//!
//! The cursor is only replaced after steps 2 and 3 succeed, so a failed call
//! can be retried and will request the same window again.
//!
//! # Example
//!
//! ```rust,no_run
//! use chomp_sendgrid::adapters::HttpTransport;
//! use chomp_sendgrid::config::load_config;
//! use chomp_sendgrid::core::Extractor;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("chomp.toml")?;
//! let transport = Arc::new(HttpTransport::new(Duration::from_secs(30))?);
//! let mut extractor = Extractor::from_config(&config, transport)?;
//!
//! while !extractor.is_exhausted() {
//!     let rows = extractor.get_next_batch().await?;
//!     println!("{} rows", rows.len());
//! }
//! # Ok(())
//! # }
//! ```

use crate::adapters::sendgrid::{parse_day_records, StatsRequestBuilder};
use crate::adapters::transport::Transport;
use crate::config::{validator, ApiConfig, ChompConfig, Credentials, SourceTable, ValidatedConfig};
use crate::core::cursor::BatchCursor;
use crate::core::paginate::{DateRangePaginator, PageWindow};
use crate::core::project::RowProjector;
use crate::domain::{ChompError, DayRecord, ProjectionError, Result, Row};
use std::sync::Arc;

/// Lifecycle of an extractor after construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractorState {
    /// Pages remain to be fetched
    Ready,
    /// Every page has been fetched; further calls return no rows
    Exhausted,
}

/// Pull-based extractor over a validated date range
///
/// Not meant for concurrent use: `get_next_batch` takes `&mut self`.
pub struct Extractor {
    config: ValidatedConfig,
    credentials: Credentials,
    paginator: DateRangePaginator,
    cursor: BatchCursor,
    projector: RowProjector,
    requests: StatsRequestBuilder,
    transport: Arc<dyn Transport>,
}

impl Extractor {
    /// Validate `source` and prepare to extract
    ///
    /// # Errors
    ///
    /// - [`ChompError::Validation`] if the source mapping fails validation
    /// - [`ChompError::InvalidDateRange`] if `end-date` precedes `start-date`
    /// - [`ChompError::Transport`] if the endpoint URL cannot be built
    pub fn new(
        source: &SourceTable,
        credentials: Credentials,
        api: &ApiConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        let config = validator::validate(source)?;

        if config.end_date < config.start_date {
            return Err(ChompError::InvalidDateRange {
                start: config.start_date,
                end: config.end_date,
            });
        }

        let paginator = DateRangePaginator::new(config.start_date, config.end_date);
        let cursor = BatchCursor::new(paginator.total_pages());
        let requests = StatsRequestBuilder::new(&api.base_url, config.api_kind)?;

        tracing::info!(
            api_kind = %config.api_kind,
            start_date = %config.start_date,
            end_date = %config.end_date,
            total_pages = paginator.total_pages(),
            fields = ?config.fields,
            "Extractor ready"
        );

        Ok(Self {
            config,
            credentials,
            paginator,
            cursor,
            projector: RowProjector::new(api.missing_metric),
            requests,
            transport,
        })
    }

    /// Build an extractor from a loaded configuration file
    pub fn from_config(config: &ChompConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        Self::new(
            &config.source,
            config.credentials.clone(),
            &config.api,
            transport,
        )
    }

    pub fn config(&self) -> &ValidatedConfig {
        &self.config
    }

    pub fn cursor(&self) -> BatchCursor {
        self.cursor
    }

    pub fn total_pages(&self) -> u32 {
        self.paginator.total_pages()
    }

    pub fn state(&self) -> ExtractorState {
        if self.cursor.is_exhausted() {
            ExtractorState::Exhausted
        } else {
            ExtractorState::Ready
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.state() == ExtractorState::Exhausted
    }

    /// Every window of the range in page order, fetched or not
    pub fn windows(&self) -> impl Iterator<Item = PageWindow> + '_ {
        self.paginator.windows()
    }

    /// Window the next call will request, if any
    pub fn next_window(&self) -> Option<PageWindow> {
        (!self.cursor.is_exhausted()).then(|| self.paginator.window_for(self.cursor.current_index()))
    }

    /// Fetch and project the next page
    ///
    /// Returns an empty list once exhausted, on every call.
    ///
    /// # Errors
    ///
    /// - [`ChompError::Transport`] on fetch failure or a malformed body
    /// - [`ChompError::Projection`] if a configured field is missing
    ///
    /// The cursor does not move on error.
    pub async fn get_next_batch(&mut self) -> Result<Vec<Row>> {
        if self.cursor.is_exhausted() {
            tracing::debug!(total_pages = self.total_pages(), "Extractor exhausted");
            return Ok(Vec::new());
        }

        let page = self.cursor.current_index();
        let window = self.paginator.window_for(page);
        let request = self.requests.build(&window, &self.credentials);

        tracing::debug!(
            page = page + 1,
            total_pages = self.total_pages(),
            window = %window,
            "Fetching page"
        );

        let body = self.transport.fetch(&request).await.map_err(|e| {
            tracing::warn!(page = page + 1, window = %window, error = %e, "Page fetch failed");
            e
        })?;
        let records = parse_day_records(&body)?;
        let rows = self.project_all(&records)?;

        self.cursor = self.cursor.advance()?;

        tracing::info!(
            page = page + 1,
            total_pages = self.total_pages(),
            window = %window,
            rows = rows.len(),
            "Page extracted"
        );

        Ok(rows)
    }

    fn project_all(&self, records: &[DayRecord]) -> Result<Vec<Row>> {
        if records.is_empty() {
            return Ok(Vec::new());
        }
        let fields = self
            .config
            .fields
            .as_deref()
            .ok_or(ProjectionError::FieldsNotConfigured)?;

        let rows = records
            .iter()
            .map(|record| self.projector.project(record, fields))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}
