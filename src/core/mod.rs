//! Extraction core.
//!
//! # Modules
//!
//! - [`paginate`] - Splits the configured date range into page windows
//! - [`cursor`] - Tracks pages fetched out of the total
//! - [`project`] - Maps day records onto the configured field order
//! - [`extract`] - Drives one fetch per page and returns rows
//! - [`sink`] - Writes rows to CSV
//!
//! # Extraction Workflow
//!
//! 1. **Validate**: Check the `[source]` mapping and fix the page count
//! 2. **Fetch**: Request the window at the cursor's index
//! 3. **Project**: Turn each day record into a row in field order
//! 4. **Advance**: Move the cursor once the page fully succeeded
//! 5. **Persist** (caller): Hand rows to a sink such as [`sink::CsvSink`]

pub mod cursor;
pub mod extract;
pub mod paginate;
pub mod project;
pub mod sink;

pub use cursor::BatchCursor;
pub use extract::{Extractor, ExtractorState};
pub use paginate::{DateRangePaginator, PageWindow, PAGE_SIZE_DAYS};
pub use project::RowProjector;
pub use sink::{output_path, CsvSink};
