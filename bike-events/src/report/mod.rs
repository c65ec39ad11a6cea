//! Report rendering.
//!
//! Turns the finder's results into a static HTML page (or JSON) listing
//! each event with the stations around it.

mod error;
pub mod templates;

use std::path::{Path, PathBuf};

use askama::Template;
use tracing::debug;

use crate::domain::Event;

pub use error::ReportError;
pub use templates::{EventView, ReportTemplate, StationView};

/// Output format of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReportFormat {
    /// Static HTML table
    #[default]
    Html,
    /// JSON array of events
    Json,
}

/// Render `events` in the given format.
pub fn render(events: &[Event], format: ReportFormat) -> Result<String, ReportError> {
    match format {
        ReportFormat::Html => Ok(ReportTemplate::from_events(events).render()?),
        ReportFormat::Json => {
            let views: Vec<EventView> = events.iter().map(EventView::from_event).collect();
            Ok(serde_json::to_string_pretty(&views)?)
        }
    }
}

/// Render `events` and write them to `path`.
///
/// Returns the absolute path of the written file.
pub fn write_report(
    events: &[Event],
    format: ReportFormat,
    path: &Path,
) -> Result<PathBuf, ReportError> {
    let io_error = |source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    };

    let contents = render(events, format)?;
    std::fs::write(path, contents).map_err(io_error)?;
    debug!(path = %path.display(), ?format, "report written");

    std::path::absolute(path).map_err(io_error)
}
