//! CSV report file.

use crate::error::{ReportError, ReportResult};
use crate::row::{row_cells, CSV_HEADER};
use std::path::Path;
use tracing::info;
use uptime_scoring::ValidatorScore;

/// Default output file name.
pub const DEFAULT_CSV_PATH: &str = "result.csv";

/// Write the header and one record per score to `path`, replacing any
/// existing file.
pub fn write_csv<P: AsRef<Path>>(path: P, scores: &[ValidatorScore]) -> ReportResult<()> {
    let path = path.as_ref();
    let wrap = |source: csv::Error| ReportError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::Writer::from_path(path).map_err(wrap)?;
    writer.write_record(CSV_HEADER).map_err(wrap)?;
    for score in scores {
        writer.write_record(row_cells(score)).map_err(wrap)?;
    }
    writer.flush().map_err(|e| wrap(csv::Error::from(e)))?;

    info!(path = %path.display(), rows = scores.len(), "Wrote CSV report");
    Ok(())
}
